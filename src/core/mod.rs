//! # Core Module
//!
//! This module provides the resource container used to share state between the
//! session and its collaborators.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with a
//!   single-writer, many-reader borrow discipline
//!
//! ## Usage
//! ```rust
//! use voxel_sandbox::core::StResource;
//!
//! let counter = StResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod st_resource;

pub use st_resource::StResource;
