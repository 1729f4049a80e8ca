//! # Voxel Sandbox Entry Point
//!
//! Runs the headless sandbox: generates a world and plays a short scripted session.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_sandbox::run();
}
