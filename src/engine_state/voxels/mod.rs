//! # Voxel World
//!
//! Representation and generation of the block world.
//!
//! ## Architecture
//!
//! * **Block**: block types, faces, materials and integer cell coordinates
//! * **BlockStore**: the sparse map from cell to block type that everything else reads
//! * **Terrain**: the seeded generator that fills the store once at startup
//!
//! ## Data Flow
//!
//! 1. The session creates an empty store
//! 2. Terrain generation fills it with columns, then trees
//! 3. Collision and selection read it every tick
//! 4. Selection removes at most one block per tick
//! 5. The renderer walks the live blocks once per frame

pub mod block;
pub mod block_store;
pub mod terrain;
