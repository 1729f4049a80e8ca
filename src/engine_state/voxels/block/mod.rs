//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, materials, the
//! integer grid coordinate used as the block store key, and the plain-old-data
//! instance format handed to the renderer.

use std::fmt;

use block_type::BlockType;
use cgmath::Point3;

pub mod block_side;
pub mod block_type;
pub mod material;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage and serialization of block data.
pub type BlockTypeSize = u8;

/// An integer grid coordinate. Block `(x, y, z)` is the unit cube centred on
/// that point, spanning `x - 0.5 ..= x + 0.5` on each axis.
///
/// The derived ordering is lexicographic on `(x, y, z)`, which gives the key a
/// total order; hashing is over the three integers directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    /// X coordinate
    pub x: i32,
    /// Y coordinate (up)
    pub y: i32,
    /// Z coordinate
    pub z: i32,
}

impl BlockPos {
    /// Creates a new grid coordinate.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockPos { x, y, z }
    }

    /// Returns the grid cell whose unit cube contains a world-space point.
    ///
    /// Cells are centred on integers, so this rounds half up on each axis.
    pub fn containing(point: Point3<f32>) -> Self {
        BlockPos {
            x: (point.x + 0.5).floor() as i32,
            y: (point.y + 0.5).floor() as i32,
            z: (point.z + 0.5).floor() as i32,
        }
    }

    /// The world-space centre of this cell.
    pub fn center(self) -> Point3<f32> {
        Point3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<Point3<i32>> for BlockPos {
    fn from(point: Point3<i32>) -> Self {
        BlockPos::new(point.x, point.y, point.z)
    }
}

impl From<BlockPos> for Point3<i32> {
    fn from(pos: BlockPos) -> Self {
        Point3::new(pos.x, pos.y, pos.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Represents a single voxel block in the world.
///
/// Blocks are immutable once created; the only change a block ever sees is
/// being removed from the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Where the block sits.
    pub position: BlockPos,
    /// What the block is made of.
    pub block_type: BlockType,
}

impl Block {
    /// Creates a new block of the specified type at a coordinate.
    pub fn new(position: BlockPos, block_type: BlockType) -> Self {
        Block {
            position,
            block_type,
        }
    }
}

/// GPU instance record for one block.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute ensures a consistent memory layout for GPU interoperability.
/// The block type is widened to `u32` so the record has no padding.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct BlockInstance {
    /// Grid coordinate of the block.
    pub position: [i32; 3],
    /// `BlockType` tag.
    pub block_type: u32,
}

impl BlockInstance {
    /// Decodes the block type tag, if it names a known type.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockTypeSize::try_from(self.block_type)
            .ok()
            .and_then(BlockType::from_int)
    }
}

impl From<Block> for BlockInstance {
    fn from(block: Block) -> Self {
        BlockInstance {
            position: [block.position.x, block.position.y, block.position.z],
            block_type: block.block_type.as_int() as u32,
        }
    }
}
