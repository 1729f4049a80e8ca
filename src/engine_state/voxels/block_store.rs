//! # Block Store Module
//!
//! This module provides the `BlockStore`, the single source of truth for which
//! grid cells are occupied and by what.
//!
//! ## Architecture
//!
//! The store is sparse: only occupied coordinates have an entry, so an empty
//! cell costs nothing and "air" is simply absence. Lookups, insertions and
//! removals are all keyed by [`BlockPos`] and run in O(1) through a hash map.
//!
//! Nothing else in the crate keeps a copy of occupancy. Render data is derived
//! on demand from the store, so removing a block also removes its renderable.

use std::collections::HashMap;

use super::block::{
    block_type::BlockType, material::MaterialDescriptor, Block, BlockInstance, BlockPos,
};

/// A sparse mapping from grid coordinate to block type.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{BlockPos, BlockStore, BlockType};
///
/// let mut store = BlockStore::new();
/// store.put(BlockPos::new(0, 0, 0), BlockType::STONE);
/// assert!(store.get(BlockPos::new(0, 0, 0)).is_some());
/// assert!(store.remove(BlockPos::new(0, 0, 0)));
/// assert!(store.get(BlockPos::new(0, 0, 0)).is_none());
/// ```
#[derive(Default, Debug, Clone, PartialEq)]
pub struct BlockStore {
    blocks: HashMap<BlockPos, BlockType>,
}

/// One live block as the renderer sees it.
#[derive(Copy, Clone, Debug)]
pub struct RenderableBlock {
    /// Grid coordinate, also the key the renderer should cache objects under.
    pub position: BlockPos,
    /// The block's type.
    pub block_type: BlockType,
    /// How to draw it.
    pub material: &'static MaterialDescriptor,
}

impl BlockStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        BlockStore {
            blocks: HashMap::new(),
        }
    }

    /// Inserts a block, overwriting whatever occupied the cell before.
    ///
    /// # Returns
    /// The type previously stored at `position`, if any.
    pub fn put(&mut self, position: BlockPos, block_type: BlockType) -> Option<BlockType> {
        self.blocks.insert(position, block_type)
    }

    /// Inserts a block only if the cell is empty.
    ///
    /// # Returns
    /// `true` if the block was inserted, `false` if the cell was already occupied.
    pub fn put_if_vacant(&mut self, position: BlockPos, block_type: BlockType) -> bool {
        match self.blocks.entry(position) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(block_type);
                true
            }
        }
    }

    /// Looks up the block at a coordinate.
    pub fn get(&self, position: BlockPos) -> Option<Block> {
        self.blocks
            .get(&position)
            .map(|&block_type| Block::new(position, block_type))
    }

    /// Whether a cell is occupied.
    pub fn contains(&self, position: BlockPos) -> bool {
        self.blocks.contains_key(&position)
    }

    /// Removes the block at a coordinate.
    ///
    /// Removing an empty cell is a no-op. After this returns, `get(position)`
    /// resolves to `None`.
    ///
    /// # Returns
    /// `true` if a block existed and was removed.
    pub fn remove(&mut self, position: BlockPos) -> bool {
        self.take(position).is_some()
    }

    /// Removes the block at a coordinate and returns it.
    pub fn take(&mut self, position: BlockPos) -> Option<Block> {
        self.blocks
            .remove(&position)
            .map(|block_type| Block::new(position, block_type))
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates every live block.
    ///
    /// Iteration order is unspecified and may change between calls; callers
    /// must not depend on it.
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .iter()
            .map(|(&position, &block_type)| Block::new(position, block_type))
    }

    /// Iterates every live block together with its material, for drawing.
    pub fn renderables(&self) -> impl Iterator<Item = RenderableBlock> + '_ {
        self.iter().map(|block| RenderableBlock {
            position: block.position,
            block_type: block.block_type,
            material: block.block_type.material(),
        })
    }

    /// Packs every live block into instance records ready for a GPU upload.
    pub fn instance_data(&self) -> Vec<BlockInstance> {
        self.iter().map(BlockInstance::from).collect()
    }
}
