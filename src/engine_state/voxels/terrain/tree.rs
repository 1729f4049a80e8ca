//! # Tree Module
//!
//! Places a single tree: a vertical wood trunk topped by a diamond-shaped leaf canopy.
//!
//! Trees never overwrite an occupied cell. The trunk goes in first, so the
//! canopy wraps around it rather than replacing it.

use std::ops::RangeInclusive;

use crate::engine_state::voxels::{
    block::{block_type::BlockType, BlockPos},
    block_store::BlockStore,
};

/// Possible trunk heights, in blocks.
pub const TRUNK_HEIGHT_RANGE: RangeInclusive<i32> = 5..=7;
/// Half-width of the cube of candidate canopy offsets.
pub const CANOPY_RADIUS: i32 = 2;
/// Largest Manhattan distance from the canopy centre that still gets a leaf.
pub const CANOPY_MAX_DISTANCE: i32 = 3;
/// How far below the trunk top the canopy centre sits.
pub const CANOPY_DROP: i32 = 2;

/// Places a tree whose lowest trunk block is at `root`.
///
/// The trunk fills `root.y .. root.y + trunk_height`. The trunk top is the
/// first cell above the last wood block, and the canopy is centred
/// [`CANOPY_DROP`] cells below it.
///
/// # Returns
/// The number of blocks actually written.
pub fn place_tree(store: &mut BlockStore, root: BlockPos, trunk_height: i32) -> usize {
    let mut placed = 0;

    for dy in 0..trunk_height {
        if store.put_if_vacant(BlockPos::new(root.x, root.y + dy, root.z), BlockType::WOOD) {
            placed += 1;
        }
    }

    let trunk_top = root.y + trunk_height;
    let canopy_center = BlockPos::new(root.x, trunk_top - CANOPY_DROP, root.z);

    for ox in -CANOPY_RADIUS..=CANOPY_RADIUS {
        for oy in -CANOPY_RADIUS..=CANOPY_RADIUS {
            for oz in -CANOPY_RADIUS..=CANOPY_RADIUS {
                if ox.abs() + oy.abs() + oz.abs() > CANOPY_MAX_DISTANCE {
                    continue;
                }
                let leaf = BlockPos::new(
                    canopy_center.x + ox,
                    canopy_center.y + oy,
                    canopy_center.z + oz,
                );
                if store.put_if_vacant(leaf, BlockType::LEAVES) {
                    placed += 1;
                }
            }
        }
    }

    placed
}
