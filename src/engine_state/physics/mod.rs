//! # Collision
//!
//! Broad-phase collision between the player hitbox and the block store.
//!
//! A candidate position is tested by scanning every grid cell within
//! [`CHECK_RADIUS`] of it and overlap-testing each occupied cell's unit cube
//! against the hitbox. The first overlap ends the scan.
//!
//! There is no swept or continuous test. A hitbox that moves further than a
//! block's width in a single step can pass straight through it, and because
//! callers test horizontal and vertical motion separately a fast diagonal move
//! can clip a block corner. Both are known limitations of this approach.

use std::ops::RangeInclusive;

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{block::BlockPos, block_store::BlockStore};

pub mod aabb;

use aabb::Aabb;

/// How many cells around the candidate position are scanned on each axis.
pub const CHECK_RADIUS: f32 = 2.0;

/// Answers "would a hitbox here overlap any block?" against a block store.
pub struct CollisionSystem<'a> {
    store: &'a BlockStore,
}

impl<'a> CollisionSystem<'a> {
    /// Creates a collision query over a store.
    pub fn new(store: &'a BlockStore) -> Self {
        CollisionSystem { store }
    }

    /// Returns the first block whose unit cube overlaps a hitbox centred at
    /// `position` with the given half-extents, if any.
    pub fn first_collision(
        &self,
        position: Point3<f32>,
        half_extents: Vector3<f32>,
    ) -> Option<BlockPos> {
        let hitbox = Aabb::from_center(position, half_extents);

        let x_range = cells_around(position.x);
        let y_range = cells_around(position.y);
        let z_range = cells_around(position.z);

        for x in x_range {
            for y in y_range.clone() {
                for z in z_range.clone() {
                    let cell = BlockPos::new(x, y, z);
                    if self.store.contains(cell) && hitbox.intersects(&Aabb::of_block(cell)) {
                        return Some(cell);
                    }
                }
            }
        }

        None
    }

    /// Whether a hitbox centred at `position` would overlap any block.
    ///
    /// A `true` result is an ordinary outcome: the caller should simply not
    /// commit the move.
    pub fn would_collide(&self, position: Point3<f32>, half_extents: Vector3<f32>) -> bool {
        self.first_collision(position, half_extents).is_some()
    }
}

/// Cells within [`CHECK_RADIUS`] of `centre` along one axis.
fn cells_around(centre: f32) -> RangeInclusive<i32> {
    (centre - CHECK_RADIUS).floor() as i32..=(centre + CHECK_RADIUS).ceil() as i32
}
