//! Axis-aligned bounding boxes for the player hitbox and unit blocks.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::BlockPos;

/// Half-extent of a unit block on every axis.
pub const BLOCK_HALF_EXTENT: f32 = 0.5;

/// An axis-aligned box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f32>,
    /// Maximum corner
    pub max: Point3<f32>,
}

impl Aabb {
    /// Builds a box from its centre and half-extents.
    pub fn from_center(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// The unit cube occupied by a block.
    pub fn of_block(position: BlockPos) -> Self {
        Self::from_center(
            position.center(),
            Vector3::new(BLOCK_HALF_EXTENT, BLOCK_HALF_EXTENT, BLOCK_HALF_EXTENT),
        )
    }

    /// Separating-axis overlap test.
    ///
    /// Boxes overlap when their intervals intersect on all three axes. Touching
    /// faces count as overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
