//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block.
//! Faces index per-face materials and name the side of a block a selection ray entered.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant corresponds to a specific face and is assigned a unique integer value
/// used to index six-face material arrays.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// This is useful for iterating over all possible faces of a block.
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Determines which face a ray travelling along `direction` enters when it
    /// crosses a block boundary perpendicular to `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// A ray moving in the positive direction of an axis enters through the
    /// face pointing towards the negative side, and vice versa.
    pub fn entered_from(axis: usize, direction: f32) -> BlockSide {
        match (axis, direction >= 0.0) {
            (0, true) => BlockSide::LEFT,
            (0, false) => BlockSide::RIGHT,
            (1, true) => BlockSide::BOTTOM,
            (1, false) => BlockSide::TOP,
            (_, true) => BlockSide::BACK,
            (_, false) => BlockSide::FRONT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entered_face_points_back_at_the_ray() {
        for axis in 0..3 {
            for direction in [1.0f32, -1.0] {
                let side = BlockSide::entered_from(axis, direction);
                let normal = side.normal();
                let component = [normal.x, normal.y, normal.z][axis] as f32;
                assert_eq!(component, -direction);
            }
        }
    }
}
