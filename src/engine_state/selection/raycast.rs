//! Ray casting against the occupied cells of a block store.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::{
    physics::aabb::Aabb,
    voxels::{
        block::{block_side::BlockSide, BlockPos},
        block_store::BlockStore,
    },
};

/// A half-line from `origin` along the unit vector `dir`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Where the ray starts
    pub origin: Point3<f32>,
    /// Unit direction
    pub dir: Vector3<f32>,
}

/// The nearest block a ray hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHit {
    /// The block that was hit.
    pub position: BlockPos,
    /// The face the ray entered through.
    pub face: BlockSide,
    /// Distance along the ray to the entry point.
    pub distance: f32,
}

impl Ray {
    /// Creates a ray, normalising the direction.
    pub fn new(origin: Point3<f32>, dir: Vector3<f32>) -> Self {
        Ray {
            origin,
            dir: dir.normalize(),
        }
    }

    /// Evaluate the ray at a t-value to get a concrete position.
    pub fn get(&self, t: f32) -> Point3<f32> {
        self.origin + self.dir * t
    }

    /// Slab test against a box.
    ///
    /// Returns the entry distance and the axis the ray entered through. Boxes
    /// behind the origin, or containing it, are not hit: a ray only hits a
    /// block from outside.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<(f32, usize)> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        let mut entry_axis = 0;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.dir[axis];
            let (min, max) = (aabb.min[axis], aabb.max[axis]);

            if dir.abs() < f32::EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let t1 = (min - origin) / dir;
            let t2 = (max - origin) / dir;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_min {
                t_min = near;
                entry_axis = axis;
            }
            t_max = t_max.min(far);
        }

        if t_max < t_min || t_min < 0.0 {
            return None;
        }
        Some((t_min, entry_axis))
    }
}

/// Finds the nearest occupied cell the ray enters within `reach`.
///
/// Only cells inside the bounding box of the reach segment, grown by one cell on
/// each side, are considered. The slab test and the reach check decide the rest,
/// so a face lying exactly at `reach` or on a cell boundary is still found.
/// Equal distances resolve to the smaller coordinate so the result does not
/// depend on store iteration order.
pub fn cast(store: &BlockStore, ray: &Ray, reach: f32) -> Option<BlockHit> {
    let end = ray.get(reach);
    let low = BlockPos::containing(Point3::new(
        ray.origin.x.min(end.x),
        ray.origin.y.min(end.y),
        ray.origin.z.min(end.z),
    ));
    let high = BlockPos::containing(Point3::new(
        ray.origin.x.max(end.x),
        ray.origin.y.max(end.y),
        ray.origin.z.max(end.z),
    ));

    let mut best: Option<BlockHit> = None;

    for x in low.x - 1..=high.x + 1 {
        for y in low.y - 1..=high.y + 1 {
            for z in low.z - 1..=high.z + 1 {
                let position = BlockPos::new(x, y, z);
                if !store.contains(position) {
                    continue;
                }
                let Some((distance, axis)) = ray.intersect_aabb(&Aabb::of_block(position)) else {
                    continue;
                };
                if distance > reach {
                    continue;
                }
                let closer = match best {
                    None => true,
                    Some(current) => {
                        distance < current.distance
                            || (distance == current.distance && position < current.position)
                    }
                };
                if closer {
                    best = Some(BlockHit {
                        position,
                        face: BlockSide::entered_from(axis, ray.dir[axis]),
                        distance,
                    });
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    fn store_with(positions: &[BlockPos]) -> BlockStore {
        let mut store = BlockStore::new();
        for &position in positions {
            store.put(position, BlockType::STONE);
        }
        store
    }

    #[test]
    fn nearest_block_along_the_ray_wins() {
        let store = store_with(&[BlockPos::new(4, 0, 0), BlockPos::new(2, 0, 0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x());

        let hit = cast(&store, &ray, 5.0).expect("hit");
        assert_eq!(hit.position, BlockPos::new(2, 0, 0));
        assert_eq!(hit.face, BlockSide::LEFT);
        assert!((hit.distance - 1.5).abs() < 1e-5);
    }

    #[test]
    fn blocks_beyond_reach_are_ignored() {
        let store = store_with(&[BlockPos::new(6, 0, 0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x());
        assert!(cast(&store, &ray, 5.0).is_none());

        // Entry face at 5.5 is just out of reach.
        assert!(cast(&store, &ray, 5.4).is_none());
        assert!(cast(&store, &ray, 5.6).is_some());
    }

    #[test]
    fn face_exactly_at_reach_is_hit() {
        let store = store_with(&[BlockPos::new(-5, 0, 0)]);
        let ray = Ray::new(Point3::new(0.5, 0.0, 0.0), -Vector3::unit_x());

        let hit = cast(&store, &ray, 5.0).expect("hit at the reach limit");
        assert_eq!(hit.position, BlockPos::new(-5, 0, 0));
        assert_eq!(hit.face, BlockSide::RIGHT);
        assert!((hit.distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn blocks_behind_the_camera_are_ignored() {
        let store = store_with(&[BlockPos::new(-2, 0, 0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x());
        assert!(cast(&store, &ray, 5.0).is_none());
    }

    #[test]
    fn looking_down_hits_the_top_face() {
        let store = store_with(&[BlockPos::new(0, 0, 0)]);
        let ray = Ray::new(Point3::new(0.0, 3.0, 0.0), -Vector3::unit_y());
        let hit = cast(&store, &ray, 5.0).expect("hit");
        assert_eq!(hit.face, BlockSide::TOP);
        assert!((hit.distance - 2.5).abs() < 1e-5);
    }

    #[test]
    fn the_block_containing_the_origin_is_not_hit() {
        let store = store_with(&[BlockPos::new(0, 0, 0), BlockPos::new(0, 0, 3)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_z());
        let hit = cast(&store, &ray, 5.0).expect("hit");
        assert_eq!(hit.position, BlockPos::new(0, 0, 3));
    }

    #[test]
    fn diagonal_rays_find_offset_blocks() {
        let store = store_with(&[BlockPos::new(2, -2, 0)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, -1.0, 0.0));
        let hit = cast(&store, &ray, 5.0).expect("hit");
        assert_eq!(hit.position, BlockPos::new(2, -2, 0));
    }
}
