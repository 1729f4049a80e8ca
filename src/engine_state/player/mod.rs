//! # Player Locomotion
//!
//! Integrates movement intent and gravity into the camera position, one tick at a time.
//!
//! ## Tick order
//!
//! 1. Gravity reduces the vertical velocity.
//! 2. The four movement flags are combined with the camera's horizontal basis
//!    into a unit intent direction.
//! 3. The horizontal step is tested for collision and committed only if free.
//! 4. The vertical step is tested from the (possibly moved) position. A blocked
//!    step zeroes the velocity, and a blocked fall also lets the player jump again.
//! 5. A hard floor at `min_height` catches anything that fell through the terrain.
//! 6. A pending jump fires if the player is grounded.
//!
//! Horizontal and vertical motion are resolved separately, so the player slides
//! along walls instead of sticking to them.

use cgmath::{InnerSpace, Vector3, Zero};
use log::{debug, trace};

use crate::{config::WorldConfig, engine_state::physics::CollisionSystem};

use super::{camera_state::Camera, voxels::block_store::BlockStore};

/// One of the four horizontal movement inputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MovementFlag {
    /// Towards the camera's horizontal forward
    Forward,
    /// Away from the camera's horizontal forward
    Backward,
    /// Towards the camera's horizontal left
    Left,
    /// Towards the camera's horizontal right
    Right,
}

/// Mutable per-player state. The position lives in the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Vertical velocity in blocks per tick, before the `move_speed` scale.
    pub velocity_y: f32,
    /// Forward flag
    pub move_forward: bool,
    /// Backward flag
    pub move_backward: bool,
    /// Left flag
    pub move_left: bool,
    /// Right flag
    pub move_right: bool,
    /// Half-extents of the hitbox centred on the camera.
    pub half_extents: Vector3<f32>,
    /// Whether the player is standing on something and may jump.
    pub can_jump: bool,
    jump_requested: bool,
}

impl PlayerState {
    /// Creates a resting player with the given hitbox.
    pub fn new(half_extents: Vector3<f32>) -> Self {
        PlayerState {
            velocity_y: 0.0,
            move_forward: false,
            move_backward: false,
            move_left: false,
            move_right: false,
            half_extents,
            can_jump: true,
            jump_requested: false,
        }
    }

    /// Sets or clears one movement flag.
    pub fn set_movement(&mut self, flag: MovementFlag, active: bool) {
        match flag {
            MovementFlag::Forward => self.move_forward = active,
            MovementFlag::Backward => self.move_backward = active,
            MovementFlag::Left => self.move_left = active,
            MovementFlag::Right => self.move_right = active,
        }
    }

    /// Clears every movement flag and any pending jump.
    pub fn clear_movement(&mut self) {
        self.move_forward = false;
        self.move_backward = false;
        self.move_left = false;
        self.move_right = false;
        self.jump_requested = false;
    }

    /// Asks for a jump on the next tick.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// The unit horizontal direction the flags ask for, or zero.
    ///
    /// Opposing flags cancel each other.
    pub fn intent_direction(&self, camera: &Camera) -> Vector3<f32> {
        let forward_amount = self.move_forward as i32 - self.move_backward as i32;
        let right_amount = self.move_right as i32 - self.move_left as i32;

        let direction = camera.horizontal_forward() * forward_amount as f32
            + camera.horizontal_right() * right_amount as f32;

        if direction.magnitude2() > f32::EPSILON {
            direction.normalize()
        } else {
            Vector3::zero()
        }
    }
}

/// What happened during one locomotion tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// A horizontal step was wanted but a block was in the way.
    pub horizontal_blocked: bool,
    /// The vertical step hit a block.
    pub vertical_blocked: bool,
    /// The floor clamp caught the player.
    pub floor_clamped: bool,
    /// A jump fired this tick.
    pub jumped: bool,
}

/// Locomotion constants, normally taken from [`WorldConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    /// Horizontal distance per tick, also the vertical velocity scale.
    pub move_speed: f32,
    /// Vertical velocity lost per tick.
    pub gravity: f32,
    /// Vertical velocity added by a jump.
    pub jump_impulse: f32,
    /// Lowest height the camera may reach.
    pub min_height: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

impl Locomotion {
    /// Reads the locomotion constants from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        Locomotion {
            move_speed: config.move_speed,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            min_height: config.min_height,
        }
    }

    /// Advances the player by one tick.
    pub fn update(
        &self,
        player: &mut PlayerState,
        camera: &mut Camera,
        store: &BlockStore,
    ) -> MoveOutcome {
        let collision = CollisionSystem::new(store);
        let mut outcome = MoveOutcome::default();

        player.velocity_y -= self.gravity;

        let direction = player.intent_direction(camera);
        if direction != Vector3::zero() {
            let candidate = camera.position + direction * self.move_speed;
            if collision.would_collide(candidate, player.half_extents) {
                trace!("Horizontal move to {:?} blocked", candidate);
                outcome.horizontal_blocked = true;
            } else {
                camera.position = candidate;
            }
        }

        let mut candidate = camera.position;
        candidate.y += player.velocity_y * self.move_speed;
        if collision.would_collide(candidate, player.half_extents) {
            if player.velocity_y < 0.0 {
                player.can_jump = true;
            }
            player.velocity_y = 0.0;
            outcome.vertical_blocked = true;
        } else {
            camera.position.y = candidate.y;
        }

        if camera.position.y <= self.min_height {
            camera.position.y = self.min_height;
            player.velocity_y = 0.0;
            player.can_jump = true;
            outcome.floor_clamped = true;
        }

        if player.jump_requested && player.can_jump {
            player.velocity_y += self.jump_impulse;
            player.can_jump = false;
            outcome.jumped = true;
            debug!("Jump from {:?}", camera.position);
        }
        player.jump_requested = false;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, BlockPos};
    use cgmath::{Deg, Point3};

    fn player() -> PlayerState {
        PlayerState::new(Vector3::new(0.3, 0.9, 0.3))
    }

    fn camera_at(x: f32, y: f32, z: f32) -> Camera {
        Camera::new(Point3::new(x, y, z), Deg(0.0), Deg(0.0))
    }

    /// A flat stone floor whose top surface is at y = 0.5.
    fn floor(radius: i32) -> BlockStore {
        let mut store = BlockStore::new();
        for x in -radius..=radius {
            for z in -radius..=radius {
                store.put(BlockPos::new(x, 0, z), BlockType::STONE);
            }
        }
        store
    }

    #[test]
    fn opposing_flags_cancel() {
        let camera = camera_at(0.0, 0.0, 0.0);
        let mut player = player();
        player.set_movement(MovementFlag::Forward, true);
        player.set_movement(MovementFlag::Backward, true);
        assert_eq!(player.intent_direction(&camera), Vector3::zero());

        player.set_movement(MovementFlag::Left, true);
        let direction = player.intent_direction(&camera);
        assert!((direction - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn diagonal_intent_is_normalised() {
        let camera = camera_at(0.0, 0.0, 0.0);
        let mut player = player();
        player.set_movement(MovementFlag::Forward, true);
        player.set_movement(MovementFlag::Right, true);
        assert!((player.intent_direction(&camera).magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn falling_onto_blocks_lands_and_allows_jumping() {
        let store = floor(3);
        let mut camera = camera_at(0.0, 6.0, 0.0);
        let mut player = player();
        player.can_jump = false;
        let locomotion = Locomotion {
            min_height: -100.0,
            ..Locomotion::default()
        };

        let mut landed = false;
        for _ in 0..200 {
            let outcome = locomotion.update(&mut player, &mut camera, &store);
            if outcome.vertical_blocked {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert!(player.can_jump);
        assert_eq!(player.velocity_y, 0.0);
        assert!(camera.position.y - 0.9 > 0.5);
    }

    #[test]
    fn walls_block_horizontal_motion_but_not_falling() {
        let mut store = BlockStore::new();
        for y in 0..10 {
            store.put(BlockPos::new(1, y, 0), BlockType::STONE);
        }
        // One step forward puts the hitbox edge at x = 0.55, past the wall face at 0.5.
        let mut camera = camera_at(0.15, 5.0, 0.0);
        let mut player = player();
        player.set_movement(MovementFlag::Forward, true);
        let locomotion = Locomotion::default();

        let outcome = locomotion.update(&mut player, &mut camera, &store);
        assert!(outcome.horizontal_blocked);
        assert_eq!(camera.position.x, 0.15);
        assert!(camera.position.y < 5.0);
    }

    #[test]
    fn floor_clamp_catches_a_fall_through_empty_space() {
        let store = BlockStore::new();
        let mut camera = camera_at(0.0, 50.0, 0.0);
        let mut player = player();
        player.can_jump = false;
        let locomotion = Locomotion::default();

        for _ in 0..500 {
            locomotion.update(&mut player, &mut camera, &store);
            assert!(camera.position.y >= locomotion.min_height);
        }
        assert_eq!(camera.position.y, locomotion.min_height);
        assert!(player.can_jump);
    }

    #[test]
    fn jump_needs_ground_and_consumes_it() {
        let store = BlockStore::new();
        let mut camera = camera_at(0.0, 2.0, 0.0);
        let mut player = player();
        let locomotion = Locomotion::default();

        player.request_jump();
        let outcome = locomotion.update(&mut player, &mut camera, &store);
        assert!(outcome.jumped);
        assert!(!player.can_jump);
        assert_eq!(player.velocity_y, locomotion.jump_impulse);

        locomotion.update(&mut player, &mut camera, &store);
        assert!(camera.position.y > 2.0);

        player.request_jump();
        let outcome = locomotion.update(&mut player, &mut camera, &store);
        assert!(!outcome.jumped);
    }
}
