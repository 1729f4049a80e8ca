//! # Engine State Module
//!
//! The session that owns the voxel world and the player and advances them one tick at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for a play session
//! * `camera_state` - The first-person camera pose
//! * `clock` - Injectable time sources
//! * `physics` - Axis-aligned boxes and block collision
//! * `player` - Movement flags, gravity and jumping
//! * `selection` - Crosshair raycasting and timed block breaking
//! * `voxels` - Blocks, the block store and terrain generation
//!
//! ## Architecture
//!
//! There is no global game object. `EngineState` owns every subsystem and hands each
//! one exactly the state it needs for the duration of a call. Construction order is
//! fixed: the block store first, then terrain generation into it, then locomotion and
//! selection, which only ever borrow the store.
//!
//! ## Tick model
//!
//! One tick runs to completion per frame. While the pointer is unlocked, ticks and
//! input do nothing. Otherwise a tick runs locomotion first and then re-casts the
//! selection ray from the camera's new pose, so the outline always matches what the
//! player is looking at after moving.

use cgmath::{Point3, Rad, Vector3};
use log::{debug, info};

use crate::{
    application_state::input_state::{Action, ProcessedInputState},
    config::WorldConfig,
    core::StResource,
};

pub mod camera_state;
pub mod clock;
pub mod physics;
pub mod player;
pub mod selection;
pub mod voxels;

use camera_state::Camera;
use clock::{Clock, SystemClock};
use player::{Locomotion, MoveOutcome, MovementFlag, PlayerState};
use selection::{raycast::Ray, BreakProgress, SelectionOutline, SelectionSystem};
use voxels::{
    block::Block,
    block_store::BlockStore,
    terrain::{GenerationStats, TerrainGenerator},
};

/// Radians of view rotation per unit of pointer motion
pub const LOOK_SENSITIVITY: f32 = 0.002;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Whether the tick ran at all; false while unlocked.
    pub ran: bool,
    /// Locomotion results.
    pub movement: MoveOutcome,
    /// The block removed by a completed break, if any.
    pub broken: Option<Block>,
}

/// The main state container for a play session
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{EngineState, WorldConfig};
///
/// let config = WorldConfig {
///     world_radius: 4,
///     ..WorldConfig::default()
/// };
/// let mut engine_state = EngineState::new(config);
/// engine_state.set_locked(true);
///
/// let report = engine_state.tick();
/// assert!(report.ran);
/// assert!(!engine_state.blocks().get().is_empty());
/// ```
pub struct EngineState {
    /// The voxel world, shared with the renderer
    world: StResource<BlockStore>,
    /// Camera pose, which is also the player's position
    camera: Camera,
    /// Movement flags, vertical velocity and hitbox
    player: PlayerState,
    /// Locomotion constants
    locomotion: Locomotion,
    /// Crosshair selection and block breaking
    selection: SelectionSystem,
    /// Time source for break timing
    clock: Box<dyn Clock>,
    /// The configuration the session was built from
    config: WorldConfig,
    /// Summary of the terrain generation run, if terrain was generated
    generation_stats: Option<GenerationStats>,
    /// Whether the pointer is locked and the session is live
    locked: bool,
    /// Ticks run so far
    tick_count: u64,
}

impl EngineState {
    /// Creates a session with freshly generated terrain on the wall clock.
    pub fn new(config: WorldConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Creates a session with freshly generated terrain on the given clock.
    pub fn with_clock(config: WorldConfig, clock: Box<dyn Clock>) -> Self {
        let mut store = BlockStore::new();
        let stats = TerrainGenerator::from_config(&config).generate(&mut store);
        let mut engine_state = Self::with_world(config, store, clock);
        engine_state.generation_stats = Some(stats);
        engine_state
    }

    /// Creates a session around an existing world without generating terrain.
    pub fn with_world(config: WorldConfig, store: BlockStore, clock: Box<dyn Clock>) -> Self {
        let [x, y, z] = config.spawn_position;
        let [hx, hy, hz] = config.player_half_extents;

        info!(
            "Session starting with {} blocks, spawn at ({}, {}, {})",
            store.len(),
            x,
            y,
            z
        );

        Self {
            world: StResource::new(store),
            camera: Camera::new(Point3::new(x, y, z), Rad(0.0), Rad(0.0)),
            player: PlayerState::new(Vector3::new(hx, hy, hz)),
            locomotion: Locomotion::from_config(&config),
            selection: SelectionSystem::from_config(&config),
            clock,
            config,
            generation_stats: None,
            locked: false,
            tick_count: 0,
        }
    }

    /// A shared handle to the block store for the render collaborator.
    pub fn blocks(&self) -> StResource<BlockStore> {
        self.world.clone()
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Summary of terrain generation, if this session generated its world.
    pub fn generation_stats(&self) -> Option<&GenerationStats> {
        self.generation_stats.as_ref()
    }

    /// The camera pose.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera pose, for the look controller.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The player state.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// The selection state machine.
    pub fn selection(&self) -> &SelectionSystem {
        &self.selection
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the pointer is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locks or unlocks the pointer.
    ///
    /// Unlocking releases every movement flag and abandons any break in progress.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked == locked {
            return;
        }
        self.locked = locked;
        if !locked {
            self.player.clear_movement();
            self.selection.stop_breaking();
        }
        info!("Pointer {}", if locked { "locked" } else { "unlocked" });
    }

    /// Sets or clears a movement flag. Ignored while unlocked.
    pub fn set_movement(&mut self, flag: MovementFlag, active: bool) {
        if self.locked {
            self.player.set_movement(flag, active);
        }
    }

    /// Requests a jump on the next tick. Ignored while unlocked.
    pub fn jump(&mut self) {
        if self.locked {
            self.player.request_jump();
        }
    }

    /// Starts breaking the targeted block. Ignored while unlocked.
    ///
    /// # Returns
    /// Whether a break started.
    pub fn start_breaking(&mut self) -> bool {
        self.locked && self.selection.start_breaking(self.clock.now())
    }

    /// Abandons a break in progress. Ignored while unlocked.
    pub fn stop_breaking(&mut self) {
        if self.locked {
            self.selection.stop_breaking();
        }
    }

    /// Applies one frame of processed input.
    ///
    /// Movement flags follow whether their action is down, jump and break-start fire
    /// on the press edge, and break-stop fires on the release edge. Pointer motion
    /// turns the camera.
    pub fn apply_input(&mut self, input: &ProcessedInputState) {
        if !self.locked {
            return;
        }

        for action in Action::ALL {
            if let Some(flag) = action.movement_flag() {
                self.set_movement(flag, input.get_action_state(action).is_active());
            }
        }

        if input.get_action_state(Action::Jump).is_just_pressed() {
            self.jump();
        }

        let break_state = input.get_action_state(Action::Break);
        if break_state.is_just_pressed() {
            self.start_breaking();
        } else if break_state.is_just_released() {
            self.stop_breaking();
        }

        if let Some((dx, dy)) = input.get_look_delta() {
            self.camera.rotate(
                Rad(dx as f32 * LOOK_SENSITIVITY),
                Rad(-dy as f32 * LOOK_SENSITIVITY),
            );
        }
    }

    /// Advances the session by one tick.
    ///
    /// Does nothing while unlocked.
    pub fn tick(&mut self) -> TickReport {
        if !self.locked {
            return TickReport::default();
        }

        let mut world = self.world.get_mut();
        let movement = self
            .locomotion
            .update(&mut self.player, &mut self.camera, &world);

        let ray = Ray::new(self.camera.position, self.camera.forward());
        let broken = self.selection.update(&mut world, &ray, self.clock.now());
        if let Some(block) = broken {
            debug!("Tick {} removed {} at {}", self.tick_count, block.block_type, block.position);
        }

        self.tick_count += 1;
        TickReport {
            ran: true,
            movement,
            broken,
        }
    }

    /// Selection outline for the renderer.
    pub fn selection_outline(&self) -> SelectionOutline {
        self.selection.outline()
    }

    /// Break progress indicator for the renderer.
    pub fn break_progress(&self) -> BreakProgress {
        self.selection.break_progress()
    }
}
