//! # Block Selection
//!
//! Tracks the block under the crosshair and times the breaking of it.
//!
//! ## States
//!
//! * **Idle**: the centre ray hits nothing within reach.
//! * **Targeting**: the ray hits a block; the nearest hit is the target.
//! * **Breaking**: the player started a break on the current target. Progress
//!   is `elapsed / duration`. When the duration is reached the block is removed
//!   from the store in the same update that ends the break, so progress is
//!   never observed at 100% with the block still present.
//!
//! Releasing the break action, looking at a different block, or losing the
//! target altogether abandons a break without removing anything.

use log::debug;
use web_time::{Duration, Instant};

use crate::config::WorldConfig;

use super::voxels::{
    block::{Block, BlockPos},
    block_store::BlockStore,
};

pub mod raycast;

use raycast::{BlockHit, Ray};

/// Where the selection state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SelectionState {
    /// Nothing selected.
    Idle,
    /// Looking at a block.
    Targeting {
        /// The block under the crosshair
        target: BlockHit,
    },
    /// Breaking the block under the crosshair.
    Breaking {
        /// The block being broken
        target: BlockHit,
        /// When the break started
        started: Instant,
        /// Fraction of the break completed at the last update, always below 1
        progress: f32,
    },
}

/// Outline drawn around the selected block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionOutline {
    /// Cell to outline, if any.
    pub position: Option<BlockPos>,
    /// Whether the outline should be drawn.
    pub visible: bool,
}

/// Break progress indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakProgress {
    /// Completed fraction in [0, 1).
    pub fraction: f32,
    /// Whether the indicator should be shown.
    pub visible: bool,
}

/// Crosshair selection and timed block breaking.
#[derive(Debug, Clone)]
pub struct SelectionSystem {
    state: SelectionState,
    reach: f32,
    break_duration: Duration,
}

impl SelectionSystem {
    /// Creates an idle selection system.
    pub fn new(reach: f32, break_duration: Duration) -> Self {
        SelectionSystem {
            state: SelectionState::Idle,
            reach,
            break_duration,
        }
    }

    /// Reads reach and break duration from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.reach, Duration::from_millis(config.break_duration_ms))
    }

    /// The current state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The targeted block, if any.
    pub fn target(&self) -> Option<BlockHit> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Targeting { target } | SelectionState::Breaking { target, .. } => {
                Some(target)
            }
        }
    }

    /// Whether a break is in progress.
    pub fn is_breaking(&self) -> bool {
        matches!(self.state, SelectionState::Breaking { .. })
    }

    /// Break progress as of the last update; zero unless breaking.
    pub fn progress(&self) -> f32 {
        match self.state {
            SelectionState::Breaking { progress, .. } => progress,
            _ => 0.0,
        }
    }

    /// Selection outline for the renderer.
    pub fn outline(&self) -> SelectionOutline {
        let position = self.target().map(|hit| hit.position);
        SelectionOutline {
            position,
            visible: position.is_some(),
        }
    }

    /// Progress indicator for the renderer.
    pub fn break_progress(&self) -> BreakProgress {
        BreakProgress {
            fraction: self.progress(),
            visible: self.is_breaking(),
        }
    }

    /// Starts breaking the current target.
    ///
    /// # Returns
    /// `true` if a break started; `false` if there is no target or a break is
    /// already running.
    pub fn start_breaking(&mut self, now: Instant) -> bool {
        match self.state {
            SelectionState::Targeting { target } => {
                debug!("Started breaking {}", target.position);
                self.state = SelectionState::Breaking {
                    target,
                    started: now,
                    progress: 0.0,
                };
                true
            }
            _ => false,
        }
    }

    /// Abandons a break in progress, keeping the target.
    pub fn stop_breaking(&mut self) {
        if let SelectionState::Breaking { target, .. } = self.state {
            debug!("Stopped breaking {}", target.position);
            self.state = SelectionState::Targeting { target };
        }
    }

    /// Drops the target and any break in progress.
    pub fn clear(&mut self) {
        self.stop_breaking();
        self.state = SelectionState::Idle;
    }

    /// Re-casts the crosshair ray and advances the state machine.
    ///
    /// # Returns
    /// The block removed from `store`, if a break completed during this update.
    pub fn update(&mut self, store: &mut BlockStore, ray: &Ray, now: Instant) -> Option<Block> {
        let hit = raycast::cast(store, ray, self.reach);

        let (next, broken) = match (self.state, hit) {
            (SelectionState::Breaking { target, .. }, None) => {
                debug!("Break of {} aborted: target lost", target.position);
                (SelectionState::Idle, None)
            }
            (_, None) => (SelectionState::Idle, None),
            (SelectionState::Breaking { target, started, .. }, Some(hit))
                if hit.position == target.position =>
            {
                let elapsed = now.saturating_duration_since(started);
                if elapsed >= self.break_duration {
                    let broken = store.take(target.position);
                    debug!("Broke {:?}", broken);
                    (SelectionState::Idle, broken)
                } else {
                    let progress =
                        (elapsed.as_secs_f32() / self.break_duration.as_secs_f32()).min(1.0);
                    (
                        SelectionState::Breaking {
                            target: hit,
                            started,
                            progress,
                        },
                        None,
                    )
                }
            }
            (SelectionState::Breaking { target, .. }, Some(hit)) => {
                debug!(
                    "Break of {} aborted: now looking at {}",
                    target.position, hit.position
                );
                (SelectionState::Targeting { target: hit }, None)
            }
            (_, Some(hit)) => (SelectionState::Targeting { target: hit }, None),
        };

        self.state = next;
        broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use cgmath::{Point3, Vector3};

    fn setup() -> (BlockStore, Ray, SelectionSystem, Instant) {
        let mut store = BlockStore::new();
        store.put(BlockPos::new(3, 0, 0), BlockType::DIRT);
        store.put(BlockPos::new(4, 0, 0), BlockType::STONE);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x());
        let selection = SelectionSystem::new(5.0, Duration::from_millis(200));
        (store, ray, selection, Instant::now())
    }

    #[test]
    fn idle_until_something_is_in_reach() {
        let (mut store, _, mut selection, now) = setup();
        let away = Ray::new(Point3::new(0.0, 0.0, 0.0), -Vector3::unit_x());
        selection.update(&mut store, &away, now);
        assert_eq!(*selection.state(), SelectionState::Idle);
        assert!(!selection.outline().visible);
    }

    #[test]
    fn looking_at_a_block_targets_it() {
        let (mut store, ray, mut selection, now) = setup();
        selection.update(&mut store, &ray, now);
        assert_eq!(selection.outline().position, Some(BlockPos::new(3, 0, 0)));
        assert!(selection.outline().visible);
        assert!(!selection.break_progress().visible);
    }

    #[test]
    fn breaking_needs_a_target() {
        let (_, _, mut selection, now) = setup();
        assert!(!selection.start_breaking(now));
        assert!(!selection.is_breaking());
    }

    #[test]
    fn break_completes_after_the_duration_and_removes_the_block() {
        let (mut store, ray, mut selection, start) = setup();
        selection.update(&mut store, &ray, start);
        assert!(selection.start_breaking(start));

        let mut last = 0.0;
        for step in 1..4 {
            let now = start + Duration::from_millis(50 * step);
            assert!(selection.update(&mut store, &ray, now).is_none());
            assert!(selection.progress() >= last);
            assert!(selection.progress() < 1.0);
            last = selection.progress();
        }
        assert!((last - 0.75).abs() < 1e-5);

        let broken = selection.update(&mut store, &ray, start + Duration::from_millis(200));
        assert_eq!(broken, Some(Block::new(BlockPos::new(3, 0, 0), BlockType::DIRT)));
        assert!(store.get(BlockPos::new(3, 0, 0)).is_none());
        assert_eq!(*selection.state(), SelectionState::Idle);
        assert_eq!(selection.progress(), 0.0);

        // The block behind becomes the next target.
        selection.update(&mut store, &ray, start + Duration::from_millis(216));
        assert_eq!(selection.outline().position, Some(BlockPos::new(4, 0, 0)));
        assert!(!selection.is_breaking());
    }

    #[test]
    fn releasing_early_keeps_the_block() {
        let (mut store, ray, mut selection, start) = setup();
        selection.update(&mut store, &ray, start);
        selection.start_breaking(start);
        selection.update(&mut store, &ray, start + Duration::from_millis(150));
        selection.stop_breaking();

        assert_eq!(selection.progress(), 0.0);
        assert!(selection.update(&mut store, &ray, start + Duration::from_millis(400)).is_none());
        assert!(store.get(BlockPos::new(3, 0, 0)).is_some());
    }

    #[test]
    fn switching_targets_aborts_the_break() {
        let (mut store, ray, mut selection, start) = setup();
        store.put(BlockPos::new(0, 0, 2), BlockType::SAND);
        selection.update(&mut store, &ray, start);
        selection.start_breaking(start);

        let sideways = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::unit_z());
        selection.update(&mut store, &sideways, start + Duration::from_millis(100));
        assert!(!selection.is_breaking());
        assert_eq!(selection.outline().position, Some(BlockPos::new(0, 0, 2)));

        selection.update(&mut store, &ray, start + Duration::from_millis(300));
        assert!(store.get(BlockPos::new(3, 0, 0)).is_some());
        assert!(!selection.is_breaking());
    }

    #[test]
    fn zero_duration_breaks_on_the_next_update() {
        let (mut store, ray, _, now) = setup();
        let mut selection = SelectionSystem::new(5.0, Duration::ZERO);
        selection.update(&mut store, &ray, now);
        selection.start_breaking(now);
        assert!(selection.update(&mut store, &ray, now).is_some());
    }
}
