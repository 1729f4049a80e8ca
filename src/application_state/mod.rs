//! # Application State Management
//!
//! This module sits between the event source and the engine:
//! - Input intake and per-frame processing
//! - Pointer lock changes
//! - The frame loop, including a scripted headless run
//!
//! A windowing layer would forward its key, button and pointer events to
//! [`ApplicationState`] and call [`ApplicationState::about_to_wait`] once per frame.
//! Without one, [`ApplicationState::run_script`] replays a fixed list of events.

pub mod input_manager;
pub mod input_state;

use std::fmt;

use cgmath::Point3;
use log::{info, trace};
use web_time::Duration;

use input_manager::InputManager;
use input_state::Action;

use crate::engine_state::{EngineState, TickReport};

/// Target time between frames.
pub const FRAME_TIME: Duration = Duration::from_millis(16);

/// Number of frames in the default headless run.
pub const SCRIPTED_FRAMES: u64 = 240;

/// An input event delivered at the start of a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedEvent {
    /// Frame index at which the event is delivered
    pub frame: u64,
    /// The event itself
    pub input: ScriptedInput,
}

/// The kinds of event a script can deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedInput {
    /// An action was pressed
    Press(Action),
    /// An action was released
    Release(Action),
    /// Relative pointer motion
    Look(f64, f64),
    /// The pointer lock was gained (`true`) or lost (`false`)
    PointerLock(bool),
}

impl ScriptedEvent {
    /// Creates an event for the given frame.
    pub fn new(frame: u64, input: ScriptedInput) -> Self {
        ScriptedEvent { frame, input }
    }
}

/// The walk-and-break sequence used by the headless binary.
///
/// Lock the pointer, look down a little, walk forward with a jump halfway, then hold
/// the break action for long enough to remove whatever is under the crosshair.
pub fn default_script() -> Vec<ScriptedEvent> {
    use ScriptedInput::{Look, PointerLock, Press, Release};

    vec![
        ScriptedEvent::new(0, PointerLock(true)),
        ScriptedEvent::new(1, Look(0.0, 300.0)),
        ScriptedEvent::new(60, Press(Action::Forward)),
        ScriptedEvent::new(90, Press(Action::Jump)),
        ScriptedEvent::new(91, Release(Action::Jump)),
        ScriptedEvent::new(120, Release(Action::Forward)),
        ScriptedEvent::new(150, Press(Action::Break)),
        ScriptedEvent::new(200, Release(Action::Break)),
        ScriptedEvent::new(230, PointerLock(false)),
    ]
}

/// Totals from a run of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames processed
    pub frames: u64,
    /// Ticks that actually ran (the pointer was locked)
    pub ticks: u64,
    /// Blocks removed by completed breaks
    pub blocks_broken: usize,
    /// Blocks left in the world
    pub blocks_remaining: usize,
    /// Where the camera ended up
    pub final_position: Point3<f32>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames ({} ticks), {} blocks broken, {} remaining, camera at ({:.2}, {:.2}, {:.2})",
            self.frames,
            self.ticks,
            self.blocks_broken,
            self.blocks_remaining,
            self.final_position.x,
            self.final_position.y,
            self.final_position.z
        )
    }
}

/// The running application: an engine session plus its input handling.
pub struct ApplicationState {
    /// The core game engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_wait_time: web_time::Instant,

    frames: u64,
    ticks: u64,
    blocks_broken: usize,
}

impl ApplicationState {
    /// Wraps an engine session.
    pub fn new(engine_state: EngineState) -> Self {
        Self {
            engine_state,
            input_manager: InputManager::new(),
            last_wait_time: web_time::Instant::now(),
            frames: 0,
            ticks: 0,
            blocks_broken: 0,
        }
    }

    /// Records an action press or release.
    pub fn action_event(&mut self, action: Action, pressed: bool) {
        self.input_manager.intake_input(action, pressed);
    }

    /// Records relative pointer motion.
    pub fn mouse_motion(&mut self, delta: (f64, f64)) {
        self.input_manager.intake_mouse_motion(delta);
    }

    /// Handles the pointer lock being gained or lost.
    pub fn pointer_lock_changed(&mut self, locked: bool) {
        if !locked {
            self.input_manager.release_all();
        }
        self.engine_state.set_locked(locked);
    }

    /// Runs one frame: hands this frame's input to the engine and ticks it.
    pub fn about_to_wait(&mut self) -> TickReport {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.apply_input(&processed_input);
        let report = self.engine_state.tick();

        let now = web_time::Instant::now();
        let wait_dt = now - self.last_wait_time;
        self.last_wait_time = now;
        trace!("Frame {} after {:?}: {:?}", self.frames, wait_dt, report);

        self.frames += 1;
        if report.ran {
            self.ticks += 1;
        }
        if let Some(block) = report.broken {
            info!("Broke {} at {}", block.block_type, block.position);
            self.blocks_broken += 1;
        }
        report
    }

    /// Replays `script` over `frames` frames, calling `between_frames` after each one.
    ///
    /// Events are delivered at the start of their frame, in script order. Events
    /// scheduled past the last frame are never delivered.
    pub fn run_script(
        &mut self,
        script: &[ScriptedEvent],
        frames: u64,
        mut between_frames: impl FnMut(),
    ) -> RunSummary {
        let start_frame = self.frames;
        for frame in 0..frames {
            for event in script.iter().filter(|event| event.frame == frame) {
                match event.input {
                    ScriptedInput::Press(action) => self.action_event(action, true),
                    ScriptedInput::Release(action) => self.action_event(action, false),
                    ScriptedInput::Look(dx, dy) => self.mouse_motion((dx, dy)),
                    ScriptedInput::PointerLock(locked) => self.pointer_lock_changed(locked),
                }
            }
            self.about_to_wait();
            between_frames();
        }

        let summary = self.summary();
        info!(
            "Scripted run finished after {} frames: {}",
            self.frames - start_frame,
            summary
        );
        summary
    }

    /// Totals since this application state was created.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            ticks: self.ticks,
            blocks_broken: self.blocks_broken,
            blocks_remaining: self.engine_state.blocks().get().len(),
            final_position: self.engine_state.camera().position,
        }
    }
}
