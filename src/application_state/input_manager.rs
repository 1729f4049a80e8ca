//! # Input Manager
//!
//! This module turns the discrete press/release events reported by the
//! windowing layer into per-frame action states:
//! - Action state tracking across frames
//! - Input event intake
//! - Pointer motion accumulation
//! - Processed state creation

use std::collections::HashMap;

use super::input_state::{Action, ProcessedInputState, RawInputState};

/// Tracks the pressed state of every action across two consecutive frames.
pub struct InputManager {
    /// State of all tracked actions at the end of the previous frame
    pub action_inputs_old: HashMap<Action, bool>,
    /// State of all tracked actions as of the latest event
    pub action_inputs_new: HashMap<Action, bool>,
    /// Pointer movement accumulated since the last frame
    pub look_delta: Option<(f64, f64)>,
}

impl InputManager {
    /// Creates a new InputManager with every action released.
    pub fn new() -> Self {
        let mut action_inputs_old = HashMap::new();
        let mut action_inputs_new = HashMap::new();
        for action in Action::ALL {
            action_inputs_old.insert(action, false);
            action_inputs_new.insert(action, false);
        }

        Self {
            action_inputs_old,
            action_inputs_new,
            look_delta: None,
        }
    }

    /// Records a press or release of an action.
    pub fn intake_input(&mut self, action: Action, pressed: bool) {
        if let Some(action_state) = self.action_inputs_new.get_mut(&action) {
            *action_state = pressed;
        }
    }

    /// Accumulates relative pointer motion for the current frame.
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (dx, dy) = self.look_delta.unwrap_or((0.0, 0.0));
        self.look_delta = Some((dx + delta.0, dy + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// This translates the raw boolean states into RawInputState enum values
    /// that represent the state transitions (pressed, held, released, not pressed).
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let action_states = self
            .action_inputs_new
            .iter()
            .map(|(action, &new_state)| {
                let old_state = self.action_inputs_old.get(action).copied().unwrap_or(false);
                (*action, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            action_states,
            look_delta: self.look_delta,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (action, new_state) in self.action_inputs_new.iter() {
            if let Some(old_state) = self.action_inputs_old.get_mut(action) {
                *old_state = *new_state;
            }
        }
        self.look_delta = None;
    }

    /// Returns this frame's processed input and rolls the state forward.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.move_old_states();
        processed_input
    }

    /// Releases every action, as when the pointer lock is lost.
    pub fn release_all(&mut self) {
        for state in self.action_inputs_new.values_mut() {
            *state = false;
        }
        self.look_delta = None;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
