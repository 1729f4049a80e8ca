//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! It provides enums and structs for representing the per-frame state of the
//! player's actions.

use std::collections::HashMap;

use crate::engine_state::player::MovementFlag;

/// A player action bound to some physical key or button by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk forward
    Forward,
    /// Walk backward
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// Jump
    Jump,
    /// Break the targeted block (primary button)
    Break,
}

impl Action {
    /// Every action, in a fixed order.
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Break,
    ];

    /// The movement flag this action drives, if it is a movement action.
    pub fn movement_flag(self) -> Option<MovementFlag> {
        match self {
            Action::Forward => Some(MovementFlag::Forward),
            Action::Backward => Some(MovementFlag::Backward),
            Action::Left => Some(MovementFlag::Left),
            Action::Right => Some(MovementFlag::Right),
            Action::Jump | Action::Break => None,
        }
    }
}

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Updates the input state based on the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed action states with state transitions.
#[derive(Debug, Clone, Default)]
pub struct ProcessedInputState {
    /// Current state of every tracked action
    pub action_states: HashMap<Action, RawInputState>,
    /// Accumulated pointer movement (dx, dy) since the last frame, if any
    pub look_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of an action
    pub fn get_action_state(&self, action: Action) -> RawInputState {
        self.action_states.get(&action).copied().unwrap_or_default()
    }

    /// Gets the pointer movement since the last frame
    pub fn get_look_delta(&self) -> Option<(f64, f64)> {
        self.look_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_old_and_new_states() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert_eq!(RawInputState::from_raw_states(false, false), RawInputState::NotPressed);
    }

    #[test]
    fn pressed_and_held_are_active() {
        assert!(RawInputState::Pressed.is_active());
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
        assert!(!RawInputState::NotPressed.is_active());
    }

    #[test]
    fn untracked_actions_read_as_not_pressed() {
        let input = ProcessedInputState::default();
        assert_eq!(input.get_action_state(Action::Jump), RawInputState::NotPressed);
    }
}
