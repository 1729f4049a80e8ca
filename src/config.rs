//! # World Configuration
//!
//! Tunable parameters for world generation, locomotion and block selection.
//! Every field has a default, so a config file only needs to name the values it changes:
//!
//! ```json
//! { "seed": 42, "world_radius": 32, "break_duration_ms": 350 }
//! ```

use serde::Deserialize;

/// All tunable world parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the terrain noise field and tree placement.
    pub seed: u32,
    /// Half-width S of the generated square: columns span `[-S, S)` on X and Z.
    pub world_radius: i32,
    /// Where the camera starts.
    pub spawn_position: [f32; 3],
    /// Horizontal distance covered per tick, also the vertical velocity scale.
    pub move_speed: f32,
    /// Vertical velocity lost per tick.
    pub gravity: f32,
    /// Vertical velocity gained by a jump.
    pub jump_impulse: f32,
    /// The camera never goes below this height.
    pub min_height: f32,
    /// Half-extents of the player hitbox.
    pub player_half_extents: [f32; 3],
    /// Maximum distance at which a block can be selected.
    pub reach: f32,
    /// How long a block takes to break, in milliseconds.
    pub break_duration_ms: u64,
    /// Chance that a forest column grows a tree.
    pub tree_chance: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            seed: 0,
            world_radius: 50,
            spawn_position: [0.0, 20.0, 0.0],
            move_speed: 0.1,
            gravity: 0.1,
            jump_impulse: 5.0,
            min_height: 2.0,
            player_half_extents: [0.3, 0.9, 0.3],
            reach: 5.0,
            break_duration_ms: 200,
            tree_chance: 0.05,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
