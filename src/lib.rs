#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The simulation core of a first-person voxel sandbox: a sparse block world filled by
//! seeded, biome-aware terrain generation, a player that walks, falls and jumps against
//! that world, and a crosshair that selects and breaks blocks over time.
//!
//! ## Key Modules
//!
//! * `application_state` - Input intake, pointer lock and the frame loop
//! * `config` - Tunable world parameters, loadable from JSON
//! * `core` - The shared resource container
//! * `engine_state` - The session and its subsystems: blocks, terrain, collision,
//!   locomotion and selection
//!
//! ## Architecture
//!
//! Everything runs on one thread, one tick per frame. Rendering and windowing live
//! outside this crate: they push input in and read back the live blocks, the selection
//! outline and the break progress.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::{EngineState, MovementFlag, WorldConfig};
//!
//! let mut engine_state = EngineState::new(WorldConfig {
//!     seed: 7,
//!     world_radius: 8,
//!     ..WorldConfig::default()
//! });
//! engine_state.set_locked(true);
//! engine_state.set_movement(MovementFlag::Forward, true);
//!
//! for _ in 0..10 {
//!     engine_state.tick();
//! }
//!
//! for block in engine_state.blocks().get().renderables() {
//!     let _ = (block.position, block.material);
//! }
//! ```

use log::{info, warn};

pub mod application_state;
pub mod config;
pub mod core;
pub mod engine_state;

pub use application_state::{
    input_manager::InputManager,
    input_state::{Action, ProcessedInputState, RawInputState},
    ApplicationState,
};
pub use config::WorldConfig;
pub use engine_state::{
    camera_state::Camera,
    clock::{Clock, ManualClock, SystemClock},
    physics::{aabb::Aabb, CollisionSystem},
    player::{Locomotion, MoveOutcome, MovementFlag, PlayerState},
    selection::{
        raycast::{BlockHit, Ray},
        BreakProgress, SelectionOutline, SelectionState, SelectionSystem,
    },
    voxels::{
        block::{
            block_side::BlockSide,
            block_type::BlockType,
            material::{Material, MaterialDescriptor},
            Block, BlockInstance, BlockPos,
        },
        block_store::{BlockStore, RenderableBlock},
        terrain::{biome::BiomeType, GenerationStats, TerrainGenerator},
    },
    EngineState, TickReport,
};

/// Reads a world configuration from a JSON file, falling back to defaults.
///
/// A missing or malformed file is logged and ignored.
pub fn load_config(path: &str) -> WorldConfig {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            warn!("Could not read config {}: {}; using defaults", path, err);
            return WorldConfig::default();
        }
    };

    match WorldConfig::from_json(&json) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(err) => {
            warn!("Could not parse config {}: {}; using defaults", path, err);
            WorldConfig::default()
        }
    }
}

/// Runs the headless sandbox.
///
/// Initializes logging from `RUST_LOG`, reads an optional JSON config whose path is
/// the first command-line argument, generates the world and plays the default
/// walk-and-break script on the wall clock.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path),
        None => WorldConfig::default(),
    };

    let mut state = ApplicationState::new(EngineState::new(config));
    let summary = state.run_script(
        &application_state::default_script(),
        application_state::SCRIPTED_FRAMES,
        || std::thread::sleep(application_state::FRAME_TIME),
    );

    info!("{}", summary);
}
