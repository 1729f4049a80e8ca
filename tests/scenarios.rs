//! End-to-end behaviour of the sandbox through its public API.

use std::rc::Rc;

use cgmath::{Deg, Point3, Vector3};
use voxel_sandbox::{
    core::StResource, BiomeType, Block, BlockPos, BlockStore, BlockType, Camera,
    CollisionSystem, EngineState, ManualClock, TerrainGenerator, WorldConfig,
};
use web_time::Duration;

fn session_with(store: BlockStore, spawn: [f32; 3]) -> (EngineState, Rc<ManualClock>) {
    let config = WorldConfig {
        spawn_position: spawn,
        ..WorldConfig::default()
    };
    let clock = Rc::new(ManualClock::new());
    let mut engine_state = EngineState::with_world(config, store, Box::new(clock.clone()));
    engine_state.set_locked(true);
    (engine_state, clock)
}

/// A 9x9 stone floor at y = 0 with a dirt block at (3, 2, 0), in front of a player at (0, 2, 0).
fn target_range() -> BlockStore {
    let mut store = BlockStore::new();
    for x in -4..=4 {
        for z in -4..=4 {
            store.put(BlockPos::new(x, 0, z), BlockType::STONE);
        }
    }
    store.put(BlockPos::new(3, 2, 0), BlockType::DIRT);
    store
}

#[test]
fn removing_an_absent_block_changes_nothing() {
    let mut store = BlockStore::new();
    store.put(BlockPos::new(1, 2, 3), BlockType::SAND);
    store.put(BlockPos::new(-1, 0, 0), BlockType::SNOW);
    let before = store.clone();

    assert!(!store.remove(BlockPos::new(9, 9, 9)));
    assert!(!store.remove(BlockPos::new(9, 9, 9)));
    assert_eq!(store, before);
}

#[test]
fn same_seed_generates_identical_worlds() {
    let generate = || {
        let mut store = BlockStore::new();
        TerrainGenerator::new(1234, 24).generate(&mut store);
        store
    };

    let first = generate();
    let second = generate();
    assert!(!first.is_empty());
    assert_eq!(first, second);

    let mut other = BlockStore::new();
    TerrainGenerator::new(4321, 24).generate(&mut other);
    assert_ne!(first, other);
}

#[test]
fn snow_outranks_forest() {
    assert_eq!(
        voxel_sandbox::engine_state::voxels::terrain::biome::classify_biome(-0.5, 0.5),
        BiomeType::Snow
    );
}

#[test]
fn collision_is_symmetric_around_a_block() {
    let mut store = BlockStore::new();
    store.put(BlockPos::new(0, 0, 0), BlockType::STONE);
    let collision = CollisionSystem::new(&store);

    assert!(collision.would_collide(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.3, 0.3, 0.3)));

    let half_extents = Vector3::new(0.3, 0.9, 0.3);
    for axis in 0..3 {
        for sign in [-1.0, 1.0] {
            let mut offset = Vector3::new(0.0, 0.0, 0.0);
            offset[axis] = 2.0 * sign;
            let position = Point3::new(0.0, 0.0, 0.0) + offset;
            assert!(
                !collision.would_collide(position, half_extents),
                "player at {:?} should be clear",
                position
            );
        }
    }
}

#[test]
fn break_completes_at_the_duration_and_removes_the_block() {
    let (mut engine_state, clock) = session_with(target_range(), [0.0, 2.0, 0.0]);
    let target = BlockPos::new(3, 2, 0);

    engine_state.tick();
    assert_eq!(engine_state.selection_outline().position, Some(target));
    assert!(engine_state.start_breaking());

    let mut last = 0.0;
    for _ in 0..3 {
        clock.advance(Duration::from_millis(50));
        let report = engine_state.tick();
        assert!(report.broken.is_none());

        let progress = engine_state.break_progress();
        assert!(progress.visible);
        assert!(progress.fraction >= last);
        assert!(progress.fraction < 1.0);
        assert!(engine_state.blocks().get().contains(target));
        last = progress.fraction;
    }

    clock.advance(Duration::from_millis(50));
    let report = engine_state.tick();
    assert_eq!(report.broken, Some(Block::new(target, BlockType::DIRT)));
    assert!(engine_state.blocks().get().get(target).is_none());
    assert!(!engine_state.break_progress().visible);
    assert_eq!(engine_state.break_progress().fraction, 0.0);
}

#[test]
fn looking_away_aborts_the_break() {
    let (mut engine_state, clock) = session_with(target_range(), [0.0, 2.0, 0.0]);
    let target = BlockPos::new(3, 2, 0);

    engine_state.tick();
    assert!(engine_state.start_breaking());
    clock.advance(Duration::from_millis(100));
    engine_state.tick();

    engine_state.camera_mut().set_orientation(Deg(90.0), Deg(0.0));
    clock.advance(Duration::from_millis(50));
    engine_state.tick();
    assert!(!engine_state.break_progress().visible);

    engine_state.camera_mut().set_orientation(Deg(0.0), Deg(0.0));
    clock.advance(Duration::from_millis(300));
    let report = engine_state.tick();

    assert!(report.broken.is_none());
    assert!(engine_state.blocks().get().contains(target));
    assert_eq!(engine_state.selection_outline().position, Some(target));
}

#[test]
fn falling_player_is_caught_by_the_floor() {
    let (mut engine_state, _) = session_with(BlockStore::new(), [0.0, 50.0, 0.0]);
    let min_height = engine_state.config().min_height;

    let mut clamped = false;
    for _ in 0..500 {
        let report = engine_state.tick();
        assert!(engine_state.camera().position.y >= min_height);
        if report.movement.floor_clamped {
            clamped = true;
            assert!(engine_state.player().can_jump);
        }
    }

    assert!(clamped);
    assert_eq!(engine_state.camera().position.y, min_height);
    assert!(engine_state.player().can_jump);
}

#[test]
fn player_lands_on_generated_terrain() {
    let config = WorldConfig {
        seed: 99,
        world_radius: 8,
        ..WorldConfig::default()
    };
    let clock = Rc::new(ManualClock::new());
    let mut engine_state = EngineState::with_clock(config, Box::new(clock));
    engine_state.set_locked(true);

    for _ in 0..600 {
        engine_state.tick();
    }

    let camera: &Camera = engine_state.camera();
    let blocks: StResource<BlockStore> = engine_state.blocks();
    let collision_store = blocks.get();
    let collision = CollisionSystem::new(&collision_store);
    assert!(!collision.would_collide(camera.position, engine_state.player().half_extents));
    assert!(engine_state.player().velocity_y <= 0.0);
}
