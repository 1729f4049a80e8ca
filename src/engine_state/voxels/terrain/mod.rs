//! # Terrain Module
//!
//! This module fills a [`BlockStore`] with a finite, square landscape. Every
//! decision is a pure function of the column coordinates and the world seed,
//! so the same seed always produces the same world.
//!
//! ## Generation passes
//!
//! 1. **Columns**: for each `(x, z)` in `[-S, S)²` the generator classifies the
//!    biome, computes the column height and fills every layer from
//!    [`WATER_LEVEL`] up to that height.
//! 2. **Trees**: forest columns whose surface is above the water level may grow a tree.
//!    Trees only fill empty cells, so no coordinate is ever written twice.
//!
//! ## Determinism
//!
//! The noise field is a Perlin field seeded with the world seed. The tree
//! coin flips and trunk heights come from a `fastrand::Rng` seeded with the
//! same value and consumed in a fixed column order, so trees are deterministic too.

use std::collections::HashMap;

use log::{debug, info};
use noise::NoiseFn;
use noise::Perlin;

use crate::config::WorldConfig;

use super::{
    block::{block_type::BlockType, BlockPos},
    block_store::BlockStore,
};
use biome::{classify_biome, BiomeType, BIOME_SCALE_FACTOR, MOISTURE_OFFSET};

pub mod biome;
pub mod tree;

/// Lowest layer the generator fills.
pub const WATER_LEVEL: i32 = -2;
/// Layers below this height are water.
pub const SEA_LEVEL: i32 = 0;
/// Scaling factor of the broad height field.
pub const HEIGHT_SCALE_FACTOR: f64 = 0.05;
/// Amplitude of the broad height field, in blocks.
pub const HEIGHT_AMPLITUDE: f64 = 10.0;
/// Scaling factor of the detail height field.
pub const DETAIL_SCALE_FACTOR: f64 = 0.1;
/// Offset separating the detail field from the broad field.
pub const DETAIL_OFFSET: f64 = 1000.0;
/// Amplitude of the detail height field, in blocks.
pub const DETAIL_AMPLITUDE: f64 = 5.0;
/// Extra height of snow columns.
pub const SNOW_HEIGHT_BONUS: i32 = 5;
/// Desert columns never rise above this height.
pub const DESERT_MAX_HEIGHT: i32 = 3;
/// Depth of the sand and dirt layers below the surface.
pub const SUBSURFACE_DEPTH: i32 = 3;

/// Summary of one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Blocks in the store after generation.
    pub blocks: usize,
    /// Trees planted.
    pub trees: usize,
    /// Columns classified into each biome.
    pub biome_columns: HashMap<BiomeType, usize>,
}

/// Deterministic terrain generator over a square region.
pub struct TerrainGenerator {
    seed: u32,
    radius: i32,
    tree_chance: f64,
    noise: Perlin,
}

impl TerrainGenerator {
    /// Creates a generator for the region `[-radius, radius)²` with the default tree chance.
    pub fn new(seed: u32, radius: i32) -> Self {
        TerrainGenerator {
            seed,
            radius,
            tree_chance: WorldConfig::default().tree_chance,
            noise: Perlin::new(seed),
        }
    }

    /// Creates a generator from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.seed, config.world_radius).with_tree_chance(config.tree_chance)
    }

    /// Overrides the per-column tree chance. Zero disables trees.
    pub fn with_tree_chance(mut self, tree_chance: f64) -> Self {
        self.tree_chance = tree_chance;
        self
    }

    /// Samples the seeded 2D noise field.
    fn sample(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x, z])
    }

    /// Temperature and moisture of a column.
    pub fn climate_at(&self, x: i32, z: i32) -> (f64, f64) {
        let (x, z) = (x as f64, z as f64);
        let temperature = self.sample(x * BIOME_SCALE_FACTOR, z * BIOME_SCALE_FACTOR);
        let moisture = self.sample(
            (x + MOISTURE_OFFSET) * BIOME_SCALE_FACTOR,
            (z + MOISTURE_OFFSET) * BIOME_SCALE_FACTOR,
        );
        (temperature, moisture)
    }

    /// Classifies the biome of a column.
    pub fn biome_at(&self, x: i32, z: i32) -> BiomeType {
        let (temperature, moisture) = self.climate_at(x, z);
        classify_biome(temperature, moisture)
    }

    /// Computes the surface height of a column in a given biome.
    pub fn column_height(&self, x: i32, z: i32, biome: BiomeType) -> i32 {
        let (fx, fz) = (x as f64, z as f64);
        let broad = self.sample(fx * HEIGHT_SCALE_FACTOR, fz * HEIGHT_SCALE_FACTOR);
        let detail = self.sample(
            (fx + DETAIL_OFFSET) * DETAIL_SCALE_FACTOR,
            (fz + DETAIL_OFFSET) * DETAIL_SCALE_FACTOR,
        );
        let height = (broad * HEIGHT_AMPLITUDE + detail * DETAIL_AMPLITUDE).floor() as i32;

        match biome {
            BiomeType::Snow => height + SNOW_HEIGHT_BONUS,
            BiomeType::Desert => height.min(DESERT_MAX_HEIGHT),
            BiomeType::Forest | BiomeType::Plains => height,
        }
    }

    /// Block type at layer `y` of a column whose surface is at `height`.
    ///
    /// Only meaningful for `WATER_LEVEL <= y <= height`.
    pub fn block_type_at(y: i32, height: i32, biome: BiomeType) -> BlockType {
        if y < SEA_LEVEL {
            BlockType::WATER
        } else if biome == BiomeType::Snow && y == height {
            BlockType::SNOW
        } else if biome == BiomeType::Desert && y >= height - SUBSURFACE_DEPTH {
            BlockType::SAND
        } else if y == height {
            BlockType::GRASS
        } else if y >= height - SUBSURFACE_DEPTH {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Fills `store` with the whole region and returns a summary.
    pub fn generate(&self, store: &mut BlockStore) -> GenerationStats {
        let mut stats = GenerationStats::default();
        let mut rng = fastrand::Rng::with_seed(self.seed as u64);
        let mut tree_roots = Vec::new();

        for x in -self.radius..self.radius {
            for z in -self.radius..self.radius {
                let biome = self.biome_at(x, z);
                let height = self.column_height(x, z, biome);
                *stats.biome_columns.entry(biome).or_insert(0) += 1;

                for y in WATER_LEVEL..=height {
                    store.put(BlockPos::new(x, y, z), Self::block_type_at(y, height, biome));
                }

                if biome == BiomeType::Forest
                    && height > WATER_LEVEL
                    && rng.f64() < self.tree_chance
                {
                    let trunk_height = rng.i32(tree::TRUNK_HEIGHT_RANGE);
                    tree_roots.push((BlockPos::new(x, height + 1, z), trunk_height));
                }
            }
        }

        for (root, trunk_height) in tree_roots {
            let placed = tree::place_tree(store, root, trunk_height);
            debug!("Planted tree at {} ({} blocks)", root, placed);
            stats.trees += 1;
        }

        stats.blocks = store.len();
        info!(
            "Generated {} blocks over {}x{} columns with seed {}, {} trees, biomes {:?}",
            stats.blocks,
            2 * self.radius,
            2 * self.radius,
            self.seed,
            stats.trees,
            stats.biome_columns
        );
        stats
    }
}
