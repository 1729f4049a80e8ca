//! # Biome Module
//!
//! Biomes classify a world column from two noise samples, temperature and
//! moisture. They are never stored; the generator recomputes them on demand.

use std::fmt;

/// Scaling factor applied to column coordinates when sampling the biome fields.
pub const BIOME_SCALE_FACTOR: f64 = 0.02;
/// Offset separating the moisture field from the temperature field.
pub const MOISTURE_OFFSET: f64 = 1000.0;

/// Below this temperature a column is snow.
pub const SNOW_MAX_TEMPERATURE: f64 = -0.3;
/// Above this temperature a dry column is desert.
pub const DESERT_MIN_TEMPERATURE: f64 = 0.3;
/// Below this moisture a hot column is desert.
pub const DESERT_MAX_MOISTURE: f64 = -0.2;
/// Above this moisture a column is forest.
pub const FOREST_MIN_MOISTURE: f64 = 0.3;

/// The climate of a world column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiomeType {
    /// Cold columns: raised terrain capped with snow.
    Snow,
    /// Hot and dry columns: flattened terrain covered in sand.
    Desert,
    /// Wet columns: grass with scattered trees.
    Forest,
    /// Everything else: grass over dirt over stone.
    Plains,
}

impl BiomeType {
    /// Every biome, in classification priority order.
    pub const ALL: [BiomeType; 4] = [
        BiomeType::Snow,
        BiomeType::Desert,
        BiomeType::Forest,
        BiomeType::Plains,
    ];
}

impl fmt::Display for BiomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BiomeType::Snow => "snow",
            BiomeType::Desert => "desert",
            BiomeType::Forest => "forest",
            BiomeType::Plains => "plains",
        };
        f.write_str(name)
    }
}

/// Classifies a column from its temperature and moisture samples.
///
/// Rules are checked in order and the first match wins: snow, then desert,
/// then forest, otherwise plains. A cold and wet column is therefore snow,
/// never forest.
pub fn classify_biome(temperature: f64, moisture: f64) -> BiomeType {
    if temperature < SNOW_MAX_TEMPERATURE {
        BiomeType::Snow
    } else if temperature > DESERT_MIN_TEMPERATURE && moisture < DESERT_MAX_MOISTURE {
        BiomeType::Desert
    } else if moisture > FOREST_MIN_MOISTURE {
        BiomeType::Forest
    } else {
        BiomeType::Plains
    }
}
