//! Game configuration with documented constants
//!
//! Every tuned number used by city generation, prey placement and the
//! collision engine lives here. The defaults reproduce the shipped city;
//! a TOML file can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::city::PartitionParams;
use crate::core::error::{GameError, Result};
use crate::core::types::Vec3;

/// Top-level configuration for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the session's random source
    pub seed: u64,
    pub world: WorldConfig,
    pub buildings: BuildingConfig,
    pub sprinkle: SprinkleConfig,
    pub prey: PreyConfig,
    pub player: PlayerConfig,
    /// Horizontal coordinates beyond this magnitude wrap back into the world
    pub wrap_bound: f32,
}

/// Occupancy grid and partitioning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid columns
    pub width: usize,
    /// Grid rows
    pub height: usize,

    /// Regions narrower or shorter than this are left as a block
    pub min_block_size: usize,

    /// Thickness of every road strip, in cells
    pub road_width: usize,

    /// Cells subtracted from the region extent before choosing a split offset
    ///
    /// Must exceed `road_width` so a strip always fits inside its region.
    pub split_margin: usize,

    /// Orientation draws above this split horizontally, otherwise vertically
    pub horizontal_split_threshold: f64,

    /// Horizontal split offset is `floor((u * span + base) * (height - margin))`
    ///
    /// With base 0.5 and span 0.1 roads land in the 50-60% band of the region.
    pub horizontal_bias_base: f64,
    pub horizontal_bias_span: f64,

    /// World units per grid cell
    pub cell_size: f32,

    /// World coordinate of grid cell (0, 0) on both horizontal axes
    pub origin: f32,

    /// Building lots are nudged this far into their cell
    pub building_offset: f32,
}

/// Building lot dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// Largest footprint along x or z
    pub max_footprint: f32,
    /// Shortest possible building
    pub height_base: f32,
    /// Height gained per unit of (random-scaled) footprint
    pub height_scale: f32,
}

/// Probabilistic prey candidate placement on top of the partitioned grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprinkleConfig {
    /// Occupied cells whose draw exceeds this get a rooftop candidate (0.5%)
    pub building_top_threshold: f64,
    /// Any cell whose draw exceeds this gets a street-level candidate (0.1%)
    pub street_threshold: f64,
    /// Prey hover this far above the surface they are placed on
    pub hover_offset: f32,
}

/// Prey population and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreyConfig {
    /// Maximum simultaneously active prey; refilled every tick
    pub active_cap: usize,
    /// Spawn draws above this become cranes (30%)
    pub crane_threshold: f64,
    /// Spawn draws above this (and not crane) become hummingbirds (30%)
    pub hummingbird_threshold: f64,
    pub bat_score: u64,
    pub hummingbird_score: u64,
    pub crane_score: u64,
    /// Half extents of every prey's bounding box
    pub half_extents: [f32; 3],
    /// Candidates placed before the first top-up so prey are visible at start
    pub starter_positions: Vec<[f32; 3]>,
}

/// Player flight and bounding volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Half extents of the player's bounding box
    pub half_extents: [f32; 3],
    pub start_position: [f32; 3],
    /// Distance covered per tick per held command
    pub speed: f32,
    /// The player cannot dive below this altitude
    pub min_altitude: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            world: WorldConfig::default(),
            buildings: BuildingConfig::default(),
            sprinkle: SprinkleConfig::default(),
            prey: PreyConfig::default(),
            player: PlayerConfig::default(),
            wrap_bound: 500.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            min_block_size: 20,
            road_width: 4,
            split_margin: 5,
            horizontal_split_threshold: 0.5,
            horizontal_bias_base: 0.5,
            horizontal_bias_span: 0.1,
            cell_size: 5.0,
            origin: -500.0,
            building_offset: 1.0,
        }
    }
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            max_footprint: 5.0,
            height_base: 8.0,
            height_scale: 8.0,
        }
    }
}

impl Default for SprinkleConfig {
    fn default() -> Self {
        Self {
            building_top_threshold: 0.995,
            street_threshold: 0.999,
            hover_offset: 3.0,
        }
    }
}

impl Default for PreyConfig {
    fn default() -> Self {
        Self {
            active_cap: 10,
            crane_threshold: 0.7,
            hummingbird_threshold: 0.4,
            bat_score: 10,
            hummingbird_score: 20,
            crane_score: 30,
            half_extents: [0.25, 0.25, 0.25],
            starter_positions: vec![[-1.0, 2.0, -3.0], [1.0, 2.0, -3.0]],
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            half_extents: [0.3, 0.15, 0.3],
            start_position: [0.0, 2.0, -5.0],
            speed: 0.2,
            min_altitude: 2.0,
        }
    }
}

impl PlayerConfig {
    pub fn start(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::from_array(self.half_extents)
    }
}

impl PreyConfig {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::from_array(self.half_extents)
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;

        PartitionParams::from(world).validate()?;

        if world.cell_size <= 0.0 {
            return Err(GameError::InvalidConfig("cell_size must be positive".into()));
        }

        for (name, threshold) in [
            ("building_top_threshold", self.sprinkle.building_top_threshold),
            ("street_threshold", self.sprinkle.street_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(GameError::InvalidConfig(format!(
                    "{} ({}) must lie within [0, 1]",
                    name, threshold
                )));
            }
        }

        if self.prey.hummingbird_threshold > self.prey.crane_threshold {
            return Err(GameError::InvalidConfig(format!(
                "hummingbird_threshold ({}) should be <= crane_threshold ({})",
                self.prey.hummingbird_threshold, self.prey.crane_threshold
            )));
        }

        if self.prey.active_cap == 0 {
            return Err(GameError::InvalidConfig("active_cap must be positive".into()));
        }

        if self.wrap_bound <= 0.0 {
            return Err(GameError::InvalidConfig("wrap_bound must be positive".into()));
        }

        Ok(())
    }
}
