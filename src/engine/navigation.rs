//! Top-down navigation map snapshot for the minimap renderer
//!
//! Map space has one unit per grid cell, so the occupancy grid doubles as
//! the static background layer (see `Engine::background`). Prey markers negate scene x to undo the
//! spawn mirror; the player marker negates both horizontal axes.

use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::types::{round2, Vec2, Vec3};
use crate::prey::{Prey, PreyKind};

/// Scene-to-map transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapProjection {
    /// Map units per world unit
    pub scale: f32,
    /// Map coordinate of the world origin
    pub offset: f32,
}

impl MapProjection {
    pub fn from_world(world: &WorldConfig) -> Self {
        Self {
            scale: 1.0 / world.cell_size,
            offset: -world.origin / world.cell_size,
        }
    }

    pub fn project_prey(&self, position: Vec3) -> Vec2 {
        Vec2::new(
            -position.x * self.scale + self.offset,
            position.z * self.scale + self.offset,
        )
    }

    pub fn project_player(&self, position: Vec3) -> Vec2 {
        Vec2::new(
            -position.x * self.scale + self.offset,
            -position.z * self.scale + self.offset,
        )
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::from_world(&WorldConfig::default())
    }
}

/// A prey marker on the minimap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreyMarker {
    pub map: Vec2,
    pub kind: PreyKind,
    /// Altitude label, two decimals
    pub altitude: f32,
}

/// The player marker on the minimap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerMarker {
    pub map: Vec2,
    pub altitude: f32,
}

/// Everything the minimap draws for one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationMap {
    pub prey: Vec<PreyMarker>,
    pub player: PlayerMarker,
}

impl NavigationMap {
    pub fn build(projection: &MapProjection, active: &[Prey], player_position: Vec3) -> Self {
        let prey = active
            .iter()
            .map(|p| PreyMarker {
                map: projection.project_prey(p.position),
                kind: p.kind,
                altitude: round2(p.position.y),
            })
            .collect();

        Self {
            prey,
            player: PlayerMarker {
                map: projection.project_player(player_position),
                altitude: round2(player_position.y),
            },
        }
    }
}
