//! Bounding volume intersection between the player and active prey

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::prey::Prey;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Overlap test; boxes sharing only a face or edge still intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// The player's collidable extent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVolume {
    pub position: Vec3,
    pub half_extents: Vec3,
}

impl PlayerVolume {
    pub fn new(position: Vec3, half_extents: Vec3) -> Self {
        Self { position, half_extents }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }
}

/// Outcome of one collision pass
#[derive(Debug, Clone, PartialEq)]
pub enum Collision {
    /// The first intersecting prey, already removed from the active list
    Hit(Prey),
    Miss,
}

impl Collision {
    pub fn is_hit(&self) -> bool {
        matches!(self, Collision::Hit(_))
    }

    pub fn prey(&self) -> Option<&Prey> {
        match self {
            Collision::Hit(prey) => Some(prey),
            Collision::Miss => None,
        }
    }
}

/// Find the first prey (in list order) whose bounds intersect the player
///
/// The matched prey is removed from `active` before returning, so it can
/// never be caught twice. The relative order of the remaining prey is kept.
pub fn detect_collision(player: &PlayerVolume, active: &mut Vec<Prey>) -> Collision {
    let player_bounds = player.bounds();
    match active
        .iter()
        .position(|prey| player_bounds.intersects(&prey.bounds()))
    {
        Some(idx) => Collision::Hit(active.remove(idx)),
        None => Collision::Miss,
    }
}
