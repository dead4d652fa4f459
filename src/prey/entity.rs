//! Placed, collidable prey

use serde::{Deserialize, Serialize};

use crate::collision::Aabb;
use crate::core::types::{PreyId, Vec3};
use crate::prey::kind::PreyKind;
use crate::prey::pool::PreyCandidate;

/// A live prey entity owned by the engine's active set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prey {
    pub id: PreyId,
    pub kind: PreyKind,
    /// Scene position
    pub position: Vec3,
    pub half_extents: Vec3,
    /// Candidate this prey was spawned from; returned to the pool when caught
    pub origin: PreyCandidate,
}

impl Prey {
    /// Spawn at a candidate's scene position
    ///
    /// Scene x mirrors grid x, so the candidate's x is negated.
    pub fn spawn(id: PreyId, kind: PreyKind, candidate: PreyCandidate, half_extents: Vec3) -> Self {
        let position = scene_position(candidate.position);
        Self::at(id, kind, position, half_extents, candidate)
    }

    /// Place at an explicit scene position
    pub fn at(
        id: PreyId,
        kind: PreyKind,
        position: Vec3,
        half_extents: Vec3,
        origin: PreyCandidate,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            half_extents,
            origin,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Map a candidate position into the scene
#[inline]
pub fn scene_position(candidate: Vec3) -> Vec3 {
    Vec3::new(-candidate.x, candidate.y, candidate.z)
}
