//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

pub use glam::{Vec2, Vec3};

/// Simulation tick counter (one rendered frame)
pub type Tick = u64;

/// Identifier for a placed prey entity
///
/// Assigned sequentially by the engine, never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PreyId(pub u64);

/// Grid cell coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Round to two decimal places, as shown next to minimap markers
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prey_id_ordering() {
        assert!(PreyId(1) < PreyId(2));
        assert_eq!(PreyId(7), PreyId(7));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(5.0), 5.0);
        assert!((round2(2.456) - 2.46).abs() < 1e-6);
        assert!((round2(-1.234) + 1.23).abs() < 1e-6);
    }
}
