//! Prey categories, spawn weights and score values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::PreyConfig;

/// Category of a prey entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreyKind {
    Bat,
    Hummingbird,
    Crane,
}

impl PreyKind {
    pub const ALL: [PreyKind; 3] = [PreyKind::Bat, PreyKind::Hummingbird, PreyKind::Crane];

    /// Pick a category from a uniform draw in `[0, 1)`
    ///
    /// Draws above the crane threshold give a crane, above the hummingbird
    /// threshold a hummingbird, anything else a bat (30/30/40 by default).
    pub fn from_draw(draw: f64, config: &PreyConfig) -> Self {
        if draw > config.crane_threshold {
            PreyKind::Crane
        } else if draw > config.hummingbird_threshold {
            PreyKind::Hummingbird
        } else {
            PreyKind::Bat
        }
    }

    /// Points awarded for catching this category
    pub fn score(&self, config: &PreyConfig) -> u64 {
        match self {
            PreyKind::Bat => config.bat_score,
            PreyKind::Hummingbird => config.hummingbird_score,
            PreyKind::Crane => config.crane_score,
        }
    }

    /// Model/entity name used by the placement layer
    pub fn name(&self) -> &'static str {
        match self {
            PreyKind::Bat => "bat",
            PreyKind::Hummingbird => "humbird",
            PreyKind::Crane => "crane",
        }
    }
}

impl fmt::Display for PreyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
