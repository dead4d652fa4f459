//! Score keeping

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::PreyConfig;
use crate::prey::PreyKind;

/// Running score and per-category catch tally
///
/// The score only ever grows, by exactly the caught category's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    catches: AHashMap<PreyKind, u32>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Catches of one category
    pub fn catches(&self, kind: PreyKind) -> u32 {
        self.catches.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_catches(&self) -> u32 {
        self.catches.values().sum()
    }

    /// Credit a catch and return the points awarded
    pub(crate) fn record(&mut self, kind: PreyKind, config: &PreyConfig) -> u64 {
        let points = kind.score(config);
        self.score += points;
        *self.catches.entry(kind).or_insert(0) += 1;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let config = PreyConfig::default();
        let mut board = Scoreboard::new();

        assert_eq!(board.record(PreyKind::Bat, &config), 10);
        assert_eq!(board.record(PreyKind::Crane, &config), 30);
        assert_eq!(board.record(PreyKind::Bat, &config), 10);

        assert_eq!(board.score(), 50);
        assert_eq!(board.catches(PreyKind::Bat), 2);
        assert_eq!(board.catches(PreyKind::Hummingbird), 0);
        assert_eq!(board.total_catches(), 3);
    }
}
