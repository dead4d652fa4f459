//! Pool of positions where prey may be spawned
//!
//! Candidates enter the pool during city generation and whenever a prey is
//! caught. They leave only when drawn for spawning; each draw takes a
//! uniformly random remaining candidate.

use serde::{Deserialize, Serialize};

use crate::core::random::RandomSource;
use crate::core::types::Vec3;

/// Where a candidate position came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Above a building roof
    Rooftop,
    /// Hovering over a street cell
    Street,
    /// Fixed spot near the player's start
    Starter,
}

/// A position eligible for prey placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreyCandidate {
    pub position: Vec3,
    pub source: CandidateSource,
}

impl PreyCandidate {
    pub fn new(position: Vec3, source: CandidateSource) -> Self {
        Self { position, source }
    }
}

/// Pull-based candidate pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreyCandidatePool {
    candidates: Vec<PreyCandidate>,
}

impl PreyCandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: Vec<PreyCandidate>) -> Self {
        Self { candidates }
    }

    pub fn push(&mut self, candidate: PreyCandidate) {
        self.candidates.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreyCandidate> {
        self.candidates.iter()
    }

    /// Remove and return one random candidate, or `None` when empty
    pub fn draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<PreyCandidate> {
        if self.candidates.is_empty() {
            return None;
        }
        let idx = rng.index(self.candidates.len());
        Some(self.candidates.swap_remove(idx))
    }

    /// Remove up to `n` random candidates
    ///
    /// Returns fewer than `n` when the pool runs dry.
    pub fn take<R: RandomSource + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<PreyCandidate> {
        let mut taken = Vec::with_capacity(n.min(self.candidates.len()));
        while taken.len() < n {
            match self.draw(rng) {
                Some(candidate) => taken.push(candidate),
                None => break,
            }
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    fn street(x: f32) -> PreyCandidate {
        PreyCandidate::new(Vec3::new(x, 5.0, 0.0), CandidateSource::Street)
    }

    #[test]
    fn test_draw_empty() {
        let mut pool = PreyCandidatePool::new();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        assert!(pool.draw(&mut rng).is_none());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_draw_removes() {
        let mut pool = PreyCandidatePool::from_candidates(vec![street(1.0), street(2.0), street(3.0)]);
        // index floor(0.0 * 3) = 0; last element moves into slot 0
        let mut rng = ScriptedRandom::new(vec![0.0]);
        let drawn = pool.draw(&mut rng).unwrap();
        assert_eq!(drawn.position.x, 1.0);
        assert_eq!(pool.len(), 2);
        let xs: Vec<f32> = pool.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![3.0, 2.0]);
    }

    #[test]
    fn test_take_more_than_available() {
        let mut pool = PreyCandidatePool::from_candidates(vec![street(1.0), street(2.0)]);
        let mut rng = ScriptedRandom::new(vec![0.9]);
        let taken = pool.take(5, &mut rng);
        assert_eq!(taken.len(), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_take_never_duplicates() {
        let candidates = (0..20).map(|i| street(i as f32)).collect();
        let mut pool = PreyCandidatePool::from_candidates(candidates);
        let mut rng = ScriptedRandom::new(vec![0.3, 0.7, 0.1]);
        let mut xs: Vec<i32> = pool.take(20, &mut rng).iter().map(|c| c.position.x as i32).collect();
        xs.sort();
        assert_eq!(xs, (0..20).collect::<Vec<_>>());
    }
}
