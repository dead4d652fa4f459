//! Prey layer - categories, candidate positions, and placed prey

pub mod entity;
pub mod kind;
pub mod pool;

pub use entity::Prey;
pub use kind::PreyKind;
pub use pool::{CandidateSource, PreyCandidate, PreyCandidatePool};
