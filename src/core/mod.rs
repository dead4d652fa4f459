pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
