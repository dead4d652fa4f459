//! Collision and scoring engine

pub mod navigation;
pub mod score;
pub mod state;
pub mod tick;
pub mod wrap;

pub use navigation::{MapProjection, NavigationMap, PlayerMarker, PreyMarker};
pub use score::Scoreboard;
pub use state::{GameState, TickPhase};
pub use tick::{Engine, TickEvent, TickReport};
pub use wrap::{wrap_axis, wrap_position};
