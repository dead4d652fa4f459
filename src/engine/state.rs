//! Engine-owned game state
//!
//! Score, the active prey set, and the candidate pool are mutated only from
//! inside this crate. The occupancy grid is fixed once the city is loaded.
//! Renderers, UI and input code get shared references and read-only
//! accessors.

use serde::{Deserialize, Serialize};

use crate::city::OccupancyGrid;
use crate::core::types::{PreyId, Tick};
use crate::engine::score::Scoreboard;
use crate::prey::{Prey, PreyCandidatePool};

/// Phase of the per-tick state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickPhase {
    /// Between ticks; the only phase observable from outside
    Idle,
    CollisionCheck,
    ScoreUpdate,
    RespawnTopUp,
}

/// All mutable state of a game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    current_tick: Tick,
    phase: TickPhase,
    scoreboard: Scoreboard,
    grid: OccupancyGrid,
    active: Vec<Prey>,
    pool: PreyCandidatePool,
    next_prey_id: u64,
    /// Set while the pool cannot keep the population at cap
    starved: bool,
}

impl GameState {
    /// State with no city grid; see [`GameState::with_grid`]
    pub fn new(pool: PreyCandidatePool) -> Self {
        Self::with_grid(OccupancyGrid::new(0, 0), pool)
    }

    pub fn with_grid(grid: OccupancyGrid, pool: PreyCandidatePool) -> Self {
        Self {
            current_tick: 0,
            phase: TickPhase::Idle,
            scoreboard: Scoreboard::new(),
            grid,
            active: Vec::new(),
            pool,
            next_prey_id: 0,
            starved: false,
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// City occupancy grid, the minimap's static background
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Active prey in list (collision priority) order
    pub fn active(&self) -> &[Prey] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn pool(&self) -> &PreyCandidatePool {
        &self.pool
    }

    pub fn is_starved(&self) -> bool {
        self.starved
    }

    pub fn get_prey(&self, id: PreyId) -> Option<&Prey> {
        self.active.iter().find(|p| p.id == id)
    }

    pub(crate) fn set_phase(&mut self, phase: TickPhase) {
        tracing::trace!(tick = self.current_tick, ?phase, "Tick phase");
        self.phase = phase;
    }

    pub(crate) fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    pub(crate) fn set_starved(&mut self, starved: bool) {
        self.starved = starved;
    }

    pub(crate) fn allocate_id(&mut self) -> PreyId {
        let id = PreyId(self.next_prey_id);
        self.next_prey_id += 1;
        id
    }

    pub(crate) fn active_mut(&mut self) -> &mut Vec<Prey> {
        &mut self.active
    }

    pub(crate) fn pool_mut(&mut self) -> &mut PreyCandidatePool {
        &mut self.pool
    }

    pub(crate) fn scoreboard_mut(&mut self) -> &mut Scoreboard {
        &mut self.scoreboard
    }
}
