//! Per-tick collision, scoring and respawn
//!
//! Each call to [`Engine::tick`] runs one atomic sequence:
//! collision check -> score update (on a catch) -> respawn top-up -> idle.
//! Nothing outside the engine can observe the state between phases.

use serde::{Deserialize, Serialize};

use crate::city::{CityLayout, OccupancyGrid};
use crate::collision::{detect_collision, Collision, PlayerVolume};
use crate::core::config::GameConfig;
use crate::core::random::{RandomSource, SeededRandom};
use crate::core::types::{PreyId, Tick, Vec3};
use crate::engine::navigation::{MapProjection, NavigationMap};
use crate::engine::state::{GameState, TickPhase};
use crate::prey::{CandidateSource, Prey, PreyCandidate, PreyCandidatePool, PreyKind};

/// Events generated during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickEvent {
    /// The player caught a prey
    PreyCaught {
        id: PreyId,
        kind: PreyKind,
        points: u64,
        position: Vec3,
    },
    /// A prey was placed from the candidate pool
    PreySpawned {
        id: PreyId,
        kind: PreyKind,
        position: Vec3,
        source: CandidateSource,
    },
    /// The pool ran dry before the population reached cap
    PoolExhausted {
        /// How many prey short of cap the population is
        missing: usize,
    },
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number just completed (first tick is 1)
    pub tick: Tick,
    pub caught: Option<Prey>,
    pub events: Vec<TickEvent>,
    /// Score after this tick
    pub score: u64,
    pub navigation: NavigationMap,
}

/// Collision and scoring engine
///
/// Owns the game state and the random source used for respawn draws.
pub struct Engine<R: RandomSource = SeededRandom> {
    config: GameConfig,
    projection: MapProjection,
    state: GameState,
    rng: R,
}

impl Engine<SeededRandom> {
    /// Engine seeded from `config.seed`
    pub fn seeded(config: GameConfig, pool: PreyCandidatePool) -> Self {
        let rng = SeededRandom::new(config.seed);
        Self::new(config, pool, rng)
    }
}

impl<R: RandomSource> Engine<R> {
    /// Engine with no active prey; call [`Engine::populate`] to seed the world
    pub fn new(config: GameConfig, pool: PreyCandidatePool, rng: R) -> Self {
        let projection = MapProjection::from_world(&config.world);
        Self {
            config,
            projection,
            state: GameState::new(pool),
            rng,
        }
    }

    /// Engine over a generated city
    ///
    /// Takes the layout's candidates as the pool and keeps a copy of its grid
    /// as the minimap background.
    pub fn from_layout(config: GameConfig, layout: &mut CityLayout, rng: R) -> Self {
        let projection = MapProjection::from_world(&config.world);
        let state = GameState::with_grid(layout.grid.clone(), layout.take_pool());
        Self {
            config,
            projection,
            state,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score()
    }

    pub fn active(&self) -> &[Prey] {
        self.state.active()
    }

    pub fn projection(&self) -> &MapProjection {
        &self.projection
    }

    /// Static background layer for the minimap, in map cells
    pub fn background(&self) -> &OccupancyGrid {
        self.state.grid()
    }

    /// Random source driving respawn picks and category rolls
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Place the starter prey, then fill up to cap from the pool
    pub fn populate(&mut self) -> Vec<TickEvent> {
        let mut events = Vec::new();
        let starters: Vec<Vec3> = self
            .config
            .prey
            .starter_positions
            .iter()
            .map(|p| Vec3::from_array(*p))
            .collect();

        for position in starters {
            if self.state.active_count() >= self.config.prey.active_cap {
                break;
            }
            let kind = self.roll_kind();
            let (_, event) = self.spawn(kind, PreyCandidate::new(position, CandidateSource::Starter));
            events.push(event);
        }

        events.extend(self.top_up());
        tracing::info!(
            active = self.state.active_count(),
            pool = self.state.pool().len(),
            "Populated prey"
        );
        events
    }

    /// Place a specific prey, bypassing the pool
    ///
    /// Returns `None` when the active set is already at cap.
    pub fn place_prey(&mut self, kind: PreyKind, candidate: PreyCandidate) -> Option<PreyId> {
        if self.state.active_count() >= self.config.prey.active_cap {
            return None;
        }
        let (id, _) = self.spawn(kind, candidate);
        Some(id)
    }

    /// First-match collision check against the active set
    ///
    /// A hit is removed from the active set immediately. Scoring and
    /// respawn are left to the caller; [`Engine::tick`] does both.
    pub fn detect_collision(&mut self, player: &PlayerVolume) -> Collision {
        detect_collision(player, self.state.active_mut())
    }

    /// Run one simulation tick against the player's current volume
    pub fn tick(&mut self, player: &PlayerVolume) -> TickReport {
        let mut events = Vec::new();

        self.state.set_phase(TickPhase::CollisionCheck);
        let caught = match self.detect_collision(player) {
            Collision::Hit(prey) => {
                self.state.set_phase(TickPhase::ScoreUpdate);
                let points = self
                    .state
                    .scoreboard_mut()
                    .record(prey.kind, &self.config.prey);
                self.state.pool_mut().push(prey.origin);

                tracing::debug!(
                    id = prey.id.0,
                    kind = %prey.kind,
                    points,
                    score = self.state.score(),
                    "Caught prey"
                );
                events.push(TickEvent::PreyCaught {
                    id: prey.id,
                    kind: prey.kind,
                    points,
                    position: prey.position,
                });
                Some(prey)
            }
            Collision::Miss => None,
        };

        self.state.set_phase(TickPhase::RespawnTopUp);
        events.extend(self.top_up());

        self.state.advance_tick();
        self.state.set_phase(TickPhase::Idle);

        TickReport {
            tick: self.state.current_tick(),
            caught,
            events,
            score: self.state.score(),
            navigation: self.navigation_map(player.position),
        }
    }

    /// Spawn from the pool until the active set is at cap or the pool is empty
    pub fn top_up(&mut self) -> Vec<TickEvent> {
        let cap = self.config.prey.active_cap;
        let mut events = Vec::new();

        while self.state.active_count() < cap {
            let Some(candidate) = self.state.pool_mut().draw(&mut self.rng) else {
                break;
            };
            let kind = self.roll_kind();
            let (_, event) = self.spawn(kind, candidate);
            events.push(event);
        }

        let missing = cap.saturating_sub(self.state.active_count());
        if missing > 0 {
            if !self.state.is_starved() {
                tracing::warn!(
                    active = self.state.active_count(),
                    cap,
                    "Prey candidate pool exhausted"
                );
            }
            self.state.set_starved(true);
            events.push(TickEvent::PoolExhausted { missing });
        } else {
            self.state.set_starved(false);
        }

        events
    }

    /// Minimap snapshot of the current active set
    pub fn navigation_map(&self, player_position: Vec3) -> NavigationMap {
        NavigationMap::build(&self.projection, self.state.active(), player_position)
    }

    fn roll_kind(&mut self) -> PreyKind {
        PreyKind::from_draw(self.rng.unit(), &self.config.prey)
    }

    fn spawn(&mut self, kind: PreyKind, candidate: PreyCandidate) -> (PreyId, TickEvent) {
        let id = self.state.allocate_id();
        let prey = Prey::spawn(id, kind, candidate, self.config.prey.half_extents());
        let event = TickEvent::PreySpawned {
            id,
            kind,
            position: prey.position,
            source: candidate.source,
        };
        tracing::debug!(
            id = id.0,
            %kind,
            x = prey.position.x,
            y = prey.position.y,
            z = prey.position.z,
            "Spawned prey"
        );
        self.state.active_mut().push(prey);
        (id, event)
    }
}
