//! Headless game session: generate a city and let the autopilot hunt

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::city::{generate_city, CityLayout};
use crate::core::config::GameConfig;
use crate::core::random::SeededRandom;
use crate::core::types::{Tick, Vec3};
use crate::engine::{Engine, TickEvent};
use crate::flight::{autopilot, FlightState};
use crate::prey::PreyKind;

/// Simulated seconds per tick
const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Summary of a finished session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: Tick,
    pub score: u64,
    pub bats: u32,
    pub hummingbirds: u32,
    pub cranes: u32,
    pub roads: usize,
    pub blocks: usize,
    pub buildings: usize,
    pub initial_candidates: usize,
    pub active_at_end: usize,
    pub pool_at_end: usize,
    /// Ticks on which the pool could not keep the population at cap
    pub starved_ticks: u64,
    pub final_position: [f32; 3],
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SessionSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> String {
        format!(
            "Seed {} | {} ticks | score {} (bats {}, hummingbirds {}, cranes {})\n\
             City: {} roads, {} blocks, {} buildings, {} prey candidates\n\
             End: {} active prey, {} candidates left, starved {} ticks",
            self.seed,
            self.ticks,
            self.score,
            self.bats,
            self.hummingbirds,
            self.cranes,
            self.roads,
            self.blocks,
            self.buildings,
            self.initial_candidates,
            self.active_at_end,
            self.pool_at_end,
            self.starved_ticks,
        )
    }
}

/// Generate the city and hand it to an engine
///
/// Generation and the engine share one seeded stream: the engine picks up
/// where the generator stopped, so respawn draws never replay layout draws.
pub fn prepare_session(config: &GameConfig) -> (CityLayout, Engine<SeededRandom>) {
    let mut rng = SeededRandom::new(config.seed);
    let mut layout = generate_city(config, &mut rng);
    let engine = Engine::from_layout(config.clone(), &mut layout, rng);
    (layout, engine)
}

/// Run `ticks` ticks with the autopilot chasing the nearest prey
pub fn run_session(config: &GameConfig, ticks: Tick) -> SessionSummary {
    let start = Instant::now();

    let (layout, mut engine) = prepare_session(config);
    let initial_candidates = engine.state().pool().len();
    engine.populate();

    let mut flight = FlightState::from_config(&config.player);
    let mut starved_ticks = 0;

    for tick in 0..ticks {
        let time = tick as f32 * TICK_SECONDS;
        let body = flight.body_position(time);

        if let Some(target) = nearest_prey(engine.active().iter().map(|p| p.position), body) {
            let commands = autopilot(&mut flight, target, time, config);
            flight.apply(&commands, config);
        }

        let report = engine.tick(&flight.volume(time, &config.player));
        for event in &report.events {
            match event {
                TickEvent::PreyCaught { kind, points, .. } => {
                    tracing::info!(tick = report.tick, %kind, points, score = report.score, "Catch");
                }
                TickEvent::PoolExhausted { .. } => starved_ticks += 1,
                TickEvent::PreySpawned { .. } => {}
            }
        }
    }

    let scoreboard = engine.state().scoreboard();
    SessionSummary {
        seed: config.seed,
        ticks,
        score: scoreboard.score(),
        bats: scoreboard.catches(PreyKind::Bat),
        hummingbirds: scoreboard.catches(PreyKind::Hummingbird),
        cranes: scoreboard.catches(PreyKind::Crane),
        roads: layout.partition.roads.len(),
        blocks: layout.partition.blocks.len(),
        buildings: layout.lots.count(),
        initial_candidates,
        active_at_end: engine.state().active_count(),
        pool_at_end: engine.state().pool().len(),
        starved_ticks,
        final_position: flight.camera.to_array(),
        elapsed: start.elapsed(),
    }
}

fn nearest_prey(positions: impl Iterator<Item = Vec3>, from: Vec3) -> Option<Vec3> {
    positions.min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}
