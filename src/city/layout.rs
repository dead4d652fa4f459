//! City generation: partition the grid, place building lots, sprinkle prey
//! candidates

use serde::{Deserialize, Serialize};

use crate::city::building::{cell_to_world, BuildingLots};
use crate::city::grid::OccupancyGrid;
use crate::city::partition::{partition, PartitionParams, PartitionSummary, Rect};
use crate::core::config::GameConfig;
use crate::core::random::RandomSource;
use crate::core::types::Vec3;
use crate::prey::{CandidateSource, PreyCandidate, PreyCandidatePool};

/// Everything generated at city-load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityLayout {
    pub grid: OccupancyGrid,
    pub partition: PartitionSummary,
    pub lots: BuildingLots,
    /// Candidate positions in generation order
    pub candidates: Vec<PreyCandidate>,
}

impl CityLayout {
    /// Hand the candidates over as a pool, leaving the layout's list empty
    pub fn take_pool(&mut self) -> PreyCandidatePool {
        PreyCandidatePool::from_candidates(std::mem::take(&mut self.candidates))
    }
}

/// Generate a complete city
///
/// Walks the partitioned grid column by column. Each occupied cell gets a
/// building lot and, with a small probability, a rooftop candidate. Every
/// cell, occupied or not, independently has a small chance of a street
/// candidate.
pub fn generate_city<R: RandomSource + ?Sized>(config: &GameConfig, rng: &mut R) -> CityLayout {
    let world = &config.world;
    let sprinkle = &config.sprinkle;

    let mut grid = OccupancyGrid::new(world.width, world.height);
    let summary = partition(
        &mut grid,
        Rect::new(0, 0, world.width, world.height),
        &PartitionParams::from(world),
        rng,
    );

    let mut lots = BuildingLots::new();
    let mut candidates = Vec::new();
    let street_altitude = config.player.min_altitude + sprinkle.hover_offset;

    for cell in grid.cells() {
        if grid.is_occupied(cell.x, cell.y) {
            let idx = lots.place(cell, world, &config.buildings, rng);
            if rng.unit() > sprinkle.building_top_threshold {
                if let Some(roof) = lots.roof(idx) {
                    candidates.push(PreyCandidate::new(
                        roof + Vec3::Y * sprinkle.hover_offset,
                        CandidateSource::Rooftop,
                    ));
                }
            }
        }

        if rng.unit() > sprinkle.street_threshold {
            candidates.push(PreyCandidate::new(
                Vec3::new(
                    cell_to_world(cell.x, world),
                    street_altitude,
                    cell_to_world(cell.y, world),
                ),
                CandidateSource::Street,
            ));
        }
    }

    tracing::info!(
        roads = summary.roads.len(),
        blocks = summary.blocks.len(),
        buildings = lots.count(),
        candidates = candidates.len(),
        "Generated {}x{} city",
        world.width,
        world.height
    );

    CityLayout {
        grid,
        partition: summary,
        lots,
        candidates,
    }
}
