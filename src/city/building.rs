//! Building lots with SoA layout
//!
//! Every occupied grid cell carries one building. Only the placement data
//! lives here (where, how wide, how tall); meshes and colors belong to the
//! renderer.

use serde::{Deserialize, Serialize};

use crate::core::config::{BuildingConfig, WorldConfig};
use crate::core::random::RandomSource;
use crate::core::types::{CellCoord, Vec2, Vec3};

/// Structure of Arrays for building lots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingLots {
    /// Grid cell each lot stands on
    pub cells: Vec<CellCoord>,
    /// Base position in world space (y = 0)
    pub positions: Vec<Vec3>,
    /// Footprint along x and z
    pub footprints: Vec<Vec2>,
    /// Height above ground
    pub heights: Vec<f32>,
}

impl BuildingLots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a building on `cell`, returning its index
    ///
    /// Footprints are `(1 - u*u) * max`, skewed toward full width. Height is
    /// `u*u*u * footprint_x * scale + base`, so most buildings are close to
    /// the base height with a few tall towers.
    pub fn place<R: RandomSource + ?Sized>(
        &mut self,
        cell: CellCoord,
        world: &WorldConfig,
        buildings: &BuildingConfig,
        rng: &mut R,
    ) -> usize {
        let position = Vec3::new(
            cell_to_world(cell.x, world) + world.building_offset,
            0.0,
            cell_to_world(cell.y, world) + world.building_offset,
        );

        let footprint_x = (1.0 - rng.unit() * rng.unit()) as f32 * buildings.max_footprint;
        let footprint_z = (1.0 - rng.unit() * rng.unit()) as f32 * buildings.max_footprint;
        let tower = (rng.unit() * rng.unit() * rng.unit()) as f32;
        let height = tower * footprint_x * buildings.height_scale + buildings.height_base;

        self.cells.push(cell);
        self.positions.push(position);
        self.footprints.push(Vec2::new(footprint_x, footprint_z));
        self.heights.push(height);
        self.cells.len() - 1
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Centre of the roof of lot `index`
    pub fn roof(&self, index: usize) -> Option<Vec3> {
        let base = self.positions.get(index)?;
        let height = self.heights.get(index)?;
        Some(Vec3::new(base.x, *height, base.z))
    }

    pub fn tallest(&self) -> Option<f32> {
        self.heights.iter().copied().reduce(f32::max)
    }
}

/// World coordinate of the low edge of grid column/row `index`
#[inline]
pub fn cell_to_world(index: usize, world: &WorldConfig) -> f32 {
    index as f32 * world.cell_size + world.origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedRandom;

    #[test]
    fn test_cell_to_world() {
        let world = WorldConfig::default();
        assert_eq!(cell_to_world(0, &world), -500.0);
        assert_eq!(cell_to_world(100, &world), 0.0);
        assert_eq!(cell_to_world(199, &world), 495.0);
    }

    #[test]
    fn test_place_dimensions() {
        let world = WorldConfig::default();
        let buildings = BuildingConfig::default();
        // x: 1 - 0.5*0.5, z: 1 - 0*0, tower: 0.5^3
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.0, 0.0, 0.5, 0.5, 0.5]);
        let mut lots = BuildingLots::new();

        let idx = lots.place(CellCoord::new(10, 20), &world, &buildings, &mut rng);

        assert_eq!(idx, 0);
        assert_eq!(rng.draws(), 7);
        assert_eq!(lots.positions[0], Vec3::new(-449.0, 0.0, -399.0));
        assert!((lots.footprints[0].x - 3.75).abs() < 1e-5);
        assert!((lots.footprints[0].y - 5.0).abs() < 1e-5);
        // 0.125 * 3.75 * 8 + 8
        assert!((lots.heights[0] - 11.75).abs() < 1e-4);
    }

    #[test]
    fn test_minimum_height_is_base() {
        let mut rng = ScriptedRandom::new(vec![0.0]);
        let mut lots = BuildingLots::new();
        lots.place(
            CellCoord::new(0, 0),
            &WorldConfig::default(),
            &BuildingConfig::default(),
            &mut rng,
        );
        assert_eq!(lots.heights[0], 8.0);
        assert_eq!(lots.roof(0), Some(Vec3::new(-499.0, 8.0, -499.0)));
        assert_eq!(lots.roof(1), None);
    }
}
