//! Recursive binary space partitioning of the city into roads and blocks
//!
//! Each step flips a coin for orientation, cuts a road strip of fixed
//! thickness across the whole region, and recurses into the two leftover
//! rectangles. Regions thinner than the minimum block size become blocks.
//! The two children and the strip always tile their parent exactly.

use serde::{Deserialize, Serialize};

use crate::city::grid::OccupancyGrid;
use crate::core::config::WorldConfig;
use crate::core::error::{GameError, Result};
use crate::core::random::RandomSource;

/// Axis-aligned rectangle of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Direction a road strip runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitAxis {
    /// Strip spans the full width; region is cut by Y
    Horizontal,
    /// Strip spans the full height; region is cut by X
    Vertical,
}

/// Road strip laid down by one split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadStrip {
    pub axis: SplitAxis,
    pub rect: Rect,
    /// Recursion depth of the split that produced this strip (root = 0)
    pub depth: usize,
}

/// Tunables for one partition run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionParams {
    pub min_block_size: usize,
    pub road_width: usize,
    pub split_margin: usize,
    pub horizontal_split_threshold: f64,
    pub horizontal_bias_base: f64,
    pub horizontal_bias_span: f64,
}

impl Default for PartitionParams {
    fn default() -> Self {
        Self::from(&WorldConfig::default())
    }
}

impl From<&WorldConfig> for PartitionParams {
    fn from(world: &WorldConfig) -> Self {
        Self {
            min_block_size: world.min_block_size,
            road_width: world.road_width,
            split_margin: world.split_margin,
            horizontal_split_threshold: world.horizontal_split_threshold,
            horizontal_bias_base: world.horizontal_bias_base,
            horizontal_bias_span: world.horizontal_bias_span,
        }
    }
}

impl PartitionParams {
    /// Check that every strip fits inside the region it splits
    ///
    /// [`partition`] terminates for any params, but only valid params
    /// produce the intended road network.
    pub fn validate(&self) -> Result<()> {
        if self.road_width == 0 {
            return Err(GameError::InvalidConfig("road_width must be positive".into()));
        }

        if self.split_margin <= self.road_width {
            return Err(GameError::InvalidConfig(format!(
                "split_margin ({}) must exceed road_width ({})",
                self.split_margin, self.road_width
            )));
        }

        if self.min_block_size <= self.split_margin {
            return Err(GameError::InvalidConfig(format!(
                "min_block_size ({}) must exceed split_margin ({})",
                self.min_block_size, self.split_margin
            )));
        }

        let bias_max = self.horizontal_bias_base + self.horizontal_bias_span;
        if self.horizontal_bias_base < 0.0 || self.horizontal_bias_span < 0.0 || bias_max > 1.0 {
            return Err(GameError::InvalidConfig(format!(
                "horizontal bias band [{}, {}] must lie within [0, 1]",
                self.horizontal_bias_base, bias_max
            )));
        }

        Ok(())
    }
}

/// What a partition run laid down
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionSummary {
    /// Strips in the order they were cut
    pub roads: Vec<RoadStrip>,
    /// Non-empty leftover regions that hit the base case
    pub blocks: Vec<Rect>,
    /// Deepest recursion level reached (root = 0)
    pub max_depth: usize,
}

/// Subdivide `region` of `grid` into road strips and blocks
///
/// Road cells are marked occupied in `grid`; nothing else is touched. A
/// region already below the minimum size is left as one block, and so is
/// any region too thin to hold a strip under `params`.
pub fn partition<R: RandomSource + ?Sized>(
    grid: &mut OccupancyGrid,
    region: Rect,
    params: &PartitionParams,
    rng: &mut R,
) -> PartitionSummary {
    let mut summary = PartitionSummary::default();
    split_region(grid, region, 0, params, rng, &mut summary);
    tracing::debug!(
        roads = summary.roads.len(),
        blocks = summary.blocks.len(),
        max_depth = summary.max_depth,
        "Partitioned {}x{} region",
        region.width,
        region.height
    );
    summary
}

fn split_region<R: RandomSource + ?Sized>(
    grid: &mut OccupancyGrid,
    region: Rect,
    depth: usize,
    params: &PartitionParams,
    rng: &mut R,
    summary: &mut PartitionSummary,
) {
    summary.max_depth = summary.max_depth.max(depth);

    if region.area() == 0
        || region.width < params.min_block_size
        || region.height < params.min_block_size
    {
        leave_block(region, summary);
        return;
    }

    let road = params.road_width;

    if rng.unit() > params.horizontal_split_threshold {
        let bias = rng.unit() * params.horizontal_bias_span + params.horizontal_bias_base;
        let Some(split_y) = strip_offset(bias, region.height, params) else {
            leave_block(region, summary);
            return;
        };

        let strip = Rect::new(region.x, region.y + split_y, region.width, road);
        lay_road(grid, strip, SplitAxis::Horizontal, depth, summary);

        let below = Rect::new(
            region.x,
            region.y + split_y + road,
            region.width,
            region.height - (split_y + road),
        );
        let above = Rect::new(region.x, region.y, region.width, split_y);
        split_region(grid, below, depth + 1, params, rng, summary);
        split_region(grid, above, depth + 1, params, rng, summary);
    } else {
        let Some(split_x) = strip_offset(rng.unit(), region.width, params) else {
            leave_block(region, summary);
            return;
        };

        let strip = Rect::new(region.x + split_x, region.y, road, region.height);
        lay_road(grid, strip, SplitAxis::Vertical, depth, summary);

        let left = Rect::new(region.x, region.y, split_x, region.height);
        let right = Rect::new(
            region.x + split_x + road,
            region.y,
            region.width - (split_x + road),
            region.height,
        );
        split_region(grid, left, depth + 1, params, rng, summary);
        split_region(grid, right, depth + 1, params, rng, summary);
    }
}

/// Strip offset at `fraction` of the usable span of `extent`
///
/// `None` when no non-empty strip fits, so the caller stops splitting.
fn strip_offset(fraction: f64, extent: usize, params: &PartitionParams) -> Option<usize> {
    let usable = extent.checked_sub(params.split_margin)?;
    let offset = (fraction * usable as f64).floor() as usize;
    (params.road_width > 0 && offset + params.road_width <= extent).then_some(offset)
}

fn leave_block(region: Rect, summary: &mut PartitionSummary) {
    if region.area() > 0 {
        summary.blocks.push(region);
    }
}

fn lay_road(
    grid: &mut OccupancyGrid,
    strip: Rect,
    axis: SplitAxis,
    depth: usize,
    summary: &mut PartitionSummary,
) {
    grid.mark_rect(strip.x, strip.y, strip.width, strip.height);
    summary.roads.push(RoadStrip { axis, rect: strip, depth });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{ScriptedRandom, SeededRandom};

    fn run(width: usize, height: usize, rng: &mut impl RandomSource) -> (OccupancyGrid, PartitionSummary) {
        let mut grid = OccupancyGrid::new(width, height);
        let summary = partition(
            &mut grid,
            Rect::new(0, 0, width, height),
            &PartitionParams::default(),
            rng,
        );
        (grid, summary)
    }

    #[test]
    fn test_undersized_region_is_single_block() {
        let mut rng = ScriptedRandom::new(vec![0.9]);
        let (grid, summary) = run(19, 200, &mut rng);
        assert_eq!(grid.occupied_count(), 0);
        assert!(summary.roads.is_empty());
        assert_eq!(summary.blocks, vec![Rect::new(0, 0, 19, 200)]);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_empty_region_has_no_blocks() {
        let mut rng = SeededRandom::new(1);
        let (grid, summary) = run(0, 0, &mut rng);
        assert_eq!(grid.occupied_count(), 0);
        assert!(summary.blocks.is_empty());
        assert_eq!(summary.max_depth, 0);
    }

    #[test]
    fn test_single_vertical_split() {
        // 0.2 -> vertical; offset floor(0.5 * (20 - 5)) = 7
        let mut rng = ScriptedRandom::new(vec![0.2, 0.5]);
        let (grid, summary) = run(20, 20, &mut rng);

        assert_eq!(summary.roads.len(), 1);
        let road = summary.roads[0];
        assert_eq!(road.axis, SplitAxis::Vertical);
        assert_eq!(road.rect, Rect::new(7, 0, 4, 20));
        assert_eq!(grid.occupied_count(), 80);
        assert_eq!(
            summary.blocks,
            vec![Rect::new(0, 0, 7, 20), Rect::new(11, 0, 9, 20)]
        );
    }

    #[test]
    fn test_vertical_split_at_left_edge() {
        // offset 0 leaves an empty left region, which is not a block
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0]);
        let (_, summary) = run(20, 20, &mut rng);
        assert_eq!(summary.roads[0].rect, Rect::new(0, 0, 4, 20));
        assert_eq!(summary.blocks, vec![Rect::new(4, 0, 16, 20)]);
    }

    #[test]
    fn test_single_horizontal_split() {
        // 0.6 -> horizontal; offset floor((0.3 * 0.1 + 0.5) * 15) = 7
        let mut rng = ScriptedRandom::new(vec![0.6, 0.3]);
        let (grid, summary) = run(20, 20, &mut rng);

        assert_eq!(summary.roads.len(), 1);
        assert_eq!(summary.roads[0].axis, SplitAxis::Horizontal);
        assert_eq!(summary.roads[0].rect, Rect::new(0, 7, 20, 4));
        assert!(grid.is_occupied(0, 7));
        assert!(grid.is_occupied(19, 10));
        assert!(!grid.is_occupied(0, 11));
        // below first, then above
        assert_eq!(
            summary.blocks,
            vec![Rect::new(0, 11, 20, 9), Rect::new(0, 0, 20, 7)]
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        // exactly 0.5 is not "above", so the split is vertical
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0]);
        let (_, summary) = run(20, 20, &mut rng);
        assert_eq!(summary.roads[0].axis, SplitAxis::Vertical);
    }

    #[test]
    fn test_seeded_runs_match() {
        let (a, _) = run(200, 200, &mut SeededRandom::new(99));
        let (b, _) = run(200, 200, &mut SeededRandom::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_small_min_block_still_tiles() {
        // regions thinner than the margin become blocks instead of splitting
        let params = PartitionParams {
            min_block_size: 3,
            ..PartitionParams::default()
        };
        assert!(params.validate().is_err());

        let mut grid = OccupancyGrid::new(40, 40);
        let summary = partition(&mut grid, Rect::new(0, 0, 40, 40), &params, &mut SeededRandom::new(4));

        let mut counts = vec![0u32; 40 * 40];
        let rects = summary.roads.iter().map(|r| r.rect).chain(summary.blocks.iter().copied());
        for rect in rects {
            for y in rect.y..rect.y + rect.height {
                for x in rect.x..rect.x + rect.width {
                    counts[y * 40 + x] += 1;
                }
            }
        }
        assert!(counts.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_zero_road_width_leaves_one_block() {
        let params = PartitionParams {
            road_width: 0,
            ..PartitionParams::default()
        };
        assert!(matches!(params.validate(), Err(GameError::InvalidConfig(_))));

        let mut grid = OccupancyGrid::new(30, 30);
        let summary = partition(&mut grid, Rect::new(0, 0, 30, 30), &params, &mut SeededRandom::new(2));
        assert!(summary.roads.is_empty());
        assert_eq!(summary.blocks, vec![Rect::new(0, 0, 30, 30)]);
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(PartitionParams::default().validate().is_ok());
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 8));
    }
}
