//! Occupancy grid for the city layout

use serde::{Deserialize, Serialize};

use crate::core::types::CellCoord;

/// Fixed-size boolean grid marking road/building cells
///
/// `true` means the cell is occupied (road strip carrying building lots),
/// `false` is open ground. Populated once by the partitioner and treated
/// as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl OccupancyGrid {
    /// All-open grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Out-of-bounds cells read as open ground
    #[inline]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.index(x, y).map(|i| self.data[i]).unwrap_or(false)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, occupied: bool) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = occupied;
        }
    }

    /// Mark every cell in `[x, x + w) x [y, y + h)` occupied, clipped to the grid
    pub fn mark_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y.min(y_end)..y_end {
            for col in x.min(x_end)..x_end {
                self.data[row * self.width + col] = true;
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in column-major order (x outer, y inner)
    ///
    /// Generation walks cells in this order, so random draws made while
    /// iterating line up with it.
    pub fn occupied_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells().filter(|c| self.is_occupied(c.x, c.y))
    }

    /// Every cell in column-major order (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| CellCoord::new(x, y)))
    }

    /// One string per row, `#` for occupied and `.` for open
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.is_occupied(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}
