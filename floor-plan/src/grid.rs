//! Floor grid model
//!
//! A zone's floor is a `width × height` grid of integer cells. Tables are
//! anchored at a cell; valid cells satisfy `0 <= x < width`, `0 <= y < height`.

use serde::{Deserialize, Serialize};

use crate::placement::PlacementError;

/// Cell coordinate on the floor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Allowed range for each grid axis (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLimits {
    pub min: i32,
    pub max: i32,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self { min: 5, max: 20 }
    }
}

impl GridLimits {
    pub fn allows(&self, size: i32) -> bool {
        (self.min..=self.max).contains(&size)
    }
}

/// Rectangular floor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid, rejecting dimensions outside `limits`.
    ///
    /// Each axis needs at least one cell whatever the limits say.
    pub fn new(width: i32, height: i32, limits: &GridLimits) -> Result<Self, PlacementError> {
        if width < 1 || height < 1 || !limits.allows(width) || !limits.allows(height) {
            return Err(PlacementError::InvalidGrid {
                width,
                height,
                min: limits.min,
                max: limits.max,
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Whether `cell` lies within `[0, width) × [0, height)`
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Clamp `cell` onto the nearest valid cell
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.clamp(0, self.width - 1),
            y: cell.y.clamp(0, self.height - 1),
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}
