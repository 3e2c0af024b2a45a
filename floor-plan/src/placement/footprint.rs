//! Table footprints
//!
//! A table's footprint is the rectangle of cells it visually covers. It is
//! derived from capacity and shape through a step table and recomputed on
//! every change, never stored on the record.

use serde::{Deserialize, Serialize};
use shared::models::TableShape;

use crate::core::config::ConfigError;
use crate::grid::Cell;

/// Footprint size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: i32,
    pub height: i32,
}

impl Footprint {
    pub const UNIT: Footprint = Footprint::new(1, 1);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Component-wise `>=`
    pub fn covers(&self, other: &Footprint) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

/// Cell rectangle anchored at its top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: Cell,
    pub size: Footprint,
}

impl Rect {
    pub fn at(origin: Cell, size: Footprint) -> Self {
        Self { origin, size }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.origin.x
            && cell.x < self.origin.x + self.size.width
            && cell.y >= self.origin.y
            && cell.y < self.origin.y + self.size.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.origin.x + other.size.width
            && other.origin.x < self.origin.x + self.size.width
            && self.origin.y < other.origin.y + other.size.height
            && other.origin.y < self.origin.y + self.size.height
    }
}

/// One step of the capacity → footprint function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintTier {
    /// Highest capacity served by this tier
    pub max_capacity: u32,
    /// Footprint for square and round tables
    pub compact: Footprint,
    /// Footprint for rectangle tables
    pub rectangle: Footprint,
}

impl FootprintTier {
    const fn new(max_capacity: u32, compact: Footprint, rectangle: Footprint) -> Self {
        Self {
            max_capacity,
            compact,
            rectangle,
        }
    }

    fn for_shape(&self, shape: TableShape) -> Footprint {
        match shape {
            TableShape::Square | TableShape::Round => self.compact,
            TableShape::Rectangle => self.rectangle,
        }
    }
}

/// Ordered step table; capacities above the last tier use the last tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootprintTiers {
    tiers: Vec<FootprintTier>,
}

impl Default for FootprintTiers {
    fn default() -> Self {
        Self {
            tiers: vec![
                FootprintTier::new(2, Footprint::new(1, 1), Footprint::new(1, 1)),
                FootprintTier::new(4, Footprint::new(2, 2), Footprint::new(2, 2)),
                FootprintTier::new(6, Footprint::new(2, 2), Footprint::new(3, 2)),
                FootprintTier::new(8, Footprint::new(3, 3), Footprint::new(4, 2)),
                FootprintTier::new(u32::MAX, Footprint::new(4, 4), Footprint::new(5, 3)),
            ],
        }
    }
}

impl FootprintTiers {
    pub fn new(tiers: Vec<FootprintTier>) -> Result<Self, ConfigError> {
        let tiers = Self { tiers };
        tiers.validate()?;
        Ok(tiers)
    }

    pub fn tiers(&self) -> &[FootprintTier] {
        &self.tiers
    }

    /// Footprint for a table of `capacity` seats and `shape`
    pub fn footprint_for(&self, capacity: u32, shape: TableShape) -> Footprint {
        self.tiers
            .iter()
            .find(|tier| capacity <= tier.max_capacity)
            .or_else(|| self.tiers.last())
            .map(|tier| tier.for_shape(shape))
            .unwrap_or(Footprint::UNIT)
    }

    /// Reject tables that would make the step function non-monotonic
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::Footprint("at least one tier is required".into()));
        }

        for tier in &self.tiers {
            for size in [tier.compact, tier.rectangle] {
                if size.width < 1 || size.height < 1 {
                    return Err(ConfigError::Footprint(format!(
                        "tier up to {} has an empty footprint {}x{}",
                        tier.max_capacity, size.width, size.height
                    )));
                }
            }
        }

        for pair in self.tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.max_capacity <= lower.max_capacity {
                return Err(ConfigError::Footprint(format!(
                    "tier capacities must be strictly increasing ({} then {})",
                    lower.max_capacity, upper.max_capacity
                )));
            }
            if !upper.compact.covers(&lower.compact) || !upper.rectangle.covers(&lower.rectangle) {
                return Err(ConfigError::Footprint(format!(
                    "tier up to {} shrinks the footprint of tier up to {}",
                    upper.max_capacity, lower.max_capacity
                )));
            }
        }

        Ok(())
    }
}
