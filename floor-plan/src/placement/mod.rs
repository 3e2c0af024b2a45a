//! Placement engine: grid occupancy, footprints and table mutations

mod engine;
mod error;
mod footprint;

pub use engine::{CollisionMode, MoveOutcome, PlacedTable, PlacementEngine, TableEdit};
pub use error::PlacementError;
pub use footprint::{Footprint, FootprintTier, FootprintTiers, Rect};
