//! Placement engine
//!
//! Validates and commits table placements against the grid's occupancy
//! constraint. The engine owns no tables: callers pass the session's table
//! set in and receive either the mutation or an error with the set untouched.

use serde::{Deserialize, Serialize};
use shared::models::TableShape;
use std::str::FromStr;

use super::error::PlacementError;
use super::footprint::{Footprint, FootprintTiers, Rect};
use crate::grid::{Cell, Grid};

/// How two tables are considered to collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Only anchor cells are compared
    #[default]
    Anchor,
    /// Full footprint rectangles must not overlap
    Footprint,
}

impl FromStr for CollisionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchor" => Ok(Self::Anchor),
            "footprint" => Ok(Self::Footprint),
            other => Err(format!("unknown collision mode: {other}")),
        }
    }
}

/// Table placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTable {
    pub id: i64,
    pub label: String,
    pub capacity: u32,
    pub shape: TableShape,
    pub anchor: Cell,
}

/// Field edits for a placed table; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEdit {
    pub label: Option<String>,
    pub capacity: Option<u32>,
    pub shape: Option<TableShape>,
}

impl TableEdit {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.capacity.is_none() && self.shape.is_none()
    }
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Anchor changed
    Moved { from: Cell, to: Cell },
    /// Clamped destination equals the current anchor
    Unchanged,
    /// Clamped destination collides with another table; position kept
    Blocked { at: Cell, by: i64 },
    /// No table with that id
    NotFound,
}

#[derive(Debug, Clone)]
pub struct PlacementEngine {
    grid: Grid,
    tiers: FootprintTiers,
    collision: CollisionMode,
}

impl PlacementEngine {
    pub fn new(grid: Grid, tiers: FootprintTiers, collision: CollisionMode) -> Self {
        Self {
            grid,
            tiers,
            collision,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn collision(&self) -> CollisionMode {
        self.collision
    }

    pub fn footprint_for(&self, capacity: u32, shape: TableShape) -> Footprint {
        self.tiers.footprint_for(capacity, shape)
    }

    pub fn footprint_of(&self, table: &PlacedTable) -> Footprint {
        self.footprint_for(table.capacity, table.shape)
    }

    pub fn rect_of(&self, table: &PlacedTable) -> Rect {
        Rect::at(table.anchor, self.footprint_of(table))
    }

    /// Whether a new table could be anchored at `cell`.
    ///
    /// In footprint mode the queried cell counts as a 1×1 footprint.
    pub fn can_place(&self, tables: &[PlacedTable], cell: Cell) -> bool {
        self.check(tables, cell, Footprint::UNIT, None).is_ok()
    }

    /// Full legality check for anchoring a `size` footprint at `anchor`,
    /// ignoring the table `ignore` (the one being moved or reshaped).
    pub fn check(
        &self,
        tables: &[PlacedTable],
        anchor: Cell,
        size: Footprint,
        ignore: Option<i64>,
    ) -> Result<(), PlacementError> {
        if !self.grid.contains(anchor) {
            return Err(PlacementError::OutOfBounds {
                x: anchor.x,
                y: anchor.y,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }

        match self.collider(tables, Rect::at(anchor, size), ignore) {
            Some(occupant) => Err(PlacementError::OccupiedCell {
                x: anchor.x,
                y: anchor.y,
                occupant,
            }),
            None => Ok(()),
        }
    }

    fn collider(&self, tables: &[PlacedTable], candidate: Rect, ignore: Option<i64>) -> Option<i64> {
        tables
            .iter()
            .filter(|t| Some(t.id) != ignore)
            .find(|t| match self.collision {
                CollisionMode::Anchor => t.anchor == candidate.origin,
                CollisionMode::Footprint => self.rect_of(t).intersects(&candidate),
            })
            .map(|t| t.id)
    }

    /// Append `table` and return its id
    pub fn place(
        &self,
        tables: &mut Vec<PlacedTable>,
        table: PlacedTable,
    ) -> Result<i64, PlacementError> {
        if tables.iter().any(|t| t.id == table.id) {
            return Err(PlacementError::DuplicateId(table.id));
        }
        self.check(tables, table.anchor, self.footprint_of(&table), None)?;

        tracing::debug!(
            table_id = table.id,
            x = table.anchor.x,
            y = table.anchor.y,
            "Table placed"
        );
        let id = table.id;
        tables.push(table);
        Ok(id)
    }

    /// Move table `id` to `(x, y)`, clamped into the grid first
    pub fn move_table(&self, tables: &mut [PlacedTable], id: i64, x: i32, y: i32) -> MoveOutcome {
        let target = self.grid.clamp(Cell::new(x, y));

        let Some(index) = tables.iter().position(|t| t.id == id) else {
            return MoveOutcome::NotFound;
        };
        let from = tables[index].anchor;
        if from == target {
            return MoveOutcome::Unchanged;
        }

        let size = self.footprint_of(&tables[index]);
        if let Some(by) = self.collider(tables, Rect::at(target, size), Some(id)) {
            tracing::debug!(table_id = id, x = target.x, y = target.y, by, "Move blocked");
            return MoveOutcome::Blocked { at: target, by };
        }

        tables[index].anchor = target;
        tracing::debug!(
            table_id = id,
            from_x = from.x,
            from_y = from.y,
            x = target.x,
            y = target.y,
            "Table moved"
        );
        MoveOutcome::Moved { from, to: target }
    }

    /// Apply field edits to table `id`.
    ///
    /// Returns the table as it was before the edit, or `None` for an
    /// unknown id. A capacity or shape change that would grow the footprint
    /// into another table is rejected in footprint mode.
    pub fn edit(
        &self,
        tables: &mut [PlacedTable],
        id: i64,
        edit: &TableEdit,
    ) -> Result<Option<PlacedTable>, PlacementError> {
        let Some(index) = tables.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let previous = tables[index].clone();
        let capacity = edit.capacity.unwrap_or(previous.capacity);
        let shape = edit.shape.unwrap_or(previous.shape);
        if capacity != previous.capacity || shape != previous.shape {
            let size = self.footprint_for(capacity, shape);
            self.check(tables, previous.anchor, size, Some(id))?;
        }

        let table = &mut tables[index];
        if let Some(label) = &edit.label {
            table.label = label.clone();
        }
        table.capacity = capacity;
        table.shape = shape;
        Ok(Some(previous))
    }

    /// Remove table `id`; unknown ids are a no-op
    pub fn remove(&self, tables: &mut Vec<PlacedTable>, id: i64) -> Option<PlacedTable> {
        let index = tables.iter().position(|t| t.id == id)?;
        tracing::debug!(table_id = id, "Table removed");
        Some(tables.remove(index))
    }
}
