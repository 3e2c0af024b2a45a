//! Drag controller
//!
//! Turns continuous pointer coordinates (pixels) into discrete grid moves.
//! Driven synchronously by pointer events; every move that changes the
//! anchor is committed immediately, there is no batching.

use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::placement::{MoveOutcome, PlacedTable, PlacementEngine};

/// Pointer position in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    table_id: i64,
    /// Pointer offset from the table's pixel origin at gesture start
    offset: Point,
    /// Moves committed and not rolled back
    committed: u32,
}

/// How a finished gesture went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSummary {
    pub table_id: i64,
    /// At least one move was committed during the gesture
    pub moved: bool,
}

#[derive(Debug, Clone)]
pub struct DragController {
    cell_px: f64,
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new(cell_px: f64) -> Self {
        Self {
            cell_px,
            active: None,
        }
    }

    pub fn cell_px(&self) -> f64 {
        self.cell_px
    }

    /// Pixel origin of `cell`
    pub fn origin_of(&self, cell: Cell) -> Point {
        Point::new(cell.x as f64 * self.cell_px, cell.y as f64 * self.cell_px)
    }

    /// Cell under `point` (may lie outside the grid)
    pub fn cell_at(&self, point: Point) -> Cell {
        Cell::new(
            (point.x / self.cell_px).floor() as i32,
            (point.y / self.cell_px).floor() as i32,
        )
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_table(&self) -> Option<i64> {
        self.active.map(|a| a.table_id)
    }

    /// Start dragging `table`, remembering where on it the pointer grabbed
    pub fn begin(&mut self, table: &PlacedTable, pointer: Point) {
        let origin = self.origin_of(table.anchor);
        self.active = Some(ActiveDrag {
            table_id: table.id,
            offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
            committed: 0,
        });
        tracing::trace!(table_id = table.id, "Drag started");
    }

    /// Cell the active table would snap to for `pointer`, unclamped
    pub fn candidate_cell(&self, pointer: Point) -> Option<Cell> {
        let drag = self.active?;
        Some(Cell::new(
            ((pointer.x - drag.offset.x) / self.cell_px).round() as i32,
            ((pointer.y - drag.offset.y) / self.cell_px).round() as i32,
        ))
    }

    /// Follow the pointer: snap, clamp and commit through the engine.
    ///
    /// Returns `None` when no drag is active.
    pub fn drag_to(
        &mut self,
        engine: &PlacementEngine,
        tables: &mut [PlacedTable],
        pointer: Point,
    ) -> Option<MoveOutcome> {
        let candidate = engine.grid().clamp(self.candidate_cell(pointer)?);
        let drag = self.active.as_mut()?;

        let current = tables.iter().find(|t| t.id == drag.table_id).map(|t| t.anchor);
        let outcome = match current {
            None => MoveOutcome::NotFound,
            Some(anchor) if anchor == candidate => MoveOutcome::Unchanged,
            Some(_) => engine.move_table(tables, drag.table_id, candidate.x, candidate.y),
        };

        if matches!(outcome, MoveOutcome::Moved { .. }) {
            drag.committed += 1;
        }
        Some(outcome)
    }

    /// Forget the last committed move after the caller undid it
    pub fn rollback(&mut self) {
        if let Some(drag) = self.active.as_mut() {
            drag.committed = drag.committed.saturating_sub(1);
        }
    }

    /// Finish the gesture; the last committed move stands
    pub fn end(&mut self) -> Option<DragSummary> {
        let drag = self.active.take()?;
        let moved = drag.committed > 0;
        tracing::trace!(table_id = drag.table_id, moved, "Drag ended");
        Some(DragSummary {
            table_id: drag.table_id,
            moved,
        })
    }
}
