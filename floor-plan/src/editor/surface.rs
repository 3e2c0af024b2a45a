//! Editor surface
//!
//! Owns the authoritative in-memory layout of one zone for the duration of
//! an editing session, wires pointer events to the drag controller and
//! forwards every committed mutation to the [`LayoutHost`]. When the host
//! rejects a mutation the local change is rolled back.

use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, DiningTableUpdate, TableShape, Zone};
use shared::{AppError, AppResult};

use super::host::LayoutHost;
use super::view::{CellView, SurfaceView, TableView};
use crate::core::{EditorConfig, Session};
use crate::drag::{DragController, DragSummary, Point};
use crate::grid::{Cell, Grid};
use crate::placement::{MoveOutcome, PlacedTable, PlacementEngine, TableEdit};
use crate::records;
use crate::utils::permissions::TABLES_MANAGE;
use crate::utils::validation::{MAX_LABEL_PREFIX_LEN, validate_capacity, validate_required_text};

/// Defaults for tables created by a click in placement mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTemplate {
    pub label_prefix: String,
    pub capacity: u32,
    pub shape: TableShape,
}

/// What a pointer-down (or cell click) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// Hit a table: it is selected (and dragged when editable)
    Table(i64),
    /// Placement mode created a table
    Created(i64),
    /// Empty grid space cleared the selection
    Cleared,
    /// Outside the grid, nothing happened
    Ignored,
}

pub struct EditorSurface<H: LayoutHost> {
    zone_id: i64,
    engine: PlacementEngine,
    drag: DragController,
    tables: Vec<PlacedTable>,
    selected: Option<i64>,
    placement_mode: bool,
    template: TableTemplate,
    editable: bool,
    host: H,
}

impl<H: LayoutHost> EditorSurface<H> {
    /// Open the editor for `zone` with the rows the host loaded.
    ///
    /// Requires a signed-in employee; without `tables:manage` the surface is
    /// read-only. Inactive rows and rows of other zones are skipped; any
    /// other invalid row fails the whole load.
    pub fn open(
        config: &EditorConfig,
        session: &Session,
        zone: &Zone,
        rows: &[DiningTable],
        host: H,
    ) -> AppResult<Self> {
        config.validate()?;
        if session.employee().is_none() {
            return Err(AppError::not_authenticated());
        }

        let grid = Grid::new(zone.grid_width, zone.grid_height, &config.grid_limits)?;
        let engine = PlacementEngine::new(grid, config.footprints.clone(), config.collision);

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            if !row.is_active {
                continue;
            }
            if row.zone_id != zone.id {
                tracing::warn!(table_id = row.id, zone_id = row.zone_id, "Skipping row of another zone");
                continue;
            }
            let table = records::table_from_row(row)?;
            engine
                .place(&mut tables, table)
                .map_err(|e| AppError::from(e).with_detail("row", row.id))?;
        }

        let editable = session.has_permission(TABLES_MANAGE);
        tracing::info!(
            zone_id = zone.id,
            tables = tables.len(),
            editable,
            collision = ?config.collision,
            "Floor editor opened"
        );

        Ok(Self {
            zone_id: zone.id,
            engine,
            drag: DragController::new(config.cell_px),
            tables,
            selected: None,
            placement_mode: false,
            template: TableTemplate {
                label_prefix: "T".into(),
                capacity: config.default_capacity,
                shape: TableShape::Square,
            },
            editable,
            host,
        })
    }

    // ========== Accessors ==========

    pub fn zone_id(&self) -> i64 {
        self.zone_id
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn tables(&self) -> &[PlacedTable] {
        &self.tables
    }

    pub fn table(&self, id: i64) -> Option<&PlacedTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn placement_mode(&self) -> bool {
        self.placement_mode
    }

    pub fn template(&self) -> &TableTemplate {
        &self.template
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // ========== Modes ==========

    pub fn set_template(&mut self, template: TableTemplate) -> AppResult<()> {
        validate_required_text(&template.label_prefix, "label_prefix", MAX_LABEL_PREFIX_LEN)?;
        validate_capacity(template.capacity as i64)?;
        self.template = template;
        Ok(())
    }

    pub fn set_placement_mode(&mut self, on: bool) -> AppResult<()> {
        if on {
            self.ensure_editable()?;
        }
        self.placement_mode = on;
        Ok(())
    }

    pub fn toggle_placement_mode(&mut self) -> AppResult<bool> {
        self.set_placement_mode(!self.placement_mode)?;
        Ok(self.placement_mode)
    }

    /// Change the selection, notifying the host only on change
    pub fn select(&mut self, id: Option<i64>) {
        let id = id.filter(|id| self.table(*id).is_some());
        if self.selected != id {
            self.selected = id;
            self.host.select(id);
        }
    }

    // ========== Pointer input ==========

    /// Topmost table whose footprint contains `point`
    pub fn table_at(&self, point: Point) -> Option<i64> {
        let cell_px = self.drag.cell_px();
        self.tables
            .iter()
            .rev()
            .find(|t| {
                let origin = self.drag.origin_of(t.anchor);
                let size = self.engine.footprint_of(t);
                point.x >= origin.x
                    && point.x < origin.x + size.width as f64 * cell_px
                    && point.y >= origin.y
                    && point.y < origin.y + size.height as f64 * cell_px
            })
            .map(|t| t.id)
    }

    /// Press at `point`.
    ///
    /// In placement mode a cell where a table may be anchored creates one,
    /// even when another table's footprint covers it; otherwise a table
    /// under the pointer is selected (and dragged when editable).
    pub fn pointer_down(&mut self, point: Point) -> AppResult<PointerDown> {
        let cell = self.drag.cell_at(point);
        if self.placement_mode && self.engine.can_place(&self.tables, cell) {
            return self.click_cell(cell);
        }
        if let Some(id) = self.table_at(point) {
            self.select(Some(id));
            if self.editable {
                if let Some(table) = self.tables.iter().find(|t| t.id == id) {
                    self.drag.begin(table, point);
                }
            }
            return Ok(PointerDown::Table(id));
        }
        self.click_cell(cell)
    }

    /// Click on a cell not covered by a table
    pub fn click_cell(&mut self, cell: Cell) -> AppResult<PointerDown> {
        if self.placement_mode {
            return self.create_at(cell).map(PointerDown::Created);
        }
        if !self.engine.grid().contains(cell) {
            return Ok(PointerDown::Ignored);
        }
        self.select(None);
        Ok(PointerDown::Cleared)
    }

    /// Follow the pointer during a drag, persisting every committed move
    pub fn pointer_move(&mut self, point: Point) -> AppResult<Option<MoveOutcome>> {
        let Some(table_id) = self.drag.active_table() else {
            return Ok(None);
        };
        let Some(outcome) = self.drag.drag_to(&self.engine, &mut self.tables, point) else {
            return Ok(None);
        };

        if let MoveOutcome::Moved { from, to } = outcome {
            let patch = DiningTableUpdate::position(to.x, to.y);
            if let Err(e) = self.host.update(table_id, &patch) {
                tracing::warn!(table_id, error = %e, "Host rejected move, reverting");
                self.engine.move_table(&mut self.tables, table_id, from.x, from.y);
                self.drag.rollback();
                return Err(e);
            }
        }
        Ok(Some(outcome))
    }

    pub fn pointer_up(&mut self) -> Option<DragSummary> {
        self.drag.end()
    }

    // ========== Mutations ==========

    /// Create a table from the template anchored at `cell`
    pub fn create_at(&mut self, cell: Cell) -> AppResult<i64> {
        self.ensure_editable()?;

        let size = self
            .engine
            .footprint_for(self.template.capacity, self.template.shape);
        if let Err(e) = self.engine.check(&self.tables, cell, size, None) {
            tracing::debug!(x = cell.x, y = cell.y, error = %e, "Placement rejected");
            return Err(e.into());
        }

        let mut table = PlacedTable {
            id: 0,
            label: self.next_label(),
            capacity: self.template.capacity,
            shape: self.template.shape,
            anchor: cell,
        };
        records::validate_table(&table)?;
        let payload = records::create_payload(self.zone_id, &table);
        table.id = self.host.add(&payload).inspect_err(|e| {
            tracing::warn!(x = cell.x, y = cell.y, error = %e, "Host rejected new table");
        })?;

        let id = self.engine.place(&mut self.tables, table)?;
        tracing::info!(table_id = id, zone_id = self.zone_id, x = cell.x, y = cell.y, "Table created");
        self.select(Some(id));
        Ok(id)
    }

    /// Edit label, capacity or shape; unknown ids are a no-op
    pub fn update_fields(&mut self, id: i64, mut edit: TableEdit) -> AppResult<()> {
        self.ensure_editable()?;
        if edit.is_empty() {
            return Ok(());
        }
        records::normalize_edit(&mut edit)?;

        let Some(previous) = self.engine.edit(&mut self.tables, id, &edit)? else {
            tracing::debug!(table_id = id, "Edit for unknown table ignored");
            return Ok(());
        };

        if let Err(e) = self.host.update(id, &records::edit_payload(&edit)) {
            tracing::warn!(table_id = id, error = %e, "Host rejected edit, reverting");
            if let Some(table) = self.tables.iter_mut().find(|t| t.id == id) {
                *table = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    /// Delete a table; unknown ids are a no-op
    pub fn delete(&mut self, id: i64) -> AppResult<()> {
        self.ensure_editable()?;

        let Some(index) = self.tables.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let Some(removed) = self.engine.remove(&mut self.tables, id) else {
            return Ok(());
        };

        if let Err(e) = self.host.delete(id) {
            tracing::warn!(table_id = id, error = %e, "Host rejected delete, restoring");
            self.tables.insert(index, removed);
            return Err(e);
        }

        if self.drag.active_table() == Some(id) {
            self.drag.end();
        }
        if self.selected == Some(id) {
            self.selected = None;
            self.host.select(None);
        }
        tracing::info!(table_id = id, zone_id = self.zone_id, "Table deleted");
        Ok(())
    }

    // ========== Rendering ==========

    pub fn view(&self) -> SurfaceView {
        let grid = self.engine.grid();
        let cell_px = self.drag.cell_px();
        let dragging = self.drag.active_table();

        let cells = grid
            .cells()
            .map(|cell| {
                let origin = self.drag.origin_of(cell);
                CellView {
                    x: cell.x,
                    y: cell.y,
                    left: origin.x,
                    top: origin.y,
                    covered_by: self
                        .tables
                        .iter()
                        .rev()
                        .find(|t| self.engine.rect_of(t).contains(cell))
                        .map(|t| t.id),
                    placeable: self.engine.can_place(&self.tables, cell),
                }
            })
            .collect();

        let tables = self
            .tables
            .iter()
            .map(|t| {
                let origin = self.drag.origin_of(t.anchor);
                let size = self.engine.footprint_of(t);
                TableView {
                    id: t.id,
                    label: t.label.clone(),
                    capacity: t.capacity,
                    shape: t.shape,
                    x: t.anchor.x,
                    y: t.anchor.y,
                    left: origin.x,
                    top: origin.y,
                    width: size.width as f64 * cell_px,
                    height: size.height as f64 * cell_px,
                    selected: self.selected == Some(t.id),
                    dragging: dragging == Some(t.id),
                }
            })
            .collect();

        SurfaceView {
            zone_id: self.zone_id,
            grid_width: grid.width(),
            grid_height: grid.height(),
            cell_px,
            width_px: grid.width() as f64 * cell_px,
            height_px: grid.height() as f64 * cell_px,
            editable: self.editable,
            placement_mode: self.placement_mode,
            cells,
            tables,
        }
    }

    // ========== Helpers ==========

    fn ensure_editable(&self) -> AppResult<()> {
        if self.editable {
            Ok(())
        } else {
            Err(AppError::permission_denied("Layout is read-only").with_detail("permission", TABLES_MANAGE))
        }
    }

    fn next_label(&self) -> String {
        let mut n = self.tables.len() + 1;
        loop {
            let label = format!("{}{}", self.template.label_prefix, n);
            if !self.tables.iter().any(|t| t.label == label) {
                return label;
            }
            n += 1;
        }
    }
}
