//! Render model handed to the host UI

use serde::Serialize;
use shared::models::TableShape;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub x: i32,
    pub y: i32,
    pub left: f64,
    pub top: f64,
    /// Table whose footprint covers this cell
    pub covered_by: Option<i64>,
    /// A new table could be anchored here
    pub placeable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub id: i64,
    pub label: String,
    pub capacity: u32,
    pub shape: TableShape,
    pub x: i32,
    pub y: i32,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub selected: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceView {
    pub zone_id: i64,
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_px: f64,
    pub width_px: f64,
    pub height_px: f64,
    pub editable: bool,
    pub placement_mode: bool,
    pub cells: Vec<CellView>,
    pub tables: Vec<TableView>,
}

impl SurfaceView {
    pub fn table(&self, id: i64) -> Option<&TableView> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&CellView> {
        self.cells.iter().find(|c| c.x == x && c.y == y)
    }
}
