//! Row boundary
//!
//! Converts rows read from the hosted database into validated placement
//! records, and placement changes back into write payloads.

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::placement::{PlacedTable, TableEdit};
use crate::utils::validation::{MAX_LABEL_LEN, validate_capacity, validate_required_text};

/// Decode raw JSON rows (an array of table objects)
pub fn parse_rows(value: serde_json::Value) -> AppResult<Vec<DiningTable>> {
    serde_json::from_value(value).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid table rows: {e}"))
    })
}

/// Validate one row and convert it into a placement record.
///
/// Bounds and collisions are checked later by the placement engine.
pub fn table_from_row(row: &DiningTable) -> AppResult<PlacedTable> {
    let capacity = validate_capacity(row.capacity as i64).map_err(|e| e.with_detail("row", row.id))?;
    let table = PlacedTable {
        id: row.id,
        label: row.name.trim().to_string(),
        capacity,
        shape: row.shape,
        anchor: crate::grid::Cell::new(row.pos_x, row.pos_y),
    };
    validate_table(&table).map_err(|e| e.with_detail("row", row.id))?;
    Ok(table)
}

/// Field checks every stored table must pass, whether loaded or created
pub fn validate_table(table: &PlacedTable) -> AppResult<()> {
    validate_required_text(&table.label, "name", MAX_LABEL_LEN)?;
    validate_capacity(table.capacity as i64)?;
    Ok(())
}

/// Trim the label of an edit and validate it before it reaches the engine
pub fn normalize_edit(edit: &mut TableEdit) -> AppResult<()> {
    if let Some(label) = edit.label.as_mut() {
        *label = label.trim().to_string();
        validate_required_text(label, "label", MAX_LABEL_LEN)?;
    }
    if let Some(capacity) = edit.capacity {
        validate_capacity(capacity as i64)?;
    }
    Ok(())
}

/// Create payload for a table about to be placed in `zone_id`
pub fn create_payload(zone_id: i64, table: &PlacedTable) -> DiningTableCreate {
    DiningTableCreate {
        name: table.label.clone(),
        zone_id,
        capacity: Some(table.capacity as i32),
        shape: Some(table.shape),
        pos_x: table.anchor.x,
        pos_y: table.anchor.y,
    }
}

/// Update payload carrying only the fields an edit changed
pub fn edit_payload(edit: &TableEdit) -> DiningTableUpdate {
    DiningTableUpdate {
        name: edit.label.clone(),
        capacity: edit.capacity.map(|c| c as i32),
        shape: edit.shape,
        ..Default::default()
    }
}
