//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table shape, drives the footprint a table takes on the floor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    #[default]
    Square,
    Round,
    Rectangle,
}

/// Dining table entity
///
/// `pos_x`/`pos_y` is the anchor cell on the zone's floor grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub zone_id: i64,
    pub capacity: i32,
    #[serde(default)]
    pub shape: TableShape,
    #[serde(default)]
    pub pos_x: i32,
    #[serde(default)]
    pub pos_y: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create dining table payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub name: String,
    pub zone_id: i64,
    pub capacity: Option<i32>,
    pub shape: Option<TableShape>,
    pub pos_x: i32,
    pub pos_y: i32,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<TableShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl DiningTableUpdate {
    /// Patch that only moves the table
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            pos_x: Some(x),
            pos_y: Some(y),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
