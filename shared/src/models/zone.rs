//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone entity (main hall, terrace, private room...)
///
/// Each zone carries the floor grid its tables are laid out on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub grid_width: i32,
    pub grid_height: i32,
}
