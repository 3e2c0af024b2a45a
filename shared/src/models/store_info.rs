//! Store Info Model

use serde::{Deserialize, Serialize};

/// Restaurant (tenant) the session is working on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}
