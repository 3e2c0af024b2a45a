//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee response (without password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role_id: i64,
    pub is_active: bool,
}
