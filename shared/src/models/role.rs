//! Role Model

use serde::{Deserialize, Serialize};

/// Role entity (RBAC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Permission strings (e.g. ["all"], ["tables:manage", "alerts:handle"])
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub is_active: bool,
}
