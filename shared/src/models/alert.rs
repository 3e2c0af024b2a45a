//! Food-safety Alert Model

use serde::{Deserialize, Serialize};

/// What raised the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Temperature log outside the allowed range
    Temperature,
    /// Cleaning task overdue
    Cleaning,
    /// Goods reception check missing
    Reception,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Alert awaiting acknowledgement by an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub created_at: i64,
}
