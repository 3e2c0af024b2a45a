//! Unified error codes for the floor-plan workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Alert workflow errors
//! - 7xxx: Table and zone layout errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so hosts in any language
/// can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// No employee is signed in
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Workflow ====================
    /// No alert workflow is running
    WorkflowNotStarted = 4001,
    /// Every alert of the workflow has been walked
    WorkflowFinished = 4002,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table anchor outside the zone grid
    TableOutOfBounds = 7004,
    /// Grid cell already holds another table
    TableCellOccupied = 7005,
    /// Table id already present in the layout
    TableDuplicateId = 7006,
    /// Zone grid dimensions are outside the allowed range
    ZoneInvalidGrid = 7105,

    // ==================== 8xxx: Employee ====================
    /// Role not found
    RoleNotFound = 8101,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Backing store rejected the write
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "No employee is signed in",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Workflow
            ErrorCode::WorkflowNotStarted => "No alert workflow is running",
            ErrorCode::WorkflowFinished => "Alert workflow is already finished",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOutOfBounds => "Table position is outside the grid",
            ErrorCode::TableCellOccupied => "Grid cell is already occupied",
            ErrorCode::TableDuplicateId => "Table id already exists in the layout",
            ErrorCode::ZoneInvalidGrid => "Zone grid size is out of range",

            // Employee
            ErrorCode::RoleNotFound => "Role not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Workflow
            4001 => Ok(ErrorCode::WorkflowNotStarted),
            4002 => Ok(ErrorCode::WorkflowFinished),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7004 => Ok(ErrorCode::TableOutOfBounds),
            7005 => Ok(ErrorCode::TableCellOccupied),
            7006 => Ok(ErrorCode::TableDuplicateId),
            7105 => Ok(ErrorCode::ZoneInvalidGrid),

            // Employee
            8101 => Ok(ErrorCode::RoleNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}
