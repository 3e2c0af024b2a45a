//! Input validation helpers
//!
//! Limits are chosen based on:
//! - Table labels are painted inside a single grid cell
//! - Realistic seat counts for one table

use shared::AppError;

/// Table labels
pub const MAX_LABEL_LEN: usize = 32;

/// Prefix of generated labels, leaving room for a four-digit counter
pub const MAX_LABEL_PREFIX_LEN: usize = MAX_LABEL_LEN - 4;

/// Seats per table
pub const MAX_CAPACITY: u32 = 50;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate a seat count and convert it to the engine's unsigned type.
pub fn validate_capacity(capacity: i64) -> Result<u32, AppError> {
    if capacity < 1 || capacity > MAX_CAPACITY as i64 {
        return Err(AppError::validation(format!(
            "capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"
        ))
        .with_detail("field", "capacity"));
    }
    Ok(capacity as u32)
}
