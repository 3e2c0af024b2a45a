use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Placement errors
///
/// Every failure leaves the table set untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Cell ({x}, {y}) is occupied by table {occupant}")]
    OccupiedCell { x: i32, y: i32, occupant: i64 },

    #[error("Table {0} is already placed")]
    DuplicateId(i64),

    #[error("Grid {width}x{height} is outside the allowed range {min}..={max}")]
    InvalidGrid {
        width: i32,
        height: i32,
        min: i32,
        max: i32,
    },
}

impl From<PlacementError> for AppError {
    fn from(err: PlacementError) -> Self {
        let message = err.to_string();
        match err {
            PlacementError::OutOfBounds { x, y, width, height } => {
                AppError::with_message(ErrorCode::TableOutOfBounds, message)
                    .with_detail("x", x)
                    .with_detail("y", y)
                    .with_detail("grid_width", width)
                    .with_detail("grid_height", height)
            }
            PlacementError::OccupiedCell { x, y, occupant } => {
                AppError::with_message(ErrorCode::TableCellOccupied, message)
                    .with_detail("x", x)
                    .with_detail("y", y)
                    .with_detail("occupant", occupant)
            }
            PlacementError::DuplicateId(id) => {
                AppError::with_message(ErrorCode::TableDuplicateId, message).with_detail("id", id)
            }
            PlacementError::InvalidGrid { width, height, .. } => {
                AppError::with_message(ErrorCode::ZoneInvalidGrid, message)
                    .with_detail("grid_width", width)
                    .with_detail("grid_height", height)
            }
        }
    }
}
