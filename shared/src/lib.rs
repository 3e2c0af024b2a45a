//! Shared types for the floor-plan workspace
//!
//! Typed records, the unified error system and small utilities used by the
//! editor core and by hosts that persist its mutations.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
