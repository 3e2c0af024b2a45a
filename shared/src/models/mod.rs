//! Data models
//!
//! Typed rows exchanged with the hosted database.
//! All IDs are `i64`.

pub mod alert;
pub mod dining_table;
pub mod employee;
pub mod role;
pub mod store_info;
pub mod zone;

// Re-exports
pub use alert::*;
pub use dining_table::*;
pub use employee::*;
pub use role::*;
pub use store_info::*;
pub use zone::*;
