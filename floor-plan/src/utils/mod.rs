//! Utilities: logging, input validation and permissions

pub mod logger;
pub mod permissions;
pub mod validation;
