//! Core: configuration and session context

pub mod config;
pub mod session;

pub use config::{ConfigError, EditorConfig};
pub use session::{ActiveEmployee, Session};
