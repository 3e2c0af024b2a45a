//! Logging Infrastructure
//!
//! Structured logging setup for hosts embedding the editor.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::EditorConfig;

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger from an [`EditorConfig`]
pub fn init_logger_from_config(config: &EditorConfig) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level`. When `log_dir` is given the
/// directory is created if needed and logs go to a daily rolling file.
/// Calling this more than once is harmless; the first subscriber wins.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        match std::fs::create_dir_all(log_path) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(log_path, "floor-plan");
                let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
                return;
            }
            Err(e) => eprintln!("Cannot create log directory {dir}: {e}"),
        }
    }

    let _ = subscriber.try_init();
}
