use shared::{AppError, ErrorCode};
use thiserror::Error;

use crate::grid::GridLimits;
use crate::placement::{CollisionMode, FootprintTiers};
use crate::utils::validation::MAX_CAPACITY;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Cell size must be positive, got {0}")]
    InvalidCellSize(f64),

    #[error("Invalid grid limits {min}..={max}")]
    InvalidGridLimits { min: i32, max: i32 },

    #[error("Default capacity must be between 1 and {max}, got {0}", max = MAX_CAPACITY)]
    InvalidDefaultCapacity(u32),

    #[error("Invalid footprint table: {0}")]
    Footprint(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::with_message(ErrorCode::ConfigError, err.to_string())
    }
}

/// Editor configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | FLOOR_CELL_PX | 60 | pixel size of one grid cell |
/// | FLOOR_GRID_MIN | 5 | minimum grid width/height |
/// | FLOOR_GRID_MAX | 20 | maximum grid width/height |
/// | FLOOR_COLLISION | anchor | `anchor` or `footprint` |
/// | FLOOR_DEFAULT_CAPACITY | 4 | capacity of tables created by a click |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | directory for rolling log files |
/// | ENVIRONMENT | development | development / staging / production |
///
/// Footprint tiers are not read from the environment; hosts that need
/// different thresholds build a [`FootprintTiers`] and assign it.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Pixel size of one grid cell
    pub cell_px: f64,
    /// Allowed grid width/height
    pub grid_limits: GridLimits,
    /// Collision rule used by the placement engine
    pub collision: CollisionMode,
    /// Capacity of tables created in placement mode
    pub default_capacity: u32,
    /// Capacity → footprint step table
    pub footprints: FootprintTiers,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_px: 60.0,
            grid_limits: GridLimits::default(),
            collision: CollisionMode::default(),
            default_capacity: 4,
            footprints: FootprintTiers::default(),
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from the environment (and a `.env` file if present)
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            cell_px: env_parse("FLOOR_CELL_PX").unwrap_or(defaults.cell_px),
            grid_limits: GridLimits {
                min: env_parse("FLOOR_GRID_MIN").unwrap_or(defaults.grid_limits.min),
                max: env_parse("FLOOR_GRID_MAX").unwrap_or(defaults.grid_limits.max),
            },
            collision: env_parse("FLOOR_COLLISION").unwrap_or(defaults.collision),
            default_capacity: env_parse("FLOOR_DEFAULT_CAPACITY")
                .unwrap_or(defaults.default_capacity),
            footprints: defaults.footprints,
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check the values that would otherwise break the editor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_px.is_finite() && self.cell_px > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_px));
        }
        let GridLimits { min, max } = self.grid_limits;
        if min < 1 || min > max {
            return Err(ConfigError::InvalidGridLimits { min, max });
        }
        if !(1..=MAX_CAPACITY).contains(&self.default_capacity) {
            return Err(ConfigError::InvalidDefaultCapacity(self.default_capacity));
        }
        self.footprints.validate()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
