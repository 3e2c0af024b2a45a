//! Floor Plan - restaurant table layout editor core
//!
//! # Overview
//!
//! Tables are placed on a discrete grid per zone, dragged between cells and
//! edited in place. The crate keeps the authoritative in-memory layout for
//! one editing session and hands every committed change to a host that
//! persists it.
//!
//! - **Placement** (`placement`): occupancy checks, footprints, move/edit/remove
//! - **Drag** (`drag`): pixel pointer to grid cell snapping
//! - **Editor** (`editor`): pointer events, host callbacks, render model
//! - **Session** (`core`): signed-in employee, restaurant, alert workflow
//!
//! # Module layout
//!
//! ```text
//! floor-plan/src/
//! ├── core/        # configuration, session context
//! ├── placement/   # placement engine, footprints, errors
//! ├── editor/      # editor surface, host contract, view model
//! ├── utils/       # logging, validation, permissions
//! ├── grid.rs      # cells and grid bounds
//! ├── drag.rs      # drag controller
//! ├── records.rs   # row <-> placement conversion
//! └── workflow.rs  # food-safety alert workflow
//! ```

pub mod core;
pub mod drag;
pub mod editor;
pub mod grid;
pub mod placement;
pub mod records;
pub mod utils;
pub mod workflow;

// Re-export public types
pub use core::{ConfigError, EditorConfig, Session};
pub use drag::{DragController, DragSummary, Point};
pub use editor::{EditorSurface, HostCall, LayoutHost, MemoryHost, PointerDown, SurfaceView};
pub use grid::{Cell, Grid, GridLimits};
pub use placement::{CollisionMode, MoveOutcome, PlacedTable, PlacementEngine, PlacementError, TableEdit};
pub use workflow::{AlertWorkflow, StepOutcome};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_from_config, init_logger_with_file};
