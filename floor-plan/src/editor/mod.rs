//! Editor surface: pointer input, host callbacks and the render model

mod host;
mod surface;
mod view;

pub use host::{HostCall, LayoutHost, MemoryHost};
pub use surface::{EditorSurface, PointerDown, TableTemplate};
pub use view::{CellView, SurfaceView, TableView};
