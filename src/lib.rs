pub mod cli;
pub mod config;
pub mod constants;
pub mod drag;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod host;
pub mod keybindings;
pub mod layout;
pub mod render;
pub mod state;
pub mod tracing_sub;
pub mod viewport;
pub mod window;
pub mod workspace;

pub use config::{ResizePolicy, WmConfig};
pub use error::LayoutError;
pub use geometry::{Point, Rect, Size};
pub use layout::{Edge, PartitionTree, RegionId};
pub use window::{DockState, WindowId};
pub use workspace::{Effect, Snapshot, WmEvent, Workspace};
