//! Shared crate-wide constants.

/// Width given to freshly created and moved-out floating windows.
///
/// Units: logical viewport units, the same space the pointer is reported in.
pub const DEFAULT_WINDOW_WIDTH: f64 = 300.0;

/// Height given to freshly created and moved-out floating windows.
pub const DEFAULT_WINDOW_HEIGHT: f64 = 200.0;

/// Distance from an edge within which a drag produces a snap indicator.
///
/// Applies both to viewport edges (screen-edge snapping of floating windows)
/// and to the edges of the hovered region, measured in region-local
/// coordinates.
pub const SNAP_MARGIN: f64 = 30.0;

/// Offset between consecutive windows placed by the default cascade.
pub const CASCADE_STEP: f64 = 30.0;

/// Number of cascade steps before placement wraps back to the origin.
pub const CASCADE_WRAP: u64 = 10;

/// Absolute tolerance used when comparing derived rectangle coordinates.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Logical width of one terminal column in the terminal host.
pub const DEFAULT_CELL_WIDTH: f64 = 10.0;

/// Logical height of one terminal row. Cells are roughly twice as tall as
/// they are wide.
pub const DEFAULT_CELL_HEIGHT: f64 = 20.0;

/// How long the terminal host waits for input before redrawing.
pub const POLL_INTERVAL_MS: u64 = 16;
