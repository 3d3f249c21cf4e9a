use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;

use crate::config::{ResizePolicy, WmConfig};
use crate::constants::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    SNAP_MARGIN,
};
use crate::geometry::Size;
use crate::render::CellScale;

const AFTER_HELP: &str = indoc! {"
    Controls:
      n            open a new floating window
      drag         move a window; drop near an edge to snap it
      x / Delete   close the focused window
      o            move the focused window out of the grid
      Tab          focus the next window
      ? / F1       toggle the help overlay
      q / Ctrl+Q   quit

    Geometry is computed in logical units. Each terminal cell covers
    --cell-width by --cell-height units, so the defaults give a 120x40
    terminal a 1200x800 viewport.
"};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "snapgrid",
    version = env!("CARGO_PKG_VERSION"),
    about = "Snapping, region-partitioning window manager in the terminal",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Distance from an edge, in logical units, that triggers a snap.
    #[arg(long = "margin", value_name = "UNITS", default_value_t = SNAP_MARGIN)]
    pub margin: f64,

    /// Width of new floating windows.
    #[arg(long = "window-width", value_name = "UNITS", default_value_t = DEFAULT_WINDOW_WIDTH)]
    pub window_width: f64,

    /// Height of new floating windows.
    #[arg(long = "window-height", value_name = "UNITS", default_value_t = DEFAULT_WINDOW_HEIGHT)]
    pub window_height: f64,

    /// Re-lay out every region when the terminal is resized, instead of only
    /// the root.
    #[arg(long = "proportional-resize")]
    pub proportional_resize: bool,

    /// Logical width of one terminal column.
    #[arg(long = "cell-width", value_name = "UNITS", default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: f64,

    /// Logical height of one terminal row.
    #[arg(long = "cell-height", value_name = "UNITS", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: f64,

    /// Append debug logs to this file. Logs are discarded otherwise.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn config(&self) -> WmConfig {
        let policy = if self.proportional_resize {
            ResizePolicy::Proportional
        } else {
            ResizePolicy::RootOnly
        };
        WmConfig::default()
            .with_default_window_size(Size::new(self.window_width, self.window_height))
            .with_snap_margin(self.margin)
            .with_resize_policy(policy)
    }

    pub fn scale(&self) -> CellScale {
        CellScale::new(self.cell_width, self.cell_height)
    }
}
