pub mod decorator;
pub mod placement;
mod registry;

use std::fmt;

use crate::geometry::{Point, Rect, Size};
use crate::layout::RegionId;

pub use placement::{CascadePlacement, Placement};
pub use registry::WindowRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    /// Rebuilds an id from its raw value, e.g. one echoed back by a host.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window {}", self.0)
    }
}

/// Whether a window floats or fills a leaf of the region tree.
///
/// A window snapped to a screen edge is still `Free`: that dock lives outside
/// the tree and only changes the window's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockState {
    #[default]
    Free,
    Docked(RegionId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: WindowId,
    position: Point,
    size: Size,
    dock: DockState,
}

impl Window {
    fn new(id: WindowId, position: Point, size: Size) -> Self {
        Self {
            id,
            position,
            size,
            dock: DockState::Free,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn dock(&self) -> DockState {
        self.dock
    }

    pub fn docked_leaf(&self) -> Option<RegionId> {
        match self.dock {
            DockState::Docked(leaf) => Some(leaf),
            DockState::Free => None,
        }
    }

    pub fn is_docked(&self) -> bool {
        self.docked_leaf().is_some()
    }

    fn set_rect(&mut self, rect: Rect) {
        self.position = rect.origin();
        self.size = rect.size();
    }
}
