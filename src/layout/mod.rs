pub mod partition;
pub mod snap;

pub use partition::*;
pub use snap::{SnapIndicator, SnapQuery, SnapTarget, detect, screen_edge_rect};

use crate::geometry::Rect;

/// Side of a rectangle a window is dropped against.
///
/// Also names which half of a split region the dropped window receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Priority order used whenever several edges qualify at once.
    pub const PRIORITY: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn axis(self) -> SplitAxis {
        match self {
            Edge::Left | Edge::Right => SplitAxis::Vertical,
            Edge::Top | Edge::Bottom => SplitAxis::Horizontal,
        }
    }

    /// Left and top edges occupy the first child of a split.
    pub fn is_leading(self) -> bool {
        matches!(self, Edge::Left | Edge::Top)
    }

    /// The half of `rect` lying against this edge.
    pub fn half_of(self, rect: Rect) -> Rect {
        let (first, second) = rect.split_along(self.axis());
        if self.is_leading() { first } else { second }
    }
}

/// Orientation of the divider between the two children of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SplitAxis {
    /// Vertical divider: children sit side by side with equal widths.
    Vertical,
    /// Horizontal divider: children are stacked with equal heights.
    Horizontal,
}

impl Rect {
    /// Splits into the (first, second) children a region would get along
    /// `axis`.
    pub fn split_along(&self, axis: SplitAxis) -> (Rect, Rect) {
        match axis {
            SplitAxis::Vertical => self.split_columns(),
            SplitAxis::Horizontal => self.split_rows(),
        }
    }
}
