use std::fmt;

use crate::constants::{CASCADE_STEP, CASCADE_WRAP};
use crate::geometry::{Point, Rect, Size};

/// Chooses where a new or moved-out floating window appears.
pub trait Placement: fmt::Debug + Send + Sync {
    /// `sequence` counts every placement made so far, starting at zero.
    fn place(&self, sequence: u64, size: Size, viewport: Size) -> Point;
}

/// Staggers windows diagonally from the top-left corner, wrapping after a
/// fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadePlacement {
    step: f64,
    wrap: u64,
}

impl Default for CascadePlacement {
    fn default() -> Self {
        Self {
            step: CASCADE_STEP,
            wrap: CASCADE_WRAP,
        }
    }
}

impl CascadePlacement {
    pub fn new(step: f64, wrap: u64) -> Self {
        Self {
            step,
            wrap: wrap.max(1),
        }
    }
}

impl Placement for CascadePlacement {
    fn place(&self, sequence: u64, size: Size, viewport: Size) -> Point {
        let offset = (sequence % self.wrap) as f64 * self.step;
        let wanted = Point::new(offset + self.step, offset + self.step);
        Rect::from_size(viewport).clamp_origin(wanted, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_steps_and_wraps() {
        let p = CascadePlacement::new(10.0, 3);
        let size = Size::new(50.0, 50.0);
        let viewport = Size::new(500.0, 500.0);
        assert_eq!(p.place(0, size, viewport), Point::new(10.0, 10.0));
        assert_eq!(p.place(1, size, viewport), Point::new(20.0, 20.0));
        assert_eq!(p.place(3, size, viewport), Point::new(10.0, 10.0));
    }

    #[test]
    fn cascade_stays_inside_small_viewports() {
        let p = CascadePlacement::default();
        let pos = p.place(9, Size::new(300.0, 200.0), Size::new(320.0, 220.0));
        assert_eq!(pos, Point::new(20.0, 20.0));
    }
}
