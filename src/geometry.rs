//! Logical geometry shared by the partition tree, the snap detector and the
//! drag controller.
//!
//! All coordinates are `f64` logical units. Rectangles are half-open: a point
//! lying exactly on `x + width` or `y + height` is outside.

use crate::constants::GEOMETRY_EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and non-negative.
    pub fn is_valid(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn is_wider_than_tall(&self) -> bool {
        self.width - self.height > GEOMETRY_EPSILON
    }

    pub fn is_taller_than_wide(&self) -> bool {
        self.height - self.width > GEOMETRY_EPSILON
    }

    /// Smallest rectangle covering both inputs.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn approx_eq(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() <= GEOMETRY_EPSILON
            && (self.y - other.y).abs() <= GEOMETRY_EPSILON
            && (self.width - other.width).abs() <= GEOMETRY_EPSILON
            && (self.height - other.height).abs() <= GEOMETRY_EPSILON
    }

    /// Splits into equal side-by-side halves (left, right).
    pub fn split_columns(&self) -> (Rect, Rect) {
        let half = self.width / 2.0;
        (
            Rect {
                width: half,
                ..*self
            },
            Rect {
                x: self.x + half,
                width: self.width - half,
                ..*self
            },
        )
    }

    /// Splits into equal stacked halves (top, bottom).
    pub fn split_rows(&self) -> (Rect, Rect) {
        let half = self.height / 2.0;
        (
            Rect {
                height: half,
                ..*self
            },
            Rect {
                y: self.y + half,
                height: self.height - half,
                ..*self
            },
        )
    }

    /// Clamps a window of `size` whose origin wants to be at `origin` so it
    /// stays inside `self`.
    ///
    /// A window larger than the bounds on an axis is pinned to the leading
    /// edge of that axis.
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let clamp_axis = |value: f64, start: f64, extent: f64, len: f64| {
            let max = start + (extent - len).max(0.0);
            value.min(max).max(start)
        };
        Point {
            x: clamp_axis(origin.x, self.x, self.width, size.width),
            y: clamp_axis(origin.y, self.y, self.height, size.height),
        }
    }
}
