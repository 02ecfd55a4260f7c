//! Real-valued points, sizes and rectangles.
//!
//! All coordinates are `f64` in a top-down coordinate space: `x` grows to the
//! right, `y` grows downwards.  The primary surface's top-left corner is the
//! anchor (0, 0) of the shared coordinate space; everything else, including
//! the external surface, is expressed relative to it.

use serde::{Deserialize, Serialize};

/// A position in a surface coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin (0, 0).
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `-offset`.
    ///
    /// Used to translate a logical (primary-space) position into the local
    /// space of a surface whose origin is `offset`.
    pub fn relative_to(self, offset: Point) -> Point {
        Point::new(self.x - offset.x, self.y - offset.y)
    }

    /// Returns this point shifted by `+offset`.
    pub fn offset_by(self, offset: Point) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Width and height of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
///
/// Containment and clamping treat all four edges as inclusive, so a point
/// exactly on the right or bottom edge is inside.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// A rectangle anchored at (0, 0), as used for the primary surface bounds.
    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Returns `true` if `point` lies inside or on the border of this rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Constrains `point` componentwise to the closed extent of this rectangle.
    pub fn clamp(&self, point: Point) -> Point {
        // max/min rather than f64::clamp, which panics on an inverted range.
        Point::new(
            point.x.max(self.min_x()).min(self.max_x()),
            point.y.max(self.min_y()).min(self.max_y()),
        )
    }
}
