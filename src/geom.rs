//! Integer canvas geometry: points and inclusive axis-aligned boxes.
//!
//! Coordinates are `i64`. All arithmetic here saturates at the type's bounds.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> (i64, i64) {
        (self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

/// Axis-aligned bounding box with inclusive edges.
///
/// `min_x <= max_x` and `min_y <= max_y` always hold; constructors normalize
/// their corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    /// Box spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Box with top-left at `(x, y)` extending by `width` × `height`.
    #[must_use]
    pub fn from_origin_size(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x.saturating_add(width), y.saturating_add(height)))
    }

    /// Inclusive containment on all four edges.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.min_x <= pt.x && pt.x <= self.max_x && self.min_y <= pt.y && pt.y <= self.max_y
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        self.max_x.saturating_sub(self.min_x)
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        self.max_y.saturating_sub(self.min_y)
    }
}
