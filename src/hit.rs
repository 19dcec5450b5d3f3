//! Hit testing: which shape the user pointed at.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::canvas::Canvas;
use crate::geom::Point;
use crate::shape::ShapeId;

/// Return the visually topmost shape whose box contains `pt`.
///
/// Shapes are scanned front-to-back: descending z-order, and among equal
/// z-orders the later-painted (later-inserted) shape first. Box edges are
/// inclusive.
#[must_use]
pub fn hit_test(canvas: &Canvas, pt: Point) -> Option<ShapeId> {
    canvas
        .shapes_by_z_order()
        .into_iter()
        .rev()
        .find(|shape| shape.bounds().contains(pt))
        .map(|shape| shape.id())
}
