//! Shape factory: builds a shape variant from a type tag.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use tracing::debug;

use crate::error::EditorError;
use crate::geom::Point;
use crate::shape::{Shape, ShapeKind};

/// Create a shape from a case-insensitive type tag.
///
/// Text shapes need `text` and image shapes need `image_path`; both are placed
/// at `position`. Rectangles, ellipses and lines ignore every optional
/// argument and start with default geometry at the origin.
///
/// # Errors
///
/// Returns `UnknownShapeType` for an unrecognized tag and
/// `MissingRequiredField` when a text or image shape lacks its content.
pub fn create(
    type_tag: &str,
    position: Point,
    text: Option<&str>,
    image_path: Option<&str>,
) -> Result<Shape, EditorError> {
    let kind: ShapeKind = type_tag.parse()?;
    let shape = match kind {
        ShapeKind::Rectangle => Shape::rectangle(),
        ShapeKind::Ellipse => Shape::ellipse(),
        ShapeKind::Line => Shape::line(),
        ShapeKind::Text => {
            let text = text.ok_or(EditorError::MissingRequiredField { kind, field: "text" })?;
            Shape::text(position.x, position.y, text)
        }
        ShapeKind::Image => {
            let path = image_path.ok_or(EditorError::MissingRequiredField { kind, field: "image_path" })?;
            Shape::image(position.x, position.y, path)
        }
    };
    debug!(id = %shape.id(), %kind, "shape constructed");
    Ok(shape)
}
