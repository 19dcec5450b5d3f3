//! Shape model: the five drawable variants, their draw maps, and typed setters.
//!
//! Every shape carries the same identity/position/z-order/selection/outline
//! core plus one [`ShapeVariant`] holding what only that variant has. Draw
//! maps are flat JSON objects tagged with a `type` discriminator; they are
//! what the host renders and what the property panel displays.
//!
//! Property edits arrive by name with an untyped value. [`PropertyValue::coerce`]
//! converts the value once, according to the property name, and
//! [`Shape::set_property`] then applies it through an explicit per-variant
//! table. Names a variant does not recognize are ignored.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::consts::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_LINE_WIDTH, DEFAULT_OUTLINE, DEFAULT_SHAPE_SIZE,
    DEFAULT_TEXT_COLOR, IMAGE_BOX_SIZE, MIN_SHAPE_SIZE, TEXT_BOX_HEIGHT, TEXT_BOX_WIDTH,
};
use crate::error::EditorError;
use crate::geom::{Bounds, Point};

/// Unique, immutable identifier for a shape.
pub type ShapeId = Uuid;

/// Flat attribute map returned by [`Shape::draw`].
pub type PropertyMap = serde_json::Map<String, Value>;

/// Property names whose values must be integers.
pub const INTEGER_PROPERTIES: [&str; 8] = ["x", "y", "width", "height", "z_order", "x2", "y2", "font_size"];

/// Property names whose values must be booleans.
pub const BOOLEAN_PROPERTIES: [&str; 2] = ["has_frame", "has_shadow"];

/// Whether `name` is an integer-valued property.
#[must_use]
pub fn is_integer_property(name: &str) -> bool {
    INTEGER_PROPERTIES.contains(&name)
}

// =============================================================================
// KIND
// =============================================================================

/// The variant of a shape, and its `type` tag in draw maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Text,
    Image,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [Self::Rectangle, Self::Ellipse, Self::Line, Self::Text, Self::Image];

    /// Lowercase tag used in draw maps and creation events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = EditorError;

    /// Case-insensitive match against the five variant tags.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| EditorError::UnknownShapeType(tag.to_string()))
    }
}

// =============================================================================
// PROPERTY VALUES
// =============================================================================

/// A property value after name-driven coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    /// Convert a raw value for property `name`.
    ///
    /// Integer properties accept JSON integers and strings that parse as
    /// integers. Boolean properties accept JSON booleans, `0`/`1`, and the
    /// strings `true`/`false`/`1`/`0`. Every other name takes text; non-string
    /// values are stringified.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumericProperty` or `InvalidBooleanProperty` when the
    /// value does not fit the property's type.
    pub fn coerce(name: &str, raw: &Value) -> Result<Self, EditorError> {
        if is_integer_property(name) {
            return parse_int(raw)
                .map(Self::Int)
                .ok_or_else(|| EditorError::InvalidNumericProperty { name: name.to_string(), value: display_raw(raw) });
        }
        if BOOLEAN_PROPERTIES.contains(&name) {
            return parse_bool(raw)
                .map(Self::Bool)
                .ok_or_else(|| EditorError::InvalidBooleanProperty { name: name.to_string(), value: display_raw(raw) });
        }
        Ok(Self::Text(display_raw(raw)))
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn parse_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => None,
        },
        _ => None,
    }
}

fn parse_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn display_raw(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// VARIANTS
// =============================================================================

/// Rectangle and ellipse fields: a filled, optionally framed and shadowed box
/// with a centered label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxShape {
    pub width: i64,
    pub height: i64,
    pub fill: String,
    pub text: String,
    pub has_frame: bool,
    pub has_shadow: bool,
}

impl Default for BoxShape {
    fn default() -> Self {
        Self {
            width: DEFAULT_SHAPE_SIZE,
            height: DEFAULT_SHAPE_SIZE,
            fill: String::new(),
            text: String::new(),
            has_frame: false,
            has_shadow: false,
        }
    }
}

/// Line fields. `(x2, y2)` is the second endpoint as an offset from the
/// shape's position; `width` is the stroke width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineShape {
    pub x2: i64,
    pub y2: i64,
    pub width: i64,
}

impl Default for LineShape {
    fn default() -> Self {
        Self { x2: 0, y2: 0, width: DEFAULT_LINE_WIDTH }
    }
}

/// Text label fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextShape {
    pub width: i64,
    pub height: i64,
    pub text: String,
    pub font: String,
    pub font_size: i64,
    pub text_color: String,
}

/// Image fields. `image_path` is an opaque reference resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageShape {
    pub width: i64,
    pub height: i64,
    pub image_path: String,
    pub has_frame: bool,
    pub has_shadow: bool,
}

/// Variant-specific part of a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeVariant {
    Rectangle(BoxShape),
    Ellipse(BoxShape),
    Line(LineShape),
    Text(TextShape),
    Image(ImageShape),
}

// =============================================================================
// SHAPE
// =============================================================================

/// A drawable entity on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    id: ShapeId,
    /// Left edge (or line start) in canvas coordinates.
    pub x: i64,
    /// Top edge (or line start) in canvas coordinates.
    pub y: i64,
    /// Paint and hit-test precedence; higher is on top. Not unique.
    pub z_order: i64,
    /// Outline color.
    pub outline: String,
    selected: bool,
    pub variant: ShapeVariant,
}

impl Shape {
    fn with_variant(x: i64, y: i64, variant: ShapeVariant) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            z_order: 0,
            outline: DEFAULT_OUTLINE.to_string(),
            selected: false,
            variant,
        }
    }

    /// A 100×100 rectangle at the origin.
    #[must_use]
    pub fn rectangle() -> Self {
        Self::with_variant(0, 0, ShapeVariant::Rectangle(BoxShape::default()))
    }

    /// A 100×100 ellipse at the origin.
    #[must_use]
    pub fn ellipse() -> Self {
        Self::with_variant(0, 0, ShapeVariant::Ellipse(BoxShape::default()))
    }

    /// A zero-length, 1-unit-wide line at the origin.
    #[must_use]
    pub fn line() -> Self {
        Self::with_variant(0, 0, ShapeVariant::Line(LineShape::default()))
    }

    /// A text label at `(x, y)` in the default font.
    #[must_use]
    pub fn text(x: i64, y: i64, text: impl Into<String>) -> Self {
        Self::with_variant(
            x,
            y,
            ShapeVariant::Text(TextShape {
                width: TEXT_BOX_WIDTH,
                height: TEXT_BOX_HEIGHT,
                text: text.into(),
                font: DEFAULT_FONT_FAMILY.to_string(),
                font_size: DEFAULT_FONT_SIZE,
                text_color: DEFAULT_TEXT_COLOR.to_string(),
            }),
        )
    }

    /// A 200×200 image at `(x, y)`.
    #[must_use]
    pub fn image(x: i64, y: i64, image_path: impl Into<String>) -> Self {
        Self::with_variant(
            x,
            y,
            ShapeVariant::Image(ImageShape {
                width: IMAGE_BOX_SIZE,
                height: IMAGE_BOX_SIZE,
                image_path: image_path.into(),
                has_frame: false,
                has_shadow: false,
            }),
        )
    }

    // --- Identity / flags ---

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self.variant {
            ShapeVariant::Rectangle(_) => ShapeKind::Rectangle,
            ShapeVariant::Ellipse(_) => ShapeKind::Ellipse,
            ShapeVariant::Line(_) => ShapeKind::Line,
            ShapeVariant::Text(_) => ShapeKind::Text,
            ShapeVariant::Image(_) => ShapeKind::Image,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Only the canvas writes this, so the flag and the selection subset agree.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    // --- Geometry ---

    /// Box width/height, or `None` for a line.
    #[must_use]
    pub fn size(&self) -> Option<(i64, i64)> {
        match &self.variant {
            ShapeVariant::Rectangle(b) | ShapeVariant::Ellipse(b) => Some((b.width, b.height)),
            ShapeVariant::Text(t) => Some((t.width, t.height)),
            ShapeVariant::Image(i) => Some((i.width, i.height)),
            ShapeVariant::Line(_) => None,
        }
    }

    /// Inclusive axis-aligned box used for hit testing.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match &self.variant {
            ShapeVariant::Line(l) => {
                let end = Point::new(self.x.saturating_add(l.x2), self.y.saturating_add(l.y2));
                Bounds::from_corners(Point::new(self.x, self.y), end)
            }
            _ => {
                let (w, h) = self.size().unwrap_or((0, 0));
                Bounds::from_origin_size(self.x, self.y, w, h)
            }
        }
    }

    /// Translate by `(dx, dy)`.
    pub fn move_by(&mut self, dx: i64, dy: i64) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Grow or shrink the box, never below [`MIN_SHAPE_SIZE`] on either axis.
    ///
    /// A line has no box: its second endpoint moves by `(dw, dh)` instead.
    pub fn resize(&mut self, dw: i64, dh: i64) {
        let (width, height) = match &mut self.variant {
            ShapeVariant::Line(l) => {
                l.x2 = l.x2.saturating_add(dw);
                l.y2 = l.y2.saturating_add(dh);
                return;
            }
            ShapeVariant::Rectangle(b) | ShapeVariant::Ellipse(b) => (&mut b.width, &mut b.height),
            ShapeVariant::Text(t) => (&mut t.width, &mut t.height),
            ShapeVariant::Image(i) => (&mut i.width, &mut i.height),
        };
        *width = MIN_SHAPE_SIZE.max(width.saturating_add(dw));
        *height = MIN_SHAPE_SIZE.max(height.saturating_add(dh));
    }

    // --- Properties ---

    /// Every presentation attribute, tagged with `type`.
    #[must_use]
    pub fn draw(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert("type".into(), self.kind().as_str().into());
        map.insert("x".into(), self.x.into());
        map.insert("y".into(), self.y.into());
        map.insert("z_order".into(), self.z_order.into());
        map.insert("selected".into(), self.selected.into());
        map.insert("outline".into(), self.outline.clone().into());

        match &self.variant {
            ShapeVariant::Rectangle(b) | ShapeVariant::Ellipse(b) => {
                map.insert("width".into(), b.width.into());
                map.insert("height".into(), b.height.into());
                map.insert("text".into(), b.text.clone().into());
                map.insert("fill".into(), b.fill.clone().into());
                map.insert("has_frame".into(), b.has_frame.into());
                map.insert("has_shadow".into(), b.has_shadow.into());
            }
            ShapeVariant::Line(l) => {
                map.insert("x2".into(), l.x2.into());
                map.insert("y2".into(), l.y2.into());
                map.insert("width".into(), l.width.into());
            }
            ShapeVariant::Text(t) => {
                map.insert("width".into(), t.width.into());
                map.insert("height".into(), t.height.into());
                map.insert("text".into(), t.text.clone().into());
                map.insert("font".into(), t.font.clone().into());
                map.insert("font_size".into(), t.font_size.into());
                map.insert("text_color".into(), t.text_color.clone().into());
            }
            ShapeVariant::Image(i) => {
                map.insert("width".into(), i.width.into());
                map.insert("height".into(), i.height.into());
                map.insert("image_path".into(), i.image_path.clone().into());
                map.insert("has_frame".into(), i.has_frame.into());
                map.insert("has_shadow".into(), i.has_shadow.into());
            }
        }
        map
    }

    /// Read one attribute from the draw map.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<Value> {
        self.draw().remove(name)
    }

    /// Set a named attribute if this variant has it with a matching type.
    ///
    /// Unknown names, `id`, `type` and `selected` are ignored. Returns whether
    /// anything was written.
    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        match (name, value) {
            ("x", PropertyValue::Int(n)) => self.x = *n,
            ("y", PropertyValue::Int(n)) => self.y = *n,
            ("z_order", PropertyValue::Int(n)) => self.z_order = *n,
            ("outline", PropertyValue::Text(s)) => self.outline.clone_from(s),
            _ => return self.set_variant_property(name, value),
        }
        true
    }

    fn set_variant_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        match &mut self.variant {
            ShapeVariant::Rectangle(b) | ShapeVariant::Ellipse(b) => match name {
                "width" => set_int(&mut b.width, value),
                "height" => set_int(&mut b.height, value),
                "fill" => set_text(&mut b.fill, value),
                "text" => set_text(&mut b.text, value),
                "has_frame" => set_bool(&mut b.has_frame, value),
                "has_shadow" => set_bool(&mut b.has_shadow, value),
                _ => false,
            },
            ShapeVariant::Line(l) => match name {
                "x2" => set_int(&mut l.x2, value),
                "y2" => set_int(&mut l.y2, value),
                "width" => set_int(&mut l.width, value),
                _ => false,
            },
            ShapeVariant::Text(t) => match name {
                "width" => set_int(&mut t.width, value),
                "height" => set_int(&mut t.height, value),
                "text" => set_text(&mut t.text, value),
                "font" => set_text(&mut t.font, value),
                "font_size" => set_int(&mut t.font_size, value),
                "text_color" => set_text(&mut t.text_color, value),
                _ => false,
            },
            ShapeVariant::Image(i) => match name {
                "width" => set_int(&mut i.width, value),
                "height" => set_int(&mut i.height, value),
                "image_path" => set_text(&mut i.image_path, value),
                "has_frame" => set_bool(&mut i.has_frame, value),
                "has_shadow" => set_bool(&mut i.has_shadow, value),
                _ => false,
            },
        }
    }
}

fn set_int(slot: &mut i64, value: &PropertyValue) -> bool {
    value.as_int().map_or(false, |n| {
        *slot = n;
        true
    })
}

fn set_bool(slot: &mut bool, value: &PropertyValue) -> bool {
    value.as_bool().map_or(false, |b| {
        *slot = b;
        true
    })
}

fn set_text(slot: &mut String, value: &PropertyValue) -> bool {
    value.as_text().map_or(false, |s| {
        s.clone_into(slot);
        true
    })
}
