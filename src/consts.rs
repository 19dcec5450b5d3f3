//! Shared numeric and string defaults for the editor core.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width/height a `resize` may leave a shape with.
pub const MIN_SHAPE_SIZE: i64 = 10;

/// Default box size for rectangles and ellipses.
pub const DEFAULT_SHAPE_SIZE: i64 = 100;

/// Default stroke width of a freshly constructed line.
pub const DEFAULT_LINE_WIDTH: i64 = 1;

/// Default text box width.
pub const TEXT_BOX_WIDTH: i64 = 100;

/// Default text box height.
pub const TEXT_BOX_HEIGHT: i64 = 30;

/// Default image box edge length.
pub const IMAGE_BOX_SIZE: i64 = 200;

// ── Styling ─────────────────────────────────────────────────────

/// Outline color applied to every new shape.
pub const DEFAULT_OUTLINE: &str = "black";

/// Font family for new text shapes.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Font size (points) for new text shapes.
pub const DEFAULT_FONT_SIZE: i64 = 12;

/// Text color for new text shapes.
pub const DEFAULT_TEXT_COLOR: &str = "black";
