//! Input model: tools, modifier keys, and the pointer gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture tracked between pointer-down and
//! pointer-up, carrying what is needed to emit incremental drag deltas and
//! to complete a rubber-band creation on release. The handlers that drive it
//! live on [`crate::controller::Controller`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Bounds, Point};
use crate::shape::{ShapeId, ShapeKind};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
    /// Places a text label; the host prompts for its content.
    Text,
    /// Places an image; the host prompts for its reference.
    Image,
}

impl Tool {
    /// The shape kind this tool creates, if any.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Select => None,
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Line => Some(ShapeKind::Line),
            Self::Text => Some(ShapeKind::Text),
            Self::Image => Some(ShapeKind::Image),
        }
    }

    /// Whether this tool creates its shape by dragging out a box or segment.
    #[must_use]
    pub fn is_rubber_band(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Line)
    }
}

/// Keyboard modifier keys held during a pointer event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl (or Command) toggles shapes in and out of the selection.
    #[must_use]
    pub fn multi_select(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Outcome of a pointer event that the host must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Prompt for text, then call `Controller::place_text` with `at`.
    RequestText { at: Point },
    /// Prompt for an image reference, then call `Controller::place_image`.
    RequestImage { at: Point },
    /// A rubber-band gesture produced a new shape.
    ShapeCreated(ShapeId),
}

/// A rubber-band creation in progress, for preview rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingShape {
    pub kind: ShapeKind,
    pub anchor: Point,
    pub current: Point,
}

impl PendingShape {
    /// Creation geometry as `(x, y, width_or_x2, height_or_y2)`.
    ///
    /// Boxes are normalized to a non-negative size from their top-left
    /// corner. Lines keep the anchor as their start and report the second
    /// endpoint as an offset from it.
    #[must_use]
    pub fn geometry(&self) -> (i64, i64, i64, i64) {
        if self.kind == ShapeKind::Line {
            let (dx, dy) = self.current.delta_from(self.anchor);
            return (self.anchor.x, self.anchor.y, dx, dy);
        }
        let b = Bounds::from_corners(self.anchor, self.current);
        (b.min_x, b.min_y, b.width(), b.height())
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving the current selection.
    DraggingSelection {
        /// Pointer position at the previous sample; deltas are relative to it.
        last: Point,
    },
    /// Dragging out a new rectangle, ellipse or line.
    DrawingShape(PendingShape),
}
