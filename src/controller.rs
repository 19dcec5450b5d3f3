//! Controller: turns pointer and property-panel events into canvas mutations.
//!
//! DESIGN
//! ======
//! The controller owns the single [`Canvas`] and the property panel. Every
//! intent validates its input before touching a shape, mutates, pushes the
//! panel update the selection calls for, and notifies observers exactly as
//! the canvas contract requires. Everything runs on the caller's thread; a
//! host that introduces concurrency must serialize calls into the controller.
//!
//! The lower-level intents (`handle_click`, `handle_drag`, `handle_created`,
//! `handle_property_changed`, z-order commands) can be driven directly. The
//! `on_pointer_*` handlers layer the gesture state machine from
//! [`crate::input`] on top of them.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::canvas::Canvas;
use crate::consts::{IMAGE_BOX_SIZE, TEXT_BOX_HEIGHT, TEXT_BOX_WIDTH};
use crate::error::{EditorError, ErrorCode};
use crate::factory;
use crate::geom::Point;
use crate::hit;
use crate::input::{Action, InputState, Modifiers, PendingShape, Tool};
use crate::shape::{PropertyMap, PropertyValue, ShapeId, ShapeKind};

/// Font settings the property panel exposes for new text shapes.
///
/// `size` is kept as the panel's raw text; it is parsed when a text shape is
/// created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontState {
    pub family: String,
    pub size: String,
    pub color: String,
}

impl Default for FontState {
    fn default() -> Self {
        crate::config::EditorConfig::default().font_state()
    }
}

/// The property side panel, as seen from the controller.
pub trait PropertyPanel {
    /// Show the attributes of the single selected shape.
    fn update_properties(&mut self, props: &PropertyMap);
    /// Nothing is selected.
    fn clear_properties(&mut self);
    /// More than one shape is selected; per-field editing is unavailable.
    fn show_multi_select_properties(&mut self);
    /// Current font family/size/color, applied to new text shapes.
    fn font_state(&self) -> FontState;
}

/// Result of [`Controller::handle_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickResult {
    /// The topmost shape under the point, if any.
    pub hit: Option<ShapeId>,
    /// Whether `hit` is selected after the click.
    pub is_selected: bool,
}

/// Single writer of the canvas. Holds the active tool and the in-flight
/// pointer gesture alongside the canvas and panel it drives.
pub struct Controller<P: PropertyPanel> {
    canvas: Canvas,
    panel: P,
    tool: Tool,
    input: InputState,
}

impl<P: PropertyPanel> Controller<P> {
    /// Wire the controller to the application's canvas and property panel.
    pub fn new(canvas: Canvas, panel: P) -> Self {
        Self { canvas, panel, tool: Tool::default(), input: InputState::default() }
    }

    // --- Accessors ---

    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access for observer registration and direct edits.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    #[must_use]
    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    // --- Selection ---

    /// The topmost shape containing `pt`.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<ShapeId> {
        hit::hit_test(&self.canvas, pt)
    }

    /// Interpret a click at `pt`.
    ///
    /// With `check_only` nothing changes; the result only reports whether the
    /// hit shape is already selected. With `multi_select` a hit shape is
    /// toggled in or out of the selection; a miss does nothing. Otherwise a hit
    /// replaces the selection and a miss clears it.
    pub fn handle_click(&mut self, pt: Point, multi_select: bool, check_only: bool) -> ClickResult {
        let hit = self.hit_test(pt);
        if check_only {
            let is_selected = hit.is_some_and(|id| self.canvas.is_selected(id));
            return ClickResult { hit, is_selected };
        }

        match hit {
            Some(id) if multi_select => {
                self.canvas.toggle_selected(id);
                self.sync_panel_with_selection();
            }
            Some(id) => {
                self.canvas.select(&[id]);
                self.sync_panel_with_selection();
            }
            None if !multi_select => {
                self.canvas.clear_selection();
                self.panel.clear_properties();
            }
            None => {}
        }
        debug!(x = pt.x, y = pt.y, multi_select, hit = ?hit, "click handled");

        ClickResult { hit, is_selected: hit.is_some_and(|id| self.canvas.is_selected(id)) }
    }

    // --- Drag ---

    /// Translate every selected shape by the incremental delta `(dx, dy)`.
    pub fn handle_drag(&mut self, dx: i64, dy: i64) {
        for id in self.canvas.selection().to_vec() {
            if let Some(shape) = self.canvas.shape_mut(id) {
                shape.move_by(dx, dy);
            }
        }
        debug!(dx, dy, count = self.canvas.selected_count(), "selection dragged");
        self.push_single_selection();
        self.canvas.notify_observers();
    }

    // --- Creation ---

    /// Build a shape from a creation event and add it to the canvas.
    ///
    /// `text` and `image_path` in `extra` feed the factory. A text shape also
    /// takes the panel's current font family, size and color. Rectangles,
    /// ellipses and lines are then moved to `(x, y)`. For a line the third and
    /// fourth arguments are the second endpoint (as an offset from `(x, y)`);
    /// for every other kind they are the width and height. Remaining `extra`
    /// entries are applied as properties.
    ///
    /// # Errors
    ///
    /// Factory errors, an unparseable panel font size, or an ill-typed extra
    /// property. Nothing is added to the canvas on error.
    pub fn handle_created(
        &mut self,
        x: i64,
        y: i64,
        width_or_x2: i64,
        height_or_y2: i64,
        type_tag: &str,
        extra: &PropertyMap,
    ) -> Result<ShapeId, EditorError> {
        let text = required_extra(extra, "text");
        let image_path = required_extra(extra, "image_path");
        let mut shape = factory::create(type_tag, Point::new(x, y), text.as_deref(), image_path.as_deref())
            .inspect_err(|e| warn!(error = %e, type_tag, "shape creation rejected"))?;
        let kind = shape.kind();

        if kind == ShapeKind::Text {
            let font = self.panel.font_state();
            let size = font.size.trim().parse::<i64>().map_err(|_| EditorError::InvalidNumericProperty {
                name: "font_size".into(),
                value: font.size.clone(),
            })?;
            shape.set_property("font", &PropertyValue::Text(font.family));
            shape.set_property("font_size", &PropertyValue::Int(size));
            shape.set_property("text_color", &PropertyValue::Text(font.color));
        }

        if !matches!(kind, ShapeKind::Text | ShapeKind::Image) {
            shape.x = x;
            shape.y = y;
        }
        if kind == ShapeKind::Line {
            shape.set_property("x2", &PropertyValue::Int(width_or_x2));
            shape.set_property("y2", &PropertyValue::Int(height_or_y2));
        } else {
            shape.set_property("width", &PropertyValue::Int(width_or_x2));
            shape.set_property("height", &PropertyValue::Int(height_or_y2));
        }

        for (name, raw) in extra {
            if name == "text" || name == "image_path" {
                continue;
            }
            let value = PropertyValue::coerce(name, raw)?;
            shape.set_property(name, &value);
        }

        info!(id = %shape.id(), %kind, x = shape.x, y = shape.y, "shape created");
        Ok(self.canvas.add_shape(shape))
    }

    /// Create a default-sized text label at `at`.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_created`].
    pub fn place_text(&mut self, at: Point, text: &str) -> Result<ShapeId, EditorError> {
        let mut extra = PropertyMap::new();
        extra.insert("text".into(), text.into());
        self.handle_created(at.x, at.y, TEXT_BOX_WIDTH, TEXT_BOX_HEIGHT, ShapeKind::Text.as_str(), &extra)
    }

    /// Create a default-sized image at `at`.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_created`].
    pub fn place_image(&mut self, at: Point, image_path: &str) -> Result<ShapeId, EditorError> {
        let mut extra = PropertyMap::new();
        extra.insert("image_path".into(), image_path.into());
        self.handle_created(at.x, at.y, IMAGE_BOX_SIZE, IMAGE_BOX_SIZE, ShapeKind::Image.as_str(), &extra)
    }

    // --- Property edits ---

    /// Apply a property-panel edit to every selected shape.
    ///
    /// The value is converted once up front; if it does not fit the property
    /// (for example a non-integer `width`) the edit is discarded for all
    /// shapes and nothing is notified. Returns whether the edit was applied.
    pub fn handle_property_changed(&mut self, name: &str, raw: &Value) -> bool {
        let value = match PropertyValue::coerce(name, raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "property edit discarded");
                return false;
            }
        };
        let mut written = 0usize;
        for id in self.canvas.selection().to_vec() {
            if let Some(shape) = self.canvas.shape_mut(id) {
                if shape.set_property(name, &value) {
                    written += 1;
                }
            }
        }
        debug!(name, written, "property edit applied");
        self.canvas.notify_observers();
        true
    }

    /// Delete every selected shape.
    pub fn remove_selected(&mut self) -> usize {
        let ids = self.canvas.selection().to_vec();
        for &id in &ids {
            self.canvas.remove_shape(id);
        }
        if !ids.is_empty() {
            self.panel.clear_properties();
            info!(count = ids.len(), "selection removed");
        }
        ids.len()
    }

    // --- Z-order ---

    /// Raise the selection above every other shape, keeping selection order.
    pub fn bring_to_front(&mut self) {
        let Some((_, max_z)) = self.z_command_range() else {
            return;
        };
        for (offset, id) in (1..).zip(self.canvas.selection().to_vec()) {
            if let Some(shape) = self.canvas.shape_mut(id) {
                shape.z_order = max_z.saturating_add(offset);
            }
        }
        self.finish_z_command("bring_to_front");
    }

    /// Lower the selection beneath every other shape. The first selected
    /// shape ends up directly under the previous minimum, the next below it.
    pub fn send_to_back(&mut self) {
        let Some((min_z, _)) = self.z_command_range() else {
            return;
        };
        for (offset, id) in (1..).zip(self.canvas.selection().to_vec()) {
            if let Some(shape) = self.canvas.shape_mut(id) {
                shape.z_order = min_z.saturating_sub(offset);
            }
        }
        self.finish_z_command("send_to_back");
    }

    /// Swap each selected shape's z-order with the next shape up.
    pub fn bring_forward(&mut self) {
        if self.swap_with_neighbors(true) {
            self.finish_z_command("bring_forward");
        }
    }

    /// Swap each selected shape's z-order with the next shape down.
    pub fn send_backward(&mut self) {
        if self.swap_with_neighbors(false) {
            self.finish_z_command("send_backward");
        }
    }

    fn z_command_range(&self) -> Option<(i64, i64)> {
        if self.canvas.selection().is_empty() {
            return None;
        }
        self.canvas.z_range()
    }

    /// Neighbors come from one z-sorted snapshot taken before any swap.
    fn swap_with_neighbors(&mut self, forward: bool) -> bool {
        if self.canvas.selection().is_empty() {
            return false;
        }
        let order: Vec<ShapeId> = self.canvas.shapes_by_z_order().iter().map(|s| s.id()).collect();
        for id in self.canvas.selection().to_vec() {
            let Some(idx) = order.iter().position(|other| *other == id) else {
                continue;
            };
            let neighbor = if forward { order.get(idx + 1) } else { idx.checked_sub(1).and_then(|i| order.get(i)) };
            let Some(&neighbor) = neighbor else {
                continue;
            };
            self.swap_z_order(id, neighbor);
        }
        true
    }

    fn swap_z_order(&mut self, a: ShapeId, b: ShapeId) {
        let (Some(za), Some(zb)) = (
            self.canvas.shape(a).map(|s| s.z_order),
            self.canvas.shape(b).map(|s| s.z_order),
        ) else {
            return;
        };
        if let Some(shape) = self.canvas.shape_mut(a) {
            shape.z_order = zb;
        }
        if let Some(shape) = self.canvas.shape_mut(b) {
            shape.z_order = za;
        }
    }

    fn finish_z_command(&mut self, command: &'static str) {
        debug!(command, count = self.canvas.selected_count(), "z-order changed");
        self.push_single_selection();
        self.canvas.notify_observers();
    }

    // --- Panel sync ---

    /// Single selection pushes its map; several show the multi-select view;
    /// none clears the panel.
    fn sync_panel_with_selection(&mut self) {
        match self.canvas.selected_count() {
            0 => self.panel.clear_properties(),
            1 => self.push_single_selection(),
            _ => self.panel.show_multi_select_properties(),
        }
    }

    fn push_single_selection(&mut self) {
        if let [id] = self.canvas.selection() {
            if let Some(shape) = self.canvas.shape(*id) {
                self.panel.update_properties(&shape.draw());
            }
        }
    }

    // --- Tool / gestures ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.input = InputState::Idle;
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.input
    }

    /// The rubber band being dragged out, if any.
    #[must_use]
    pub fn pending_shape(&self) -> Option<PendingShape> {
        match self.input {
            InputState::DrawingShape(pending) => Some(pending),
            _ => None,
        }
    }

    /// Pointer pressed at `pt`.
    ///
    /// A multi-select modifier toggles the shape under the pointer. Otherwise,
    /// pressing on an already selected shape starts dragging the selection;
    /// anything else selects (Select tool), asks the host for text or an image
    /// reference (Text / Image tools), or starts a rubber band.
    pub fn on_pointer_down(&mut self, pt: Point, modifiers: Modifiers) -> Action {
        self.input = InputState::Idle;
        if modifiers.multi_select() {
            self.handle_click(pt, true, false);
            return Action::None;
        }
        if self.handle_click(pt, false, true).is_selected {
            self.input = InputState::DraggingSelection { last: pt };
            return Action::None;
        }
        match self.tool {
            Tool::Text => Action::RequestText { at: pt },
            Tool::Image => Action::RequestImage { at: pt },
            tool => {
                match tool.shape_kind().filter(|_| tool.is_rubber_band()) {
                    Some(kind) => {
                        self.input = InputState::DrawingShape(PendingShape { kind, anchor: pt, current: pt });
                    }
                    None => {
                        self.handle_click(pt, false, false);
                    }
                }
                Action::None
            }
        }
    }

    /// Pointer moved to `pt` with the button held.
    pub fn on_pointer_move(&mut self, pt: Point) {
        match self.input {
            InputState::DraggingSelection { last } => {
                self.input = InputState::DraggingSelection { last: pt };
                let (dx, dy) = pt.delta_from(last);
                if dx != 0 || dy != 0 {
                    self.handle_drag(dx, dy);
                }
            }
            InputState::DrawingShape(pending) => {
                self.input = InputState::DrawingShape(PendingShape { current: pt, ..pending });
            }
            InputState::Idle => {}
        }
    }

    /// Pointer released at `pt`; completes a rubber band into a new shape.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::handle_created`] failures.
    pub fn on_pointer_up(&mut self, pt: Point) -> Result<Action, EditorError> {
        match std::mem::take(&mut self.input) {
            InputState::DrawingShape(pending) => {
                let finished = PendingShape { current: pt, ..pending };
                let (x, y, w, h) = finished.geometry();
                let id = self.handle_created(x, y, w, h, finished.kind.as_str(), &PropertyMap::new())?;
                Ok(Action::ShapeCreated(id))
            }
            InputState::DraggingSelection { .. } | InputState::Idle => Ok(Action::None),
        }
    }
}

/// A creation field the factory needs; JSON `null` counts as absent.
fn required_extra(extra: &PropertyMap, key: &str) -> Option<String> {
    extra.get(key).filter(|v| !v.is_null()).map(value_text)
}

fn value_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
