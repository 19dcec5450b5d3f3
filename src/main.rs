//! Headless driver: runs a scripted editing session and logs what a host
//! view and property panel would receive.

use std::process::ExitCode;
use std::rc::Rc;

use serde_json::json;
use sketchpad::config::EditorConfig;
use sketchpad::geom::Point;
use sketchpad::input::{Action, Modifiers, Tool};
use sketchpad::{Canvas, CanvasObserver, Controller, EditorError, ErrorCode, FontState, PropertyMap, PropertyPanel};

/// Stands in for the render surface.
struct LogView;

impl CanvasObserver for LogView {
    fn canvas_changed(&self, canvas: &Canvas) {
        let order: Vec<String> =
            canvas.shapes_by_z_order().iter().map(|s| format!("{}@{}", s.kind(), s.z_order)).collect();
        tracing::debug!(shapes = canvas.len(), selected = canvas.selected_count(), ?order, "redraw");
    }
}

/// Stands in for the property side panel.
struct LogPanel {
    font: FontState,
}

impl PropertyPanel for LogPanel {
    fn update_properties(&mut self, props: &PropertyMap) {
        tracing::info!(props = %serde_json::Value::Object(props.clone()), "panel: single selection");
    }

    fn clear_properties(&mut self) {
        tracing::info!("panel: cleared");
    }

    fn show_multi_select_properties(&mut self) {
        tracing::info!("panel: multiple selected");
    }

    fn font_state(&self) -> FontState {
        self.font.clone()
    }
}

fn run(config: &EditorConfig) -> Result<(), EditorError> {
    let mut ctl = Controller::new(Canvas::new(), LogPanel { font: config.font_state() });
    ctl.canvas_mut().add_observer(Rc::new(LogView));
    tracing::debug!(observers = ctl.canvas().observer_count(), "views attached");

    // Rubber-band a rectangle, then an ellipse overlapping it.
    ctl.set_tool(Tool::Rectangle);
    ctl.on_pointer_down(Point::new(10, 10), Modifiers::default());
    ctl.on_pointer_move(Point::new(40, 40));
    ctl.on_pointer_up(Point::new(60, 60))?;

    ctl.set_tool(Tool::Ellipse);
    ctl.on_pointer_down(Point::new(20, 20), Modifiers::default());
    ctl.on_pointer_up(Point::new(70, 70))?;

    // The text tool asks the host for content before anything is created.
    ctl.set_tool(Tool::Text);
    if let Action::RequestText { at } = ctl.on_pointer_down(Point::new(200, 20), Modifiers::default()) {
        place_or_skip(ctl.place_text(at, "hello"))?;
    }

    // A cancelled image prompt arrives without a reference and is skipped.
    let mut cancelled = PropertyMap::new();
    cancelled.insert("image_path".into(), serde_json::Value::Null);
    place_or_skip(ctl.handle_created(300, 20, 200, 200, "image", &cancelled))?;

    // Select the topmost shape under (30, 30), rename its fill, then restack.
    ctl.set_tool(Tool::Select);
    ctl.on_pointer_down(Point::new(30, 30), Modifiers::default());
    ctl.handle_property_changed("fill", &json!("yellow"));
    ctl.handle_property_changed("width", &json!("not-a-number"));
    ctl.send_to_back();

    // Add the text label to the selection and drag both.
    ctl.on_pointer_down(Point::new(210, 25), Modifiers { ctrl: true, ..Modifiers::default() });
    ctl.on_pointer_down(Point::new(210, 25), Modifiers::default());
    ctl.on_pointer_move(Point::new(215, 22));
    ctl.on_pointer_up(Point::new(215, 22))?;

    for shape in ctl.canvas().shapes() {
        tracing::info!(id = %shape.id(), props = %serde_json::Value::Object(shape.draw()), "final shape");
    }
    let removed = ctl.remove_selected();
    tracing::info!(removed, remaining = ctl.canvas().len(), "session finished");
    Ok(())
}

/// A rejected creation is reported and the session goes on; anything else
/// ends it.
fn place_or_skip(result: Result<sketchpad::ShapeId, EditorError>) -> Result<(), EditorError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_creation_failure() => {
            tracing::warn!(error = %e, code = e.error_code(), "placement skipped");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match EditorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(font = %config.font_family, size = config.font_size, color = %config.text_color, "sketchpad starting");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "session failed");
            ExitCode::FAILURE
        }
    }
}
