use std::cell::{Cell, RefCell};

use super::*;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct CountingObserver {
    calls: Cell<usize>,
}

impl CanvasObserver for CountingObserver {
    fn canvas_changed(&self, _canvas: &Canvas) {
        self.calls.set(self.calls.get() + 1);
    }
}

/// Records the z-sorted ids and selection seen at each notification.
#[derive(Default)]
struct SnapshotObserver {
    seen: RefCell<Vec<(Vec<ShapeId>, Vec<ShapeId>)>>,
}

impl CanvasObserver for SnapshotObserver {
    fn canvas_changed(&self, canvas: &Canvas) {
        let order = canvas.shapes_by_z_order().iter().map(|s| s.id()).collect();
        self.seen.borrow_mut().push((order, canvas.selection().to_vec()));
    }
}

fn rect_with_z(z: i64) -> Shape {
    let mut s = Shape::rectangle();
    s.z_order = z;
    s
}

fn assert_flags_match_selection(canvas: &Canvas) {
    for shape in canvas.shapes() {
        assert_eq!(
            shape.is_selected(),
            canvas.is_selected(shape.id()),
            "flag/subset disagree for {}",
            shape.id()
        );
    }
}

// =============================================================
// Shapes
// =============================================================

#[test]
fn new_canvas_is_empty() {
    let canvas = Canvas::new();
    assert!(canvas.is_empty());
    assert_eq!(canvas.selected_count(), 0);
    assert_eq!(canvas.z_range(), None);
}

#[test]
fn add_shape_appends_and_notifies() {
    let mut canvas = Canvas::new();
    let obs = Rc::new(CountingObserver::default());
    canvas.add_observer(obs.clone());

    let id = canvas.add_shape(Shape::rectangle());
    assert_eq!(canvas.len(), 1);
    assert!(canvas.shape(id).is_some());
    assert_eq!(obs.calls.get(), 1);
}

#[test]
fn re_adding_same_id_replaces_in_place() {
    let mut canvas = Canvas::new();
    let id = canvas.add_shape(Shape::rectangle());
    canvas.add_shape(Shape::ellipse());
    canvas.select(&[id]);

    let mut copy = canvas.shape(id).unwrap().clone();
    copy.x = 99;
    canvas.add_shape(copy);

    assert_eq!(canvas.len(), 2);
    assert_eq!(canvas.shapes()[0].id(), id);
    assert_eq!(canvas.shape(id).unwrap().x, 99);
    assert!(canvas.shape(id).unwrap().is_selected());
}

#[test]
fn selected_clone_added_as_new_shape_starts_unselected() {
    let mut canvas = Canvas::new();
    let id = canvas.add_shape(Shape::rectangle());
    canvas.select(&[id]);
    let mut other_canvas = Canvas::new();
    let copy = canvas.shape(id).unwrap().clone();
    assert!(copy.is_selected());
    let copied = other_canvas.add_shape(copy);
    assert!(!other_canvas.shape(copied).unwrap().is_selected());
}

#[test]
fn remove_shape_drops_from_selection() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(Shape::rectangle());
    let b = canvas.add_shape(Shape::rectangle());
    canvas.select(&[a, b]);

    let removed = canvas.remove_shape(a).unwrap();
    assert!(!removed.is_selected());
    assert_eq!(canvas.len(), 1);
    assert_eq!(canvas.selection(), &[b]);
    assert_flags_match_selection(&canvas);
}

#[test]
fn remove_absent_shape_is_silent_noop() {
    let mut canvas = Canvas::new();
    canvas.add_shape(Shape::rectangle());
    let obs = Rc::new(CountingObserver::default());
    canvas.add_observer(obs.clone());

    assert!(canvas.remove_shape(Shape::line().id()).is_none());
    assert_eq!(canvas.len(), 1);
    assert_eq!(obs.calls.get(), 0);
}

// =============================================================
// Z-order
// =============================================================

#[test]
fn shapes_by_z_order_sorts_ascending() {
    let mut canvas = Canvas::new();
    let top = canvas.add_shape(rect_with_z(5));
    let bottom = canvas.add_shape(rect_with_z(-1));
    let middle = canvas.add_shape(rect_with_z(2));

    let ids: Vec<ShapeId> = canvas.shapes_by_z_order().iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec![bottom, middle, top]);
}

#[test]
fn shapes_by_z_order_is_stable_for_ties() {
    let mut canvas = Canvas::new();
    let ids: Vec<ShapeId> = (0..6).map(|_| canvas.add_shape(rect_with_z(3))).collect();
    let sorted: Vec<ShapeId> = canvas.shapes_by_z_order().iter().map(|s| s.id()).collect();
    assert_eq!(sorted, ids);
}

#[test]
fn z_range_spans_min_and_max() {
    let mut canvas = Canvas::new();
    canvas.add_shape(rect_with_z(4));
    canvas.add_shape(rect_with_z(-7));
    canvas.add_shape(rect_with_z(0));
    assert_eq!(canvas.z_range(), Some((-7, 4)));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_single_sets_exactly_one_flag() {
    let mut canvas = Canvas::new();
    let ids: Vec<ShapeId> = (0..4).map(|_| canvas.add_shape(Shape::ellipse())).collect();
    canvas.select(&[ids[0], ids[1]]);
    canvas.select(&[ids[2]]);

    assert_eq!(canvas.selection(), &[ids[2]]);
    let flagged: Vec<ShapeId> = canvas.shapes().iter().filter(|s| s.is_selected()).map(Shape::id).collect();
    assert_eq!(flagged, vec![ids[2]]);
}

#[test]
fn select_drops_unknown_and_duplicate_ids() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(Shape::rectangle());
    let stranger = Shape::rectangle().id();
    canvas.select(&[a, stranger, a]);
    assert_eq!(canvas.selection(), &[a]);
    assert_flags_match_selection(&canvas);
}

#[test]
fn select_keeps_caller_order() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(Shape::rectangle());
    let b = canvas.add_shape(Shape::rectangle());
    canvas.select(&[b, a]);
    assert_eq!(canvas.selection(), &[b, a]);
    let selected: Vec<ShapeId> = canvas.selected_shapes().iter().map(|s| s.id()).collect();
    assert_eq!(selected, vec![b, a]);
}

#[test]
fn clear_selection_unflags_everything() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(Shape::rectangle());
    let b = canvas.add_shape(Shape::line());
    canvas.select(&[a, b]);
    canvas.clear_selection();
    assert_eq!(canvas.selected_count(), 0);
    assert!(canvas.shapes().iter().all(|s| !s.is_selected()));
}

#[test]
fn toggle_adds_then_removes() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(Shape::rectangle());
    let b = canvas.add_shape(Shape::rectangle());
    canvas.select(&[a]);

    assert!(canvas.toggle_selected(b));
    assert_eq!(canvas.selection(), &[a, b]);
    assert_flags_match_selection(&canvas);

    assert!(!canvas.toggle_selected(a));
    assert_eq!(canvas.selection(), &[b]);
    assert_flags_match_selection(&canvas);
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut canvas = Canvas::new();
    let ids: Vec<ShapeId> = (0..3).map(|_| canvas.add_shape(Shape::rectangle())).collect();
    canvas.select(&[ids[0], ids[2]]);

    for &id in &ids {
        let before_selection = canvas.selection().to_vec();
        let before_flags: Vec<bool> = canvas.shapes().iter().map(Shape::is_selected).collect();
        canvas.toggle_selected(id);
        canvas.toggle_selected(id);
        let mut after = canvas.selection().to_vec();
        let mut expected = before_selection.clone();
        after.sort();
        expected.sort();
        assert_eq!(after, expected);
        let after_flags: Vec<bool> = canvas.shapes().iter().map(Shape::is_selected).collect();
        assert_eq!(after_flags, before_flags);
    }
}

#[test]
fn toggle_unknown_id_notifies_without_selecting() {
    let mut canvas = Canvas::new();
    let obs = Rc::new(CountingObserver::default());
    canvas.add_observer(obs.clone());
    assert!(!canvas.toggle_selected(Shape::rectangle().id()));
    assert_eq!(canvas.selected_count(), 0);
    assert_eq!(obs.calls.get(), 1);
}

// =============================================================
// Observers
// =============================================================

#[test]
fn observers_see_post_mutation_state() {
    let mut canvas = Canvas::new();
    let obs = Rc::new(SnapshotObserver::default());
    canvas.add_observer(obs.clone());

    let a = canvas.add_shape(rect_with_z(1));
    let b = canvas.add_shape(rect_with_z(0));
    canvas.select(&[a]);

    let seen = obs.seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], (vec![a], vec![]));
    assert_eq!(seen[1], (vec![b, a], vec![]));
    assert_eq!(seen[2], (vec![b, a], vec![a]));
}

#[test]
fn every_observer_is_notified_once_per_mutation() {
    let mut canvas = Canvas::new();
    let first = Rc::new(CountingObserver::default());
    let second = Rc::new(CountingObserver::default());
    canvas.add_observer(first.clone());
    canvas.add_observer(second.clone());

    let id = canvas.add_shape(Shape::rectangle());
    canvas.select(&[id]);
    canvas.toggle_selected(id);
    canvas.remove_shape(id);

    assert_eq!(first.calls.get(), 4);
    assert_eq!(second.calls.get(), 4);
}

#[test]
fn adding_same_observer_twice_is_deduplicated() {
    let mut canvas = Canvas::new();
    let obs = Rc::new(CountingObserver::default());
    let first = canvas.add_observer(obs.clone());
    let second = canvas.add_observer(obs.clone());
    assert_eq!(first, second);
    assert_eq!(canvas.observer_count(), 1);

    canvas.notify_observers();
    assert_eq!(obs.calls.get(), 1);
}

#[test]
fn removed_observer_is_not_called() {
    let mut canvas = Canvas::new();
    let obs = Rc::new(CountingObserver::default());
    let handle = canvas.add_observer(obs.clone());
    assert!(canvas.remove_observer(handle));
    assert!(!canvas.remove_observer(handle));

    canvas.add_shape(Shape::rectangle());
    assert_eq!(obs.calls.get(), 0);
}
