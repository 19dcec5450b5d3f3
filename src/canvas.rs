//! Canvas state: the shape collection, the selection subset, and observers.
//!
//! DESIGN
//! ======
//! Exactly one `Canvas` exists per running editor. It is constructed at
//! startup and handed to the [`crate::controller::Controller`], which is the
//! only writer; views attach as [`CanvasObserver`]s and read the canvas when
//! notified. Tests construct a fresh canvas each.
//!
//! A shape is selected iff its id is in `selection`. Every method that
//! changes membership also writes the shape's own flag before returning, so
//! the two never disagree from an observer's point of view. Observers are
//! called synchronously with a shared borrow of the canvas, which also rules
//! out re-entrant mutation during notification.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::rc::Rc;

use tracing::debug;

use crate::shape::{Shape, ShapeId};

/// A listener re-rendered after every canvas mutation.
pub trait CanvasObserver {
    /// Called synchronously after a mutation. Implementations should redraw
    /// from [`Canvas::shapes_by_z_order`].
    fn canvas_changed(&self, canvas: &Canvas);
}

/// Handle returned by [`Canvas::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The editor's shape collection and selection subset.
#[derive(Default)]
pub struct Canvas {
    /// Insertion order; used to break z-order ties.
    shapes: Vec<Shape>,
    /// Selected ids in selection order.
    selection: Vec<ShapeId>,
    observers: Vec<(ObserverId, Rc<dyn CanvasObserver>)>,
    next_observer: u64,
}

impl Canvas {
    /// Create an empty canvas with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Shapes ---

    /// Append a shape and notify observers.
    ///
    /// A shape whose id is already present replaces the existing entry in
    /// place. The incoming selected flag is overwritten to match membership.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        let id = shape.id();
        shape.set_selected(self.selection.contains(&id));
        if let Some(slot) = self.shapes.iter_mut().find(|s| s.id() == id) {
            *slot = shape;
            debug!(%id, "shape replaced");
        } else {
            debug!(%id, kind = %shape.kind(), z_order = shape.z_order, "shape added");
            self.shapes.push(shape);
        }
        self.notify_observers();
        id
    }

    /// Remove a shape from the collection and the selection.
    ///
    /// Absent ids are a no-op and do not notify.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id() == id)?;
        let mut shape = self.shapes.remove(idx);
        self.selection.retain(|sel| *sel != id);
        shape.set_selected(false);
        debug!(%id, "shape removed");
        self.notify_observers();
        Some(shape)
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Mutable lookup. Callers are expected to notify once their edit is done.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Shapes in insertion order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes stably sorted ascending by z-order. The only order views may
    /// render in.
    #[must_use]
    pub fn shapes_by_z_order(&self) -> Vec<&Shape> {
        let mut sorted: Vec<&Shape> = self.shapes.iter().collect();
        sorted.sort_by_key(|s| s.z_order);
        sorted
    }

    /// Lowest and highest z-order on the canvas, or `None` when empty.
    #[must_use]
    pub fn z_range(&self) -> Option<(i64, i64)> {
        let min = self.shapes.iter().map(|s| s.z_order).min()?;
        let max = self.shapes.iter().map(|s| s.z_order).max()?;
        Some((min, max))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    // --- Selection ---

    /// Replace the selection and notify observers.
    ///
    /// Ids not on the canvas and repeated ids are dropped; the remaining order
    /// is kept as the selection order.
    pub fn select(&mut self, ids: &[ShapeId]) {
        for id in std::mem::take(&mut self.selection) {
            if let Some(shape) = self.shape_mut(id) {
                shape.set_selected(false);
            }
        }
        for &id in ids {
            if self.selection.contains(&id) {
                continue;
            }
            if let Some(shape) = self.shape_mut(id) {
                shape.set_selected(true);
                self.selection.push(id);
            }
        }
        debug!(count = self.selection.len(), "selection replaced");
        self.notify_observers();
    }

    /// Clear the selection and notify observers.
    pub fn clear_selection(&mut self) {
        self.select(&[]);
    }

    /// Add `id` to the selection if absent, remove it if present, then notify.
    ///
    /// Returns the new membership. Ids not on the canvas are left unselected.
    pub fn toggle_selected(&mut self, id: ShapeId) -> bool {
        let selected = if let Some(pos) = self.selection.iter().position(|sel| *sel == id) {
            self.selection.remove(pos);
            if let Some(shape) = self.shape_mut(id) {
                shape.set_selected(false);
            }
            false
        } else if let Some(shape) = self.shape_mut(id) {
            shape.set_selected(true);
            self.selection.push(id);
            true
        } else {
            false
        };
        debug!(%id, selected, count = self.selection.len(), "selection toggled");
        self.notify_observers();
        selected
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    /// Selected shapes in selection order.
    #[must_use]
    pub fn selected_shapes(&self) -> Vec<&Shape> {
        self.selection.iter().filter_map(|id| self.shape(*id)).collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    // --- Observers ---

    /// Register an observer. Registering the same observer twice returns the
    /// original handle.
    pub fn add_observer(&mut self, observer: Rc<dyn CanvasObserver>) -> ObserverId {
        let ptr = Rc::as_ptr(&observer).cast::<()>();
        if let Some((id, _)) = self.observers.iter().find(|(_, o)| Rc::as_ptr(o).cast::<()>() == ptr) {
            return *id;
        }
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detach an observer. Returns false if the handle was unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Call every observer's update hook, in registration order.
    pub fn notify_observers(&self) {
        for (_, observer) in &self.observers {
            observer.canvas_changed(self);
        }
    }
}
