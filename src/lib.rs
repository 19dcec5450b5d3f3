//! Shape/canvas state model and interaction protocol for a vector drawing editor.
//!
//! The crate owns everything with real invariants: shape identity and
//! geometry, the selection subset and its per-shape flags, z-ordering, and the
//! translation of raw pointer/property-edit events into canvas mutations.
//! Rasterizing shapes, window layout and file dialogs belong to the host; it
//! reads [`canvas::Canvas::shapes_by_z_order`] plus each shape's draw map and
//! re-renders whenever an observer is notified.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`shape`] | Shape variants, draw maps and typed property setters |
//! | [`factory`] | Builds a shape from a type tag, validating required fields |
//! | [`canvas`] | Shape collection, selection subset, z-order and observers |
//! | [`hit`] | Front-to-back hit testing |
//! | [`controller`] | Selection, drag, creation, property-edit and z-order intents |
//! | [`input`] | Tools, modifiers and the pointer gesture state machine |
//! | [`config`] | Environment-driven editor defaults |
//! | [`geom`] | Points and axis-aligned bounding boxes |
//! | [`error`] | The crate error type |
//! | [`consts`] | Shared numeric and string defaults |

pub mod canvas;
pub mod config;
pub mod consts;
pub mod controller;
pub mod error;
pub mod factory;
pub mod geom;
pub mod hit;
pub mod input;
pub mod shape;

pub use canvas::{Canvas, CanvasObserver, ObserverId};
pub use controller::{ClickResult, Controller, FontState, PropertyPanel};
pub use error::{EditorError, ErrorCode};
pub use shape::{PropertyMap, PropertyValue, Shape, ShapeId, ShapeKind};
