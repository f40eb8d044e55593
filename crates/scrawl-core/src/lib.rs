//! Platform-independent engine for an interactive vector-drawing
//! surface: the element model, hit testing, resize math, the freehand
//! path builder, snapshot history, the viewport transform, and the
//! pointer-driven interaction state machine.
//!
//! Rendering, text layout, and rough-sketch generation stay outside;
//! the engine talks to them through the [`element::SketchGenerator`],
//! [`element::TextMeasurer`], and [`freehand::StrokeEngine`] seams.

pub mod editor;
pub mod element;
pub mod error;
pub mod freehand;
pub mod geometry;
pub mod hit;
pub mod history;
pub mod input;
pub mod resize;
pub mod viewport;

pub use editor::{Editor, EditorEvent, Interaction, Services, Tool};
pub use element::{
    Coords, Element, ElementId, ElementKind, RenderDescriptor, SketchGenerator, TextMeasurer,
};
pub use error::CoreError;
pub use freehand::{StrokeEngine, StrokeOptions};
pub use hit::{cursor_for, hit_test, CursorGlyph, Handle, Hit, HitRegion};
pub use history::History;
pub use input::{Modifiers, MouseButton};
pub use viewport::Viewport;
