//! Error taxonomy for the core.
//!
//! The element set is a closed enum, so the "unknown element tag"
//! failures of tag-switching implementations cannot occur here. What
//! remains are operation/variant mismatches and stale indices; both
//! are programming errors on the embedder's side and are rejected
//! without touching editor state.

use crate::element::ElementKind;
use thiserror::Error;

/// Errors produced by the element model and the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The variant does not carry a corner pair (freehand strokes).
    #[error("{kind:?} elements do not carry corner coordinates")]
    NoCoords { kind: ElementKind },

    /// The variant has no cached sketch descriptor.
    #[error("{kind:?} elements are not built from a sketch descriptor")]
    NotSketchable { kind: ElementKind },

    /// An element index that is not present in the current snapshot.
    #[error("no element at index {0}")]
    UnknownElement(usize),
}
