//! Resize math and coordinate canonicalization.

use crate::element::{Coords, ElementKind};
use crate::hit::Handle;
use kurbo::Point;

/// New corner pair for a resize drag: the grabbed handle's corner
/// follows the cursor, the opposite corner stays put.
///
/// Pure substitution with no clamping; a shape may pass through zero
/// or negative extent mid-drag and is sorted out by
/// [`canonicalize`] when the gesture completes.
pub fn resized_coords(cursor: Point, handle: Handle, c: Coords) -> Coords {
    match handle {
        Handle::TopLeft | Handle::Start => Coords::new(cursor.x, cursor.y, c.x2, c.y2),
        Handle::TopRight => Coords::new(c.x1, cursor.y, cursor.x, c.y2),
        Handle::BottomLeft => Coords::new(cursor.x, c.y1, c.x2, cursor.y),
        Handle::BottomRight | Handle::End => Coords::new(c.x1, c.y1, cursor.x, cursor.y),
    }
}

/// Reorder a corner pair into its canonical form.
///
/// Rectangles store the min corner first. Lines and circles keep their
/// endpoints in a total order (x ascending, then y), so the handle at
/// the stored-first corner stays semantically stable no matter which
/// direction the shape was dragged out in. Applied once at gesture
/// end, never mid-drag; reordering during a resize would detach the
/// grabbed handle from its corner.
pub fn canonicalize(c: Coords, kind: ElementKind) -> Coords {
    match kind {
        ElementKind::Rectangle => Coords::new(
            c.x1.min(c.x2),
            c.y1.min(c.y2),
            c.x1.max(c.x2),
            c.y1.max(c.y2),
        ),
        ElementKind::Line | ElementKind::Circle => {
            if c.x1 < c.x2 || (c.x1 == c.x2 && c.y1 < c.y2) {
                c
            } else {
                Coords::new(c.x2, c.y2, c.x1, c.y1)
            }
        }
        // Freehand has no corner pair; text boxes are derived, never dragged out.
        ElementKind::Freehand | ElementKind::Text => c,
    }
}
