//! Hit testing: which element, and which part of it, is under the cursor.

use crate::element::{Element, ElementId};
use crate::geometry::{distance, near_point, on_segment, perpendicular_distance, HANDLE_TOLERANCE};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pick radius around a freehand stroke, in world units.
const STROKE_TOLERANCE: f64 = 5.0;

/// Perpendicular pick distance for line bodies, in world units.
const LINE_TOLERANCE: f64 = 1.0;

/// A named resize-control point on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    /// Edits the stored-first corner of a rectangle.
    TopLeft,
    TopRight,
    BottomLeft,
    /// Edits the stored-second corner of a rectangle.
    BottomRight,
    /// Edits the stored-first endpoint of a line or circle box.
    Start,
    /// Edits the stored-second endpoint of a line or circle box.
    End,
}

/// Which part of an element the cursor landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitRegion {
    Handle(Handle),
    /// The element body; grabbing here moves the whole element.
    Inside,
}

/// A successful hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub region: HitRegion,
}

/// Cursor glyph the embedding UI should show for a hover position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorGlyph {
    #[default]
    Default,
    NwseResize,
    NeswResize,
    Move,
}

/// Find the element under `p`.
///
/// Precedence is insertion order (lowest id wins), not z-order: the
/// collection is scanned front to back and the first match is
/// returned. With overlapping shapes this grabs the oldest one, which
/// mirrors the observed behavior of the surface this engine ports.
pub fn hit_test(p: Point, elements: &[Element]) -> Option<Hit> {
    elements.iter().find_map(|element| {
        region_for(p, element).map(|region| Hit {
            id: element.id(),
            region,
        })
    })
}

/// Glyph for a hit region; `None` (no hit) maps to the default glyph.
pub fn cursor_for(region: Option<HitRegion>) -> CursorGlyph {
    match region {
        Some(HitRegion::Handle(
            Handle::TopLeft | Handle::BottomRight | Handle::Start | Handle::End,
        )) => CursorGlyph::NwseResize,
        Some(HitRegion::Handle(Handle::TopRight | Handle::BottomLeft)) => CursorGlyph::NeswResize,
        Some(HitRegion::Inside) => CursorGlyph::Move,
        None => CursorGlyph::Default,
    }
}

fn region_for(p: Point, element: &Element) -> Option<HitRegion> {
    match element {
        Element::Rectangle { coords, .. } => {
            let corners = [
                (coords.p1(), Handle::TopLeft),
                (Point::new(coords.x2, coords.y1), Handle::TopRight),
                (Point::new(coords.x1, coords.y2), Handle::BottomLeft),
                (coords.p2(), Handle::BottomRight),
            ];
            for (corner, handle) in corners {
                if near_point(p, corner, HANDLE_TOLERANCE) {
                    return Some(HitRegion::Handle(handle));
                }
            }
            // The interior test is inclusive on all four edges.
            let inside =
                p.x >= coords.x1 && p.x <= coords.x2 && p.y >= coords.y1 && p.y <= coords.y2;
            inside.then_some(HitRegion::Inside)
        }
        Element::Line { coords, .. } => {
            if near_point(p, coords.p1(), HANDLE_TOLERANCE) {
                return Some(HitRegion::Handle(Handle::Start));
            }
            if near_point(p, coords.p2(), HANDLE_TOLERANCE) {
                return Some(HitRegion::Handle(Handle::End));
            }
            let close = perpendicular_distance(coords.p1(), coords.p2(), p) < LINE_TOLERANCE;
            close.then_some(HitRegion::Inside)
        }
        Element::Circle { coords, .. } => {
            let center = coords.center();
            let radius = distance(coords.p1(), center);
            // Deliberately half the nominal radius, so a grab near the
            // sketchy edge does not pick the circle up.
            let inside = distance(p, center) < radius / 2.0;
            inside.then_some(HitRegion::Inside)
        }
        Element::Freehand { points, .. } => {
            let near = points
                .windows(2)
                .any(|pair| on_segment(pair[0], pair[1], p, STROKE_TOLERANCE));
            near.then_some(HitRegion::Inside)
        }
        Element::Text { coords, .. } => {
            let inside =
                p.x >= coords.x1 && p.x <= coords.x2 && p.y >= coords.y1 && p.y <= coords.y2;
            inside.then_some(HitRegion::Inside)
        }
    }
}
