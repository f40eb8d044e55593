//! Element definitions for the drawing surface.

use crate::error::CoreError;
use crate::geometry::distance;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identifier of an element: its index in the element collection.
///
/// Elements are never reordered, only replaced in place, so the index
/// doubles as a stable identity for the lifetime of a snapshot chain.
pub type ElementId = usize;

/// Corner pair shared by the box-like variants.
///
/// `(x1, y1)` and `(x2, y2)` are opposite corners for rectangles, the
/// bounding box for circles, and the endpoints for lines. The pair is
/// not required to be sorted while a drag is in progress; see
/// [`crate::resize::canonicalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Coords {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Corner pair from two points.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self::new(p1.x, p1.y, p2.x, p2.y)
    }

    /// Zero-size pair with both corners at `p` (a freshly started drag).
    pub fn at(p: Point) -> Self {
        Self::from_points(p, p)
    }

    /// The stored-first corner.
    pub fn p1(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The stored-second corner.
    pub fn p2(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// As a kurbo rect; the corners keep their stored order.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2, self.y2)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Both corners shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(
            self.x1 + delta.x,
            self.y1 + delta.y,
            self.x2 + delta.x,
            self.y2 + delta.y,
        )
    }
}

/// Opaque drawable produced by the external sketch generator.
///
/// The core caches and re-attaches these values but never looks
/// inside; only the renderer that produced a descriptor knows its
/// concrete type. Cloning is cheap so history snapshots can share it.
#[derive(Clone)]
pub struct RenderDescriptor(Arc<dyn Any + Send + Sync>);

impl RenderDescriptor {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Recover the concrete drawable, for the backend that made it.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for RenderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderDescriptor(..)")
    }
}

/// External generator that turns geometry into render descriptors
/// (e.g. a rough-stroke drawable).
pub trait SketchGenerator {
    fn line(&self, start: Point, end: Point) -> RenderDescriptor;

    /// `rect` keeps the stored corner order and may have negative extent
    /// mid-drag.
    fn rectangle(&self, rect: Rect) -> RenderDescriptor;

    fn circle(&self, center: Point, radius: f64) -> RenderDescriptor;
}

/// External text metrics used to derive a text element's bounding box.
///
/// Implementations measure a single line at the editor's font; the
/// returned height is the fixed line height.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> Size;
}

/// Discriminant of the element variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Line,
    Rectangle,
    Circle,
    Freehand,
    Text,
}

impl ElementKind {
    /// Variants whose geometry is a corner pair.
    pub fn has_coords(&self) -> bool {
        !matches!(self, ElementKind::Freehand)
    }

    /// Variants rendered through a cached sketch descriptor.
    pub fn is_sketched(&self) -> bool {
        matches!(
            self,
            ElementKind::Line | ElementKind::Rectangle | ElementKind::Circle
        )
    }
}

/// One placed object on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Line {
        id: ElementId,
        coords: Coords,
        #[serde(skip)]
        descriptor: Option<RenderDescriptor>,
    },
    Rectangle {
        id: ElementId,
        coords: Coords,
        #[serde(skip)]
        descriptor: Option<RenderDescriptor>,
    },
    Circle {
        id: ElementId,
        coords: Coords,
        #[serde(skip)]
        descriptor: Option<RenderDescriptor>,
    },
    Freehand {
        id: ElementId,
        points: Vec<Point>,
    },
    Text {
        id: ElementId,
        coords: Coords,
        text: String,
    },
}

impl Element {
    /// Build a sketched box variant with its descriptor attached.
    ///
    /// Returns [`CoreError::NotSketchable`] for kinds that are not
    /// backed by a descriptor; the tool layer never requests those.
    pub fn sketched(
        id: ElementId,
        kind: ElementKind,
        coords: Coords,
        sketch: &dyn SketchGenerator,
    ) -> Result<Self, CoreError> {
        let mut element = match kind {
            ElementKind::Line => Element::Line {
                id,
                coords,
                descriptor: None,
            },
            ElementKind::Rectangle => Element::Rectangle {
                id,
                coords,
                descriptor: None,
            },
            ElementKind::Circle => Element::Circle {
                id,
                coords,
                descriptor: None,
            },
            ElementKind::Freehand | ElementKind::Text => {
                return Err(CoreError::NotSketchable { kind });
            }
        };
        element.refresh_descriptor(sketch);
        Ok(element)
    }

    /// Start a freehand stroke at `p`.
    pub fn stroke_at(id: ElementId, p: Point) -> Self {
        Element::Freehand {
            id,
            points: vec![p],
        }
    }

    /// Start an empty text element anchored at `p`.
    pub fn text_at(id: ElementId, p: Point) -> Self {
        Element::Text {
            id,
            coords: Coords::at(p),
            text: String::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            Element::Line { id, .. }
            | Element::Rectangle { id, .. }
            | Element::Circle { id, .. }
            | Element::Freehand { id, .. }
            | Element::Text { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Line { .. } => ElementKind::Line,
            Element::Rectangle { .. } => ElementKind::Rectangle,
            Element::Circle { .. } => ElementKind::Circle,
            Element::Freehand { .. } => ElementKind::Freehand,
            Element::Text { .. } => ElementKind::Text,
        }
    }

    /// The corner pair, for variants that have one.
    pub fn coords(&self) -> Option<Coords> {
        match self {
            Element::Line { coords, .. }
            | Element::Rectangle { coords, .. }
            | Element::Circle { coords, .. }
            | Element::Text { coords, .. } => Some(*coords),
            Element::Freehand { .. } => None,
        }
    }

    /// Replace the corner pair.
    pub fn set_coords(&mut self, new: Coords) -> Result<(), CoreError> {
        match self {
            Element::Line { coords, .. }
            | Element::Rectangle { coords, .. }
            | Element::Circle { coords, .. }
            | Element::Text { coords, .. } => {
                *coords = new;
                Ok(())
            }
            Element::Freehand { .. } => Err(CoreError::NoCoords {
                kind: ElementKind::Freehand,
            }),
        }
    }

    /// The cached sketch descriptor, if this variant carries one.
    pub fn descriptor(&self) -> Option<&RenderDescriptor> {
        match self {
            Element::Line { descriptor, .. }
            | Element::Rectangle { descriptor, .. }
            | Element::Circle { descriptor, .. } => descriptor.as_ref(),
            Element::Freehand { .. } | Element::Text { .. } => None,
        }
    }

    /// Regenerate the cached descriptor from the current geometry.
    /// No-op for variants that are not sketched.
    pub fn refresh_descriptor(&mut self, sketch: &dyn SketchGenerator) {
        match self {
            Element::Line {
                coords, descriptor, ..
            } => {
                *descriptor = Some(sketch.line(coords.p1(), coords.p2()));
            }
            Element::Rectangle {
                coords, descriptor, ..
            } => {
                *descriptor = Some(sketch.rectangle(coords.rect()));
            }
            Element::Circle {
                coords, descriptor, ..
            } => {
                let center = coords.center();
                let radius = distance(coords.p1(), center);
                *descriptor = Some(sketch.circle(center, radius));
            }
            Element::Freehand { .. } | Element::Text { .. } => {}
        }
    }

    /// Replace the text content and rederive the bounding box from the
    /// measured metrics. The anchor corner stays put.
    pub fn set_text(
        &mut self,
        content: String,
        measurer: &dyn TextMeasurer,
    ) -> Result<(), CoreError> {
        match self {
            Element::Text { coords, text, .. } => {
                let size = measurer.measure(&content);
                coords.x2 = coords.x1 + size.width;
                coords.y2 = coords.y1 + size.height;
                *text = content;
                Ok(())
            }
            other => Err(CoreError::NoCoords { kind: other.kind() }),
        }
    }
}
