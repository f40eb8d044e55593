//! Reference implementations of the engine's external seams.
//!
//! These are the clean, dependency-light collaborators: plain bezier
//! sketches, a constant-width stroke outline, and fixed-advance text
//! metrics. A production embedder swaps in a rough-sketch generator, a
//! pressure-aware stroke engine, and real font shaping.

use kurbo::{BezPath, Circle, Point, Rect, Shape, Size, Vec2};
use scrawl_core::freehand::{StrokeEngine, StrokeOptions};
use scrawl_core::{RenderDescriptor, SketchGenerator, TextMeasurer};

/// Curve flattening tolerance for the circle outline.
const PATH_TOLERANCE: f64 = 0.1;

/// Sketch generator producing plain [`BezPath`] descriptors.
#[derive(Debug, Default)]
pub struct PlainSketcher;

impl SketchGenerator for PlainSketcher {
    fn line(&self, start: Point, end: Point) -> RenderDescriptor {
        let mut path = BezPath::new();
        path.move_to(start);
        path.line_to(end);
        RenderDescriptor::new(path)
    }

    fn rectangle(&self, rect: Rect) -> RenderDescriptor {
        // Corners are walked in stored order; mid-drag rects with
        // negative extent trace the same outline mirrored.
        let mut path = BezPath::new();
        path.move_to(Point::new(rect.x0, rect.y0));
        path.line_to(Point::new(rect.x1, rect.y0));
        path.line_to(Point::new(rect.x1, rect.y1));
        path.line_to(Point::new(rect.x0, rect.y1));
        path.close_path();
        RenderDescriptor::new(path)
    }

    fn circle(&self, center: Point, radius: f64) -> RenderDescriptor {
        RenderDescriptor::new(Circle::new(center, radius).to_path(PATH_TOLERANCE))
    }
}

/// Constant-width stroke engine.
///
/// Offsets each input point by half the stroke size along the local
/// normal and walks back down the other side, yielding a closed
/// ribbon. Pressure-related options are ignored here.
#[derive(Debug, Default)]
pub struct RibbonStroke;

impl StrokeEngine for RibbonStroke {
    fn stroke_outline(&self, points: &[Point], options: &StrokeOptions) -> Vec<Point> {
        let half = options.size / 2.0;
        match points {
            [] => Vec::new(),
            // A dot: diamond of the stroke width around it.
            [p] => vec![
                Point::new(p.x - half, p.y),
                Point::new(p.x, p.y - half),
                Point::new(p.x + half, p.y),
                Point::new(p.x, p.y + half),
            ],
            _ => {
                let mut left = Vec::with_capacity(points.len());
                let mut right = Vec::with_capacity(points.len());
                for (i, &p) in points.iter().enumerate() {
                    let dir = if i + 1 < points.len() {
                        points[i + 1] - p
                    } else {
                        p - points[i - 1]
                    };
                    let len = dir.hypot();
                    let normal = if len > f64::EPSILON {
                        Vec2::new(-dir.y / len, dir.x / len)
                    } else {
                        Vec2::new(0.0, 1.0)
                    };
                    left.push(p + normal * half);
                    right.push(p - normal * half);
                }
                right.reverse();
                left.extend(right);
                left
            }
        }
    }
}

/// Fixed-advance text metrics, one line at a fixed height.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    /// Horizontal advance per character.
    pub advance: f64,
    /// Line height.
    pub line_height: f64,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 14.0,
            line_height: 24.0,
        }
    }
}

impl TextMeasurer for FixedMetrics {
    fn measure(&self, text: &str) -> Size {
        Size::new(self.advance * text.chars().count() as f64, self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sketcher_wraps_bez_paths() {
        let descriptor = PlainSketcher.line(Point::ZERO, Point::new(10.0, 0.0));
        let path = descriptor.downcast_ref::<BezPath>().unwrap();
        assert_eq!(path.elements().len(), 2);
    }

    #[test]
    fn test_ribbon_outline_is_closed_loop_of_double_length() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ];
        let outline = RibbonStroke.stroke_outline(&points, &StrokeOptions::default());
        assert_eq!(outline.len(), 2 * points.len());

        // A horizontal polyline offsets straight up and down.
        let half = StrokeOptions::default().size / 2.0;
        assert_eq!(outline[0], Point::new(0.0, half));
        assert_eq!(*outline.last().unwrap(), Point::new(0.0, -half));
    }

    #[test]
    fn test_single_point_becomes_diamond() {
        let outline =
            RibbonStroke.stroke_outline(&[Point::new(5.0, 5.0)], &StrokeOptions::default());
        assert_eq!(outline.len(), 4);
    }

    #[test]
    fn test_empty_stroke_has_no_outline() {
        let outline = RibbonStroke.stroke_outline(&[], &StrokeOptions::default());
        assert!(outline.is_empty());
    }

    #[test]
    fn test_fixed_metrics_scale_with_character_count() {
        let metrics = FixedMetrics::default();
        let size = metrics.measure("abcd");
        assert!((size.width - 4.0 * metrics.advance).abs() < f64::EPSILON);
        assert!((size.height - metrics.line_height).abs() < f64::EPSILON);
    }
}
