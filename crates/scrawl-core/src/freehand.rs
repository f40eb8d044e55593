//! Freehand stroke outline handling.
//!
//! The outline itself comes from an external, pressure-aware stroke
//! engine; this module only defines that seam and turns the returned
//! polygon into a smooth, fillable path.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Parameters forwarded to the stroke engine.
///
/// These shape the fill outline only; hit testing and history never
/// look at them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeOptions {
    /// Base stroke diameter in world units.
    pub size: f64,
    /// How much pressure thins the stroke (0..1).
    pub thinning: f64,
    /// Outline softening (0..1).
    pub smoothing: f64,
    /// Input-point interpolation (0..1).
    pub streamline: f64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 8.0,
            thinning: 0.5,
            smoothing: 0.5,
            streamline: 0.5,
        }
    }
}

/// External engine converting raw input samples into a closed polygon
/// outline around the stroke.
pub trait StrokeEngine {
    fn stroke_outline(&self, points: &[Point], options: &StrokeOptions) -> Vec<Point>;
}

/// Build a smooth closed fill path from a stroke outline.
///
/// The outline is treated as a loop: each point becomes the control of
/// a quadratic segment ending at the midpoint towards its successor,
/// wrapping from the last point back to the first. An empty outline
/// yields an empty path rather than an error.
pub fn build_fill_path(outline: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = outline.first() else {
        return path;
    };

    path.move_to(first);
    for (i, &p) in outline.iter().enumerate() {
        let next = outline[(i + 1) % outline.len()];
        path.quad_to(p, p.midpoint(next));
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_empty_outline_is_empty_path() {
        let path = build_fill_path(&[]);
        assert_eq!(path.elements().len(), 0);
    }

    #[test]
    fn test_single_point_starts_and_ends_at_point() {
        let p = Point::new(7.0, 9.0);
        let path = build_fill_path(&[p]);

        let els = path.elements();
        assert_eq!(els[0], PathEl::MoveTo(p));
        assert_eq!(els[1], PathEl::QuadTo(p, p));
        assert_eq!(*els.last().unwrap(), PathEl::ClosePath);
    }

    #[test]
    fn test_loop_wraps_to_first_point() {
        let outline = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let path = build_fill_path(&outline);
        let els = path.elements();

        // MoveTo + one quadratic per outline point + ClosePath.
        assert_eq!(els.len(), outline.len() + 2);

        // Last quadratic heads back towards the start of the loop.
        let expected_mid = outline[2].midpoint(outline[0]);
        assert_eq!(els[3], PathEl::QuadTo(outline[2], expected_mid));
    }

    #[test]
    fn test_quadratics_pass_through_midpoints() {
        let outline = vec![Point::new(0.0, 0.0), Point::new(8.0, 4.0)];
        let path = build_fill_path(&outline);
        let els = path.elements();

        assert_eq!(
            els[1],
            PathEl::QuadTo(outline[0], outline[0].midpoint(outline[1]))
        );
        assert_eq!(
            els[2],
            PathEl::QuadTo(outline[1], outline[1].midpoint(outline[0]))
        );
    }
}
