//! Distance and containment primitives shared by the hit tester.

use kurbo::Point;

/// Default pick radius for corner/endpoint handles, in world units.
pub const HANDLE_TOLERANCE: f64 = 5.0;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// True if `p` is within `tolerance` of `target` on both axes.
///
/// This is a square pick region, not a circular one; a cursor sitting
/// exactly `tolerance` away on either axis counts as outside.
pub fn near_point(p: Point, target: Point, tolerance: f64) -> bool {
    (p.x - target.x).abs() < tolerance && (p.y - target.y).abs() < tolerance
}

/// True if `p` lies within `tolerance` of the segment `a`..`b`.
///
/// Degenerate-triangle test: the sum of the distances from `p` to the
/// endpoints approaches the segment length as `p` approaches the
/// segment itself.
pub fn on_segment(a: Point, b: Point, p: Point, tolerance: f64) -> bool {
    let detour = distance(a, p) + distance(b, p) - distance(a, b);
    detour.abs() < tolerance
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// A zero-length line degenerates to the plain point distance.
pub fn perpendicular_distance(a: Point, b: Point, p: Point) -> f64 {
    let len = distance(a, b);
    if len < f64::EPSILON {
        return distance(a, p);
    }
    ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let d = distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_near_point_square_region() {
        let target = Point::new(10.0, 10.0);
        assert!(near_point(Point::new(12.0, 8.0), target, 5.0));
        // Exactly at the tolerance counts as outside (strict comparison).
        assert!(!near_point(Point::new(15.0, 10.0), target, 5.0));
        assert!(!near_point(Point::new(10.0, 16.0), target, 5.0));
    }

    #[test]
    fn test_on_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!(on_segment(a, b, Point::new(5.0, 0.0), 1.0));
        assert!(on_segment(a, b, Point::new(5.0, 0.4), 1.0));
        assert!(!on_segment(a, b, Point::new(5.0, 8.0), 1.0));
    }

    #[test]
    fn test_perpendicular_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let d = perpendicular_distance(a, b, Point::new(5.0, 3.0));
        assert!((d - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_perpendicular_distance_degenerate_line() {
        let a = Point::new(2.0, 2.0);
        let d = perpendicular_distance(a, a, Point::new(5.0, 6.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }
}
