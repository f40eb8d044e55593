//! Viewport pan/zoom state and the screen/world transform.
//!
//! Deliberately outside the history store: panning and zooming are not
//! undoable actions.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 20.0;

/// Pan offset and zoom scale between world and screen coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan translation in screen units.
    pub offset: Vec2,
    /// Zoom scale, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-screen transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen-to-world transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a pointer position to world coordinates. Every hit test
    /// and element edit goes through this first.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.inverse_transform() * screen
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform() * world
    }

    /// Pan by a delta in screen units.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Scale the zoom by `factor`, keeping `screen` fixed in place.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_world(screen);
        self.zoom = new_zoom;

        let moved = self.world_to_screen(anchor);
        self.offset += Vec2::new(screen.x - moved.x, screen.y - moved.y);
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_default() {
        let viewport = Viewport::new();
        let p = Point::new(100.0, 200.0);
        assert_eq!(viewport.screen_to_world(p), p);
    }

    #[test]
    fn test_screen_to_world_inverts_pan_and_zoom() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(50.0, 100.0);
        viewport.zoom = 2.0;

        let world = viewport.screen_to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < 1e-12);
        assert!((world.y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = viewport.world_to_screen(viewport.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut viewport = Viewport::new();
        viewport.zoom_at(Point::ZERO, 1e-6);
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        viewport.zoom = 1.0;
        viewport.zoom_at(Point::ZERO, 1e6);
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(10.0, 10.0);

        let anchor_screen = Point::new(400.0, 300.0);
        let anchor_world = viewport.screen_to_world(anchor_screen);

        viewport.zoom_at(anchor_screen, 2.0);

        let after = viewport.world_to_screen(anchor_world);
        assert!((after.x - anchor_screen.x).abs() < 1e-9);
        assert!((after.y - anchor_screen.y).abs() < 1e-9);
    }
}
