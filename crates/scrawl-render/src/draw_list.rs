//! Headless renderer that records a frame as a command list.
//!
//! Useful for tests and for embedders that translate the commands to
//! their own drawing API. Commands are in paint order.

use kurbo::{Affine, BezPath, Circle, Point, Shape};
use scrawl_core::freehand::{build_fill_path, StrokeEngine, StrokeOptions};
use scrawl_core::{Element, RenderDescriptor};

use crate::renderer::{Frame, RenderResult, Renderer};

/// One drawing command, in world coordinates; [`DrawListRenderer::transform`]
/// maps them to the screen.
#[derive(Debug)]
pub enum DrawCmd {
    /// Blit the frame's raster background layer at the origin.
    Background { width: u32, height: u32 },
    /// Draw an opaque sketch descriptor produced by the embedder's
    /// sketch generator.
    Sketch(RenderDescriptor),
    /// Stroke a plain path (fallback for elements whose descriptor is
    /// missing, e.g. freshly deserialized ones).
    Stroke(BezPath),
    /// Fill a closed path (freehand ink).
    Fill(BezPath),
    /// Lay out a single line of text from its top-left corner.
    Text { origin: Point, content: String },
}

/// Records each frame as a [`DrawCmd`] list.
pub struct DrawListRenderer {
    stroke: Box<dyn StrokeEngine + Send + Sync>,
    options: StrokeOptions,
    transform: Affine,
    commands: Vec<DrawCmd>,
}

impl DrawListRenderer {
    pub fn new(stroke: Box<dyn StrokeEngine + Send + Sync>) -> Self {
        Self {
            stroke,
            options: StrokeOptions::default(),
            transform: Affine::IDENTITY,
            commands: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: StrokeOptions) -> Self {
        self.options = options;
        self
    }

    /// Commands recorded by the last [`Renderer::render`] call.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// World-to-screen transform of the last frame.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    fn record(&mut self, element: &Element) {
        match element {
            Element::Line { coords, .. } if element.descriptor().is_none() => {
                log::debug!("element {} has no descriptor, stroking plain line", element.id());
                let mut path = BezPath::new();
                path.move_to(coords.p1());
                path.line_to(coords.p2());
                self.commands.push(DrawCmd::Stroke(path));
            }
            Element::Rectangle { coords, .. } if element.descriptor().is_none() => {
                log::debug!("element {} has no descriptor, stroking plain outline", element.id());
                let mut path = BezPath::new();
                path.move_to(Point::new(coords.x1, coords.y1));
                path.line_to(Point::new(coords.x2, coords.y1));
                path.line_to(Point::new(coords.x2, coords.y2));
                path.line_to(Point::new(coords.x1, coords.y2));
                path.close_path();
                self.commands.push(DrawCmd::Stroke(path));
            }
            Element::Circle { coords, .. } if element.descriptor().is_none() => {
                log::debug!("element {} has no descriptor, stroking plain circle", element.id());
                let center = coords.center();
                let circle = Circle::new(center, coords.p1().distance(center));
                self.commands.push(DrawCmd::Stroke(circle.to_path(0.1)));
            }
            Element::Line { .. } | Element::Rectangle { .. } | Element::Circle { .. } => {
                if let Some(descriptor) = element.descriptor() {
                    self.commands.push(DrawCmd::Sketch(descriptor.clone()));
                }
            }
            Element::Freehand { points, .. } => {
                let outline = self.stroke.stroke_outline(points, &self.options);
                self.commands.push(DrawCmd::Fill(build_fill_path(&outline)));
            }
            Element::Text { coords, text, .. } => {
                self.commands.push(DrawCmd::Text {
                    origin: coords.p1(),
                    content: text.clone(),
                });
            }
        }
    }
}

impl Renderer for DrawListRenderer {
    fn render(&mut self, frame: &Frame) -> RenderResult<()> {
        self.commands.clear();
        self.transform = frame.viewport.transform();

        if let Some(background) = frame.background {
            self.commands.push(DrawCmd::Background {
                width: background.width(),
                height: background.height(),
            });
        }

        for element in frame.elements {
            if frame.skip == Some(element.id()) {
                continue;
            }
            self.record(element);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{PlainSketcher, RibbonStroke};
    use kurbo::{Size, Vec2};
    use scrawl_core::{Coords, ElementKind, Viewport};

    fn frame_size() -> Size {
        Size::new(800.0, 600.0)
    }

    fn sketched_rect(id: usize, coords: Coords) -> Element {
        Element::sketched(id, ElementKind::Rectangle, coords, &PlainSketcher).unwrap()
    }

    #[test]
    fn test_records_one_command_per_element() {
        let elements = vec![
            sketched_rect(0, Coords::new(0.0, 0.0, 10.0, 10.0)),
            Element::stroke_at(1, Point::new(5.0, 5.0)),
            Element::text_at(2, Point::new(20.0, 20.0)),
        ];
        let viewport = Viewport::new();
        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));

        renderer
            .render(&Frame::new(&elements, &viewport, frame_size()))
            .unwrap();

        let commands = renderer.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCmd::Sketch(_)));
        assert!(matches!(commands[1], DrawCmd::Fill(_)));
        assert!(matches!(commands[2], DrawCmd::Text { .. }));
    }

    #[test]
    fn test_skips_the_writing_element() {
        let elements = vec![
            Element::text_at(0, Point::ZERO),
            sketched_rect(1, Coords::new(0.0, 0.0, 5.0, 5.0)),
        ];
        let viewport = Viewport::new();
        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));

        renderer
            .render(&Frame::new(&elements, &viewport, frame_size()).with_skip(Some(0)))
            .unwrap();

        assert_eq!(renderer.commands().len(), 1);
        assert!(matches!(renderer.commands()[0], DrawCmd::Sketch(_)));
    }

    #[test]
    fn test_background_is_painted_first() {
        let background = image::RgbaImage::new(64, 48);
        let elements = vec![sketched_rect(0, Coords::new(0.0, 0.0, 5.0, 5.0))];
        let viewport = Viewport::new();
        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));

        renderer
            .render(
                &Frame::new(&elements, &viewport, frame_size()).with_background(&background),
            )
            .unwrap();

        assert!(matches!(
            renderer.commands()[0],
            DrawCmd::Background {
                width: 64,
                height: 48
            }
        ));
        assert_eq!(renderer.commands().len(), 2);
    }

    #[test]
    fn test_missing_descriptor_falls_back_to_plain_stroke() {
        // Deserialized elements arrive without their runtime-only
        // descriptors; each still produces a command.
        let originals = vec![
            sketched_rect(0, Coords::new(0.0, 0.0, 8.0, 8.0)),
            Element::sketched(
                1,
                ElementKind::Line,
                Coords::new(0.0, 0.0, 8.0, 8.0),
                &PlainSketcher,
            )
            .unwrap(),
        ];
        let json = serde_json::to_string(&originals).unwrap();
        let restored: Vec<Element> = serde_json::from_str(&json).unwrap();
        assert!(restored.iter().all(|el| el.descriptor().is_none()));

        let viewport = Viewport::new();
        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));
        renderer
            .render(&Frame::new(&restored, &viewport, frame_size()))
            .unwrap();

        assert_eq!(renderer.commands().len(), 2);
        assert!(renderer
            .commands()
            .iter()
            .all(|cmd| matches!(cmd, DrawCmd::Stroke(_))));
    }

    #[test]
    fn test_transform_follows_the_viewport() {
        let mut viewport = Viewport::new();
        viewport.offset = Vec2::new(100.0, 50.0);
        viewport.zoom = 2.0;

        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));
        renderer
            .render(&Frame::new(&[], &viewport, frame_size()))
            .unwrap();

        assert_eq!(renderer.transform(), viewport.transform());
    }
}
