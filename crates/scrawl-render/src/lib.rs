//! Rendering layer for the scrawl drawing surface.
//!
//! Defines the backend-agnostic [`Renderer`] seam, a headless
//! [`DrawListRenderer`] that records frames as inspectable command
//! lists, and reference implementations of the engine's external
//! collaborators (sketch generation, stroke outlining, text metrics).

mod draw_list;
mod renderer;
mod services;

pub use draw_list::{DrawCmd, DrawListRenderer};
pub use renderer::{Frame, RenderError, RenderResult, Renderer};
pub use services::{FixedMetrics, PlainSketcher, RibbonStroke};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use scrawl_core::{Coords, Editor, EditorEvent, MouseButton, Services, Tool};

    fn pointer_down(editor: &mut Editor, services: &Services, position: Point) {
        editor.apply(
            EditorEvent::PointerDown {
                position,
                button: MouseButton::Left,
            },
            services,
        );
    }

    /// Full session against the real collaborators: draw a rectangle,
    /// move it, resize it, render every step, then undo back to the
    /// start.
    #[test]
    fn test_editor_session_end_to_end() {
        let sketcher = PlainSketcher;
        let metrics = FixedMetrics::default();
        let services = Services {
            sketch: &sketcher,
            text: &metrics,
        };
        let mut editor = Editor::new();
        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));
        let surface = Size::new(800.0, 600.0);

        // Draw a rectangle from (10,10) to (60,40).
        editor.apply(EditorEvent::ToolSelected(Tool::Rectangle), &services);
        pointer_down(&mut editor, &services, Point::new(10.0, 10.0));
        editor.apply(
            EditorEvent::PointerMove {
                position: Point::new(60.0, 40.0),
            },
            &services,
        );
        editor.apply(
            EditorEvent::PointerUp {
                position: Point::new(60.0, 40.0),
            },
            &services,
        );

        renderer
            .render(&Frame::new(
                editor.elements(),
                &editor.viewport,
                surface,
            ))
            .unwrap();
        assert_eq!(renderer.commands().len(), 1);
        assert!(matches!(renderer.commands()[0], DrawCmd::Sketch(_)));

        // Drag it 20 right, 10 down.
        editor.apply(EditorEvent::ToolSelected(Tool::Move), &services);
        pointer_down(&mut editor, &services, Point::new(30.0, 20.0));
        editor.apply(
            EditorEvent::PointerMove {
                position: Point::new(50.0, 30.0),
            },
            &services,
        );
        editor.apply(
            EditorEvent::PointerUp {
                position: Point::new(50.0, 30.0),
            },
            &services,
        );
        assert_eq!(
            editor.elements()[0].coords().unwrap(),
            Coords::new(30.0, 20.0, 80.0, 50.0)
        );

        // Pull the bottom-right handle out to (100,90).
        pointer_down(&mut editor, &services, Point::new(80.0, 50.0));
        editor.apply(
            EditorEvent::PointerMove {
                position: Point::new(100.0, 90.0),
            },
            &services,
        );
        editor.apply(
            EditorEvent::PointerUp {
                position: Point::new(100.0, 90.0),
            },
            &services,
        );
        assert_eq!(
            editor.elements()[0].coords().unwrap(),
            Coords::new(30.0, 20.0, 100.0, 90.0)
        );

        renderer
            .render(&Frame::new(
                editor.elements(),
                &editor.viewport,
                surface,
            ))
            .unwrap();
        assert_eq!(renderer.commands().len(), 1);

        // Each gesture was one history entry.
        editor.undo();
        assert_eq!(
            editor.elements()[0].coords().unwrap(),
            Coords::new(30.0, 20.0, 80.0, 50.0)
        );
        editor.undo();
        assert_eq!(
            editor.elements()[0].coords().unwrap(),
            Coords::new(10.0, 10.0, 60.0, 40.0)
        );
        editor.undo();
        assert!(editor.elements().is_empty());

        renderer
            .render(&Frame::new(
                editor.elements(),
                &editor.viewport,
                surface,
            ))
            .unwrap();
        assert!(renderer.commands().is_empty());
    }

    /// The element under edit stays out of the frame until its text is
    /// committed.
    #[test]
    fn test_writing_element_skipped_until_committed() {
        let sketcher = PlainSketcher;
        let metrics = FixedMetrics::default();
        let services = Services {
            sketch: &sketcher,
            text: &metrics,
        };
        let mut editor = Editor::new();
        let mut renderer = DrawListRenderer::new(Box::new(RibbonStroke));
        let surface = Size::new(800.0, 600.0);

        editor.apply(EditorEvent::ToolSelected(Tool::Text), &services);
        pointer_down(&mut editor, &services, Point::new(40.0, 40.0));
        editor.apply(
            EditorEvent::PointerUp {
                position: Point::new(40.0, 40.0),
            },
            &services,
        );

        renderer
            .render(
                &Frame::new(editor.elements(), &editor.viewport, surface)
                    .with_skip(editor.writing_element()),
            )
            .unwrap();
        assert!(renderer.commands().is_empty());

        editor.apply(EditorEvent::TextCommitted("note".to_string()), &services);
        renderer
            .render(
                &Frame::new(editor.elements(), &editor.viewport, surface)
                    .with_skip(editor.writing_element()),
            )
            .unwrap();
        assert!(
            matches!(&renderer.commands()[0], DrawCmd::Text { content, .. } if content == "note")
        );
    }
}
