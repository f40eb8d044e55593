//! The pointer-driven interaction state machine.
//!
//! The editor is a pure-data reducer: the embedder owns the event loop
//! and feeds [`EditorEvent`]s into [`Editor::apply`] together with the
//! external collaborators. No handler suspends; each event runs to
//! completion before the next is dispatched.

use crate::element::{Coords, Element, ElementId, ElementKind, SketchGenerator, TextMeasurer};
use crate::error::CoreError;
use crate::hit::{cursor_for, hit_test, CursorGlyph, Handle, HitRegion};
use crate::history::History;
use crate::input::{shortcut_for, HistoryAction, InputState, Modifiers, MouseButton};
use crate::resize::{canonicalize, resized_coords};
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Tool selection, supplied by the external toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Line,
    Rectangle,
    Circle,
    Pencil,
    Text,
    Move,
}

impl Tool {
    /// The sketched element kind this tool draws, if any.
    fn sketched_kind(&self) -> Option<ElementKind> {
        match self {
            Tool::Line => Some(ElementKind::Line),
            Tool::Rectangle => Some(ElementKind::Rectangle),
            Tool::Circle => Some(ElementKind::Circle),
            Tool::Pencil | Tool::Text | Tool::Move => None,
        }
    }
}

/// External collaborators the reducer needs while handling an event.
/// Passed by reference on every call; the editor never stores them.
pub struct Services<'a> {
    pub sketch: &'a dyn SketchGenerator,
    pub text: &'a dyn TextMeasurer,
}

/// What the pointer grabbed when a move gesture started.
#[derive(Debug, Clone)]
pub enum Grab {
    /// Cursor offset from the anchor corner of a box-like element.
    Corner(Vec2),
    /// Cursor offset from every point of a freehand stroke.
    Points(Vec<Vec2>),
}

/// Current gesture. Exactly one interaction is active at a time.
#[derive(Debug, Clone, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Drawing {
        id: ElementId,
    },
    Moving {
        id: ElementId,
        grab: Grab,
    },
    Resizing {
        id: ElementId,
        handle: Handle,
    },
    Panning {
        /// Screen position where the pan started; motion is measured
        /// from here, not frame to frame.
        anchor: Point,
        start_offset: Vec2,
    },
    Writing {
        id: ElementId,
    },
}

/// Input to the reducer.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    PointerDown { position: Point, button: MouseButton },
    PointerMove { position: Point },
    PointerUp { position: Point },
    Zoom { center: Point, factor: f64 },
    KeyDown { key: String, modifiers: Modifiers },
    KeyUp { key: String },
    ToolSelected(Tool),
    /// The external text widget lost focus with this content.
    TextCommitted(String),
    Undo,
    Redo,
}

/// The interaction and geometry engine behind the drawing surface.
#[derive(Debug, Default)]
pub struct Editor {
    history: History,
    pub viewport: Viewport,
    input: InputState,
    tool: Tool,
    interaction: Interaction,
    /// Screen position of the active gesture's pointer-down, used to
    /// tell a click from a drag.
    down_position: Option<Point>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce one event. All pointer positions are screen coordinates;
    /// they are converted to world coordinates here, behind the
    /// viewport transform, before anything touches them.
    pub fn apply(&mut self, event: EditorEvent, services: &Services) {
        match event {
            EditorEvent::PointerDown { position, button } => {
                self.pointer_down(position, button, services);
            }
            EditorEvent::PointerMove { position } => self.pointer_move(position, services),
            EditorEvent::PointerUp { position } => self.pointer_up(position, services),
            EditorEvent::Zoom { center, factor } => self.viewport.zoom_at(center, factor),
            EditorEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
            EditorEvent::KeyUp { key } => self.input.key_up(&key),
            EditorEvent::ToolSelected(tool) => self.set_tool(tool),
            EditorEvent::TextCommitted(content) => self.finish_writing(content, services),
            EditorEvent::Undo => self.undo(),
            EditorEvent::Redo => self.redo(),
        }
    }

    /// The committed element collection the renderer should draw.
    pub fn elements(&self) -> &[Element] {
        self.history.current()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The element whose text is being edited, if any. The renderer
    /// must skip it; the external overlay shows its live content.
    pub fn writing_element(&self) -> Option<ElementId> {
        match self.interaction {
            Interaction::Writing { id } => Some(id),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Cursor glyph for a hover position. Read-only; meaningful only
    /// while the move tool is idle over the canvas.
    pub fn cursor_hint(&self, position: Point) -> CursorGlyph {
        if self.tool != Tool::Move || !matches!(self.interaction, Interaction::Idle) {
            return CursorGlyph::Default;
        }
        let world = self.viewport.screen_to_world(position);
        cursor_for(hit_test(world, self.history.current()).map(|hit| hit.region))
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton, services: &Services) {
        // A gesture is already running (or a text edit is waiting for
        // its blur); pointer-down cannot interleave with it.
        if !matches!(self.interaction, Interaction::Idle) {
            return;
        }

        if button == MouseButton::Middle || self.input.pan_active() {
            self.interaction = Interaction::Panning {
                anchor: position,
                start_offset: self.viewport.offset,
            };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        self.down_position = Some(position);
        let world = self.viewport.screen_to_world(position);

        match self.tool {
            Tool::Move => self.begin_manipulation(world),
            Tool::Text => {
                let id = self.append_element(Element::text_at(self.next_id(), world));
                self.interaction = Interaction::Writing { id };
            }
            Tool::Pencil => {
                let id = self.append_element(Element::stroke_at(self.next_id(), world));
                self.interaction = Interaction::Drawing { id };
            }
            Tool::Line | Tool::Rectangle | Tool::Circle => {
                // sketched_kind is total for these tools
                let Some(kind) = self.tool.sketched_kind() else {
                    return;
                };
                match Element::sketched(self.next_id(), kind, Coords::at(world), services.sketch) {
                    Ok(element) => {
                        let id = self.append_element(element);
                        self.interaction = Interaction::Drawing { id };
                    }
                    Err(err) => log::warn!("could not start {kind:?} element: {err}"),
                }
            }
        }
    }

    /// Hit-test under the move tool and open a move or resize gesture.
    ///
    /// A fresh history entry is committed up front; every subsequent
    /// frame of the drag coalesces into it, so the pre-gesture state
    /// stays one `undo` away.
    fn begin_manipulation(&mut self, world: Point) {
        let Some(hit) = hit_test(world, self.history.current()) else {
            return;
        };

        let snapshot = self.history.current().to_vec();
        let next = match hit.region {
            HitRegion::Handle(handle) => Interaction::Resizing { id: hit.id, handle },
            HitRegion::Inside => {
                let grab = match &snapshot[hit.id] {
                    Element::Freehand { points, .. } => {
                        Grab::Points(points.iter().map(|p| world - *p).collect())
                    }
                    other => match other.coords() {
                        Some(coords) => Grab::Corner(world - coords.p1()),
                        None => return,
                    },
                };
                Interaction::Moving { id: hit.id, grab }
            }
        };

        self.history.commit(snapshot, false);
        self.interaction = next;
    }

    fn pointer_move(&mut self, position: Point, services: &Services) {
        match self.interaction.clone() {
            Interaction::Panning {
                anchor,
                start_offset,
            } => {
                self.viewport.offset = start_offset + (position - anchor);
            }
            Interaction::Drawing { id } => {
                let world = self.viewport.screen_to_world(position);
                self.update_current(id, services, |element, sketch| {
                    match element {
                        Element::Freehand { points, .. } => points.push(world),
                        other => {
                            let coords = other.coords().ok_or(CoreError::NoCoords {
                                kind: other.kind(),
                            })?;
                            other.set_coords(Coords::new(coords.x1, coords.y1, world.x, world.y))?;
                            other.refresh_descriptor(sketch);
                        }
                    }
                    Ok(())
                });
            }
            Interaction::Moving { id, grab } => {
                let world = self.viewport.screen_to_world(position);
                self.update_current(id, services, |element, sketch| {
                    match (element, &grab) {
                        (Element::Freehand { points, .. }, Grab::Points(offsets)) => {
                            for (point, offset) in points.iter_mut().zip(offsets) {
                                *point = world - *offset;
                            }
                        }
                        (other, Grab::Corner(offset)) => {
                            let coords = other.coords().ok_or(CoreError::NoCoords {
                                kind: other.kind(),
                            })?;
                            let p1 = world - *offset;
                            other.set_coords(Coords::new(
                                p1.x,
                                p1.y,
                                p1.x + coords.width(),
                                p1.y + coords.height(),
                            ))?;
                            other.refresh_descriptor(sketch);
                        }
                        (other, _) => {
                            return Err(CoreError::NoCoords { kind: other.kind() });
                        }
                    }
                    Ok(())
                });
            }
            Interaction::Resizing { id, handle } => {
                let world = self.viewport.screen_to_world(position);
                self.update_current(id, services, |element, sketch| {
                    let coords = element.coords().ok_or(CoreError::NoCoords {
                        kind: element.kind(),
                    })?;
                    element.set_coords(resized_coords(world, handle, coords))?;
                    element.refresh_descriptor(sketch);
                    Ok(())
                });
            }
            Interaction::Idle | Interaction::Writing { .. } => {}
        }
    }

    fn pointer_up(&mut self, position: Point, services: &Services) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Drawing { id } | Interaction::Resizing { id, .. } => {
                self.settle(id, services);
            }
            Interaction::Moving { id, .. } => {
                // A click (no drag) on a text element reopens it for editing.
                let is_text = matches!(self.history.current().get(id), Some(Element::Text { .. }));
                if is_text && self.down_position == Some(position) {
                    self.interaction = Interaction::Writing { id };
                }
            }
            Interaction::Writing { id } => {
                // The press that opened the text edit; keep writing
                // until the external widget blurs.
                self.interaction = Interaction::Writing { id };
            }
            Interaction::Panning { .. } | Interaction::Idle => {}
        }

        if !matches!(self.interaction, Interaction::Writing { .. }) {
            self.down_position = None;
        }
    }

    /// Canonicalize a finished draw/resize and fold it into the
    /// gesture's history entry.
    fn settle(&mut self, id: ElementId, services: &Services) {
        self.update_current(id, services, |element, sketch| {
            if element.kind().is_sketched() {
                let coords = element.coords().ok_or(CoreError::NoCoords {
                    kind: element.kind(),
                })?;
                element.set_coords(canonicalize(coords, element.kind()))?;
                element.refresh_descriptor(sketch);
            }
            Ok(())
        });
    }

    fn finish_writing(&mut self, content: String, services: &Services) {
        let Interaction::Writing { id } = &self.interaction else {
            log::warn!("text committed while nothing was being written");
            return;
        };
        let id = *id;
        self.update_current(id, services, |element, _| {
            element.set_text(content, services.text)
        });
        self.interaction = Interaction::Idle;
        self.down_position = None;
    }

    fn key_down(&mut self, key: String, modifiers: Modifiers) {
        if let Some(action) = shortcut_for(&key, modifiers) {
            match action {
                HistoryAction::Undo => self.undo(),
                HistoryAction::Redo => self.redo(),
            }
        }
        self.input.key_down(key, modifiers);
    }

    fn next_id(&self) -> ElementId {
        self.history.current().len()
    }

    /// Append an element as a fresh (non-coalesced) history entry and
    /// return its id.
    fn append_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        let mut next = self.history.current().to_vec();
        next.push(element);
        self.history.commit(next, false);
        id
    }

    /// Clone the current snapshot, edit one element, and coalesce the
    /// result back into the entry at the cursor. A failed edit leaves
    /// the store untouched.
    fn update_current<F>(&mut self, id: ElementId, services: &Services, edit: F)
    where
        F: FnOnce(&mut Element, &dyn SketchGenerator) -> Result<(), CoreError>,
    {
        let mut next = self.history.current().to_vec();
        let Some(element) = next.get_mut(id) else {
            log::warn!("dropping edit: {}", CoreError::UnknownElement(id));
            return;
        };
        if let Err(err) = edit(element, services.sketch) {
            log::warn!("dropping edit of element {id}: {err}");
            return;
        }
        self.history.commit(next, true);
    }
}
