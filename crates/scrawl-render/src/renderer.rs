//! Renderer trait abstraction.

use image::RgbaImage;
use kurbo::Size;
use scrawl_core::{Element, ElementId, Viewport};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("initialization failed: {0}")]
    InitFailed(String),
    #[error("render failed: {0}")]
    RenderFailed(String),
    #[error("background image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Context for a single render frame.
pub struct Frame<'a> {
    /// The committed elements, in insertion order.
    pub elements: &'a [Element],
    /// Pan/zoom transform to apply to everything drawn.
    pub viewport: &'a Viewport,
    /// Output surface size in physical pixels.
    pub viewport_size: Size,
    /// Optional decoded raster layer blitted before the elements.
    pub background: Option<&'a RgbaImage>,
    /// Element whose text is being edited; the renderer must skip it
    /// so the external overlay can show the live content instead.
    pub skip: Option<ElementId>,
}

impl<'a> Frame<'a> {
    pub fn new(elements: &'a [Element], viewport: &'a Viewport, viewport_size: Size) -> Self {
        Self {
            elements,
            viewport,
            viewport_size,
            background: None,
            skip: None,
        }
    }

    /// Set the raster background layer.
    pub fn with_background(mut self, background: &'a RgbaImage) -> Self {
        self.background = Some(background);
        self
    }

    /// Set the element to leave out of the frame.
    pub fn with_skip(mut self, skip: Option<ElementId>) -> Self {
        self.skip = skip;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can rasterize directly, build a GPU scene, or (as
/// the bundled [`crate::DrawListRenderer`] does) record an inspectable
/// command list.
pub trait Renderer: Send + Sync {
    /// Prepare all drawing commands for one frame.
    fn render(&mut self, frame: &Frame) -> RenderResult<()>;
}
