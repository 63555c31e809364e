//! Draw-sink abstraction and the frame walker.

use kurbo::Affine;
use sketchpane_core::ViewportError;
use sketchpane_core::handles::Handle;
use sketchpane_core::interaction::Snapshot;
use sketchpane_core::shapes::{Primitive, ShapeStyle};
use sketchpane_core::viewport::PixelRect;
use thiserror::Error;

pub use sketchpane_core::config::DEFAULT_HANDLE_RADIUS;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Draw sink failed: {0}")]
    Sink(String),
    #[error("Viewport error: {0}")]
    Viewport(#[from] ViewportError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Scene and viewport to draw.
    pub snapshot: &'a Snapshot<'a>,
    /// Surface rectangle in screen pixels.
    pub pixels: PixelRect,
    /// Radius of the focus handles, in logical units.
    pub handle_radius: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(snapshot: &'a Snapshot<'a>, pixels: PixelRect) -> Self {
        Self {
            snapshot,
            pixels,
            handle_radius: DEFAULT_HANDLE_RADIUS,
        }
    }

    /// Set the handle radius.
    pub fn with_handle_radius(mut self, radius: f64) -> Self {
        self.handle_radius = radius;
        self
    }

    /// Logical-to-screen transform for this frame.
    pub fn transform(&self) -> RenderResult<Affine> {
        Ok(self.snapshot.viewport.transform(self.pixels)?)
    }
}

/// A backend that knows how to rasterize primitives.
///
/// All geometry arrives in logical coordinates; the frame transform is
/// handed over once in [`DrawSink::begin_frame`].
pub trait DrawSink {
    /// Start a frame.
    fn begin_frame(&mut self, _transform: Affine) -> RenderResult<()> {
        Ok(())
    }

    /// Draw one primitive of a shape.
    fn draw_primitive(&mut self, primitive: &Primitive, style: &ShapeStyle) -> RenderResult<()>;

    /// Draw a focus handle.
    fn draw_handle(&mut self, handle: &Handle, radius: f64) -> RenderResult<()>;

    /// Finish the frame.
    fn end_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

/// Counts from a rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub shapes: usize,
    pub primitives: usize,
    pub handles: usize,
}

/// Replay a snapshot into a sink: shapes in paint order, then the focused
/// shape's handles on top.
pub fn render_frame(sink: &mut dyn DrawSink, ctx: &RenderContext) -> RenderResult<FrameStats> {
    let mut stats = FrameStats::default();
    sink.begin_frame(ctx.transform()?)?;

    for shape in &ctx.snapshot.shapes {
        for primitive in shape.primitives() {
            sink.draw_primitive(&primitive, &shape.style)?;
            stats.primitives += 1;
        }
        stats.shapes += 1;
    }

    if let Some(shape) = ctx.snapshot.focused_shape() {
        for handle in shape.handles() {
            sink.draw_handle(&handle, ctx.handle_radius)?;
            stats.handles += 1;
        }
    }

    sink.end_frame()?;
    log::trace!("Rendered frame {:?}", stats);
    Ok(stats)
}

/// Renders only when the snapshot revision moved.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    last_revision: Option<u64>,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render if anything changed since the last successful frame.
    ///
    /// Returns `None` when the frame was skipped.
    pub fn render(
        &mut self,
        sink: &mut dyn DrawSink,
        ctx: &RenderContext,
    ) -> RenderResult<Option<FrameStats>> {
        let revision = ctx.snapshot.revision;
        if self.last_revision == Some(revision) {
            return Ok(None);
        }
        let stats = render_frame(sink, ctx)?;
        self.last_revision = Some(revision);
        Ok(Some(stats))
    }

    /// Force the next call to render.
    pub fn invalidate(&mut self) {
        self.last_revision = None;
    }
}
