//! A sink that records draw calls instead of rasterizing them.

use crate::renderer::{DrawSink, RenderResult};
use kurbo::Affine;
use sketchpane_core::handles::Handle;
use sketchpane_core::shapes::{Primitive, ShapeStyle};

/// One recorded draw call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Primitive {
        primitive: Primitive,
        style: ShapeStyle,
    },
    Handle {
        handle: Handle,
        radius: f64,
    },
}

/// Display list for a single frame. Cleared on every `begin_frame`.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    transform: Option<Affine>,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical-to-screen transform of the last frame.
    pub fn transform(&self) -> Option<Affine> {
        self.transform
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawSink for DisplayList {
    fn begin_frame(&mut self, transform: Affine) -> RenderResult<()> {
        self.transform = Some(transform);
        self.commands.clear();
        Ok(())
    }

    fn draw_primitive(&mut self, primitive: &Primitive, style: &ShapeStyle) -> RenderResult<()> {
        self.commands.push(DrawCommand::Primitive {
            primitive: primitive.clone(),
            style: style.clone(),
        });
        Ok(())
    }

    fn draw_handle(&mut self, handle: &Handle, radius: f64) -> RenderResult<()> {
        self.commands.push(DrawCommand::Handle {
            handle: *handle,
            radius,
        });
        Ok(())
    }
}
