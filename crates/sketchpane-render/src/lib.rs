//! Sketchpane Render Library
//!
//! Rendering boundary for Sketchpane. A backend implements [`DrawSink`];
//! [`render_frame`] replays an engine snapshot into it.

mod display_list;
mod renderer;

pub use display_list::{DisplayList, DrawCommand};
pub use renderer::{
    DEFAULT_HANDLE_RADIUS, DrawSink, FrameRenderer, FrameStats, RenderContext, RenderResult,
    RendererError, render_frame,
};
