//! Headless host for the Sketchpane engine.
//!
//! Reads a JSON script of pointer and wheel events, feeds it through an
//! [`InteractionEngine`] mounted on an in-memory surface, and reports the
//! resulting scene.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchpane_core::{
    ConfigError, EngineConfig, EventSurface, InteractionEngine, ListenerKind, ListenerSpec,
    ListenerToken, PixelRect, Placement, PointerEvent, Response, SceneError, Shape, ShapeId,
    ShapeKind, ShapeStyle, Viewport, WheelEvent,
};
use sketchpane_render::{DisplayList, FrameRenderer, RenderContext, RendererError};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One scripted host event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Pointer-down with an explicit target.
    Down(PointerEvent),
    /// Pointer-down at a screen point, targeted by the engine's own hit test.
    Press { screen: Point },
    Move(PointerEvent),
    Up { screen: Point },
    Cancel,
    Wheel(WheelEvent),
    /// The host surface changed size.
    Resize { rect: PixelRect },
    /// Arm a shape kind for the next canvas click.
    Arm { kind: ShapeKind },
}

/// A replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default = "default_surface")]
    pub surface: PixelRect,
    /// Shapes present before the first event.
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Style for placed shapes.
    #[serde(default)]
    pub style: ShapeStyle,
    pub events: Vec<ScriptEvent>,
}

fn default_surface() -> PixelRect {
    PixelRect::sized(1000.0, 1000.0)
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Final state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub shapes: Vec<Shape>,
    pub focused: Option<ShapeId>,
    pub viewport: Viewport,
    /// Logical points of every canvas click.
    pub clicks: Vec<Point>,
    /// Shapes created from clicks.
    pub placed: Vec<ShapeId>,
    /// Frames actually redrawn.
    pub frames: usize,
    /// Events with no listener attached to receive them.
    pub dropped: usize,
}

/// In-memory surface: events for a listener kind are delivered only while
/// a listener of that kind is attached.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next: u64,
    live: HashMap<ListenerToken, ListenerSpec>,
}

impl HeadlessSurface {
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.live.values().any(|spec| spec.kind == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.live.len()
    }
}

impl EventSurface for HeadlessSurface {
    fn add_listener(&mut self, spec: ListenerSpec) -> ListenerToken {
        self.next += 1;
        let token = ListenerToken(self.next);
        self.live.insert(token, spec);
        token
    }

    fn remove_listener(&mut self, token: ListenerToken) {
        if self.live.remove(&token).is_none() {
            log::warn!("Removing unknown listener {token:?}");
        }
    }
}

/// Run a script to completion.
pub fn replay(script: Script) -> ReplayResult<Outcome> {
    let mut engine = InteractionEngine::try_new(script.config)?;
    engine.resize_surface(script.surface);
    for shape in script.shapes {
        engine.scene_mut().add_shape(shape)?;
    }

    let mut placement = Placement::new().with_style(script.style);
    let mut surface = HeadlessSurface::default();
    let mut renderer = FrameRenderer::new();
    let mut display = DisplayList::new();
    let mut clicks = Vec::new();
    let mut placed = Vec::new();
    let mut frames = 0;
    let mut dropped = 0;

    let bindings = engine.mount(&mut surface);
    for event in script.events {
        let response = match event {
            ScriptEvent::Down(event) => engine.pointer_down(event),
            ScriptEvent::Press { screen } => {
                let target = engine.target_at(screen, engine.surface_rect());
                engine.pointer_down(PointerEvent::press(screen, target))
            }
            ScriptEvent::Move(event) => engine.pointer_move(event),
            ScriptEvent::Up { screen } if surface.is_listening(ListenerKind::PointerUp) => {
                engine.pointer_up(screen)
            }
            ScriptEvent::Cancel if surface.is_listening(ListenerKind::PointerCancel) => {
                engine.pointer_cancel()
            }
            ScriptEvent::Wheel(event) if surface.is_listening(ListenerKind::Wheel) => {
                engine.wheel(event)
            }
            ScriptEvent::Up { .. } | ScriptEvent::Cancel | ScriptEvent::Wheel(_) => {
                dropped += 1;
                continue;
            }
            ScriptEvent::Resize { rect } => {
                engine.resize_surface(rect);
                Response {
                    redraw: true,
                    ..Response::default()
                }
            }
            ScriptEvent::Arm { kind } => {
                placement.arm(kind);
                Response::default()
            }
        };

        if let Some(point) = response.canvas_clicked {
            clicks.push(point);
            if let Some(id) = placement.place(engine.scene_mut(), point) {
                placed.push(id);
            }
        }

        if response.redraw || response.canvas_clicked.is_some() {
            let snapshot = engine.snapshot();
            let ctx = RenderContext::new(&snapshot, engine.surface_rect())
                .with_handle_radius(engine.config().handle_radius);
            if renderer.render(&mut display, &ctx)?.is_some() {
                frames += 1;
            }
        }
    }
    engine.unmount(bindings, &mut surface);

    if surface.listener_count() != 0 {
        log::warn!("{} listeners left attached", surface.listener_count());
    }

    Ok(Outcome {
        shapes: engine.scene().shapes_ordered().cloned().collect(),
        focused: engine.scene().focused_id(),
        viewport: *engine.viewport(),
        clicks,
        placed,
        frames,
        dropped,
    })
}
