//! The pointer-gesture state machine.
//!
//! Every handler runs to completion on the event thread and returns a
//! [`Response`] telling the host what to do with the original event.

use crate::config::EngineConfig;
use crate::error::ConfigResult;
use crate::handles::{HandleKind, hit_test_handles};
use crate::input::{PointerEvent, PointerTarget, WheelEvent};
use crate::scene::Scene;
use crate::shapes::{Shape, ShapeId};
use crate::surface::{EventSurface, SurfaceBindings};
use crate::viewport::{PixelRect, Viewport, ZoomSettings};
use kurbo::{Point, Vec2};

/// The gesture currently in progress. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving a shape.
    Dragging { id: ShapeId },
    /// Dragging one of a shape's handles.
    Resizing { id: ShapeId, handle: HandleKind },
    /// Panning the viewport from a background press.
    Panning {
        /// Pointer position at the last processed event.
        anchor: Point,
        /// Set once the pointer has changed position.
        moved: bool,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// The shape this gesture acts on, if any.
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            Gesture::Dragging { id } | Gesture::Resizing { id, .. } => Some(*id),
            Gesture::Idle | Gesture::Panning { .. } => None,
        }
    }
}

/// What the host should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    /// Scene or viewport changed.
    pub redraw: bool,
    /// Suppress the host's default action (page scroll/zoom).
    pub prevent_default: bool,
    /// Keep the event from reaching the canvas-level handlers.
    pub stop_propagation: bool,
    /// Empty canvas was clicked at this logical point.
    pub canvas_clicked: Option<Point>,
}

impl Response {
    fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            ..Self::default()
        }
    }
}

/// Read-only view of everything a renderer needs.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    /// Shapes in paint order.
    pub shapes: Vec<&'a Shape>,
    pub focused: Option<ShapeId>,
    pub viewport: Viewport,
    /// Changes whenever the scene or viewport does.
    pub revision: u64,
}

impl Snapshot<'_> {
    /// The focused shape, if it is in this snapshot.
    pub fn focused_shape(&self) -> Option<&Shape> {
        let id = self.focused?;
        self.shapes.iter().copied().find(|shape| shape.id() == id)
    }
}

/// Turns pointer and wheel events into scene and viewport mutations.
#[derive(Debug)]
pub struct InteractionEngine {
    scene: Scene,
    viewport: Viewport,
    config: EngineConfig,
    zoom: ZoomSettings,
    /// Last known surface rectangle in screen pixels.
    surface: PixelRect,
    gesture: Gesture,
    /// Bumped on every viewport change.
    view_revision: u64,
    mounted: bool,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl InteractionEngine {
    /// Create an engine with an empty scene and the configured viewport.
    ///
    /// The surface is assumed to map 1:1 onto the viewport until the host
    /// reports its real size. `config` is taken as already validated; see
    /// [`InteractionEngine::try_new`].
    pub fn new(config: EngineConfig) -> Self {
        let viewport = config.default_viewport;
        Self {
            scene: Scene::new(),
            viewport,
            zoom: config.zoom_settings(),
            surface: PixelRect::sized(viewport.width(), viewport.height()),
            config,
            gesture: Gesture::Idle,
            view_revision: 0,
            mounted: false,
        }
    }

    /// Validate `config`, then create the engine.
    pub fn try_new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Replace the scene.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for collaborators such as placement.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn surface_rect(&self) -> PixelRect {
        self.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Record the surface rectangle after a host layout change.
    pub fn resize_surface(&mut self, rect: PixelRect) {
        if let Err(e) = rect.check() {
            log::warn!("Ignoring surface resize: {e}");
            return;
        }
        if rect != self.surface {
            self.surface = rect;
            self.touch_view();
        }
    }

    /// Attach the wheel and pointer-up/cancel listeners.
    pub fn mount(&mut self, surface: &mut dyn EventSurface) -> SurfaceBindings {
        if self.mounted {
            log::warn!("Engine mounted twice without unmount");
        }
        let bindings = SurfaceBindings::install(surface);
        self.mounted = true;
        log::debug!("Mounted with {} listeners", bindings.listeners().len());
        bindings
    }

    /// Detach the listeners from `mount` and drop any gesture in progress.
    pub fn unmount(&mut self, bindings: SurfaceBindings, surface: &mut dyn EventSurface) {
        bindings.release(surface);
        self.mounted = false;
        self.set_gesture(Gesture::Idle);
        log::debug!("Unmounted");
    }

    /// Snapshot of the scene and viewport for rendering.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            shapes: self.scene.shapes_ordered().collect(),
            focused: self.scene.focused_id(),
            viewport: self.viewport,
            revision: self.scene.revision().wrapping_add(self.view_revision),
        }
    }

    /// Map a screen point to logical coordinates using the current surface.
    pub fn to_logical(&self, screen: Point) -> Point {
        let pixels = usable(self.surface);
        self.viewport
            .to_logical(screen, pixels)
            .unwrap_or_else(|_| self.viewport.origin())
    }

    /// Classify what lies under a screen point: focused handles, then shapes
    /// (topmost first), then background.
    pub fn target_at(&self, screen: Point, pixels: PixelRect) -> PointerTarget {
        let pixels = usable(pixels);
        let Ok(point) = self.viewport.to_logical(screen, pixels) else {
            return PointerTarget::Background;
        };

        if let Some(shape) = self.scene.focus() {
            if let Some(handle) =
                hit_test_handles(&shape.handles(), point, self.config.handle_radius)
            {
                return PointerTarget::Handle {
                    id: shape.id(),
                    handle,
                };
            }
        }

        match self.scene.shape_at(point, self.config.hit_tolerance) {
            Some(id) => PointerTarget::Shape { id },
            None => PointerTarget::Background,
        }
    }

    /// Start a gesture according to what was pressed.
    pub fn pointer_down(&mut self, event: PointerEvent) -> Response {
        match event.target {
            PointerTarget::Background => {
                self.set_gesture(Gesture::Panning {
                    anchor: event.screen,
                    moved: false,
                });
                Response::default()
            }
            PointerTarget::Shape { id } => {
                if !self.scene.contains(id) {
                    log::debug!("Press on missing shape {id}");
                    self.set_gesture(Gesture::Idle);
                    return Response::default();
                }
                self.scene.set_focus(Some(id));
                self.set_gesture(Gesture::Dragging { id });
                Response::redraw(true)
            }
            PointerTarget::Handle { id, handle } => {
                match self.scene.get(id) {
                    Some(shape) if shape.has_handle(handle) => {
                        self.set_gesture(Gesture::Resizing { id, handle });
                    }
                    Some(shape) => {
                        log::warn!("Shape {id} ({}) has no {handle:?} handle", shape.kind.name());
                        self.set_gesture(Gesture::Idle);
                    }
                    None => {
                        log::debug!("Handle press on missing shape {id}");
                        self.set_gesture(Gesture::Idle);
                    }
                }
                // Handles sit above the canvas; the press never reaches it.
                Response {
                    stop_propagation: true,
                    ..Response::default()
                }
            }
        }
    }

    /// Continue the active gesture.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Response {
        match self.gesture {
            Gesture::Idle => Response::default(),
            Gesture::Dragging { id } => {
                if event.movement == Vec2::ZERO {
                    return Response::default();
                }
                log::trace!("Drag {id} by {:?}", event.movement);
                Response::redraw(self.scene.translate(id, event.movement))
            }
            Gesture::Resizing { id, handle } => {
                if event.movement == Vec2::ZERO {
                    return Response::default();
                }
                log::trace!("Resize {id} via {handle:?} by {:?}", event.movement);
                // Every handle kind grows the extent directly.
                Response::redraw(self.scene.resize(id, event.movement))
            }
            Gesture::Panning { anchor, .. } => {
                let delta = anchor - event.screen;
                if delta == Vec2::ZERO {
                    return Response::default();
                }
                self.pan_by(delta);
                self.gesture = Gesture::Panning {
                    anchor: event.screen,
                    moved: true,
                };
                Response::redraw(true)
            }
        }
    }

    /// End the active gesture. An unmoved background press is a canvas click.
    pub fn pointer_up(&mut self, screen: Point) -> Response {
        let gesture = std::mem::take(&mut self.gesture);
        if !gesture.is_idle() {
            log::debug!("Gesture {gesture:?} -> Idle");
        }

        match gesture {
            Gesture::Panning { moved: false, .. } => {
                let at = self.to_logical(screen);
                let had_focus = self.scene.focused_id().is_some();
                self.scene.set_focus(None);
                log::debug!("Canvas clicked at {at:?}");
                Response {
                    redraw: had_focus,
                    canvas_clicked: Some(at),
                    ..Response::default()
                }
            }
            _ => Response::default(),
        }
    }

    /// Pointer capture was lost: abandon the gesture without a click.
    pub fn pointer_cancel(&mut self) -> Response {
        self.set_gesture(Gesture::Idle);
        Response::default()
    }

    /// Zoom around the cursor. The host's default wheel action is always suppressed.
    pub fn wheel(&mut self, event: WheelEvent) -> Response {
        if event.pixels.check().is_ok() {
            self.surface = event.pixels;
        }
        let pixels = usable(event.pixels);
        let changed = match self
            .viewport
            .zoom_at(event.screen, pixels, event.delta_y, &self.zoom)
        {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("Zoom failed: {e}");
                false
            }
        };
        if changed {
            self.touch_view();
        }
        Response {
            redraw: changed,
            prevent_default: true,
            ..Response::default()
        }
    }

    fn pan_by(&mut self, delta: Vec2) {
        let pixels = usable(self.surface);
        match self.viewport.pan_by(delta, pixels.size()) {
            Ok(()) => self.touch_view(),
            Err(e) => log::warn!("Pan failed: {e}"),
        }
    }

    fn set_gesture(&mut self, gesture: Gesture) {
        if self.gesture != gesture {
            log::debug!("Gesture {:?} -> {gesture:?}", self.gesture);
        }
        self.gesture = gesture;
    }

    fn touch_view(&mut self) {
        self.view_revision = self.view_revision.wrapping_add(1);
    }
}

/// A usable pixel rect: degenerate dimensions become a single pixel.
fn usable(pixels: PixelRect) -> PixelRect {
    match pixels.check() {
        Ok(pixels) => pixels,
        Err(e) => {
            log::warn!("{e}, substituting a 1-pixel denominator");
            pixels.or_unit()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Placement;
    use crate::shapes::ShapeKind;
    use crate::surface::tests::FakeSurface;

    const EPS: f64 = 1e-9;

    fn engine_with(shapes: &[Shape]) -> InteractionEngine {
        let mut engine = InteractionEngine::default();
        for shape in shapes {
            engine.scene_mut().add_shape(shape.clone()).unwrap();
        }
        engine.resize_surface(PixelRect::sized(1000.0, 1000.0));
        engine
    }

    fn rect(id: u64) -> Shape {
        Shape::new(ShapeId(id), ShapeKind::Rectangle, 0.0, 0.0, 100.0, 50.0)
    }

    fn line(id: u64) -> Shape {
        Shape::new(ShapeId(id), ShapeKind::Line, 0.0, 0.0, 100.0, 0.0)
    }

    fn on_shape(id: u64) -> PointerTarget {
        PointerTarget::Shape { id: ShapeId(id) }
    }

    fn on_handle(id: u64, handle: HandleKind) -> PointerTarget {
        PointerTarget::Handle {
            id: ShapeId(id),
            handle,
        }
    }

    fn moved(dx: f64, dy: f64, target: PointerTarget) -> PointerEvent {
        PointerEvent::new(Point::ZERO, Vec2::new(dx, dy), target)
    }

    fn at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::press(Point::new(x, y), PointerTarget::Background)
    }

    #[test]
    fn test_drag_shape_scenario() {
        let mut engine = engine_with(&[rect(1)]);

        let down = engine.pointer_down(PointerEvent::press(Point::new(20.0, 20.0), on_shape(1)));
        assert!(down.redraw);
        assert_eq!(engine.gesture(), Gesture::Dragging { id: ShapeId(1) });

        assert!(engine.pointer_move(moved(10.0, 5.0, on_shape(1))).redraw);
        let up = engine.pointer_up(Point::new(30.0, 25.0));
        assert!(up.canvas_clicked.is_none());

        let shape = engine.scene().get(ShapeId(1)).unwrap();
        assert!((shape.x - 10.0).abs() < EPS);
        assert!((shape.y - 5.0).abs() < EPS);
        assert!((shape.width - 100.0).abs() < EPS);
        assert!((shape.height - 50.0).abs() < EPS);
        assert_eq!(engine.scene().focused_id(), Some(ShapeId(1)));
        assert!(engine.gesture().is_idle());
    }

    #[test]
    fn test_pan_background_scenario() {
        let mut engine = engine_with(&[]);

        assert!(!engine.pointer_down(at(500.0, 500.0)).redraw);
        assert!(engine.pointer_move(at(450.0, 480.0)).redraw);
        let up = engine.pointer_up(Point::new(450.0, 480.0));

        assert!(up.canvas_clicked.is_none());
        assert_eq!(engine.viewport().origin(), Point::new(50.0, 20.0));
        assert!(engine.gesture().is_idle());
        assert!(engine.scene().is_empty());
    }

    #[test]
    fn test_pan_scales_with_surface_ratio() {
        let mut engine = engine_with(&[]);
        engine.resize_surface(PixelRect::sized(500.0, 250.0));

        engine.pointer_down(at(500.0, 500.0));
        engine.pointer_move(at(450.0, 480.0));
        engine.pointer_up(Point::new(450.0, 480.0));

        let origin = engine.viewport().origin();
        assert!((origin.x - 100.0).abs() < EPS);
        assert!((origin.y - 80.0).abs() < EPS);
    }

    #[test]
    fn test_pan_anchor_tracks_last_move() {
        let mut engine = engine_with(&[]);
        engine.pointer_down(at(100.0, 100.0));
        engine.pointer_move(at(90.0, 100.0));
        engine.pointer_move(at(80.0, 100.0));
        assert_eq!(engine.viewport().origin(), Point::new(20.0, 0.0));
        assert_eq!(
            engine.gesture(),
            Gesture::Panning {
                anchor: Point::new(80.0, 100.0),
                moved: true
            }
        );
    }

    #[test]
    fn test_end_handle_scenario() {
        let mut engine = engine_with(&[line(1)]);
        engine.scene_mut().set_focus(Some(ShapeId(1)));

        let down = engine.pointer_down(PointerEvent::press(
            Point::new(100.0, 0.0),
            on_handle(1, HandleKind::End),
        ));
        assert!(down.stop_propagation);
        assert!(engine.pointer_move(moved(20.0, 0.0, PointerTarget::Background)).redraw);
        engine.pointer_up(Point::new(120.0, 0.0));

        let shape = engine.scene().get(ShapeId(1)).unwrap();
        assert!((shape.width - 120.0).abs() < EPS);
        assert!(shape.x.abs() < EPS);
        assert!(shape.y.abs() < EPS);
        assert!(shape.height.abs() < EPS);
    }

    #[test]
    fn test_start_handle_only_resizes() {
        let mut engine = engine_with(&[line(1)]);
        engine.scene_mut().set_focus(Some(ShapeId(1)));

        engine.pointer_down(PointerEvent::press(Point::ZERO, on_handle(1, HandleKind::Start)));
        engine.pointer_move(moved(-10.0, 4.0, PointerTarget::Background));
        engine.pointer_up(Point::ZERO);

        let shape = engine.scene().get(ShapeId(1)).unwrap();
        assert!(shape.x.abs() < EPS && shape.y.abs() < EPS);
        assert!((shape.width - 90.0).abs() < EPS);
        assert!((shape.height - 4.0).abs() < EPS);
    }

    #[test]
    fn test_bottom_right_resize_may_flip() {
        let mut engine = engine_with(&[rect(1)]);
        engine.pointer_down(PointerEvent::press(
            Point::new(100.0, 50.0),
            on_handle(1, HandleKind::BottomRight),
        ));
        engine.pointer_move(moved(-150.0, -80.0, PointerTarget::Background));

        let shape = engine.scene().get(ShapeId(1)).unwrap();
        assert!((shape.width + 50.0).abs() < EPS);
        assert!((shape.height + 30.0).abs() < EPS);
    }

    #[test]
    fn test_handle_kind_mismatch_is_ignored() {
        let mut engine = engine_with(&[rect(1)]);
        let down = engine.pointer_down(PointerEvent::press(
            Point::ZERO,
            on_handle(1, HandleKind::Start),
        ));
        assert!(down.stop_propagation);
        assert!(engine.gesture().is_idle());
    }

    #[test]
    fn test_background_click_clears_focus_and_notifies() {
        let mut engine = engine_with(&[rect(1)]);
        engine.resize_surface(PixelRect::sized(500.0, 500.0));
        engine.scene_mut().set_focus(Some(ShapeId(1)));

        engine.pointer_down(at(250.0, 400.0));
        let up = engine.pointer_up(Point::new(250.0, 400.0));

        assert!(up.redraw);
        let clicked = up.canvas_clicked.unwrap();
        assert!((clicked.x - 500.0).abs() < EPS);
        assert!((clicked.y - 800.0).abs() < EPS);
        assert!(engine.scene().focus().is_none());
    }

    #[test]
    fn test_pan_release_is_not_a_click() {
        let mut engine = engine_with(&[rect(1)]);
        engine.scene_mut().set_focus(Some(ShapeId(1)));

        engine.pointer_down(at(500.0, 500.0));
        engine.pointer_move(at(501.0, 500.0));
        let up = engine.pointer_up(Point::new(501.0, 500.0));

        assert!(up.canvas_clicked.is_none());
        assert_eq!(engine.scene().focused_id(), Some(ShapeId(1)));
    }

    #[test]
    fn test_stationary_move_keeps_click() {
        let mut engine = engine_with(&[]);
        engine.pointer_down(at(300.0, 300.0));
        assert!(!engine.pointer_move(at(300.0, 300.0)).redraw);
        assert!(engine.pointer_up(Point::new(300.0, 300.0)).canvas_clicked.is_some());
    }

    #[test]
    fn test_shape_press_never_clicks() {
        let mut engine = engine_with(&[rect(1)]);
        engine.pointer_down(PointerEvent::press(Point::new(10.0, 10.0), on_shape(1)));
        assert!(engine.pointer_up(Point::new(10.0, 10.0)).canvas_clicked.is_none());
    }

    #[test]
    fn test_up_when_idle_is_noop() {
        let mut engine = engine_with(&[]);
        assert_eq!(engine.pointer_up(Point::ZERO), Response::default());
        assert!(engine.gesture().is_idle());
    }

    #[test]
    fn test_cancel_resets_without_click() {
        let mut engine = engine_with(&[]);
        engine.pointer_down(at(10.0, 10.0));
        let response = engine.pointer_cancel();
        assert!(response.canvas_clicked.is_none());
        assert!(engine.gesture().is_idle());
        assert!(engine.pointer_up(Point::new(10.0, 10.0)).canvas_clicked.is_none());
    }

    #[test]
    fn test_drag_of_removed_shape_is_silent() {
        let mut engine = engine_with(&[rect(1)]);
        engine.pointer_down(PointerEvent::press(Point::new(10.0, 10.0), on_shape(1)));
        engine.scene_mut().remove(ShapeId(1));

        let response = engine.pointer_move(moved(5.0, 5.0, on_shape(1)));
        assert!(!response.redraw);
        engine.pointer_up(Point::ZERO);
        assert!(engine.gesture().is_idle());
        assert!(engine.scene().is_empty());
    }

    #[test]
    fn test_press_on_missing_shape_ignored() {
        let mut engine = engine_with(&[]);
        engine.pointer_down(PointerEvent::press(Point::ZERO, on_shape(42)));
        assert!(engine.gesture().is_idle());
        assert!(engine.scene().focus().is_none());
    }

    #[test]
    fn test_wheel_always_prevents_default() {
        let mut engine = engine_with(&[]);
        let pixels = PixelRect::sized(1000.0, 1000.0);

        let zoomed = engine.wheel(WheelEvent::new(Point::new(500.0, 500.0), 100.0, pixels));
        assert!(zoomed.prevent_default && zoomed.redraw);

        let ignored = engine.wheel(WheelEvent::new(Point::ZERO, f64::NAN, pixels));
        assert!(ignored.prevent_default);
        assert!(!ignored.redraw);
    }

    #[test]
    fn test_wheel_keeps_cursor_point_and_gesture() {
        let mut engine = engine_with(&[rect(1)]);
        engine.pointer_down(PointerEvent::press(Point::new(10.0, 10.0), on_shape(1)));

        let pixels = PixelRect::new(40.0, 30.0, 800.0, 600.0);
        let cursor = Point::new(300.0, 200.0);
        engine.resize_surface(pixels);
        let before = engine.to_logical(cursor);
        engine.wheel(WheelEvent::new(cursor, -240.0, pixels));
        let after = engine.to_logical(cursor);

        assert!((before.x - after.x).abs() < EPS);
        assert!((before.y - after.y).abs() < EPS);
        assert_eq!(engine.gesture(), Gesture::Dragging { id: ShapeId(1) });
    }

    #[test]
    fn test_wheel_with_degenerate_surface_recovers() {
        let mut engine = engine_with(&[]);
        let response = engine.wheel(WheelEvent::new(
            Point::ZERO,
            100.0,
            PixelRect::sized(0.0, 0.0),
        ));
        assert!(response.prevent_default);
        assert!(engine.viewport().width() > 0.0);
        assert_eq!(engine.surface_rect(), PixelRect::sized(1000.0, 1000.0));
    }

    #[test]
    fn test_target_at_prefers_handles_then_topmost_shape() {
        let mut engine = engine_with(&[rect(1), rect(2)]);
        let pixels = PixelRect::sized(1000.0, 1000.0);

        assert_eq!(engine.target_at(Point::new(50.0, 25.0), pixels), on_shape(2));
        assert_eq!(
            engine.target_at(Point::new(500.0, 500.0), pixels),
            PointerTarget::Background
        );

        engine.scene_mut().set_focus(Some(ShapeId(1)));
        assert_eq!(
            engine.target_at(Point::new(101.0, 51.0), pixels),
            on_handle(1, HandleKind::BottomRight)
        );
    }

    #[test]
    fn test_mount_and_unmount() {
        let mut surface = FakeSurface::default();
        let mut engine = engine_with(&[]);

        let bindings = engine.mount(&mut surface);
        assert!(engine.is_mounted());
        assert_eq!(surface.live.len(), 3);

        engine.pointer_down(at(10.0, 10.0));
        engine.unmount(bindings, &mut surface);
        assert!(!engine.is_mounted());
        assert!(surface.live.is_empty());
        assert!(engine.gesture().is_idle());
    }

    #[test]
    fn test_snapshot_tracks_changes() {
        let mut engine = engine_with(&[rect(1), rect(2)]);
        engine.scene_mut().set_focus(Some(ShapeId(2)));

        let first = engine.snapshot();
        let ids: Vec<_> = first.shapes.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![ShapeId(1), ShapeId(2)]);
        assert_eq!(first.focused_shape().map(Shape::id), Some(ShapeId(2)));
        let revision = first.revision;

        engine.pointer_down(at(0.0, 0.0));
        engine.pointer_move(at(10.0, 0.0));
        assert_ne!(engine.snapshot().revision, revision);
        assert_eq!(engine.snapshot().viewport.origin(), Point::new(-10.0, 0.0));
    }

    #[test]
    fn test_click_drives_placement() {
        let mut engine = engine_with(&[]);
        let mut placement = Placement::new();
        placement.arm(ShapeKind::Circle);

        engine.pointer_down(at(200.0, 300.0));
        let up = engine.pointer_up(Point::new(200.0, 300.0));
        let id = up
            .canvas_clicked
            .and_then(|point| placement.place(engine.scene_mut(), point))
            .unwrap();

        let shape = engine.scene().get(id).unwrap();
        assert!((shape.x - 175.0).abs() < EPS);
        assert!((shape.y - 275.0).abs() < EPS);
    }

    #[test]
    fn test_rejected_press_clears_stale_gesture() {
        let mut engine = engine_with(&[rect(1), line(2)]);

        engine.pointer_down(at(10.0, 10.0));
        engine.pointer_down(PointerEvent::press(Point::ZERO, on_shape(42)));
        assert!(engine.gesture().is_idle());

        engine.pointer_down(at(10.0, 10.0));
        let response = engine.pointer_down(PointerEvent::press(
            Point::ZERO,
            on_handle(2, HandleKind::BottomRight),
        ));
        assert!(response.stop_propagation);
        assert!(engine.gesture().is_idle());

        engine.pointer_down(PointerEvent::press(Point::ZERO, on_shape(1)));
        engine.pointer_down(PointerEvent::press(Point::ZERO, on_handle(42, HandleKind::End)));
        assert!(engine.gesture().is_idle());

        // A stray move after the rejected press must not pan.
        assert!(!engine.pointer_move(at(500.0, 500.0)).redraw);
        assert_eq!(engine.viewport().origin(), Point::ZERO);
    }

    #[test]
    fn test_surface_resize_bumps_revision() {
        let mut engine = engine_with(&[]);
        let revision = engine.snapshot().revision;

        engine.resize_surface(PixelRect::sized(1000.0, 1000.0));
        assert_eq!(engine.snapshot().revision, revision);

        engine.resize_surface(PixelRect::sized(640.0, 480.0));
        assert_ne!(engine.snapshot().revision, revision);

        let revision = engine.snapshot().revision;
        engine.resize_surface(PixelRect::sized(0.0, 480.0));
        assert_eq!(engine.snapshot().revision, revision);
    }

    #[test]
    fn test_try_new_validates_config() {
        let config = EngineConfig {
            max_extent: 10.0,
            ..EngineConfig::default()
        };
        let err = InteractionEngine::try_new(config).err().unwrap();
        assert!(matches!(err, crate::error::ConfigError::Invalid(_)));
        assert!(InteractionEngine::try_new(EngineConfig::default()).is_ok());
    }
}
