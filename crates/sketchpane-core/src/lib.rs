//! Sketchpane Core Library
//!
//! Scene store, viewport math and the pointer-gesture state machine for a
//! pannable, zoomable diagramming surface. Rendering and event plumbing are
//! left to the host.

pub mod config;
pub mod error;
pub mod handles;
pub mod input;
pub mod interaction;
pub mod placement;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod viewport;

pub use config::EngineConfig;
pub use error::{ConfigError, ConfigResult, SceneError, SceneResult, ViewportError, ViewportResult};
pub use handles::{Handle, HandleKind};
pub use input::{PointerEvent, PointerTarget, WheelEvent};
pub use interaction::{Gesture, InteractionEngine, Response, Snapshot};
pub use placement::Placement;
pub use scene::Scene;
pub use shapes::{Primitive, Shape, ShapeId, ShapeKind, ShapeStyle};
pub use surface::{EventSurface, ListenerKind, ListenerScope, ListenerSpec, ListenerToken, SurfaceBindings};
pub use viewport::{PixelRect, Viewport, ZoomSettings};
