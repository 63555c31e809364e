//! Listener lifecycle between the engine and its host surface.
//!
//! The host owns the actual event plumbing; the engine only states which
//! listeners it needs and at what scope, and hands the tokens back on
//! unmount.

use serde::{Deserialize, Serialize};

/// Event kinds the engine listens for outside the per-element handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    Wheel,
    PointerUp,
    PointerCancel,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerScope {
    /// The rendering surface only.
    Surface,
    /// The whole window, so releases outside the surface are still seen.
    Global,
}

/// A listener registration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerSpec {
    pub kind: ListenerKind,
    pub scope: ListenerScope,
    /// Passive listeners cannot prevent the default action.
    pub passive: bool,
}

impl ListenerSpec {
    pub const fn new(kind: ListenerKind, scope: ListenerScope, passive: bool) -> Self {
        Self {
            kind,
            scope,
            passive,
        }
    }
}

/// Handle returned by the host for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerToken(pub u64);

/// A host that can attach and detach event listeners.
pub trait EventSurface {
    /// Attach a listener; the returned token identifies it for removal.
    fn add_listener(&mut self, spec: ListenerSpec) -> ListenerToken;

    /// Detach a previously attached listener.
    fn remove_listener(&mut self, token: ListenerToken);
}

/// Listeners that were attached on mount.
///
/// Not `Clone`: exactly one owner releases them.
#[derive(Debug)]
#[must_use = "bindings must be passed back to unmount to release the listeners"]
pub struct SurfaceBindings {
    tokens: Vec<(ListenerSpec, ListenerToken)>,
}

impl SurfaceBindings {
    /// Listeners the engine registers on mount.
    pub const REQUIRED: [ListenerSpec; 3] = [
        // Non-passive so page scroll/zoom can be suppressed.
        ListenerSpec::new(ListenerKind::Wheel, ListenerScope::Surface, false),
        ListenerSpec::new(ListenerKind::PointerUp, ListenerScope::Global, true),
        ListenerSpec::new(ListenerKind::PointerCancel, ListenerScope::Global, true),
    ];

    pub(crate) fn install(surface: &mut dyn EventSurface) -> Self {
        let tokens = Self::REQUIRED
            .iter()
            .map(|&spec| (spec, surface.add_listener(spec)))
            .collect();
        Self { tokens }
    }

    pub(crate) fn release(self, surface: &mut dyn EventSurface) {
        for (spec, token) in self.tokens {
            log::trace!("Removing {:?} listener {:?}", spec.kind, token);
            surface.remove_listener(token);
        }
    }

    /// Registered listeners with their tokens.
    pub fn listeners(&self) -> &[(ListenerSpec, ListenerToken)] {
        &self.tokens
    }
}
