//! Engine configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::viewport::{
    DEFAULT_MAX_EXTENT, DEFAULT_MIN_EXTENT, DEFAULT_ZOOM_SENSITIVITY, Viewport, ZoomSettings,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Handle hit/draw radius in logical units.
pub const DEFAULT_HANDLE_RADIUS: f64 = 5.0;
/// Extra logical slop around shapes when hit testing.
pub const DEFAULT_HIT_TOLERANCE: f64 = 2.0;

/// Tunables for the interaction engine. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Visible rectangle at session start.
    pub default_viewport: Viewport,
    pub zoom_sensitivity: f64,
    pub min_extent: f64,
    pub max_extent: f64,
    pub handle_radius: f64,
    pub hit_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_viewport: Viewport::default(),
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            min_extent: DEFAULT_MIN_EXTENT,
            max_extent: DEFAULT_MAX_EXTENT,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every numeric field is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("min_extent", self.min_extent),
            ("max_extent", self.max_extent),
            ("handle_radius", self.handle_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit_tolerance must be non-negative, got {}",
                self.hit_tolerance
            )));
        }
        if self.min_extent > self.max_extent {
            return Err(ConfigError::Invalid(format!(
                "min_extent {} exceeds max_extent {}",
                self.min_extent, self.max_extent
            )));
        }

        // Viewport extents are positive by construction; only the bounds need checking.
        let vp = &self.default_viewport;
        let within = |extent: f64| (self.min_extent..=self.max_extent).contains(&extent);
        if !(within(vp.width()) && within(vp.height())) {
            return Err(ConfigError::Invalid(format!(
                "default_viewport {}x{} lies outside [{}, {}]",
                vp.width(),
                vp.height(),
                self.min_extent,
                self.max_extent
            )));
        }
        Ok(())
    }

    pub fn zoom_settings(&self) -> ZoomSettings {
        ZoomSettings {
            sensitivity: self.zoom_sensitivity,
            min_extent: self.min_extent,
            max_extent: self.max_extent,
        }
    }
}
