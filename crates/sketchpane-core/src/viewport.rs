//! Viewport controller: the visible logical rectangle and its pan/zoom math.

use crate::error::{ViewportError, ViewportResult};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Wheel sensitivity: 0.1 zoom intensity per 100 wheel units.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.001;
/// Smallest logical width/height zooming may produce.
pub const DEFAULT_MIN_EXTENT: f64 = 1.0;
/// Largest logical width/height zooming may produce.
pub const DEFAULT_MAX_EXTENT: f64 = 1.0e6;

/// Screen-space rectangle of the rendering surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A surface anchored at the screen origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Error unless both dimensions are positive and finite.
    pub fn check(self) -> ViewportResult<Self> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(self)
        } else {
            Err(ViewportError::Degenerate {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Replace any degenerate dimension with a single pixel.
    pub fn or_unit(self) -> Self {
        Self {
            width: if is_positive(self.width) { self.width } else { 1.0 },
            height: if is_positive(self.height) { self.height } else { 1.0 },
            ..self
        }
    }

    /// Position of a screen point relative to the surface, as fractions of its size.
    fn fraction(&self, screen: Point) -> Vec2 {
        Vec2::new(
            (screen.x - self.left) / self.width,
            (screen.y - self.top) / self.height,
        )
    }
}

/// Zoom tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomSettings {
    /// `k` in `factor = exp(-wheel_delta * k)`.
    pub sensitivity: f64,
    /// Minimum logical width/height.
    pub min_extent: f64,
    /// Maximum logical width/height.
    pub max_extent: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            min_extent: DEFAULT_MIN_EXTENT,
            max_extent: DEFAULT_MAX_EXTENT,
        }
    }
}

/// The logical rectangle currently mapped onto the surface.
///
/// Width and height are always strictly positive; the origin is unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Unchecked wire form of [`Viewport`].
#[derive(Deserialize)]
struct RawViewport {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = ViewportError;

    fn try_from(raw: RawViewport) -> ViewportResult<Self> {
        Viewport::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 1000.0,
        }
    }
}

impl Viewport {
    /// Create a viewport, rejecting non-positive extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> ViewportResult<Self> {
        if !(is_positive(width) && is_positive(height) && x.is_finite() && y.is_finite()) {
            return Err(ViewportError::Degenerate { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Logical origin of the visible rectangle.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The visible rectangle in logical coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Logical units per screen pixel, per axis.
    fn scale(&self, pixels: Size) -> Vec2 {
        Vec2::new(self.width / pixels.width, self.height / pixels.height)
    }

    /// Pan by a screen-pixel delta, scaled so the motion tracks the pointer 1:1.
    pub fn pan_by(&mut self, delta: Vec2, pixels: Size) -> ViewportResult<()> {
        let pixels = PixelRect::sized(pixels.width, pixels.height).check()?;
        let scale = self.scale(pixels.size());
        self.x += delta.x * scale.x;
        self.y += delta.y * scale.y;
        Ok(())
    }

    /// Zoom by a wheel delta, keeping the logical point under `screen` fixed.
    ///
    /// Returns whether the viewport changed. The factor is clamped so both
    /// extents stay within `settings`; the fixed point is derived from the
    /// clamped factor.
    pub fn zoom_at(
        &mut self,
        screen: Point,
        pixels: PixelRect,
        wheel_delta: f64,
        settings: &ZoomSettings,
    ) -> ViewportResult<bool> {
        let pixels = pixels.check()?;
        if !wheel_delta.is_finite() {
            return Ok(false);
        }

        let raw = (-wheel_delta * settings.sensitivity).exp();
        let Some(factor) = self.clamp_factor(raw, settings) else {
            log::debug!("Zoom factor {raw} has no admissible range for {self:?}");
            return Ok(false);
        };
        if (factor - 1.0).abs() < f64::EPSILON {
            return Ok(false);
        }

        let fraction = pixels.fraction(screen);
        let anchor = self.logical_at(fraction);
        let width = self.width * factor;
        let height = self.height * factor;

        self.x = anchor.x - fraction.x * width;
        self.y = anchor.y - fraction.y * height;
        self.width = width;
        self.height = height;
        Ok(true)
    }

    /// Map a screen point to logical coordinates.
    pub fn to_logical(&self, screen: Point, pixels: PixelRect) -> ViewportResult<Point> {
        let pixels = pixels.check()?;
        Ok(self.logical_at(pixels.fraction(screen)))
    }

    /// Map a logical point to screen coordinates.
    pub fn to_screen(&self, logical: Point, pixels: PixelRect) -> ViewportResult<Point> {
        Ok(self.transform(pixels)? * logical)
    }

    /// Affine transform from logical to screen coordinates.
    pub fn transform(&self, pixels: PixelRect) -> ViewportResult<Affine> {
        let pixels = pixels.check()?;
        Ok(Affine::translate(Vec2::new(pixels.left, pixels.top))
            * Affine::scale_non_uniform(pixels.width / self.width, pixels.height / self.height)
            * Affine::translate(-self.origin().to_vec2()))
    }

    fn logical_at(&self, fraction: Vec2) -> Point {
        Point::new(
            self.x + fraction.x * self.width,
            self.y + fraction.y * self.height,
        )
    }

    /// Narrow a zoom factor so both extents land in `[min_extent, max_extent]`.
    ///
    /// `None` when no factor fits, or when fitting would reverse the zoom
    /// direction (a viewport already outside the bounds).
    fn clamp_factor(&self, factor: f64, settings: &ZoomSettings) -> Option<f64> {
        let lo = (settings.min_extent / self.width).max(settings.min_extent / self.height);
        let hi = (settings.max_extent / self.width).min(settings.max_extent / self.height);
        if lo > hi {
            return None;
        }
        let clamped = factor.clamp(lo, hi);
        let reversed = (factor > 1.0 && clamped < 1.0) || (factor < 1.0 && clamped > 1.0);
        (!reversed).then_some(clamped)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
