use crate::error::{ConfigError, Result};
use crate::masking::ShapeKind;

/// Physical and resolution parameters of a conversion.
///
/// Passed by reference into every operation that needs it, so several
/// conversions with different settings can run side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LithoConfig {
    /// Raster resolution in pixels per millimetre.
    pub px_per_mm: f64,
    /// Physical side length of the square canvas in millimetres.
    pub canvas_mm: f64,
    /// Height of the structural frame band.
    pub frame_height_mm: f64,
    /// Relief thickness for the lightest pixels.
    pub litho_min_mm: f64,
    /// Relief thickness for the darkest pixels.
    pub litho_max_mm: f64,
    /// Floor added under the relief of contour-segmented models.
    pub base_mm: f64,
    /// Half-extent `r` of the normalised shape coordinate range `[-r, r]`.
    pub shape_range: f64,
    /// Accepted frame widths in millimetres.
    pub frame_width_bounds: (f64, f64),
    /// Accepted zoom factors.
    pub zoom_bounds: (f64, f64),
    /// Accepted image offsets in millimetres along each axis.
    pub offset_bounds: (f64, f64),
}

impl Default for LithoConfig {
    fn default() -> Self {
        Self {
            px_per_mm: 5.0,
            canvas_mm: 90.0,
            frame_height_mm: 5.0,
            litho_min_mm: 0.6,
            litho_max_mm: 3.0,
            base_mm: 0.4,
            shape_range: 1.6,
            frame_width_bounds: (2.0, 5.0),
            zoom_bounds: (0.5, 3.0),
            offset_bounds: (-60.0, 60.0),
        }
    }
}

impl LithoConfig {
    /// Side length of the canvas in pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixels(&self) -> usize {
        (self.canvas_mm * self.px_per_mm).round().max(0.0) as usize
    }

    /// Normalised shape units per physical millimetre: `2r / canvas_mm`.
    #[must_use]
    pub fn units_per_mm(&self) -> f64 {
        self.shape_range * 2.0 / self.canvas_mm
    }

    /// Checks the internal consistency of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] for a non-positive
    /// resolution, canvas, range or minimum thickness, or when the thickness
    /// bounds are inverted.
    pub fn validate(&self) -> Result<()> {
        require_positive("px_per_mm", self.px_per_mm)?;
        require_positive("canvas_mm", self.canvas_mm)?;
        require_positive("shape_range", self.shape_range)?;
        require_positive("litho_min_mm", self.litho_min_mm)?;
        require_positive("frame_height_mm", self.frame_height_mm)?;
        check_range(
            "litho_max_mm",
            self.litho_max_mm,
            self.litho_min_mm,
            f64::MAX,
        )?;
        check_range("base_mm", self.base_mm, 0.0, f64::MAX)?;
        Ok(())
    }
}

/// User-facing placement and framing choices for a shape lithophane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeOptions {
    pub shape: ShapeKind,
    /// Width of the frame band in millimetres.
    pub frame_width_mm: f64,
    /// Photo scale relative to the canvas width.
    pub zoom: f64,
    /// Horizontal photo offset in millimetres.
    pub offset_x: f64,
    /// Vertical photo offset in millimetres.
    pub offset_y: f64,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Heart,
            frame_width_mm: 3.0,
            zoom: 1.2,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ShapeOptions {
    /// Checks every option against the bounds in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] naming the first option
    /// outside its bound.
    pub fn validate(&self, config: &LithoConfig) -> Result<()> {
        let (lo, hi) = config.frame_width_bounds;
        check_range("frame_width_mm", self.frame_width_mm, lo, hi)?;
        let (lo, hi) = config.zoom_bounds;
        check_range("zoom", self.zoom, lo, hi)?;
        let (lo, hi) = config.offset_bounds;
        check_range("offset_x", self.offset_x, lo, hi)?;
        check_range("offset_y", self.offset_y, lo, hi)?;
        Ok(())
    }
}

fn require_positive(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange {
            parameter,
            value,
            min: 0.0,
            max: f64::INFINITY,
        }
        .into())
    }
}

pub(crate) fn check_range(parameter: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ParameterOutOfRange {
            parameter,
            value,
            min,
            max,
        }
        .into())
    }
}
