//! Luminance-to-thickness mapping.

mod luminance;

pub use luminance::{luminance_from_gray, luminance_from_rgb};

use nalgebra::DMatrix;
use tracing::debug;

use crate::config::{check_range, LithoConfig};
use crate::error::{ConfigError, Result};
use crate::masking::{RegionClass, RegionMap};
use crate::math::grid::{ensure_same_shape, linspace_at};

/// Target surface heights in millimetres over a physical rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    heights: DMatrix<f64>,
    width_mm: f64,
    height_mm: f64,
}

impl HeightField {
    /// Creates a height field spanning `width_mm × height_mm`.
    ///
    /// Column 0 sits at `x = 0` and the last column at `x = width_mm`; row 0
    /// sits at `y = height_mm` and the last row at `y = 0`.
    #[must_use]
    pub fn new(heights: DMatrix<f64>, width_mm: f64, height_mm: f64) -> Self {
        Self {
            heights,
            width_mm,
            height_mm,
        }
    }

    /// Creates a height field whose extent follows from `px_per_mm`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn with_resolution(heights: DMatrix<f64>, px_per_mm: f64) -> Self {
        let width_mm = heights.ncols() as f64 / px_per_mm;
        let height_mm = heights.nrows() as f64 / px_per_mm;
        Self::new(heights, width_mm, height_mm)
    }

    #[must_use]
    pub fn heights(&self) -> &DMatrix<f64> {
        &self.heights
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.heights.nrows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.heights.ncols()
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.heights.shape()
    }

    #[must_use]
    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    #[must_use]
    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    /// Height at grid node `(row, col)`.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.heights[(row, col)]
    }

    /// Physical `x` of column `col`.
    #[must_use]
    pub fn x_at(&self, col: usize) -> f64 {
        linspace_at(0.0, self.width_mm, self.cols(), col)
    }

    /// Physical `y` of row `row`; increasing rows go down the model.
    #[must_use]
    pub fn y_at(&self, row: usize) -> f64 {
        linspace_at(self.height_mm, 0.0, self.rows(), row)
    }
}

/// Thickness bounds and orientation of the luminance mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliefParams {
    /// Thickness at the thin end of the relief; must be strictly positive.
    pub min_thickness: f64,
    /// Thickness at the thick end of the relief.
    pub max_thickness: f64,
    /// Fixed height of frame cells.
    pub frame_height: f64,
    /// Extra floor added under every interior cell.
    pub base: f64,
    /// `true` maps dark to thick, as a backlit lithophane needs.
    pub invert: bool,
}

impl ReliefParams {
    /// Parameters for a framed shape lithophane.
    #[must_use]
    pub fn from_config(config: &LithoConfig) -> Self {
        Self {
            min_thickness: config.litho_min_mm,
            max_thickness: config.litho_max_mm,
            frame_height: config.frame_height_mm,
            base: 0.0,
            invert: true,
        }
    }

    /// Sets the floor under the relief.
    #[must_use]
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Sets the mapping orientation.
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Relief height for a normalised luminance, clamped to `[0, 1]`.
    #[must_use]
    pub fn relief(&self, luminance: f64) -> f64 {
        let l = luminance.clamp(0.0, 1.0);
        let span = self.max_thickness - self.min_thickness;
        let thickness = if self.invert {
            self.max_thickness - l * span
        } else {
            self.min_thickness + l * span
        };
        self.base + thickness
    }

    fn validate(&self) -> Result<()> {
        if !(self.min_thickness.is_finite() && self.min_thickness > 0.0) {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "min_thickness",
                value: self.min_thickness,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            }
            .into());
        }
        check_range("max_thickness", self.max_thickness, self.min_thickness, f64::MAX)?;
        check_range("frame_height", self.frame_height, f64::MIN_POSITIVE, f64::MAX)?;
        check_range("base", self.base, 0.0, f64::MAX)?;
        Ok(())
    }
}

/// Converts luminance and region classes into a [`HeightField`].
pub struct MapHeights<'a> {
    luminance: &'a DMatrix<f64>,
    regions: &'a RegionMap,
    params: ReliefParams,
}

impl<'a> MapHeights<'a> {
    /// Creates a new `MapHeights` operation.
    ///
    /// `luminance` holds values normalised to `[0, 1]`.
    #[must_use]
    pub fn new(luminance: &'a DMatrix<f64>, regions: &'a RegionMap, params: ReliefParams) -> Self {
        Self {
            luminance,
            regions,
            params,
        }
    }

    /// Executes the mapping.
    ///
    /// Interior cells follow the luminance, frame cells get the frame height
    /// and exterior cells 0. Exclusion from the mesh is decided by the region
    /// map, never by the height.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DimensionMismatch`] if the grids differ in shape
    /// and [`ConfigError::ParameterOutOfRange`] for invalid thickness bounds.
    pub fn execute(&self, config: &LithoConfig) -> Result<HeightField> {
        self.params.validate()?;
        ensure_same_shape(self.regions.shape(), self.luminance.shape())?;

        let (rows, cols) = self.regions.shape();
        let heights = DMatrix::from_fn(rows, cols, |i, j| match self.regions[(i, j)] {
            RegionClass::Exterior => 0.0,
            RegionClass::Frame => self.params.frame_height,
            RegionClass::Interior => self.params.relief(self.luminance[(i, j)]),
        });
        debug!(rows, cols, invert = self.params.invert, "mapped heights");

        Ok(HeightField::with_resolution(heights, config.px_per_mm))
    }
}
