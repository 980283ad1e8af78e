use image::GrayImage;
use tracing::info;

use crate::canvas::ComposeCanvas;
use crate::config::{LithoConfig, ShapeOptions};
use crate::error::Result;
use crate::masking::{solid_mask, ShapeMasks};
use crate::math::grid::count_set;
use crate::relief::{luminance_from_gray, MapHeights, ReliefParams};
use crate::tessellation::{BuildManifold, Mesh};

/// Builds a framed lithophane in one of the predefined outlines.
///
/// The photo is placed on the canvas, the outline and its inset are
/// rasterised at canvas resolution, the inset carries the relief and the band
/// between them the flat frame.
pub struct ShapeLithophane<'a> {
    photo: &'a GrayImage,
    options: ShapeOptions,
    invert: bool,
}

impl<'a> ShapeLithophane<'a> {
    /// Creates a new `ShapeLithophane` operation.
    #[must_use]
    pub fn new(photo: &'a GrayImage, options: ShapeOptions) -> Self {
        Self {
            photo,
            options,
            invert: true,
        }
    }

    /// Sets whether dark pixels become thick (`true`, the default).
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Executes the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError`] for an invalid configuration or
    /// options, and [`crate::error::GeometryError`] if the outline leaves no
    /// cell to tessellate.
    pub fn execute(&self, config: &LithoConfig) -> Result<Mesh> {
        config.validate()?;
        let canvas = ComposeCanvas::new(self.photo, &self.options).execute(config)?;

        let masks = ShapeMasks::new(self.options.shape, config.pixels(), self.options.frame_width_mm)
            .execute(config)?;
        let regions = masks.regions();
        let luminance = luminance_from_gray(&canvas);
        let params = ReliefParams::from_config(config).with_invert(self.invert);
        let field = MapHeights::new(&luminance, &regions, params).execute(config)?;

        let mask = solid_mask(&regions);
        let mesh = BuildManifold::new(&field, &mask).execute()?;
        info!(
            shape = ?self.options.shape,
            cells = count_set(&mask),
            triangles = mesh.len(),
            "built shape lithophane"
        );
        Ok(mesh)
    }
}
