//! Placement of a photo on the square working canvas.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use tracing::debug;

use crate::config::{LithoConfig, ShapeOptions};
use crate::error::{ConfigError, Result};

/// Scales a grayscale photo and pastes it onto a white square canvas.
///
/// The photo is resized to `zoom` times the canvas width, keeping its aspect
/// ratio, then centred and shifted by the option offsets. Whatever falls
/// outside the canvas is cropped; uncovered canvas stays white.
pub struct ComposeCanvas<'a> {
    photo: &'a GrayImage,
    options: &'a ShapeOptions,
}

impl<'a> ComposeCanvas<'a> {
    /// Creates a new `ComposeCanvas` operation.
    #[must_use]
    pub fn new(photo: &'a GrayImage, options: &'a ShapeOptions) -> Self {
        Self { photo, options }
    }

    /// Executes the composition, returning a `pixels × pixels` image.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] if the options fall
    /// outside the configured bounds, or if the photo is empty or scales down
    /// to nothing.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn execute(&self, config: &LithoConfig) -> Result<GrayImage> {
        self.options.validate(config)?;
        let (photo_w, photo_h) = self.photo.dimensions();
        if photo_w == 0 || photo_h == 0 {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "photo_size",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }
            .into());
        }

        let size = config.pixels();
        let target_w = (size as f64 * self.options.zoom).trunc();
        let target_h = (f64::from(photo_h) / f64::from(photo_w) * target_w).trunc();
        if target_w < 1.0 || target_h < 1.0 {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "zoom",
                value: self.options.zoom,
                min: config.zoom_bounds.0,
                max: config.zoom_bounds.1,
            }
            .into());
        }
        let resized = imageops::resize(
            self.photo,
            target_w as u32,
            target_h as u32,
            FilterType::Lanczos3,
        );

        let side = size as u32;
        let mut canvas = GrayImage::from_pixel(side, side, Luma([255]));
        let shift = |offset: f64| (offset * config.px_per_mm).trunc() as i64;
        let x = (i64::from(side) - i64::from(resized.width())).div_euclid(2) + shift(self.options.offset_x);
        let y = (i64::from(side) - i64::from(resized.height())).div_euclid(2) + shift(self.options.offset_y);
        imageops::overlay(&mut canvas, &resized, x, y);

        debug!(
            width = resized.width(),
            height = resized.height(),
            x,
            y,
            "composed canvas"
        );
        Ok(canvas)
    }
}
