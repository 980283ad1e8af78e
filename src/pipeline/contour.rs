use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::{debug, info};

use crate::config::LithoConfig;
use crate::error::Result;
use crate::masking::{solid_mask, ContourColor, RegionClass, SegmentContour};
use crate::relief::{luminance_from_rgb, MapHeights, ReliefParams};
use crate::tessellation::{BuildManifold, Mesh};

/// Builds a lithophane whose outline is drawn onto the image itself.
///
/// Pixels of the contour color become a flat frame; the area they enclose
/// carries the relief, raised by `base_mm` so thin regions stay printable.
pub struct ContourLithophane<'a> {
    image: &'a RgbImage,
    color: ContourColor,
}

impl<'a> ContourLithophane<'a> {
    /// Creates a new `ContourLithophane` operation looking for a red contour.
    #[must_use]
    pub fn new(image: &'a RgbImage) -> Self {
        Self {
            image,
            color: ContourColor::default(),
        }
    }

    /// Sets the channel thresholds of the contour color.
    #[must_use]
    pub fn with_color(mut self, color: ContourColor) -> Self {
        self.color = color;
        self
    }

    /// Executes the conversion.
    ///
    /// An image that is not already `pixels × pixels` is resampled to the
    /// canvas first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SegmentationError`] if no closed contour is
    /// found and [`crate::error::ConfigError`] for an invalid configuration.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, config: &LithoConfig) -> Result<Mesh> {
        config.validate()?;
        let side = config.pixels() as u32;

        let resized;
        let image = if self.image.dimensions() == (side, side) {
            self.image
        } else {
            debug!(from = ?self.image.dimensions(), to = side, "resampling contour image");
            resized = imageops::resize(self.image, side, side, FilterType::Lanczos3);
            &resized
        };

        let masks = SegmentContour::new(image, self.color).execute()?;
        let regions = RegionClass::classify_segmentation(&masks.border, &masks.interior);
        let luminance = luminance_from_rgb(image);
        let params = ReliefParams::from_config(config).with_base(config.base_mm);
        let field = MapHeights::new(&luminance, &regions, params).execute(config)?;

        let mesh = BuildManifold::new(&field, &solid_mask(&regions)).execute()?;
        info!(triangles = mesh.len(), "built contour lithophane");
        Ok(mesh)
    }
}
