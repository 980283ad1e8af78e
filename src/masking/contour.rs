use image::{Rgb, RgbImage};
use tracing::debug;

use crate::error::{Result, SegmentationError};
use crate::math::grid::{count_set, InclusionMask};

use super::flood_fill::enclosed_interior;

/// Minimum number of candidate pixels in a 3×3 window for its centre to stay
/// a border pixel after smoothing. A one-pixel stroke keeps three.
const SMOOTHING_MIN_NEIGHBORS: usize = 3;

/// Decides whether a pixel belongs to the drawn contour.
pub trait ColorPredicate {
    fn matches(&self, pixel: &Rgb<u8>) -> bool;
}

impl<F> ColorPredicate for F
where
    F: Fn(&Rgb<u8>) -> bool,
{
    fn matches(&self, pixel: &Rgb<u8>) -> bool {
        self(pixel)
    }
}

/// Channel thresholds for a saturated contour color; red by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourColor {
    pub min_red: u8,
    pub max_green: u8,
    pub max_blue: u8,
}

impl Default for ContourColor {
    fn default() -> Self {
        Self {
            min_red: 200,
            max_green: 60,
            max_blue: 60,
        }
    }
}

impl ColorPredicate for ContourColor {
    fn matches(&self, pixel: &Rgb<u8>) -> bool {
        let [r, g, b] = pixel.0;
        r > self.min_red && g < self.max_green && b < self.max_blue
    }
}

/// Border and enclosed interior derived from a drawn contour.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourMasks {
    pub border: InclusionMask,
    pub interior: InclusionMask,
}

/// Segments a raster by the region enclosed in a colored contour.
pub struct SegmentContour<'a, P> {
    image: &'a RgbImage,
    predicate: P,
}

impl<'a, P: ColorPredicate> SegmentContour<'a, P> {
    /// Creates a new `SegmentContour` operation.
    #[must_use]
    pub fn new(image: &'a RgbImage, predicate: P) -> Self {
        Self { image, predicate }
    }

    /// Executes the segmentation.
    ///
    /// Matching pixels are smoothed with a 3×3 neighbourhood vote, then
    /// everything the periphery can reach without crossing the border is
    /// exterior and the rest interior.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationError::NoContourFound`] if no pixel matches (or
    /// only isolated noise does), and [`SegmentationError::EmptyInterior`]
    /// if the contour encloses nothing.
    pub fn execute(&self) -> Result<ContourMasks> {
        let (width, height) = self.image.dimensions();
        let candidates = InclusionMask::from_fn(height as usize, width as usize, |i, j| {
            #[allow(clippy::cast_possible_truncation)]
            let pixel = self.image.get_pixel(j as u32, i as u32);
            self.predicate.matches(pixel)
        });
        let matched = count_set(&candidates);
        if matched == 0 {
            return Err(SegmentationError::NoContourFound.into());
        }

        let border = smooth(&candidates);
        let kept = count_set(&border);
        if kept == 0 {
            return Err(SegmentationError::NoContourFound.into());
        }

        let interior = enclosed_interior(&border);
        let enclosed = count_set(&interior);
        debug!(matched, kept, enclosed, "segmented contour");
        if enclosed == 0 {
            return Err(SegmentationError::EmptyInterior.into());
        }

        Ok(ContourMasks { border, interior })
    }
}

/// Local 3×3 average re-thresholded at [`SMOOTHING_MIN_NEIGHBORS`] / 9.
///
/// Only candidate cells can survive, so strokes never grow and gaps in the
/// outline are never bridged. Cells outside the grid count as non-border.
#[must_use]
pub fn smooth(mask: &InclusionMask) -> InclusionMask {
    let (rows, cols) = mask.shape();
    InclusionMask::from_fn(rows, cols, |i, j| {
        if !mask[(i, j)] {
            return false;
        }
        let mut votes = 0;
        for ni in i.saturating_sub(1)..=(i + 1).min(rows - 1) {
            for nj in j.saturating_sub(1)..=(j + 1).min(cols - 1) {
                if mask[(ni, nj)] {
                    votes += 1;
                }
            }
        }
        votes >= SMOOTHING_MIN_NEIGHBORS
    })
}
