use image::{GrayImage, RgbImage};
use nalgebra::DMatrix;

/// ITU-R BT.601 luma weights.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Normalised luminance `[0, 1]` of a grayscale raster, indexed `(row, col)`.
#[must_use]
pub fn luminance_from_gray(image: &GrayImage) -> DMatrix<f64> {
    let (width, height) = image.dimensions();
    DMatrix::from_fn(height as usize, width as usize, |i, j| {
        #[allow(clippy::cast_possible_truncation)]
        let pixel = image.get_pixel(j as u32, i as u32);
        f64::from(pixel.0[0]) / 255.0
    })
}

/// Normalised BT.601 luminance `[0, 1]` of an RGB raster.
#[must_use]
pub fn luminance_from_rgb(image: &RgbImage) -> DMatrix<f64> {
    let (width, height) = image.dimensions();
    DMatrix::from_fn(height as usize, width as usize, |i, j| {
        #[allow(clippy::cast_possible_truncation)]
        let pixel = image.get_pixel(j as u32, i as u32);
        let luma: f64 = pixel
            .0
            .iter()
            .zip(LUMA_WEIGHTS)
            .map(|(&c, w)| f64::from(c) * w)
            .sum();
        luma / 255.0
    })
}
