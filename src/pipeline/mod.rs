//! End-to-end conversions from raster input to a printable mesh.

mod contour;
mod plaque;
mod shape;

pub use contour::ContourLithophane;
pub use plaque::{Plaque, PlaqueParams};
pub use shape::ShapeLithophane;
