//! Inclusion masks from implicit shape equations or from a drawn contour.

mod contour;
pub mod flood_fill;
mod region;
mod shape;

pub use contour::{smooth, ColorPredicate, ContourColor, ContourMasks, SegmentContour};
pub use region::{solid_mask, RegionClass, RegionMap};
pub use shape::{FramedMasks, ShapeKind, ShapeMasks};
