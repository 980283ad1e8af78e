mod bounding_box;
mod check_manifold;
mod volume;

pub use bounding_box::{Aabb, BoundingBox};
pub use check_manifold::{CheckManifold, EdgeReport};
pub use volume::Volume;
