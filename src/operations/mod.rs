//! Operations on finished meshes: placement, combination and inspection.

mod combine;
pub mod query;
pub mod transform;

pub use combine::concatenate;
