//! Mesh serialisation.

mod stl;

pub use stl::write_stl_binary;
