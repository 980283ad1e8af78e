pub mod canvas;
pub mod config;
pub mod error;
pub mod io;
pub mod masking;
pub mod math;
pub mod operations;
pub mod pipeline;
pub mod relief;
pub mod tessellation;

pub use config::{LithoConfig, ShapeOptions};
pub use error::{LithoError, Result};
pub use tessellation::{Mesh, Triangle};
