use thiserror::Error;

/// Top-level error type for the lithophane mesh engine.
#[derive(Debug, Error)]
pub enum LithoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("failed to write mesh: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors caused by invalid caller-supplied parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown shape kind: {0:?}")]
    InvalidShape(String),

    #[error("unknown axis: {0:?}")]
    InvalidAxis(String),

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("grid dimensions differ: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Errors raised while deriving a mask from a drawn contour.
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("no pixel matches the contour color")]
    NoContourFound,

    #[error("the contour does not enclose any interior pixel")]
    EmptyInterior,
}

/// Errors raised while building a mesh.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("mask selects no tessellable cell")]
    EmptyGeometry,

    #[error("corner ({row}, {col}) has non-positive height {height}")]
    NonPositiveHeight { row: usize, col: usize, height: f64 },
}

/// Convenience type alias for results using [`LithoError`].
pub type Result<T> = std::result::Result<T, LithoError>;
