use nalgebra::DMatrix;

use crate::error::ConfigError;

/// Boolean grid marking which cells belong to the solid, indexed `(row, col)`.
pub type InclusionMask = DMatrix<bool>;

/// Number of `true` cells in a mask.
#[must_use]
pub fn count_set(mask: &InclusionMask) -> usize {
    mask.iter().filter(|&&set| set).count()
}

/// Returns an error unless `found` has the same `(rows, cols)` as `expected`.
///
/// # Errors
///
/// Returns [`ConfigError::DimensionMismatch`] when the shapes differ.
pub fn ensure_same_shape(
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), ConfigError> {
    if expected == found {
        Ok(())
    } else {
        Err(ConfigError::DimensionMismatch { expected, found })
    }
}

/// The `index`-th of `count` evenly spaced samples over `[start, end]`.
///
/// Both ends are included; a single sample sits at `start`. The value depends
/// only on its arguments, so neighbouring cells that share a grid line always
/// compute bit-identical coordinates.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace_at(start: f64, end: f64, count: usize, index: usize) -> f64 {
    if count < 2 {
        return start;
    }
    start + (end - start) * (index as f64) / ((count - 1) as f64)
}
