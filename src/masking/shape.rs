use std::str::FromStr;

use tracing::debug;

use crate::config::LithoConfig;
use crate::error::{ConfigError, Result};
use crate::math::grid::{count_set, linspace_at, InclusionMask};

use super::region::{RegionClass, RegionMap};

/// Radius of the circle in normalised units.
const CIRCLE_RADIUS: f64 = 1.3;

/// Half side length of the square in normalised units.
const SQUARE_HALF_SIDE: f64 = 1.3;

/// Vertical lobe shift `k` in `x² + (y − k·√|x|)² ≤ R²`.
const HEART_LOBE: f64 = 0.6;

/// Right-hand side `R²` of the heart inequality.
const HEART_RADIUS_SQ: f64 = 1.6;

/// The heart's curvature makes a uniform offset look thinner at the lobes.
const HEART_OFFSET_CORRECTION: f64 = 1.8;

/// The outline of a framed lithophane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Heart,
}

impl ShapeKind {
    /// Whether the normalised point `(x, y)` lies inside the outline shrunk
    /// inward by `offset` normalised units.
    fn contains(self, x: f64, y: f64, offset: f64) -> bool {
        match self {
            Self::Circle => {
                let radius = (CIRCLE_RADIUS - offset).max(0.0);
                x * x + y * y <= radius * radius
            }
            Self::Square => {
                let half = SQUARE_HALF_SIDE - offset;
                x.abs() <= half && y.abs() <= half
            }
            Self::Heart => {
                let lifted = y - HEART_LOBE * x.abs().sqrt();
                x * x + lifted * lifted <= HEART_RADIUS_SQ - offset * HEART_OFFSET_CORRECTION
            }
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "heart" => Ok(Self::Heart),
            _ => Err(ConfigError::InvalidShape(s.to_owned())),
        }
    }
}

/// Outer outline and inset inner outline of a framed shape.
///
/// `inner` is always a subset of `outer`; the cells in between form the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramedMasks {
    pub outer: InclusionMask,
    pub inner: InclusionMask,
}

impl FramedMasks {
    /// Classifies every cell as exterior, frame or interior.
    #[must_use]
    pub fn regions(&self) -> RegionMap {
        RegionClass::classify(&self.outer, &self.inner)
    }
}

/// Rasterises an implicit shape equation into framed inclusion masks.
pub struct ShapeMasks {
    kind: ShapeKind,
    size: usize,
    frame_width_mm: f64,
}

impl ShapeMasks {
    /// Creates a new `ShapeMasks` operation over a `size × size` grid.
    #[must_use]
    pub fn new(kind: ShapeKind, size: usize, frame_width_mm: f64) -> Self {
        Self {
            kind,
            size,
            frame_width_mm,
        }
    }

    /// Executes the rasterisation.
    ///
    /// Row 0 is the top of the shape; columns run left to right.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParameterOutOfRange`] if the frame width is
    /// negative or not finite.
    pub fn execute(&self, config: &LithoConfig) -> Result<FramedMasks> {
        if !(self.frame_width_mm.is_finite() && self.frame_width_mm >= 0.0) {
            return Err(ConfigError::ParameterOutOfRange {
                parameter: "frame_width_mm",
                value: self.frame_width_mm,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }

        let range = config.shape_range;
        let offset = self.frame_width_mm * config.units_per_mm();
        let n = self.size;
        let coord = |i: usize, j: usize| (linspace_at(-range, range, n, j), -linspace_at(-range, range, n, i));

        let outer = InclusionMask::from_fn(n, n, |i, j| {
            let (x, y) = coord(i, j);
            self.kind.contains(x, y, 0.0)
        });
        let inner = InclusionMask::from_fn(n, n, |i, j| {
            let (x, y) = coord(i, j);
            outer[(i, j)] && self.kind.contains(x, y, offset)
        });

        debug!(
            kind = ?self.kind,
            size = n,
            outer = count_set(&outer),
            inner = count_set(&inner),
            "rasterised shape masks"
        );
        Ok(FramedMasks { outer, inner })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LithoError;

    const KINDS: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Heart];

    fn is_subset(inner: &InclusionMask, outer: &InclusionMask) -> bool {
        inner.iter().zip(outer.iter()).all(|(&i, &o)| !i || o)
    }

    #[test]
    fn parses_shape_names() {
        assert_eq!("circle".parse::<ShapeKind>().unwrap(), ShapeKind::Circle);
        assert_eq!("Square".parse::<ShapeKind>().unwrap(), ShapeKind::Square);
        assert_eq!(" HEART".parse::<ShapeKind>().unwrap(), ShapeKind::Heart);
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = "hexagon".parse::<ShapeKind>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape(ref name) if name == "hexagon"));
    }

    #[test]
    fn inner_is_subset_of_outer() {
        let config = LithoConfig::default();
        for kind in KINDS {
            for frame in [0.0, 2.0, 3.5, 5.0, 40.0] {
                let masks = ShapeMasks::new(kind, 90, frame).execute(&config).unwrap();
                assert!(is_subset(&masks.inner, &masks.outer), "{kind:?} frame={frame}");
            }
        }
    }

    #[test]
    fn zero_frame_gives_identical_masks() {
        let config = LithoConfig::default();
        for kind in KINDS {
            let masks = ShapeMasks::new(kind, 64, 0.0).execute(&config).unwrap();
            assert_eq!(masks.inner, masks.outer, "{kind:?}");
        }
    }

    #[test]
    fn frame_band_is_non_empty() {
        let config = LithoConfig::default();
        for kind in KINDS {
            let masks = ShapeMasks::new(kind, 90, 3.0).execute(&config).unwrap();
            assert!(count_set(&masks.inner) < count_set(&masks.outer), "{kind:?}");
            assert!(count_set(&masks.inner) > 0, "{kind:?}");
        }
    }

    #[test]
    fn circle_is_centered_and_clipped_at_corners() {
        let config = LithoConfig::default();
        let masks = ShapeMasks::new(ShapeKind::Circle, 101, 2.0).execute(&config).unwrap();
        assert!(masks.outer[(50, 50)]);
        assert!(masks.inner[(50, 50)]);
        assert!(!masks.outer[(0, 0)]);
        assert!(!masks.outer[(100, 100)]);
    }

    #[test]
    fn heart_points_downward() {
        let config = LithoConfig::default();
        let masks = ShapeMasks::new(ShapeKind::Heart, 101, 2.0).execute(&config).unwrap();
        // The notch between the lobes sits above the centre; the tip below it.
        let top_middle = (0..50).find(|&i| masks.outer[(i, 50)]).unwrap();
        let top_lobe = (0..50).find(|&i| masks.outer[(i, 70)]).unwrap();
        assert!(top_lobe < top_middle);
    }

    #[test]
    fn negative_frame_width_is_rejected() {
        let err = ShapeMasks::new(ShapeKind::Square, 16, -1.0)
            .execute(&LithoConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            LithoError::Config(ConfigError::ParameterOutOfRange { .. })
        ));
    }
}
