use nalgebra::DMatrix;

use crate::math::grid::InclusionMask;

/// Per-cell role in the final solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionClass {
    /// Outside the solid; height 0 and never tessellated.
    #[default]
    Exterior,
    /// Relief whose height follows the luminance.
    Interior,
    /// Flat structural band at a fixed height.
    Frame,
}

/// Grid of [`RegionClass`] values, indexed `(row, col)`.
pub type RegionMap = DMatrix<RegionClass>;

impl RegionClass {
    /// Combines an outline and its inset: `outer ∧ ¬inner` is frame, `inner`
    /// is interior, everything else exterior.
    ///
    /// Both masks must have the same shape; `inner` cells outside `outer` are
    /// treated as exterior.
    #[must_use]
    pub fn classify(outer: &InclusionMask, inner: &InclusionMask) -> RegionMap {
        RegionMap::from_fn(outer.nrows(), outer.ncols(), |i, j| {
            match (outer[(i, j)], inner[(i, j)]) {
                (true, true) => Self::Interior,
                (true, false) => Self::Frame,
                (false, _) => Self::Exterior,
            }
        })
    }

    /// Combines the result of contour segmentation: border pixels form the
    /// frame and enclosed pixels the interior.
    #[must_use]
    pub fn classify_segmentation(border: &InclusionMask, interior: &InclusionMask) -> RegionMap {
        RegionMap::from_fn(border.nrows(), border.ncols(), |i, j| {
            if border[(i, j)] {
                Self::Frame
            } else if interior[(i, j)] {
                Self::Interior
            } else {
                Self::Exterior
            }
        })
    }

    /// Whether this cell is part of the solid.
    #[must_use]
    pub fn is_solid(self) -> bool {
        self != Self::Exterior
    }
}

/// The semantic inclusion mask of a region map: every non-exterior cell.
#[must_use]
pub fn solid_mask(regions: &RegionMap) -> InclusionMask {
    regions.map(RegionClass::is_solid)
}
