use nalgebra::DMatrix;
use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::grid::{ensure_same_shape, InclusionMask};
use crate::math::Point3;
use crate::relief::HeightField;

use super::Mesh;

/// Turns a height field and an inclusion mask into a closed triangle mesh.
///
/// Every masked cell `(i, j)` with `i < rows - 1` and `j < cols - 1` is an
/// *anchor*: it owns the prism spanned by grid nodes `(i, j)`, `(i, j + 1)`,
/// `(i + 1, j)` and `(i + 1, j + 1)`, with a relief top and a flat bottom at
/// `z = 0`. The last row and column are never anchors. A side wall is emitted
/// exactly where the neighbouring cell is not an anchor, whether because it is
/// unmasked, off the grid, or on that last row or column. Adjacent anchors
/// share their seam, so each connected blob closes into one shell.
pub struct BuildManifold<'a> {
    field: &'a HeightField,
    mask: &'a InclusionMask,
}

impl<'a> BuildManifold<'a> {
    /// Creates a new `BuildManifold` operation.
    #[must_use]
    pub fn new(field: &'a HeightField, mask: &'a InclusionMask) -> Self {
        Self { field, mask }
    }

    /// Executes the tessellation.
    ///
    /// Corners on masked nodes use their own height. A corner on an unmasked
    /// node takes the tallest height among the anchors meeting at it, so the
    /// rim of the solid never collapses onto its base.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::DimensionMismatch`] if the mask
    /// and height field differ in shape, [`GeometryError::EmptyGeometry`] if
    /// there is no anchor cell, and [`GeometryError::NonPositiveHeight`] if an
    /// anchor corner resolves to a height that is not finite and positive.
    pub fn execute(&self) -> Result<Mesh> {
        ensure_same_shape(self.field.shape(), self.mask.shape())?;

        let anchors = self.anchor_cells();
        if anchors.is_empty() {
            return Err(GeometryError::EmptyGeometry.into());
        }

        let corner_z = self.corner_heights();
        let mut mesh = Mesh::with_capacity(anchors.len() * 6);
        let mut walls = 0usize;

        for &(i, j) in &anchors {
            let nodes = [(i, j), (i, j + 1), (i + 1, j), (i + 1, j + 1)];
            let mut top = [Point3::origin(); 4];
            let mut bottom = [Point3::origin(); 4];
            for (k, &(r, c)) in nodes.iter().enumerate() {
                let z = corner_z[(r, c)];
                if !(z.is_finite() && z > 0.0) {
                    return Err(GeometryError::NonPositiveHeight {
                        row: r,
                        col: c,
                        height: z,
                    }
                    .into());
                }
                let (x, y) = (self.field.x_at(c), self.field.y_at(r));
                top[k] = Point3::new(x, y, z);
                bottom[k] = Point3::new(x, y, 0.0);
            }
            let [t0, t1, t2, t3] = top;
            let [b0, b1, b2, b3] = bottom;

            mesh.push(t0, t2, t3);
            mesh.push(t0, t3, t1);
            mesh.push(b0, b3, b2);
            mesh.push(b0, b1, b3);

            // North: edge 0–1, faces +y.
            if !i.checked_sub(1).is_some_and(|r| self.is_anchor(r, j)) {
                mesh.push(t0, t1, b1);
                mesh.push(t0, b1, b0);
                walls += 1;
            }
            // South: edge 2–3, faces −y.
            if !self.is_anchor(i + 1, j) {
                mesh.push(t2, b3, t3);
                mesh.push(t2, b2, b3);
                walls += 1;
            }
            // West: edge 0–2, faces −x.
            if !j.checked_sub(1).is_some_and(|c| self.is_anchor(i, c)) {
                mesh.push(t0, b2, t2);
                mesh.push(t0, b0, b2);
                walls += 1;
            }
            // East: edge 1–3, faces +x.
            if !self.is_anchor(i, j + 1) {
                mesh.push(t1, t3, b3);
                mesh.push(t1, b3, b1);
                walls += 1;
            }
        }

        debug!(
            anchors = anchors.len(),
            walls,
            triangles = mesh.len(),
            "built manifold mesh"
        );
        Ok(mesh)
    }

    /// Whether `(row, col)` owns a prism.
    fn is_anchor(&self, row: usize, col: usize) -> bool {
        let (rows, cols) = self.mask.shape();
        row + 1 < rows && col + 1 < cols && self.mask[(row, col)]
    }

    /// Anchor cells in row-major order.
    fn anchor_cells(&self) -> Vec<(usize, usize)> {
        let (rows, cols) = self.mask.shape();
        (0..rows.saturating_sub(1))
            .flat_map(|i| (0..cols.saturating_sub(1)).map(move |j| (i, j)))
            .filter(|&(i, j)| self.mask[(i, j)])
            .collect()
    }

    /// Resolved top height of every grid node; `NaN` where no anchor meets.
    fn corner_heights(&self) -> DMatrix<f64> {
        let (rows, cols) = self.mask.shape();
        DMatrix::from_fn(rows, cols, |r, c| {
            if self.mask[(r, c)] {
                return self.field.at(r, c);
            }
            let row_range = r.saturating_sub(1)..=r;
            row_range
                .flat_map(|ar| (c.saturating_sub(1)..=c).map(move |ac| (ar, ac)))
                .filter(|&(ar, ac)| self.is_anchor(ar, ac))
                .map(|(ar, ac)| self.field.at(ar, ac))
                .fold(f64::NAN, f64::max)
        })
    }
}
