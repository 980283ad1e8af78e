use tracing::debug;

use crate::config::{check_range, LithoConfig};
use crate::error::{GeometryError, Result};
use crate::math::grid::{count_set, InclusionMask};
use crate::math::{Axis, Point3};

use super::Mesh;

/// Extrudes every set cell of a mask into its own closed box.
///
/// Unlike [`super::BuildManifold`], neighbouring boxes do not share seams:
/// each box keeps all six faces, so adjacent cells leave coincident internal
/// faces behind. Every box is closed and outward-facing on its own; the cost
/// is twelve triangles per cell regardless of neighbours.
///
/// Rows are mirrored, so row 0 lies farthest from the origin. With
/// [`Axis::Z`] columns map to `x` and rows to `y`; with [`Axis::X`] rows map
/// to `y` and columns to `z`, standing the mask upright; with [`Axis::Y`]
/// rows map to `x` and columns to `z`.
pub struct ExtrudeCells<'a> {
    mask: &'a InclusionMask,
    thickness: f64,
    axis: Axis,
}

impl<'a> ExtrudeCells<'a> {
    /// Creates a new `ExtrudeCells` operation.
    #[must_use]
    pub fn new(mask: &'a InclusionMask, thickness: f64, axis: Axis) -> Self {
        Self {
            mask,
            thickness,
            axis,
        }
    }

    /// Executes the extrusion. Cells are `1 / px_per_mm` wide.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::ParameterOutOfRange`] for a
    /// non-positive thickness and [`GeometryError::EmptyGeometry`] if no cell
    /// is set.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, config: &LithoConfig) -> Result<Mesh> {
        check_range("thickness", self.thickness, f64::MIN_POSITIVE, f64::MAX)?;
        let cells = count_set(self.mask);
        if cells == 0 {
            return Err(GeometryError::EmptyGeometry.into());
        }

        let cell = 1.0 / config.px_per_mm;
        let rows = self.mask.nrows();
        let mut mesh = Mesh::with_capacity(cells * 12);
        for i in 0..rows {
            for j in 0..self.mask.ncols() {
                if !self.mask[(i, j)] {
                    continue;
                }
                let col = (j as f64 * cell, (j + 1) as f64 * cell);
                let row = ((rows - 1 - i) as f64 * cell, (rows - i) as f64 * cell);
                let (u, v) = match self.axis {
                    Axis::X => (row, col),
                    Axis::Y | Axis::Z => (col, row),
                };
                self.push_box(&mut mesh, u, v, (0.0, self.thickness));
            }
        }

        debug!(cells, axis = ?self.axis, triangles = mesh.len(), "extruded independent cells");
        Ok(mesh)
    }

    /// Emits an outward-facing box over `u × v × w` in local coordinates.
    fn push_box(&self, mesh: &mut Mesh, (u0, u1): (f64, f64), (v0, v1): (f64, f64), (w0, w1): (f64, f64)) {
        let p = |u: f64, v: f64, w: f64| self.to_world(u, v, w);

        mesh.push_quad(p(u0, v0, w0), p(u0, v1, w0), p(u1, v1, w0), p(u1, v0, w0));
        mesh.push_quad(p(u0, v0, w1), p(u1, v0, w1), p(u1, v1, w1), p(u0, v1, w1));
        mesh.push_quad(p(u0, v0, w0), p(u0, v0, w1), p(u0, v1, w1), p(u0, v1, w0));
        mesh.push_quad(p(u1, v0, w0), p(u1, v1, w0), p(u1, v1, w1), p(u1, v0, w1));
        mesh.push_quad(p(u0, v0, w0), p(u1, v0, w0), p(u1, v0, w1), p(u0, v0, w1));
        mesh.push_quad(p(u0, v1, w0), p(u0, v1, w1), p(u1, v1, w1), p(u1, v1, w0));
    }

    /// Cyclic permutation, so orientation is preserved.
    fn to_world(&self, u: f64, v: f64, w: f64) -> Point3 {
        match self.axis {
            Axis::Z => Point3::new(u, v, w),
            Axis::X => Point3::new(w, u, v),
            Axis::Y => Point3::new(v, w, u),
        }
    }
}
