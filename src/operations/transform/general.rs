use crate::math::{Matrix4, Point3};
use crate::tessellation::Mesh;

/// Applies an arbitrary 4x4 transformation matrix to every vertex of a mesh.
pub struct GeneralTransform {
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Executes the transformation, modifying the mesh in-place.
    ///
    /// Triangle order and vertex order within each triangle are kept, so a
    /// matrix with negative determinant turns the mesh inside out.
    pub fn execute(&self, mesh: &mut Mesh) {
        for triangle in &mut mesh.triangles {
            for vertex in &mut triangle.vertices {
                *vertex = transform_point(&self.matrix, vertex);
            }
        }
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}
