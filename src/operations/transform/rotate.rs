use crate::math::{Axis, Matrix4, Point3, Vector3};
use crate::tessellation::Mesh;

use super::GeneralTransform;

/// Rotates a mesh about one of the model axes.
pub struct Rotate {
    axis: Axis,
    degrees: f64,
    pivot: Option<Point3>,
}

impl Rotate {
    /// Creates a new `Rotate` operation about the origin.
    ///
    /// * `degrees` - Rotation angle in degrees, counter-clockwise looking down
    ///   the axis toward the origin.
    #[must_use]
    pub fn new(axis: Axis, degrees: f64) -> Self {
        Self {
            axis,
            degrees,
            pivot: None,
        }
    }

    /// Rotates about `pivot` instead of the origin.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Point3) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// The homogeneous matrix of this rotation, pivot included.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        let rot = rotation_matrix(&self.axis.unit(), self.degrees.to_radians());
        match self.pivot {
            // Translate to origin, rotate, translate back
            Some(pivot) => {
                let t_neg = Matrix4::new_translation(&(-pivot.coords));
                let t_pos = Matrix4::new_translation(&pivot.coords);
                t_pos * rot * t_neg
            }
            None => rot,
        }
    }

    /// Executes the rotation, modifying the mesh in-place.
    pub fn execute(&self, mesh: &mut Mesh) {
        GeneralTransform::new(self.matrix()).execute(mesh);
    }
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[allow(clippy::many_single_char_names)]
fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}
