use crate::math::Vector3;
use crate::tessellation::Mesh;

/// Translates a mesh by a displacement vector.
pub struct Translate {
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector3) -> Self {
        Self { displacement }
    }

    /// Creates a `Translate` from its components in millimetres.
    #[must_use]
    pub fn by(dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(Vector3::new(dx, dy, dz))
    }

    /// Executes the translation, modifying the mesh in-place.
    ///
    /// Adds the displacement directly, so a zero vector leaves every
    /// coordinate unchanged.
    pub fn execute(&self, mesh: &mut Mesh) {
        for triangle in &mut mesh.triangles {
            for vertex in &mut triangle.vertices {
                *vertex += self.displacement;
            }
        }
    }
}
