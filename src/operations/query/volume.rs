use crate::tessellation::Mesh;

/// Computes the enclosed volume of a closed mesh.
///
/// Sums the signed tetrahedra `(1/6) · v0 · (v1 × v2)` over all triangles.
/// The result is positive when the triangles face outward and negative when
/// the whole mesh is inside out; it is only meaningful for closed meshes.
pub struct Volume<'a> {
    mesh: &'a Mesh,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the signed volume.
    #[must_use]
    pub fn execute(&self) -> f64 {
        let signed: f64 = self
            .mesh
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices;
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum();
        signed / 6.0
    }
}
