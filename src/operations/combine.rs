use crate::tessellation::Mesh;

/// Naive union of two meshes: the triangles of `a` followed by those of `b`.
///
/// No boolean union is computed and overlaps are not detected; callers place
/// the parts with [`super::transform::Translate`] and
/// [`super::transform::Rotate`] so they do not intersect.
#[must_use]
pub fn concatenate(mut a: Mesh, b: &Mesh) -> Mesh {
    a.merge(b);
    a
}
