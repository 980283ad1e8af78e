mod extrude_cells;
mod manifold;

pub use extrude_cells::ExtrudeCells;
pub use manifold::BuildManifold;

use crate::math::{Point3, Vector3, TOLERANCE};

/// One triangle; the vertex order gives the outward normal by the right-hand
/// rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3; 3],
}

impl Triangle {
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unit normal, or the zero vector for a degenerate triangle.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        let [a, b, c] = self.vertices;
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len < TOLERANCE {
            Vector3::zeros()
        } else {
            n / len
        }
    }

    /// Area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a)).norm() * 0.5
    }
}

/// An unordered triangle soup.
///
/// Built once per conversion and handed to the caller by value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, a: Point3, b: Point3, c: Point3) {
        self.triangles.push(Triangle::new(a, b, c));
    }

    /// Appends two triangles covering the quad `a b c d` (counter-clockwise
    /// seen from its front), split along `a–c`.
    pub fn push_quad(&mut self, a: Point3, b: Point3, c: Point3, d: Point3) {
        self.push(a, b, c);
        self.push(a, c, d);
    }

    /// Appends all triangles of `other`.
    pub fn merge(&mut self, other: &Mesh) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Every vertex of every triangle.
    pub fn points(&self) -> impl Iterator<Item = &Point3> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn ccw_triangle_faces_up() {
        let t = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        assert_relative_eq!(t.normal(), Vector3::z());
        assert_relative_eq!(t.area(), 0.5);
    }

    #[test]
    fn degenerate_triangle_has_zero_normal() {
        let t = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0));
        assert_eq!(t.normal(), Vector3::zeros());
    }

    #[test]
    fn quad_is_split_into_two_triangles() {
        let mut mesh = Mesh::new();
        mesh.push_quad(
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        );
        assert_eq!(mesh.len(), 2);
        for t in &mesh {
            assert_relative_eq!(t.normal(), Vector3::z());
        }
    }

    #[test]
    fn merge_appends() {
        let mut a = Mesh::new();
        a.push(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let b = a.clone();
        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.points().count(), 6);
    }
}
