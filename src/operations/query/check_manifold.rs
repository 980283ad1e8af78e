use std::collections::HashMap;

use crate::math::Point3;
use crate::tessellation::Mesh;

/// Exact bit pattern of a vertex; `-0.0` is folded into `0.0`.
type VertexKey = [u64; 3];

/// Edge usage statistics of a triangle soup.
///
/// Vertices are matched by exact coordinates, which is sound for meshes whose
/// shared corners are computed identically, as the builders here guarantee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct undirected edges.
    pub edges: usize,
    /// Edges used by exactly one triangle (holes in the surface).
    pub boundary_edges: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edges: usize,
    /// Edges not traversed equally often in both directions.
    pub unbalanced_edges: usize,
}

impl EdgeReport {
    /// Every edge is shared by exactly two triangles with opposite winding.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0 && self.unbalanced_edges == 0
    }

    /// Every edge is traversed as often forwards as backwards.
    ///
    /// Weaker than [`Self::is_closed`]: a surface pinched at an edge still
    /// encloses a leak-free volume.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.unbalanced_edges == 0
    }
}

/// Counts how each edge of a mesh is shared between triangles.
pub struct CheckManifold<'a> {
    mesh: &'a Mesh,
}

impl<'a> CheckManifold<'a> {
    /// Creates a new `CheckManifold` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> EdgeReport {
        // Per undirected edge: uses in ascending and descending key order.
        let mut uses: HashMap<(VertexKey, VertexKey), (usize, usize)> = HashMap::new();
        for triangle in self.mesh {
            let keys = triangle.vertices.map(|p| vertex_key(&p));
            for k in 0..3 {
                let (a, b) = (keys[k], keys[(k + 1) % 3]);
                if a == b {
                    continue;
                }
                if a < b {
                    uses.entry((a, b)).or_default().0 += 1;
                } else {
                    uses.entry((b, a)).or_default().1 += 1;
                }
            }
        }

        let mut report = EdgeReport {
            edges: uses.len(),
            ..EdgeReport::default()
        };
        for &(forward, backward) in uses.values() {
            match forward + backward {
                1 => report.boundary_edges += 1,
                2 => {}
                _ => report.non_manifold_edges += 1,
            }
            if forward != backward {
                report.unbalanced_edges += 1;
            }
        }
        report
    }
}

fn vertex_key(p: &Point3) -> VertexKey {
    // `-0.0 + 0.0` is `+0.0`.
    let bits = |v: f64| (v + 0.0).to_bits();
    [bits(p.x), bits(p.y), bits(p.z)]
}
