//! Property-based tests for mask rasterisation, height mapping and meshing.
//!
//! Run with: cargo test --test manifold_properties

use lithomesh::error::{GeometryError, LithoError};
use lithomesh::masking::{ShapeKind, ShapeMasks};
use lithomesh::math::grid::InclusionMask;
use lithomesh::math::{Axis, Point3};
use lithomesh::operations::query::{CheckManifold, Volume};
use lithomesh::operations::transform::Rotate;
use lithomesh::relief::{HeightField, ReliefParams};
use lithomesh::tessellation::{BuildManifold, ExtrudeCells};
use lithomesh::{LithoConfig, Mesh};
use nalgebra::DMatrix;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A random mask with matching random positive heights.
fn arb_grid(max_side: usize) -> impl Strategy<Value = (InclusionMask, DMatrix<f64>)> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(rows, cols)| {
        let n = rows * cols;
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(0.2..6.0f64, n),
        )
            .prop_map(move |(cells, heights)| {
                (
                    InclusionMask::from_row_slice(rows, cols, &cells),
                    DMatrix::from_row_slice(rows, cols, &heights),
                )
            })
    })
}

fn arb_shape() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![
        Just(ShapeKind::Circle),
        Just(ShapeKind::Square),
        Just(ShapeKind::Heart),
    ]
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

fn has_anchor(mask: &InclusionMask) -> bool {
    let (rows, cols) = mask.shape();
    (0..rows.saturating_sub(1)).any(|i| (0..cols.saturating_sub(1)).any(|j| mask[(i, j)]))
}

fn is_subset(inner: &InclusionMask, outer: &InclusionMask) -> bool {
    inner.iter().zip(outer.iter()).all(|(&a, &b)| !a || b)
}

fn tetra_fan() -> Mesh {
    let p = Point3::new;
    let mut mesh = Mesh::new();
    mesh.push(p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 0.0, 0.0));
    mesh.push(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 0.0, 1.0));
    mesh.push(p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 0.0));
    mesh.push(p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0));
    mesh
}

// =============================================================================
// Mesh builder
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any mask yields either an empty-geometry error or a leak-free solid.
    #[test]
    #[allow(clippy::unwrap_used)]
    fn random_masks_give_leak_free_solids((mask, heights) in arb_grid(9)) {
        let field = HeightField::new(heights, 10.0, 7.0);
        let result = BuildManifold::new(&field, &mask).execute();

        if has_anchor(&mask) {
            let mesh = result.unwrap();
            let report = CheckManifold::new(&mesh).execute();
            prop_assert_eq!(report.boundary_edges, 0);
            prop_assert!(report.is_balanced(), "{:?}", report);
            prop_assert!(Volume::new(&mesh).execute() > 0.0);
            prop_assert!(mesh.points().all(|p| p.z >= 0.0));
        } else {
            prop_assert!(matches!(
                result,
                Err(LithoError::Geometry(GeometryError::EmptyGeometry))
            ));
        }
    }

    /// A full rectangle is a single box-like shell: 4 triangles per anchor
    /// for top and bottom plus 2 per rim edge.
    #[test]
    #[allow(clippy::unwrap_used)]
    fn full_rectangle_is_closed(rows in 2usize..12, cols in 2usize..12, z in 0.5..4.0f64) {
        let mask = InclusionMask::from_element(rows, cols, true);
        let field = HeightField::new(DMatrix::from_element(rows, cols, z), 5.0, 3.0);
        let mesh = BuildManifold::new(&field, &mask).execute().unwrap();

        let (a, b) = (rows - 1, cols - 1);
        prop_assert_eq!(mesh.len(), 4 * a * b + 4 * (a + b));
        prop_assert!(CheckManifold::new(&mesh).execute().is_closed());
        prop_assert!((Volume::new(&mesh).execute() - 15.0 * z).abs() < 1e-9);
    }

    /// Independently extruded cells never leak and add up to their area.
    #[test]
    #[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
    fn extruded_cells_add_up((mask, _) in arb_grid(7), axis in arb_axis(), t in 0.1..5.0f64) {
        let config = LithoConfig { px_per_mm: 2.0, ..LithoConfig::default() };
        let cells = mask.iter().filter(|&&set| set).count();
        prop_assume!(cells > 0);

        let mesh = ExtrudeCells::new(&mask, t, axis).execute(&config).unwrap();
        let report = CheckManifold::new(&mesh).execute();
        prop_assert_eq!(report.boundary_edges, 0);
        prop_assert!(report.is_balanced());
        let expected = cells as f64 * 0.25 * t;
        prop_assert!((Volume::new(&mesh).execute() - expected).abs() < 1e-9);
    }
}

// =============================================================================
// Masks and height mapping
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The inset never leaves the outline, and a wider frame never grows it.
    #[test]
    #[allow(clippy::unwrap_used)]
    fn inset_shrinks_with_frame_width(
        kind in arb_shape(),
        size in 8usize..48,
        narrow in 0.0..5.0f64,
        extra in 0.0..2.0f64,
    ) {
        let config = LithoConfig::default();
        let a = ShapeMasks::new(kind, size, narrow).execute(&config).unwrap();
        let b = ShapeMasks::new(kind, size, narrow + extra).execute(&config).unwrap();

        prop_assert!(is_subset(&a.inner, &a.outer));
        prop_assert!(is_subset(&b.inner, &b.outer));
        prop_assert_eq!(&a.outer, &b.outer);
        prop_assert!(is_subset(&b.inner, &a.inner));
    }

    /// Darker never means thinner, and every height stays within bounds.
    #[test]
    fn relief_is_monotonic(l1 in 0.0..=1.0f64, l2 in 0.0..=1.0f64, base in 0.0..1.0f64) {
        let config = LithoConfig::default();
        let params = ReliefParams::from_config(&config).with_base(base);
        let (dark, light) = if l1 <= l2 { (l1, l2) } else { (l2, l1) };

        prop_assert!(params.relief(dark) >= params.relief(light));
        let flipped = params.with_invert(false);
        prop_assert!(flipped.relief(dark) <= flipped.relief(light));

        for l in [l1, l2] {
            let h = params.relief(l);
            prop_assert!(h >= base + config.litho_min_mm - 1e-12);
            prop_assert!(h <= base + config.litho_max_mm + 1e-12);
        }
    }
}

// =============================================================================
// Transforms
// =============================================================================

proptest! {
    /// Rotating forth and back restores every vertex.
    #[test]
    fn rotation_round_trips(
        axis in arb_axis(),
        degrees in -720.0..720.0f64,
        pivot in prop::array::uniform3(-50.0..50.0f64),
    ) {
        let original = tetra_fan();
        let pivot = Point3::new(pivot[0], pivot[1], pivot[2]);
        let mut mesh = original.clone();
        Rotate::new(axis, degrees).with_pivot(pivot).execute(&mut mesh);
        Rotate::new(axis, -degrees).with_pivot(pivot).execute(&mut mesh);

        for (a, b) in mesh.points().zip(original.points()) {
            prop_assert!((a - b).norm() < 1e-6, "{} vs {}", a, b);
        }
    }
}
