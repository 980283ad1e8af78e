use nalgebra::DMatrix;
use tracing::info;

use crate::config::{check_range, LithoConfig};
use crate::error::Result;
use crate::math::grid::InclusionMask;
use crate::math::{Axis, Vector3};
use crate::operations::concatenate;
use crate::operations::transform::{Rotate, Translate};
use crate::relief::HeightField;
use crate::tessellation::{BuildManifold, ExtrudeCells, Mesh};

/// Dimensions of a [`Plaque`] in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaqueParams {
    /// Extent of the base block along `x`.
    pub base_width_mm: f64,
    /// Extent of the base block along `y`.
    pub base_depth_mm: f64,
    /// Extent of the base block along `z`.
    pub base_height_mm: f64,
    /// Extrusion depth of the panel.
    pub panel_thickness_mm: f64,
    /// Where the panel goes after it is turned around.
    pub panel_offset: Vector3,
}

impl Default for PlaqueParams {
    fn default() -> Self {
        Self {
            base_width_mm: 45.0,
            base_depth_mm: 20.0,
            base_height_mm: 90.0,
            panel_thickness_mm: 12.0,
            panel_offset: Vector3::new(45.0, 20.0, 90.0),
        }
    }
}

/// A solid block with an upright panel extruded from a mask, such as
/// rasterised lettering.
///
/// The panel is extruded along `x` with mask rows along `y` and columns along
/// `z`, turned 180° about `y` and moved by `panel_offset`, which leaves column
/// 0 at the top. Both parts are closed; the result is their plain
/// concatenation.
pub struct Plaque<'a> {
    panel: &'a InclusionMask,
    params: PlaqueParams,
}

impl<'a> Plaque<'a> {
    /// Creates a new `Plaque` operation with the default dimensions.
    ///
    /// Panel cells are `1 / px_per_mm` wide. With the defaults the panel
    /// raster is expected to be 225 × 450 cells at 5 px/mm: 45 mm beside the
    /// base along `y` and the full 90 mm height along `z`.
    #[must_use]
    pub fn new(panel: &'a InclusionMask) -> Self {
        Self {
            panel,
            params: PlaqueParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: PlaqueParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the construction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ConfigError::ParameterOutOfRange`] for a
    /// non-positive dimension or a panel taller than `panel_offset.z`, which
    /// would reach below the floor, and [`crate::error::GeometryError::EmptyGeometry`]
    /// if the base rasterises to fewer than two cells per side or the panel
    /// mask is empty.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn execute(&self, config: &LithoConfig) -> Result<Mesh> {
        config.validate()?;
        let p = &self.params;
        check_range("base_width_mm", p.base_width_mm, f64::MIN_POSITIVE, f64::MAX)?;
        check_range("base_depth_mm", p.base_depth_mm, f64::MIN_POSITIVE, f64::MAX)?;
        check_range("base_height_mm", p.base_height_mm, f64::MIN_POSITIVE, f64::MAX)?;
        let panel_height = self.panel.ncols() as f64 / config.px_per_mm;
        check_range("panel_height_mm", panel_height, 0.0, p.panel_offset.z)?;

        let cols = (p.base_width_mm * config.px_per_mm) as usize;
        let rows = (p.base_depth_mm * config.px_per_mm) as usize;
        let block = HeightField::new(
            DMatrix::from_element(rows, cols, p.base_height_mm),
            p.base_width_mm,
            p.base_depth_mm,
        );
        let base = BuildManifold::new(&block, &InclusionMask::from_element(rows, cols, true)).execute()?;

        let mut panel = ExtrudeCells::new(self.panel, p.panel_thickness_mm, Axis::X).execute(config)?;
        Rotate::new(Axis::Y, 180.0).execute(&mut panel);
        Translate::new(p.panel_offset).execute(&mut panel);

        let mesh = concatenate(base, &panel);
        info!(
            base = mesh.len() - panel.len(),
            panel = panel.len(),
            "built plaque"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{ConfigError, GeometryError, LithoError};
    use crate::math::Point3;
    use crate::operations::query::{BoundingBox, CheckManifold, Volume};

    fn unit_config() -> LithoConfig {
        LithoConfig {
            px_per_mm: 1.0,
            ..LithoConfig::default()
        }
    }

    fn small_params() -> PlaqueParams {
        PlaqueParams {
            base_width_mm: 4.0,
            base_depth_mm: 3.0,
            base_height_mm: 5.0,
            panel_thickness_mm: 1.0,
            panel_offset: Vector3::new(4.0, 3.0, 5.0),
        }
    }

    #[test]
    fn block_and_panel_are_both_closed() {
        let panel = InclusionMask::from_element(2, 2, true);
        let mesh = Plaque::new(&panel)
            .with_params(small_params())
            .execute(&unit_config())
            .unwrap();

        // 2 × 3 anchors with a 10-edge rim, plus four 12-triangle boxes.
        assert_eq!(mesh.len(), 12 + 12 + 20 + 48);
        let report = CheckManifold::new(&mesh).execute();
        assert_eq!(report.boundary_edges, 0);
        assert!(report.is_balanced(), "{report:?}");
        assert_relative_eq!(Volume::new(&mesh).execute(), 60.0 + 4.0, epsilon = 1e-9);
    }

    #[test]
    fn panel_stands_behind_the_block() {
        let panel = InclusionMask::from_element(2, 5, true);
        let mesh = Plaque::new(&panel)
            .with_params(small_params())
            .execute(&unit_config())
            .unwrap();
        let bounds = BoundingBox::new(&mesh).execute().unwrap();
        assert_relative_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(bounds.max, Point3::new(4.0, 5.0, 5.0), epsilon = 1e-9);
    }

    #[test]
    fn default_panel_stands_upright_beside_the_base() {
        // Only the raster's corner cells, enough to span its full extent.
        let panel = InclusionMask::from_fn(225, 450, |i, j| {
            (i == 0 || i == 224) && (j == 0 || j == 449)
        });
        let mesh = Plaque::new(&panel).execute(&LithoConfig::default()).unwrap();
        let bounds = BoundingBox::new(&mesh).execute().unwrap();
        assert_relative_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(bounds.max, Point3::new(45.0, 65.0, 90.0), epsilon = 1e-9);
    }

    #[test]
    fn top_left_cell_ends_up_at_the_top() {
        let panel = InclusionMask::from_fn(2, 5, |i, j| i == 0 && j == 0);
        let params = PlaqueParams {
            base_height_mm: 1.0,
            ..small_params()
        };
        let mesh = Plaque::new(&panel)
            .with_params(params)
            .execute(&unit_config())
            .unwrap();
        let top = mesh.points().fold(f64::MIN, |z, p| z.max(p.z));
        assert_relative_eq!(top, 5.0, epsilon = 1e-9);
        assert!(mesh.points().filter(|p| p.z > 1.0 + 1e-9).all(|p| p.z >= 4.0 - 1e-9));
    }

    #[test]
    fn panel_taller_than_its_offset_is_rejected() {
        let panel = InclusionMask::from_element(2, 6, true);
        let err = Plaque::new(&panel)
            .with_params(small_params())
            .execute(&unit_config())
            .unwrap_err();
        assert!(matches!(
            err,
            LithoError::Config(ConfigError::ParameterOutOfRange {
                parameter: "panel_height_mm",
                ..
            })
        ));
    }

    #[test]
    fn empty_panel_is_rejected() {
        let panel = InclusionMask::from_element(3, 3, false);
        let err = Plaque::new(&panel)
            .with_params(small_params())
            .execute(&unit_config())
            .unwrap_err();
        assert!(matches!(err, LithoError::Geometry(GeometryError::EmptyGeometry)));
    }

    #[test]
    fn negative_dimension_is_rejected() {
        let panel = InclusionMask::from_element(1, 1, true);
        let params = PlaqueParams {
            base_height_mm: -1.0,
            ..small_params()
        };
        let err = Plaque::new(&panel)
            .with_params(params)
            .execute(&unit_config())
            .unwrap_err();
        assert!(matches!(
            err,
            LithoError::Config(ConfigError::ParameterOutOfRange {
                parameter: "base_height_mm",
                ..
            })
        ));
    }
}
