//! Lithophane demo: turns a synthetic radial gradient into a printable STL.
//!
//! Usage:
//! ```text
//! cargo run --example lithophane                          # heart, lithophane.stl
//! cargo run --example lithophane -- circle out.stl        # other outline / path
//! RUST_LOG=lithomesh=debug cargo run --example lithophane # per-stage statistics
//! ```

use std::fs::File;
use std::io::BufWriter;

use image::{GrayImage, Luma};
use lithomesh::io::write_stl_binary;
use lithomesh::masking::ShapeKind;
use lithomesh::operations::query::{BoundingBox, CheckManifold, Volume};
use lithomesh::pipeline::ShapeLithophane;
use lithomesh::{LithoConfig, Result, ShapeOptions};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for lithomesh.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("lithophane=info".parse().unwrap_or_default())
        .add_directive("lithomesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let shape: ShapeKind = args.next().as_deref().unwrap_or("heart").parse()?;
    let path = args.next().unwrap_or_else(|| "lithophane.stl".to_owned());

    let photo = radial_gradient(320, 240);
    let options = ShapeOptions {
        shape,
        ..ShapeOptions::default()
    };
    let config = LithoConfig::default();
    let mesh = ShapeLithophane::new(&photo, options).execute(&config)?;

    let report = CheckManifold::new(&mesh).execute();
    let bounds = BoundingBox::new(&mesh).execute()?;
    tracing::info!(
        triangles = mesh.len(),
        closed = report.is_closed(),
        volume_mm3 = Volume::new(&mesh).execute(),
        size = ?bounds.max - bounds.min,
        "mesh ready"
    );

    write_stl_binary(&mesh, BufWriter::new(File::create(&path)?))?;
    tracing::info!(%path, "wrote STL");
    Ok(())
}

/// Dark centre fading to white at the corners.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn radial_gradient(width: u32, height: u32) -> GrayImage {
    let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let reach = cx.hypot(cy);
    GrayImage::from_fn(width, height, |x, y| {
        let d = (f64::from(x) - cx).hypot(f64::from(y) - cy) / reach;
        Luma([(d.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}
