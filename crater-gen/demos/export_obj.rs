//! Generates a handful of crater variants and writes them as OBJ files.
//!
//! Run with `cargo run --example export_obj [output-dir]`.

use std::io;
use std::path::PathBuf;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crater_gen::field::PerlinField;
use crater_gen::generate::generate_crater;
use crater_gen::mesh::write_obj;
use crater_gen::params::CraterParams;

fn main() -> io::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| ".".to_string())
        .into();

    let variants: [(&str, CraterParams); 4] = [
        (
            "crater_default",
            CraterParams {
                close_bottom: false,
                ..CraterParams::default()
            },
        ),
        (
            "crater_fragmented",
            CraterParams {
                close_bottom: false,
                edge_fragmentation: 60.0,
                rim_height_variation: 0.2,
                rim_edge_rounding: 0.5,
                ..CraterParams::default()
            },
        ),
        (
            "crater_asymmetric",
            CraterParams {
                close_bottom: false,
                blast_asymmetry: 0.5,
                crater_outline_irregularity: 30.0,
                inner_asymmetry: 0.4,
                ..CraterParams::default()
            },
        ),
        (
            "crater_closed",
            CraterParams {
                bottom_thickness: 1.2,
                outer_wall_angle: 15.0,
                ..CraterParams::default()
            },
        ),
    ];

    let field = PerlinField::new(42);
    let mut rng = Pcg32::seed_from_u64(42);

    for (name, params) in variants {
        let build = generate_crater(&params, &field, &mut rng);
        let path = out_dir.join(format!("{name}.obj"));
        write_obj(&build.mesh, &path, name)?;
        println!(
            "{}: {} vertices, {} triangles -> {}",
            name,
            build.report.vertices,
            build.report.faces,
            path.display()
        );
    }
    Ok(())
}
