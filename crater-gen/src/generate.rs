//! Crater generation pipeline
//!
//! Composes the stages in fixed order: shell assembly, optional bottom
//! closure, surface detail, topology cleanup, zone classification. The
//! run is infallible once parameters are validated; stitching conflicts
//! are skipped and counted instead of aborting.

use rand::Rng;
use tracing::info;

use crate::field::{NoiseField, PerlinField};
use crate::mesh::assemble::{Shell, assemble_shell};
use crate::mesh::bottom::add_bottom_closure;
use crate::mesh::detail::apply_surface_detail;
use crate::mesh::topology::{OptimizeParams, optimize};
use crate::mesh::types::CraterMesh;
use crate::mesh::zones::classify_zones;
use crate::params::CraterParams;

/// Counts from one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Final vertex count.
    pub vertices: usize,
    /// Final triangle count.
    pub faces: usize,
    /// Face insertions rejected while stitching.
    pub skipped_faces: usize,
    /// Vertices merged by the weld pass.
    pub welded_vertices: usize,
    /// Faces dropped by cleanup (collapsed or degenerate).
    pub degenerate_faces: usize,
}

/// A generated crater plus its generation summary.
#[derive(Debug, Clone)]
pub struct CraterBuild {
    pub mesh: CraterMesh,
    pub report: GenerationReport,
}

/// Run the full pipeline with an explicit noise field and RNG.
///
/// Identical parameters, field seed and RNG state reproduce the mesh
/// exactly.
pub fn generate_crater<F, R>(params: &CraterParams, field: &F, rng: &mut R) -> CraterBuild
where
    F: NoiseField,
    R: Rng + ?Sized,
{
    let mut shell = assemble_shell(params, field, rng);
    if params.close_bottom {
        add_bottom_closure(&mut shell, params);
    }
    let Shell {
        mut mesh,
        skipped_faces,
        ..
    } = shell;

    apply_surface_detail(&mut mesh, params, field);
    let cleanup = optimize(&mut mesh, &OptimizeParams::default());
    classify_zones(&mut mesh, params);

    let report = GenerationReport {
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        skipped_faces,
        welded_vertices: cleanup.welded_vertices,
        degenerate_faces: cleanup.removed_faces,
    };
    info!(
        "generated crater: {} vertices, {} triangles ({} skipped, {} welded, {} degenerate)",
        report.vertices,
        report.faces,
        report.skipped_faces,
        report.welded_vertices,
        report.degenerate_faces
    );
    CraterBuild { mesh, report }
}

/// Generate with the default Perlin field and the process RNG.
pub fn generate(params: &CraterParams) -> CraterBuild {
    generate_crater(params, &PerlinField::default(), &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_report_matches_mesh() {
        let params = CraterParams::default();
        let field = PerlinField::new(3);
        let mut rng = Pcg32::seed_from_u64(3);

        let build = generate_crater(&params, &field, &mut rng);

        assert_eq!(build.report.vertices, build.mesh.vertex_count());
        assert_eq!(build.report.faces, build.mesh.face_count());
        assert_eq!(build.report.skipped_faces, 0);
    }

    #[test]
    fn test_same_seeds_reproduce_the_mesh() {
        let params = CraterParams {
            blast_asymmetry: 0.4,
            crater_outline_irregularity: 20.0,
            edge_fragmentation: 30.0,
            ..CraterParams::default()
        };
        let field = PerlinField::new(9);

        let a = generate_crater(&params, &field, &mut Pcg32::seed_from_u64(9));
        let b = generate_crater(&params, &field, &mut Pcg32::seed_from_u64(9));

        assert_eq!(a.mesh.positions, b.mesh.positions);
        assert_eq!(a.mesh.faces, b.mesh.faces);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_convenience_entry_produces_triangles() {
        let build = generate(&CraterParams::default());

        assert!(build.report.vertices > 0);
        assert!(build.report.faces > 0);
        for face in &build.mesh.faces {
            assert_eq!(face.indices.len(), 3);
        }
    }
}
