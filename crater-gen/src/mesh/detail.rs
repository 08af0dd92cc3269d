//! Fine surface detail
//!
//! Breaks up the mathematically clean crater surface with a small
//! noise-driven height offset per vertex. Interior and exterior get their
//! own strengths, blended across a band around the rim radius, and the
//! effect falls off with distance so the far skirt stays put. Topology is
//! never touched.

use crate::field::{NoiseField, SURFACE_OCTAVES};
use crate::mesh::types::CraterMesh;
use crate::params::CraterParams;

/// Apply the detail pass to every vertex. With both strengths at zero the
/// mesh is left bit-identical.
pub fn apply_surface_detail<F: NoiseField>(
    mesh: &mut CraterMesh,
    params: &CraterParams,
    field: &F,
) {
    if params.noise_strength <= 0.0 && params.outside_noise_strength <= 0.0 {
        return;
    }

    let transition = params.inner_radius * 0.3;
    let limit = params.outer_radius * 2.0;
    let max_offset = (params.rim_height * 0.2).min(0.5);

    for position in &mut mesh.positions {
        let noise_value = field.sample_octaves(*position, &SURFACE_OCTAVES);
        let distance = position.truncate().length();

        // Inside strength within the rim, outside strength beyond it,
        // linear blend across the transition band.
        let strength = if distance < params.inner_radius - transition {
            params.noise_strength
        } else if distance > params.inner_radius + transition {
            params.outside_noise_strength
        } else {
            let t = (distance - (params.inner_radius - transition)) / (2.0 * transition);
            params.noise_strength * (1.0 - t) + params.outside_noise_strength * t
        };

        if distance < limit {
            let falloff = 1.0 - distance / limit;
            let offset = noise_value * strength * 0.1 * falloff * 0.3;
            position.z += offset.clamp(-max_offset, max_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ConstField, PerlinField};
    use crate::mesh::assemble::assemble_shell;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_strengths_leave_mesh_untouched() {
        let params = CraterParams {
            noise_strength: 0.0,
            outside_noise_strength: 0.0,
            ..Default::default()
        };
        let field = PerlinField::default();
        let mut shell = assemble_shell(&params, &field, &mut Pcg32::seed_from_u64(1));
        let before = shell.mesh.positions.clone();

        apply_surface_detail(&mut shell.mesh, &params, &field);

        assert_eq!(shell.mesh.positions, before);
    }

    #[test]
    fn test_detail_moves_only_heights() {
        let params = CraterParams {
            noise_strength: 1.0,
            outside_noise_strength: 0.5,
            ..Default::default()
        };
        let field = PerlinField::default();
        let mut shell = assemble_shell(&params, &field, &mut Pcg32::seed_from_u64(2));
        let before = shell.mesh.positions.clone();
        let faces_before = shell.mesh.faces.clone();

        apply_surface_detail(&mut shell.mesh, &params, &field);

        assert_eq!(shell.mesh.positions.len(), before.len());
        assert_eq!(shell.mesh.faces, faces_before);

        let mut moved = 0;
        for (after, before) in shell.mesh.positions.iter().zip(&before) {
            assert_eq!(after.x, before.x);
            assert_eq!(after.y, before.y);
            if after.z != before.z {
                moved += 1;
            }
        }
        assert!(moved > 0);
    }

    #[test]
    fn test_offsets_respect_clamp() {
        let params = CraterParams {
            noise_strength: 30.0,
            outside_noise_strength: 30.0,
            ..Default::default()
        };
        let field = PerlinField::default();
        let mut shell = assemble_shell(&params, &field, &mut Pcg32::seed_from_u64(3));
        let before = shell.mesh.positions.clone();

        apply_surface_detail(&mut shell.mesh, &params, &field);

        let max_offset = (params.rim_height * 0.2).min(0.5);
        for (after, before) in shell.mesh.positions.iter().zip(&before) {
            assert!((after.z - before.z).abs() <= max_offset + 1e-6);
        }
    }

    #[test]
    fn test_vertices_beyond_falloff_limit_are_untouched() {
        let params = CraterParams::default();
        let field = ConstField(1.0);
        let mut mesh = CraterMesh::new();
        let far = params.outer_radius * 2.0 + 1.0;
        mesh.add_vertex(Vec3::new(far, 0.0, 0.3));

        apply_surface_detail(&mut mesh, &params, &field);

        assert_eq!(mesh.positions[0], Vec3::new(far, 0.0, 0.3));
    }

    #[test]
    fn test_inside_gets_stronger_detail_than_outside() {
        let params = CraterParams {
            noise_strength: 1.0,
            outside_noise_strength: 0.1,
            ..Default::default()
        };
        let field = ConstField(1.0);
        let mut mesh = CraterMesh::new();
        // One vertex well inside the rim, one outside it, both within the
        // falloff limit.
        mesh.add_vertex(Vec3::new(0.2, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(params.inner_radius * 1.5, 0.0, 0.0));

        apply_surface_detail(&mut mesh, &params, &field);

        let inside = mesh.positions[0].z;
        let outside = mesh.positions[1].z;
        assert!(inside > outside);
        assert!(outside > 0.0);
    }
}
