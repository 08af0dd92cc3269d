//! Solid bottom closure
//!
//! Extends the open shell downward: five wall rings drop from the base
//! ring to `-bottom_thickness`, slanting outward with `outer_wall_angle`,
//! and a fan seals the underside. The result is a closed volume suitable
//! for embedding the crater into terrain.

use glam::Vec3;

use crate::mesh::assemble::{Shell, Stitcher};
use crate::params::CraterParams;

const WALL_RINGS: usize = 5;

/// Close the shell's underside. Wall rings derive their direction from the
/// deformed base ring, so asymmetric craters keep their outline all the
/// way down.
pub fn add_bottom_closure(shell: &mut Shell, params: &CraterParams) {
    let wall_offset = params.bottom_thickness * params.outer_wall_angle.to_radians().tan() * 3.0;

    let mut stitcher = Stitcher::new();
    let mut previous = shell.base_ring.clone();

    for i in 1..=WALL_RINGS {
        let t = i as f32 / WALL_RINGS as f32;
        // Sub-linear ramp: walls stay near-vertical at the top and flare
        // toward the bottom.
        let ring_offset = wall_offset * t.powf(1.5);
        let ring_depth = -params.bottom_thickness * t;

        let mut ring = Vec::with_capacity(shell.base_ring.len());
        for &index in &shell.base_ring {
            let p = shell.mesh.positions[index as usize];
            let direction = Vec3::new(p.x, p.y, 0.0).normalize_or_zero();
            let position = Vec3::new(
                p.x + direction.x * ring_offset,
                p.y + direction.y * ring_offset,
                ring_depth,
            );
            ring.push(shell.mesh.add_vertex(position));
        }

        stitcher.stitch_rings(&mut shell.mesh, &previous, &ring);
        previous = ring;
    }

    // Bottom center, nudged sideways for clearly slanted walls.
    let center_offset = if params.outer_wall_angle.abs() > 1.0 {
        wall_offset * 0.1
    } else {
        0.0
    };
    let center = shell.mesh.add_vertex(Vec3::new(
        center_offset,
        center_offset,
        -params.bottom_thickness,
    ));
    stitcher.stitch_fan(&mut shell.mesh, &previous, center);

    shell.skipped_faces += stitcher.skipped();
}
