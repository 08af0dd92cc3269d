//! Crater shell assembly
//!
//! Lays out the ring tiers from the outer edge down to the bowl center and
//! stitches consecutive rings into quad strips, with a triangle fan onto
//! the center vertex. Face insertions that would be malformed are skipped
//! and counted, never fatal.

use std::collections::HashSet;
use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use crate::field::NoiseField;
use crate::mesh::ring::{DeformContext, RingTier, build_ring};
use crate::mesh::types::{CraterMesh, FaceIndices, FaceRejection};
use crate::params::CraterParams;

/// Result of the assembly stage: the open crater surface, the base ring
/// the bottom closure builds on, and the number of skipped faces.
#[derive(Debug, Clone)]
pub struct Shell {
    pub mesh: CraterMesh,
    pub base_ring: Vec<u32>,
    pub skipped_faces: usize,
}

/// Adds stitching faces, skipping degenerate or duplicate insertions.
pub(crate) struct Stitcher {
    seen: HashSet<[u32; 4]>,
    skipped: usize,
}

impl Stitcher {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            skipped: 0,
        }
    }

    fn try_add(&mut self, mesh: &mut CraterMesh, indices: FaceIndices) {
        let key = indices.key();
        let result = if self.seen.contains(&key) {
            Err(FaceRejection::Duplicate)
        } else {
            mesh.try_add_face(indices)
        };
        match result {
            Ok(()) => {
                self.seen.insert(key);
            }
            Err(reason) => {
                self.skipped += 1;
                debug!("skipped face {indices:?}: {reason}");
            }
        }
    }

    /// Quad strip between two rings of equal length.
    pub fn stitch_rings(&mut self, mesh: &mut CraterMesh, cur: &[u32], next: &[u32]) {
        let n = cur.len();
        for k in 0..n {
            let k1 = (k + 1) % n;
            self.try_add(mesh, FaceIndices::Quad([cur[k], cur[k1], next[k1], next[k]]));
        }
    }

    /// Triangle fan from a ring onto a single vertex.
    pub fn stitch_fan(&mut self, mesh: &mut CraterMesh, ring: &[u32], center: u32) {
        let n = ring.len();
        for k in 0..n {
            let k1 = (k + 1) % n;
            self.try_add(mesh, FaceIndices::Tri([ring[k], ring[k1], center]));
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Number of extra rounding rings for a 0–1 rounding parameter.
fn rounding_rings(rounding: f32) -> usize {
    if rounding > 0.0 {
        (rounding * 3.0).ceil() as usize
    } else {
        0
    }
}

/// Build the open crater surface: outer rounding skirt (optional), base
/// ring, slope rings, rim rounding rings (optional), rim ring, bowl rings
/// and the center vertex, all stitched together.
///
/// The blast and bowl directions are drawn from `rng` here; parameter sets
/// with both asymmetries at zero never touch it.
pub fn assemble_shell<F: NoiseField, R: Rng + ?Sized>(
    params: &CraterParams,
    field: &F,
    rng: &mut R,
) -> Shell {
    let ctx = DeformContext::draw(params, rng);

    let n = params.resolution as usize;
    let outer_rounding = rounding_rings(params.outer_edge_rounding);
    let rim_rounding = rounding_rings(params.rim_edge_rounding);
    let slope_count = (params.resolution / 16).clamp(2, 3) as usize;
    let bowl_count = (params.resolution / 20).clamp(1, 2) as usize;

    let ring_count = outer_rounding + 1 + slope_count + rim_rounding + 1 + bowl_count;
    let mut mesh = CraterMesh::with_capacity(ring_count * n + 1, ring_count * n);
    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(ring_count);

    // Outer rounding skirt, outermost ring first, descending into the
    // ground so the crater blends into the surrounding terrain.
    let extent = 0.2 * params.outer_edge_rounding * params.outer_radius;
    for j in (1..=outer_rounding).rev() {
        let t = j as f32 / outer_rounding as f32;
        let radius = params.outer_radius + extent * t;
        let height = -0.25 * extent * (t * PI / 2.0).sin();
        rings.push(build_ring(
            &mut mesh,
            params,
            field,
            &ctx,
            RingTier::OuterRounding,
            radius,
            height,
        ));
    }

    // Base ring at ground level.
    let base_ring = build_ring(
        &mut mesh,
        params,
        field,
        &ctx,
        RingTier::Base,
        params.outer_radius,
        0.0,
    );
    rings.push(base_ring.clone());

    // Slope rings climb from the base toward the rim. The interpolation
    // factor stays strictly below 1 so no slope ring ever lands on the rim
    // ring itself.
    let mut below_rim = (params.outer_radius, 0.0);
    for s in 1..=slope_count {
        let f = s as f32 / (slope_count + 1) as f32;
        let radius = params.outer_radius - (params.outer_radius - params.inner_radius) * f;
        let height = params.rim_height * f.powf(0.8);
        rings.push(build_ring(
            &mut mesh,
            params,
            field,
            &ctx,
            RingTier::Slope,
            radius,
            height,
        ));
        below_rim = (radius, height);
    }

    // Rim rounding rings ease the profile into the crest: the sine ramp
    // meets the rim height with flattening slope.
    let (slope_radius, slope_height) = below_rim;
    for i in 1..=rim_rounding {
        let t = i as f32 / (rim_rounding + 1) as f32;
        let radius = slope_radius + (params.inner_radius - slope_radius) * t;
        let height = slope_height + (params.rim_height - slope_height) * (t * PI / 2.0).sin();
        rings.push(build_ring(
            &mut mesh,
            params,
            field,
            &ctx,
            RingTier::RimRounding,
            radius,
            height,
        ));
    }

    // Rim crest ring.
    rings.push(build_ring(
        &mut mesh,
        params,
        field,
        &ctx,
        RingTier::Rim,
        params.inner_radius,
        params.rim_height,
    ));

    // Bowl rings descend to the floor; slanted inner walls push them
    // outward (or pull them inward for negative angles).
    let wall_slope = params.inner_wall_angle.to_radians().tan() * 2.0;
    for b in 1..=bowl_count {
        let f = b as f32 / bowl_count as f32;
        let depth_factor = (params.rim_height + params.depth) * f;
        let radius = (params.inner_radius * (1.0 - f * 0.7) + depth_factor * wall_slope)
            .max(0.01 * params.inner_radius);
        let height = params.rim_height - depth_factor;
        rings.push(build_ring(
            &mut mesh,
            params,
            field,
            &ctx,
            RingTier::Bowl,
            radius,
            height,
        ));
    }

    // Center vertex sits at the crater floor, nudged off-axis when the
    // bowl walls are slanted.
    let center_offset = (params.rim_height + params.depth) * wall_slope * 0.1;
    let center = mesh.add_vertex(Vec3::new(center_offset, center_offset, -params.depth));

    let mut stitcher = Stitcher::new();
    for pair in rings.windows(2) {
        stitcher.stitch_rings(&mut mesh, &pair[0], &pair[1]);
    }
    if let Some(innermost) = rings.last() {
        stitcher.stitch_fan(&mut mesh, innermost, center);
    }

    Shell {
        mesh,
        base_ring,
        skipped_faces: stitcher.skipped(),
    }
}
