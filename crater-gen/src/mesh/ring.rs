//! Ring construction and per-vertex deformation
//!
//! Every tier of the crater profile is one ring of `resolution` vertices.
//! All shape character (blast stretch, outline wobble, rim damage) is
//! applied here, vertex by vertex, so the assembler only decides where the
//! rings sit.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::field::{
    FRAGMENT_OCTAVES, INNER_OCTAVES, NoiseField, OUTLINE_OCTAVES, RIM_OCTAVES,
};
use crate::mesh::types::CraterMesh;
use crate::params::CraterParams;

/// Lower bound on the combined radial deformation factor. Keeps extreme
/// settings from folding a ring through the vertical axis.
pub(crate) const RADIAL_FLOOR: f32 = 0.05;

/// Lower bound on the fragmentation height factor, so a fully shattered
/// rim still clears the ground plane.
pub(crate) const FRAGMENT_FLOOR: f32 = 0.05;

/// Profile band a ring belongs to. Deformation gains depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RingTier {
    /// Skirt rings blending the crater into the surrounding ground.
    OuterRounding,
    /// The ground-level ring at `outer_radius`.
    Base,
    /// Rings climbing from the base toward the rim.
    Slope,
    /// Rings easing the profile into the rim crest.
    RimRounding,
    /// The crest ring at `inner_radius`.
    Rim,
    /// Rings descending into the bowl.
    Bowl,
}

impl RingTier {
    /// Blast stretch is strongest at ground level and fades into the bowl.
    fn blast_gain(self) -> f32 {
        match self {
            RingTier::OuterRounding | RingTier::Base => 1.0,
            RingTier::Slope => 0.8,
            RingTier::RimRounding => 0.7,
            RingTier::Rim => 0.6,
            RingTier::Bowl => 0.4,
        }
    }

    /// Outline wobble fades toward the crater interior.
    fn outline_gain(self) -> f32 {
        match self {
            RingTier::OuterRounding | RingTier::Base => 1.0,
            RingTier::Slope => 0.7,
            RingTier::RimRounding => 0.5,
            RingTier::Rim => 0.4,
            RingTier::Bowl => 0.2,
        }
    }

    /// Fragmentation damages the crest and the rings easing into it, so a
    /// collapsed rim section cannot leave rounding rings poking above it.
    fn fragmented(self) -> bool {
        matches!(self, RingTier::Rim | RingTier::RimRounding)
    }
}

/// Random directions drawn once per generation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeformContext {
    pub blast_angle: f32,
    pub inner_angle: f32,
}

impl DeformContext {
    /// Draw the blast and bowl directions. A direction is only drawn when
    /// its asymmetry parameter is active, so neutral parameter sets never
    /// touch the RNG.
    pub fn draw<R: Rng + ?Sized>(params: &CraterParams, rng: &mut R) -> Self {
        let blast_angle = if params.blast_asymmetry > 0.0 {
            rng.random_range(0.0..2.0 * PI)
        } else {
            0.0
        };
        let inner_angle = if params.inner_asymmetry > 0.0 {
            rng.random_range(0.0..2.0 * PI)
        } else {
            0.0
        };
        Self {
            blast_angle,
            inner_angle,
        }
    }
}

/// Append one deformed ring to the mesh and return its vertex indices in
/// angular order.
pub(crate) fn build_ring<F: NoiseField>(
    mesh: &mut CraterMesh,
    params: &CraterParams,
    field: &F,
    ctx: &DeformContext,
    tier: RingTier,
    radius: f32,
    height: f32,
) -> Vec<u32> {
    let n = params.resolution as usize;
    let mut ring = Vec::with_capacity(n);

    for k in 0..n {
        let theta = (k as f32 / n as f32) * 2.0 * PI;
        let position = deform_vertex(params, field, ctx, tier, radius, height, theta);
        ring.push(mesh.add_vertex(position));
    }
    ring
}

fn deform_vertex<F: NoiseField>(
    params: &CraterParams,
    field: &F,
    ctx: &DeformContext,
    tier: RingTier,
    radius: f32,
    height: f32,
    theta: f32,
) -> Vec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();

    // Multiplicative radial factors, each skipped entirely when inactive
    // so neutral parameters reproduce the ideal circle bit-exactly.
    let mut radial = 1.0;
    if params.blast_asymmetry > 0.0 {
        radial *=
            1.0 + params.blast_asymmetry * (theta - ctx.blast_angle).cos() * tier.blast_gain();
    }
    if params.crater_outline_irregularity > 0.0 {
        // Sampled on the unit circle: every tier sees the same angular
        // pattern, attenuated by its gain, so bays in the outline carry
        // through the whole profile.
        let outline = field.sample_octaves(Vec3::new(cos_theta, sin_theta, 0.0), &OUTLINE_OCTAVES);
        radial *=
            1.0 + outline * (params.crater_outline_irregularity / 50.0) * tier.outline_gain();
    }
    if tier == RingTier::Bowl && params.inner_asymmetry > 0.0 {
        // The z = 1 sample plane keeps this pattern independent of the
        // outline noise above.
        let alignment = (theta - ctx.inner_angle).cos();
        let noise = field.sample_octaves(Vec3::new(cos_theta, sin_theta, 1.0), &INNER_OCTAVES);
        radial *= 1.0 + params.inner_asymmetry * (0.6 * alignment + 0.4 * noise) * 0.5;
    }
    let radial = radial.max(RADIAL_FLOOR);

    let x = radius * cos_theta * radial;
    let y = radius * sin_theta * radial;

    // Height effects sample at the deformed position so they follow the
    // actual outline.
    let mut z = height;
    if tier == RingTier::Rim && params.rim_height_variation > 0.0 {
        let sample = Vec3::new(x, y, 0.0) * (params.rim_noise_scale * 0.1);
        z += field.sample_octaves(sample, &RIM_OCTAVES)
            * params.rim_height_variation
            * params.rim_height;
    }
    if tier.fragmented() && params.edge_fragmentation > 0.0 {
        z *= fragmentation_factor(params, field, x, y);
    }

    Vec3::new(x, y, z)
}

/// Height multiplier for a rim vertex at (x, y). 1.0 where the noise stays
/// under the damage threshold; otherwise falls off toward
/// [`FRAGMENT_FLOOR`] on a power curve.
pub(crate) fn fragmentation_factor<F: NoiseField>(
    params: &CraterParams,
    field: &F,
    x: f32,
    y: f32,
) -> f32 {
    let intensity = params.edge_fragmentation / 100.0;
    let sample = field.sample_octaves(Vec3::new(x, y, 0.0), &FRAGMENT_OCTAVES);
    let threshold = 0.4 - intensity * 0.7;
    if sample <= threshold {
        return 1.0;
    }

    let excess = (sample - threshold) / (1.0 - threshold);
    let damage = excess.powf(1.5) * intensity * 2.0;
    (1.0 - damage).max(FRAGMENT_FLOOR)
}
