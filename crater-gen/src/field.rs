//! Coherent noise sampling for crater deformation
//!
//! Every noise-driven feature (outline irregularity, rim variation,
//! fragmentation, surface detail) reads from a [`NoiseField`], so tests can
//! substitute a deterministic stub and callers can reseed the terrain look
//! without touching the generator.

use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Octave table for the fine surface detail pass.
pub const SURFACE_OCTAVES: [(f32, f32); 3] = [(1.0, 0.5), (3.0, 0.3), (8.0, 0.2)];

/// Octave table for rim edge fragmentation.
pub const FRAGMENT_OCTAVES: [(f32, f32); 2] = [(0.5, 0.6), (2.0, 0.4)];

/// Octave table for rim height variation.
pub const RIM_OCTAVES: [(f32, f32); 2] = [(1.0, 0.6), (2.5, 0.4)];

/// Octave table for crater outline irregularity.
pub const OUTLINE_OCTAVES: [(f32, f32); 2] = [(1.5, 0.6), (4.0, 0.4)];

/// Octave table for inner bowl asymmetry.
pub const INNER_OCTAVES: [(f32, f32); 2] = [(2.0, 0.7), (5.0, 0.3)];

/// A smooth, deterministic scalar field over 3D space.
///
/// Implementations must be pure: the same position always yields the same
/// value, with no global mutable state. Values are expected in [-1, 1].
pub trait NoiseField {
    /// Sample the field at a position.
    fn sample(&self, position: Vec3) -> f32;

    /// Weighted multi-octave sample: `sum(sample(p * frequency) * weight)`.
    ///
    /// The octave tables used by the generator keep their weights summing
    /// to 1.0 so the result stays in [-1, 1].
    fn sample_octaves(&self, position: Vec3, octaves: &[(f32, f32)]) -> f32 {
        octaves
            .iter()
            .map(|&(frequency, weight)| self.sample(position * frequency) * weight)
            .sum()
    }
}

/// Perlin-backed [`NoiseField`], the default terrain texture source.
#[derive(Clone, Copy)]
pub struct PerlinField {
    perlin: Perlin,
}

impl PerlinField {
    /// Create a field from a seed. Equal seeds yield identical fields.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, position: Vec3) -> f32 {
        let value = self
            .perlin
            .get([position.x as f64, position.y as f64, position.z as f64]);
        (value as f32).clamp(-1.0, 1.0)
    }
}

/// Fixed-value field; makes noise-dependent assertions exact in tests.
#[cfg(test)]
pub(crate) struct ConstField(pub f32);

#[cfg(test)]
impl NoiseField for ConstField {
    fn sample(&self, _position: Vec3) -> f32 {
        self.0
    }
}
