//! Crater generation parameters
//!
//! A [`CraterParams`] value is immutable input to the generator. Interactive
//! callers start from [`CraterParams::default`] and edit fields; batch
//! callers draw a whole record from [`RandomRanges`]. Either way the record
//! should pass through [`CraterParams::repaired`] (or be checked with
//! [`CraterParams::validate`]) before generation.

use std::ops::Range;

use rand::Rng;
use thiserror::Error;
use tracing::warn;

/// Allowed range per parameter. `repaired` clamps to these, `validate`
/// rejects values outside them.
mod range {
    pub const OUTER_RADIUS: (f32, f32) = (0.5, 100.0);
    pub const INNER_RADIUS: (f32, f32) = (0.1, 50.0);
    pub const DEPTH: (f32, f32) = (0.1, 100.0);
    pub const RIM_HEIGHT: (f32, f32) = (0.0, 100.0);
    pub const RESOLUTION: (u32, u32) = (8, 500);
    pub const NOISE_STRENGTH: (f32, f32) = (0.0, 30.0);
    pub const BOTTOM_THICKNESS: (f32, f32) = (0.1, 10.0);
    pub const WALL_ANGLE: (f32, f32) = (-89.0, 89.0);
    pub const EDGE_ROUNDING: (f32, f32) = (0.0, 1.0);
    pub const OUTLINE_IRREGULARITY: (f32, f32) = (0.0, 100.0);
    pub const ASYMMETRY: (f32, f32) = (0.0, 1.0);
    pub const EDGE_FRAGMENTATION: (f32, f32) = (0.0, 100.0);
    pub const RIM_VARIATION: (f32, f32) = (0.0, 1.0);
    pub const RIM_NOISE_SCALE: (f32, f32) = (0.5, 10.0);
}

/// Parameter validation failure.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ParamError {
    #[error("{name} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("inner_radius {inner} must be smaller than outer_radius {outer}")]
    InnerNotBelowOuter { inner: f32, outer: f32 },
}

/// Full configuration of one crater.
///
/// Distances are world units, angles degrees, heights measured from the
/// ground plane z = 0. The crater floor ends up at `-depth`, the rim crest
/// at `rim_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraterParams {
    /// Radius of the outer crater edge at ground level.
    pub outer_radius: f32,
    /// Radius of the rim crest. Must stay below `outer_radius`.
    pub inner_radius: f32,
    /// Bowl depth below ground level.
    pub depth: f32,
    /// Rim crest height above ground level.
    pub rim_height: f32,
    /// Vertices per ring.
    pub resolution: u32,
    /// Surface detail strength inside the rim.
    pub noise_strength: f32,
    /// Surface detail strength outside the rim.
    pub outside_noise_strength: f32,
    /// Build a solid underside so the mesh becomes a closed volume.
    pub close_bottom: bool,
    /// How far the solid underside extends below ground level.
    pub bottom_thickness: f32,
    /// Slant of the underside walls in degrees (0 = vertical).
    pub outer_wall_angle: f32,
    /// Slant of the bowl walls in degrees (0 = vertical).
    pub inner_wall_angle: f32,
    /// Softens the crease where the crater meets the surrounding ground.
    pub outer_edge_rounding: f32,
    /// Softens the rim crest profile.
    pub rim_edge_rounding: f32,
    /// Noise-driven deviation of ring outlines from perfect circles.
    pub crater_outline_irregularity: f32,
    /// Directional bias of the bowl, independent of the blast direction.
    pub inner_asymmetry: f32,
    /// Directional stretch of the whole crater (0 = perfectly circular).
    pub blast_asymmetry: f32,
    /// How broken and jagged the rim is.
    pub edge_fragmentation: f32,
    /// Random height variation across the rim (0 = uniform crest).
    pub rim_height_variation: f32,
    /// Spatial scale of the rim variation noise pattern.
    pub rim_noise_scale: f32,
}

impl Default for CraterParams {
    fn default() -> Self {
        Self {
            outer_radius: 2.6,
            inner_radius: 1.3,
            depth: 0.5,
            rim_height: 0.58,
            resolution: 24,
            noise_strength: 0.05,
            outside_noise_strength: 0.02,
            close_bottom: true,
            bottom_thickness: 1.0,
            outer_wall_angle: 0.0,
            inner_wall_angle: 0.0,
            outer_edge_rounding: 0.0,
            rim_edge_rounding: 0.0,
            crater_outline_irregularity: 0.0,
            inner_asymmetry: 0.0,
            blast_asymmetry: 0.0,
            edge_fragmentation: 0.0,
            rim_height_variation: 0.0,
            rim_noise_scale: 3.0,
        }
    }
}

fn check(name: &'static str, value: f32, bounds: (f32, f32)) -> Result<(), ParamError> {
    let (min, max) = bounds;
    if value < min || value > max || !value.is_finite() {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn clamp_field(name: &'static str, value: f32, bounds: (f32, f32)) -> f32 {
    let (min, max) = bounds;
    if value.is_nan() {
        warn!("crater params: {name} is NaN, resetting to {min}");
        return min;
    }
    if value < min || value > max {
        warn!("crater params: {name} = {value} outside {min}..={max}, clamping");
    }
    value.clamp(min, max)
}

impl CraterParams {
    /// Check every field against its documented range and the radius
    /// ordering invariant.
    pub fn validate(&self) -> Result<(), ParamError> {
        check("outer_radius", self.outer_radius, range::OUTER_RADIUS)?;
        check("inner_radius", self.inner_radius, range::INNER_RADIUS)?;
        check("depth", self.depth, range::DEPTH)?;
        check("rim_height", self.rim_height, range::RIM_HEIGHT)?;
        let (res_min, res_max) = range::RESOLUTION;
        if self.resolution < res_min || self.resolution > res_max {
            return Err(ParamError::OutOfRange {
                name: "resolution",
                value: self.resolution as f32,
                min: res_min as f32,
                max: res_max as f32,
            });
        }
        check("noise_strength", self.noise_strength, range::NOISE_STRENGTH)?;
        check(
            "outside_noise_strength",
            self.outside_noise_strength,
            range::NOISE_STRENGTH,
        )?;
        check(
            "bottom_thickness",
            self.bottom_thickness,
            range::BOTTOM_THICKNESS,
        )?;
        check("outer_wall_angle", self.outer_wall_angle, range::WALL_ANGLE)?;
        check("inner_wall_angle", self.inner_wall_angle, range::WALL_ANGLE)?;
        check(
            "outer_edge_rounding",
            self.outer_edge_rounding,
            range::EDGE_ROUNDING,
        )?;
        check(
            "rim_edge_rounding",
            self.rim_edge_rounding,
            range::EDGE_ROUNDING,
        )?;
        check(
            "crater_outline_irregularity",
            self.crater_outline_irregularity,
            range::OUTLINE_IRREGULARITY,
        )?;
        check("inner_asymmetry", self.inner_asymmetry, range::ASYMMETRY)?;
        check("blast_asymmetry", self.blast_asymmetry, range::ASYMMETRY)?;
        check(
            "edge_fragmentation",
            self.edge_fragmentation,
            range::EDGE_FRAGMENTATION,
        )?;
        check(
            "rim_height_variation",
            self.rim_height_variation,
            range::RIM_VARIATION,
        )?;
        check(
            "rim_noise_scale",
            self.rim_noise_scale,
            range::RIM_NOISE_SCALE,
        )?;

        if self.inner_radius >= self.outer_radius {
            return Err(ParamError::InnerNotBelowOuter {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        Ok(())
    }

    /// Clamp every field into its documented range and restore the radius
    /// ordering invariant (inner becomes 70% of outer when violated).
    /// Out-of-range values are logged at warn level.
    #[must_use]
    pub fn repaired(mut self) -> Self {
        self.outer_radius = clamp_field("outer_radius", self.outer_radius, range::OUTER_RADIUS);
        self.inner_radius = clamp_field("inner_radius", self.inner_radius, range::INNER_RADIUS);
        self.depth = clamp_field("depth", self.depth, range::DEPTH);
        self.rim_height = clamp_field("rim_height", self.rim_height, range::RIM_HEIGHT);
        let (res_min, res_max) = range::RESOLUTION;
        if self.resolution < res_min || self.resolution > res_max {
            warn!(
                "crater params: resolution = {} outside {res_min}..={res_max}, clamping",
                self.resolution
            );
            self.resolution = self.resolution.clamp(res_min, res_max);
        }
        self.noise_strength =
            clamp_field("noise_strength", self.noise_strength, range::NOISE_STRENGTH);
        self.outside_noise_strength = clamp_field(
            "outside_noise_strength",
            self.outside_noise_strength,
            range::NOISE_STRENGTH,
        );
        self.bottom_thickness = clamp_field(
            "bottom_thickness",
            self.bottom_thickness,
            range::BOTTOM_THICKNESS,
        );
        self.outer_wall_angle =
            clamp_field("outer_wall_angle", self.outer_wall_angle, range::WALL_ANGLE);
        self.inner_wall_angle =
            clamp_field("inner_wall_angle", self.inner_wall_angle, range::WALL_ANGLE);
        self.outer_edge_rounding = clamp_field(
            "outer_edge_rounding",
            self.outer_edge_rounding,
            range::EDGE_ROUNDING,
        );
        self.rim_edge_rounding = clamp_field(
            "rim_edge_rounding",
            self.rim_edge_rounding,
            range::EDGE_ROUNDING,
        );
        self.crater_outline_irregularity = clamp_field(
            "crater_outline_irregularity",
            self.crater_outline_irregularity,
            range::OUTLINE_IRREGULARITY,
        );
        self.inner_asymmetry =
            clamp_field("inner_asymmetry", self.inner_asymmetry, range::ASYMMETRY);
        self.blast_asymmetry =
            clamp_field("blast_asymmetry", self.blast_asymmetry, range::ASYMMETRY);
        self.edge_fragmentation = clamp_field(
            "edge_fragmentation",
            self.edge_fragmentation,
            range::EDGE_FRAGMENTATION,
        );
        self.rim_height_variation = clamp_field(
            "rim_height_variation",
            self.rim_height_variation,
            range::RIM_VARIATION,
        );
        self.rim_noise_scale = clamp_field(
            "rim_noise_scale",
            self.rim_noise_scale,
            range::RIM_NOISE_SCALE,
        );

        if self.inner_radius >= self.outer_radius {
            warn!(
                "crater params: inner_radius {} not below outer_radius {}, reducing to 70%",
                self.inner_radius, self.outer_radius
            );
            self.inner_radius = self.outer_radius * 0.7;
        }
        self
    }

    /// Draw a randomized parameter set for batch generation.
    ///
    /// Fields without a range keep their defaults; the rim noise scale is
    /// always drawn from 1–8. The result is repaired, so it is safe to
    /// feed straight into the generator.
    pub fn random<R: Rng + ?Sized>(ranges: &RandomRanges, rng: &mut R) -> Self {
        let mut params = Self {
            outer_radius: rng.random_range(ranges.outer_radius.clone()),
            inner_radius: rng.random_range(ranges.inner_radius.clone()),
            ..Self::default()
        };
        if params.inner_radius >= params.outer_radius {
            params.inner_radius = params.outer_radius * 0.7;
        }

        params.depth = rng.random_range(ranges.depth.clone());
        params.rim_height = rng.random_range(ranges.rim_height.clone());
        params.resolution = rng.random_range(ranges.resolution.clone());
        params.noise_strength = rng.random_range(ranges.noise.clone());
        params.outside_noise_strength = rng.random_range(ranges.noise.clone());
        params.blast_asymmetry = rng.random_range(ranges.blast_asymmetry.clone());
        params.edge_fragmentation = rng.random_range(ranges.edge_fragmentation.clone());
        params.rim_height_variation = rng.random_range(ranges.rim_height_variation.clone());
        params.rim_noise_scale = rng.random_range(1.0..8.0);

        params.repaired()
    }
}

/// Per-parameter ranges for [`CraterParams::random`].
///
/// One shared `noise` range feeds both the inside and outside surface
/// detail strengths.
#[derive(Debug, Clone)]
pub struct RandomRanges {
    pub outer_radius: Range<f32>,
    pub inner_radius: Range<f32>,
    pub depth: Range<f32>,
    pub rim_height: Range<f32>,
    pub resolution: Range<u32>,
    pub noise: Range<f32>,
    pub blast_asymmetry: Range<f32>,
    pub edge_fragmentation: Range<f32>,
    pub rim_height_variation: Range<f32>,
}

impl Default for RandomRanges {
    fn default() -> Self {
        Self {
            outer_radius: 1.0..20.0,
            inner_radius: 0.5..10.0,
            depth: 0.1..10.0,
            rim_height: 0.0..5.0,
            resolution: 8..64,
            noise: 0.0..1.0,
            blast_asymmetry: 0.0..0.5,
            edge_fragmentation: 0.0..5.0,
            rim_height_variation: 0.0..0.3,
        }
    }
}
