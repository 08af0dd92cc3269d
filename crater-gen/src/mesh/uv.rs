//! UV projection boundary
//!
//! Real unwrapping (seam placement, island packing) belongs to the host
//! tooling; the crater core only asks a [`UvProjector`] for per-face
//! coordinates. [`UvProjection`] is the built-in implementation, good
//! enough for previews and texture lookup tests.

use glam::Vec3;
use thiserror::Error;

use crate::mesh::types::{CraterMesh, FaceIndices};

/// Per-corner UV coordinates of one face, parallel to [`FaceIndices`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceUv {
    Tri([[f32; 2]; 3]),
    Quad([[f32; 2]; 4]),
}

impl FaceUv {
    /// The corner coordinates as a slice (length 3 or 4).
    pub fn as_slice(&self) -> &[[f32; 2]] {
        match self {
            FaceUv::Tri(uv) => uv,
            FaceUv::Quad(uv) => uv,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UvError {
    #[error("mesh has no vertices to project")]
    NoInput,
}

/// Produces one [`FaceUv`] per face, covering every face without
/// zero-area islands.
pub trait UvProjector {
    fn project(&self, mesh: &CraterMesh) -> Result<Vec<FaceUv>, UvError>;
}

/// Projection mode for [`UvProjection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvMode {
    /// Straight down onto the ground plane. Simple, but steep walls
    /// collapse to thin strips.
    #[default]
    TopDown,
    /// Per-face dominant normal axis picks one of the three planes.
    Triplanar,
}

/// Built-in bounds-normalized projection.
#[derive(Debug, Clone, Copy)]
pub struct UvProjection {
    pub mode: UvMode,
    pub scale: f32,
    pub offset: [f32; 2],
}

impl Default for UvProjection {
    fn default() -> Self {
        Self {
            mode: UvMode::TopDown,
            scale: 1.0,
            offset: [0.0, 0.0],
        }
    }
}

impl UvProjection {
    fn corner_uv(&self, local: Vec3, size: Vec3, normal: Vec3) -> [f32; 2] {
        let (u, v) = match self.mode {
            UvMode::TopDown => (local.x / size.x + 0.5, local.y / size.y + 0.5),
            UvMode::Triplanar => {
                let absolute = normal.abs();
                if absolute.x > absolute.y && absolute.x > absolute.z {
                    (local.y / size.y + 0.5, local.z / size.z + 0.5)
                } else if absolute.y > absolute.z {
                    (local.x / size.x + 0.5, local.z / size.z + 0.5)
                } else {
                    (local.x / size.x + 0.5, local.y / size.y + 0.5)
                }
            }
        };
        [
            u * self.scale + self.offset[0],
            v * self.scale + self.offset[1],
        ]
    }
}

impl UvProjector for UvProjection {
    fn project(&self, mesh: &CraterMesh) -> Result<Vec<FaceUv>, UvError> {
        if mesh.positions.is_empty() {
            return Err(UvError::NoInput);
        }

        let (min, max) = bounds(&mesh.positions);
        let center = (min + max) * 0.5;
        // Degenerate extents would divide by zero.
        let size = (max - min).max(Vec3::splat(1e-6));

        let mut uvs = Vec::with_capacity(mesh.faces.len());
        for face in &mesh.faces {
            let normal = mesh.face_normal(face.indices);
            let corner = |index: u32| {
                self.corner_uv(mesh.positions[index as usize] - center, size, normal)
            };
            uvs.push(match face.indices {
                FaceIndices::Tri([a, b, c]) => FaceUv::Tri([corner(a), corner(b), corner(c)]),
                FaceIndices::Quad([a, b, c, d]) => {
                    FaceUv::Quad([corner(a), corner(b), corner(c), corner(d)])
                }
            });
        }
        Ok(uvs)
    }
}

fn bounds(positions: &[Vec3]) -> (Vec3, Vec3) {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for &position in positions {
        min = min.min(position);
        max = max.max(position);
    }
    (min, max)
}
