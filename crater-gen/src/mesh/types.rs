//! Mesh storage for crater generation
//!
//! A [`CraterMesh`] is a flat vertex list plus tri/quad faces that index
//! into it. Faces wind counter-clockwise seen from outside the surface and
//! carry the material [`Zone`] assigned by the classifier.

use glam::Vec3;
use thiserror::Error;

/// Material zone of a face, mapped to a material slot on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Bowl, rim and steep interior surfaces (slot 0).
    #[default]
    Inner,
    /// Surrounding terrain, skirt and underside surfaces (slot 1).
    Outer,
}

impl Zone {
    /// Material slot index for this zone.
    pub fn material_index(self) -> u32 {
        match self {
            Zone::Inner => 0,
            Zone::Outer => 1,
        }
    }
}

/// Vertex indices of a single face, wound counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceIndices {
    Tri([u32; 3]),
    Quad([u32; 4]),
}

impl FaceIndices {
    /// The indices as a slice (length 3 or 4).
    pub fn as_slice(&self) -> &[u32] {
        match self {
            FaceIndices::Tri(idx) => idx,
            FaceIndices::Quad(idx) => idx,
        }
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        match self {
            FaceIndices::Tri(_) => 3,
            FaceIndices::Quad(_) => 4,
        }
    }

    /// Same face with opposite winding.
    pub fn reversed(&self) -> Self {
        match *self {
            FaceIndices::Tri([a, b, c]) => FaceIndices::Tri([c, b, a]),
            FaceIndices::Quad([a, b, c, d]) => FaceIndices::Quad([d, c, b, a]),
        }
    }

    /// Order-insensitive identity, used to detect duplicate faces.
    pub(crate) fn key(&self) -> [u32; 4] {
        let mut key = match *self {
            FaceIndices::Tri([a, b, c]) => [a, b, c, u32::MAX],
            FaceIndices::Quad(idx) => idx,
        };
        key.sort_unstable();
        key
    }
}

/// A face: corner indices plus the material zone it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: FaceIndices,
    pub zone: Zone,
}

impl Face {
    pub fn tri(indices: [u32; 3]) -> Self {
        Self {
            indices: FaceIndices::Tri(indices),
            zone: Zone::default(),
        }
    }

    pub fn quad(indices: [u32; 4]) -> Self {
        Self {
            indices: FaceIndices::Quad(indices),
            zone: Zone::default(),
        }
    }
}

/// Why a face insertion was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FaceRejection {
    #[error("face references vertex {index} but the mesh has {vertex_count} vertices")]
    OutOfBounds { index: u32, vertex_count: usize },
    #[error("face repeats a vertex index")]
    Degenerate,
    #[error("face duplicates an existing face")]
    Duplicate,
}

/// Crater geometry: positions plus zone-tagged tri/quad faces.
///
/// Vertices keep insertion order; faces refer to them by dense `u32`
/// index. Rejected insertions leave the mesh untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CraterMesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl CraterMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append a vertex, returning its index.
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        index
    }

    /// Append a face unless it is malformed.
    ///
    /// Refuses indices beyond the vertex count and faces that repeat a
    /// corner. Duplicate detection against already-inserted faces is the
    /// stitcher's job; it has the insertion history.
    pub fn try_add_face(&mut self, indices: FaceIndices) -> Result<(), FaceRejection> {
        let corners = indices.as_slice();
        for &index in corners {
            if index as usize >= self.positions.len() {
                return Err(FaceRejection::OutOfBounds {
                    index,
                    vertex_count: self.positions.len(),
                });
            }
        }
        for i in 0..corners.len() {
            for j in (i + 1)..corners.len() {
                if corners[i] == corners[j] {
                    return Err(FaceRejection::Degenerate);
                }
            }
        }

        self.faces.push(Face {
            indices,
            zone: Zone::default(),
        });
        Ok(())
    }

    /// Append a triangle unless it is malformed.
    pub fn try_add_tri(&mut self, indices: [u32; 3]) -> Result<(), FaceRejection> {
        self.try_add_face(FaceIndices::Tri(indices))
    }

    /// Append a quad unless it is malformed.
    pub fn try_add_quad(&mut self, indices: [u32; 4]) -> Result<(), FaceRejection> {
        self.try_add_face(FaceIndices::Quad(indices))
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.faces.is_empty()
    }

    /// Average of the face's corner positions.
    pub fn face_centroid(&self, face: FaceIndices) -> Vec3 {
        let corners = face.as_slice();
        let sum: Vec3 = corners
            .iter()
            .map(|&i| self.positions[i as usize])
            .sum();
        sum / corners.len() as f32
    }

    // Unnormalized Newell normal; length is twice the face area.
    fn newell(&self, face: FaceIndices) -> Vec3 {
        let corners = face.as_slice();
        let mut normal = Vec3::ZERO;
        for k in 0..corners.len() {
            let a = self.positions[corners[k] as usize];
            let b = self.positions[corners[(k + 1) % corners.len()] as usize];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal
    }

    /// Unit normal implied by the face's winding; zero for degenerate
    /// faces.
    pub fn face_normal(&self, face: FaceIndices) -> Vec3 {
        self.newell(face).normalize_or_zero()
    }

    /// Face area (exact for triangles and planar quads).
    pub fn face_area(&self, face: FaceIndices) -> f32 {
        self.newell(face).length() * 0.5
    }
}
