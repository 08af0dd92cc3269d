//! Mesh decimation boundary
//!
//! LOD chains and collision proxies are produced by host-side decimation;
//! the crater core never reduces meshes itself, it only hands one over
//! with a target face count. This module states that contract.

use thiserror::Error;

use crate::mesh::types::CraterMesh;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimplifyError {
    #[error("mesh has no faces to simplify")]
    NoInput,
    #[error("decimation backend failed: {0}")]
    Backend(String),
}

/// Reduces a mesh to approximately `target_faces` faces.
///
/// Implementations may overshoot or undershoot the target, but must keep
/// the mesh valid and preserve per-face zones where faces survive. An
/// empty input is the recoverable [`SimplifyError::NoInput`] condition.
pub trait Decimator {
    fn decimate(
        &self,
        mesh: &CraterMesh,
        target_faces: usize,
    ) -> Result<CraterMesh, SimplifyError>;
}
