//! Crater mesh construction and processing

pub mod assemble;
pub mod bottom;
pub mod detail;
pub mod export;
pub mod simplify;
pub mod topology;
pub mod types;
pub mod uv;
pub mod zones;

mod ring;

#[cfg(test)]
mod tests;

// Convenience re-exports
pub use assemble::{Shell, assemble_shell};
pub use bottom::add_bottom_closure;
pub use detail::apply_surface_detail;
pub use export::{vertex_normals, write_obj};
pub use simplify::{Decimator, SimplifyError};
pub use topology::{OptimizeParams, OptimizeReport, optimize};
pub use types::{CraterMesh, Face, FaceIndices, FaceRejection, Zone};
pub use uv::{FaceUv, UvError, UvMode, UvProjection, UvProjector};
pub use zones::classify_zones;
