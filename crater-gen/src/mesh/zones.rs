//! Material zone classification
//!
//! Tags every face as [`Zone::Inner`] (bowl, rim, steep walls) or
//! [`Zone::Outer`] (surrounding terrain, skirt, underside) so the export
//! can bind two materials. Runs after topology cleanup, when the mesh is
//! all triangles, but handles quads the same way.

use crate::mesh::types::{CraterMesh, Zone};
use crate::params::CraterParams;

/// Assign a zone to every face.
///
/// Closed-bottom undersides are forced [`Zone::Outer`] by position alone:
/// faces at the bottom plate depth, and faces below ground level out past
/// 80% of the outer radius. Everything else is [`Zone::Inner`] when it is
/// within 120% of the inner radius, above 40% of the rim height, or
/// steeper than a 0.4 upward normal, and [`Zone::Outer`] otherwise.
pub fn classify_zones(mesh: &mut CraterMesh, params: &CraterParams) {
    let inner_limit = params.inner_radius * 1.2;
    let rim_limit = params.rim_height * 0.4;
    let skirt_limit = params.outer_radius * 0.8;
    let underside_limit = -params.bottom_thickness + 0.05;

    for f in 0..mesh.faces.len() {
        let indices = mesh.faces[f].indices;
        let centroid = mesh.face_centroid(indices);
        let distance = centroid.truncate().length();

        let zone = if params.close_bottom && centroid.z <= underside_limit {
            Zone::Outer
        } else if params.close_bottom && centroid.z < -0.05 && distance > skirt_limit {
            Zone::Outer
        } else {
            let normal = mesh.face_normal(indices);
            if distance < inner_limit || centroid.z > rim_limit || normal.z < 0.4 {
                Zone::Inner
            } else {
                Zone::Outer
            }
        };
        mesh.faces[f].zone = zone;
    }
}
