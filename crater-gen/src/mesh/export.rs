//! Wavefront OBJ export
//!
//! Interchange convenience for inspecting generated craters in a DCC
//! tool. Emits positions, smooth vertex normals and the two zone
//! material slots; it is not a general OBJ serializer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::Vec3;

use crate::mesh::types::{CraterMesh, Zone};

fn material_name(zone: Zone) -> &'static str {
    match zone {
        Zone::Inner => "Crater_Inner",
        Zone::Outer => "Crater_Outer",
    }
}

/// Smooth per-vertex normals, area-weighted over adjacent faces.
///
/// Vertices referenced by no face fall back to straight up.
pub fn vertex_normals(mesh: &CraterMesh) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; mesh.positions.len()];
    for face in &mesh.faces {
        let weighted = mesh.face_normal(face.indices) * mesh.face_area(face.indices);
        for &corner in face.indices.as_slice() {
            normals[corner as usize] += weighted;
        }
    }
    normals
        .into_iter()
        .map(|normal| {
            let unit = normal.normalize_or_zero();
            if unit == Vec3::ZERO { Vec3::Z } else { unit }
        })
        .collect()
}

/// Write the mesh as an OBJ object named `name`.
///
/// Faces come out grouped by zone, inner first, each group under its
/// `usemtl` line, with 1-based `v//vn` references. Binding the two
/// materials is the importer's business; no `.mtl` sidecar is written.
pub fn write_obj<P: AsRef<Path>>(mesh: &CraterMesh, path: P, name: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "o {name}")?;
    for p in &mesh.positions {
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in vertex_normals(mesh) {
        writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    let mut current: Option<Zone> = None;
    for zone in [Zone::Inner, Zone::Outer] {
        for face in mesh.faces.iter().filter(|face| face.zone == zone) {
            if current != Some(zone) {
                writeln!(w, "usemtl {}", material_name(zone))?;
                current = Some(zone);
            }
            write!(w, "f")?;
            for &index in face.indices.as_slice() {
                let one_based = index + 1;
                write!(w, " {one_based}//{one_based}")?;
            }
            writeln!(w)?;
        }
    }
    w.flush()
}
