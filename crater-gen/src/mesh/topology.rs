//! Topology cleanup
//!
//! Four passes run on the assembled crater, in order: weld near-coincident
//! vertices, drop degenerate faces, repair winding so every normal points
//! out of the surface, and triangulate the remaining quads. The whole
//! sequence is idempotent, and each pass is usable on its own.

use std::collections::{HashMap, HashSet, VecDeque};

use glam::Vec3;
use tracing::debug;

use crate::mesh::types::{CraterMesh, Face, FaceIndices};

/// Tolerances for the cleanup passes.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeParams {
    /// Vertices closer than this merge into one.
    pub weld_distance: f32,
    /// Faces with an edge shorter than this, or area below its square,
    /// are dropped.
    pub degenerate_distance: f32,
}

impl Default for OptimizeParams {
    fn default() -> Self {
        Self {
            weld_distance: 0.001,
            degenerate_distance: 0.0001,
        }
    }
}

/// Change counts from one [`optimize`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizeReport {
    pub welded_vertices: usize,
    pub removed_faces: usize,
    pub flipped_faces: usize,
    pub split_quads: usize,
}

/// Run all cleanup passes.
pub fn optimize(mesh: &mut CraterMesh, params: &OptimizeParams) -> OptimizeReport {
    let faces_before = mesh.face_count();

    let welded_vertices = weld_vertices(mesh, params.weld_distance);
    remove_degenerate_faces(mesh, params.degenerate_distance);
    let removed_faces = faces_before - mesh.face_count();
    let flipped_faces = make_windings_consistent(mesh);
    let split_quads = triangulate(mesh);

    let report = OptimizeReport {
        welded_vertices,
        removed_faces,
        flipped_faces,
        split_quads,
    };
    debug!(
        "topology cleanup: {} welded, {} removed, {} flipped, {} quads split",
        welded_vertices, removed_faces, flipped_faces, split_quads
    );
    report
}

fn cell_of(p: Vec3, cell_size: f32) -> (i64, i64, i64) {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}

fn all_distinct(corners: &[u32]) -> bool {
    for i in 0..corners.len() {
        for j in (i + 1)..corners.len() {
            if corners[i] == corners[j] {
                return false;
            }
        }
    }
    true
}

// Drop cyclically-consecutive duplicate corners; a face survives only if
// 3 or 4 distinct corners remain.
fn normalized_face(corners: &[u32]) -> Option<FaceIndices> {
    let mut kept = [0u32; 4];
    let mut kept_len = 0;
    for k in 0..corners.len() {
        if corners[k] != corners[(k + 1) % corners.len()] {
            kept[kept_len] = corners[k];
            kept_len += 1;
        }
    }

    match kept_len {
        3 if all_distinct(&kept[..3]) => Some(FaceIndices::Tri([kept[0], kept[1], kept[2]])),
        4 if all_distinct(&kept) => Some(FaceIndices::Quad(kept)),
        _ => None,
    }
}

/// Merge vertices closer than `epsilon`, keeping the first occurrence as
/// the canonical one. Faces are remapped (quads that lose a corner become
/// triangles, fully collapsed faces disappear) and merged-away vertex
/// slots are compacted out. Returns the number of vertices merged.
pub fn weld_vertices(mesh: &mut CraterMesh, epsilon: f32) -> usize {
    if mesh.positions.is_empty() {
        return 0;
    }

    let cell_size = epsilon * 2.0;
    let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, &p) in mesh.positions.iter().enumerate() {
        spatial_hash
            .entry(cell_of(p, cell_size))
            .or_default()
            .push(idx as u32);
    }

    // Map every vertex to its canonical representative. Scanning in
    // insertion order with the `other > idx` guard keeps representatives
    // stable: an index can only be remapped before its own turn.
    let mut remap: Vec<u32> = (0..mesh.positions.len() as u32).collect();
    let mut merged = 0;

    for (idx, &p) in mesh.positions.iter().enumerate() {
        let idx = idx as u32;
        if remap[idx as usize] != idx {
            continue;
        }

        let cell = cell_of(p, cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                    let Some(candidates) = spatial_hash.get(&neighbor) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other as usize] != other {
                            continue;
                        }
                        if p.distance(mesh.positions[other as usize]) < epsilon {
                            remap[other as usize] = idx;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged == 0 {
        return 0;
    }

    // Compact surviving vertices, preserving insertion order.
    let mut final_map = vec![0u32; mesh.positions.len()];
    let mut new_positions = Vec::with_capacity(mesh.positions.len() - merged);
    for i in 0..mesh.positions.len() {
        if remap[i] == i as u32 {
            final_map[i] = new_positions.len() as u32;
            new_positions.push(mesh.positions[i]);
        }
    }
    for i in 0..mesh.positions.len() {
        if remap[i] != i as u32 {
            final_map[i] = final_map[remap[i] as usize];
        }
    }
    mesh.positions = new_positions;

    let old_faces = std::mem::take(&mut mesh.faces);
    for face in old_faces {
        let mut corners = [0u32; 4];
        let slice = face.indices.as_slice();
        for (k, &index) in slice.iter().enumerate() {
            corners[k] = final_map[index as usize];
        }
        if let Some(indices) = normalized_face(&corners[..slice.len()]) {
            mesh.faces.push(Face {
                indices,
                zone: face.zone,
            });
        }
    }

    merged
}

fn face_area_of(positions: &[Vec3], corners: &[u32]) -> f32 {
    let mut normal = Vec3::ZERO;
    for k in 0..corners.len() {
        let a = positions[corners[k] as usize];
        let b = positions[corners[(k + 1) % corners.len()] as usize];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal.length() * 0.5
}

/// Drop faces with a repeated corner, an edge shorter than `distance` or
/// an area below `distance²`. Returns the number removed.
pub fn remove_degenerate_faces(mesh: &mut CraterMesh, distance: f32) -> usize {
    let area_threshold = distance * distance;
    let before = mesh.faces.len();
    let positions = &mesh.positions;

    mesh.faces.retain(|face| {
        let corners = face.indices.as_slice();
        if !all_distinct(corners) {
            return false;
        }
        for k in 0..corners.len() {
            let a = positions[corners[k] as usize];
            let b = positions[corners[(k + 1) % corners.len()] as usize];
            if a.distance(b) < distance {
                return false;
            }
        }
        face_area_of(positions, corners) >= area_threshold
    });

    before - mesh.faces.len()
}

fn undirected(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

// Whether `face` traverses the edge a->b in that direction.
fn traverses_forward(face: FaceIndices, a: u32, b: u32) -> bool {
    let corners = face.as_slice();
    for k in 0..corners.len() {
        if corners[k] == a && corners[(k + 1) % corners.len()] == b {
            return true;
        }
    }
    false
}

/// Make face windings consistent and outward-facing.
///
/// Neighbor faces must traverse their shared edge in opposite directions;
/// disagreements are resolved by flipping, propagating from the first face
/// of each connected component. The whole mesh is then oriented outward:
/// closed surfaces by positive enclosed volume, open ones by a
/// non-negative area-weighted mean normal height. Returns the number of
/// faces whose winding changed.
pub fn make_windings_consistent(mesh: &mut CraterMesh) -> usize {
    if mesh.faces.is_empty() {
        return 0;
    }

    let mut edge_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
    for (f, face) in mesh.faces.iter().enumerate() {
        let corners = face.indices.as_slice();
        for k in 0..corners.len() {
            let key = undirected(corners[k], corners[(k + 1) % corners.len()]);
            edge_faces.entry(key).or_default().push(f);
        }
    }

    // Breadth-first propagation of a consistent orientation.
    let mut visited = vec![false; mesh.faces.len()];
    let mut flip = vec![false; mesh.faces.len()];
    let mut queue = VecDeque::new();

    for seed in 0..mesh.faces.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        queue.push_back(seed);

        while let Some(f) = queue.pop_front() {
            let f_indices = mesh.faces[f].indices;
            let corners = f_indices.as_slice();
            for k in 0..corners.len() {
                let (a, b) = (corners[k], corners[(k + 1) % corners.len()]);
                for &g in &edge_faces[&undirected(a, b)] {
                    if g == f || visited[g] {
                        continue;
                    }
                    let f_forward = traverses_forward(f_indices, a, b) ^ flip[f];
                    let g_forward = traverses_forward(mesh.faces[g].indices, a, b);
                    // Consistent neighbors traverse the edge in opposite
                    // directions.
                    flip[g] = !(g_forward ^ f_forward);
                    visited[g] = true;
                    queue.push_back(g);
                }
            }
        }
    }

    for (f, &do_flip) in flip.iter().enumerate() {
        if do_flip {
            mesh.faces[f].indices = mesh.faces[f].indices.reversed();
        }
    }

    // Global outward vote.
    let closed = edge_faces.values().all(|faces| faces.len() == 2);
    let outward_measure = if closed {
        signed_volume(mesh)
    } else {
        mesh.faces
            .iter()
            .map(|face| {
                let corners = face.indices.as_slice();
                let mut normal = Vec3::ZERO;
                for k in 0..corners.len() {
                    let a = mesh.positions[corners[k] as usize];
                    let b = mesh.positions[corners[(k + 1) % corners.len()] as usize];
                    normal.x += (a.y - b.y) * (a.z + b.z);
                    normal.y += (a.z - b.z) * (a.x + b.x);
                    normal.z += (a.x - b.x) * (a.y + b.y);
                }
                normal.z
            })
            .sum()
    };
    let flip_all = outward_measure < 0.0;
    if flip_all {
        for face in &mut mesh.faces {
            face.indices = face.indices.reversed();
        }
    }

    flip.iter()
        .map(|&f| if f != flip_all { 1 } else { 0 })
        .sum()
}

// Six times the volume enclosed by a closed, consistently wound surface;
// negative when the winding points inward.
fn signed_volume(mesh: &CraterMesh) -> f32 {
    let mut total = 0.0;
    for face in &mesh.faces {
        let corners = face.indices.as_slice();
        let origin = mesh.positions[corners[0] as usize];
        for k in 1..(corners.len() - 1) {
            let b = mesh.positions[corners[k] as usize];
            let c = mesh.positions[corners[k + 1] as usize];
            total += origin.dot(b.cross(c));
        }
    }
    total
}

fn min_corner_angle(positions: &[Vec3], tri: [u32; 3]) -> f32 {
    let mut min_angle = f32::MAX;
    for k in 0..3 {
        let a = positions[tri[k] as usize];
        let b = positions[tri[(k + 1) % 3] as usize];
        let c = positions[tri[(k + 2) % 3] as usize];
        let u = (b - a).normalize_or_zero();
        let v = (c - a).normalize_or_zero();
        let angle = u.dot(v).clamp(-1.0, 1.0).acos();
        min_angle = min_angle.min(angle);
    }
    min_angle
}

/// Split every quad into two triangles along the diagonal that maximizes
/// the smallest interior angle. Returns the number of quads split.
pub fn triangulate(mesh: &mut CraterMesh) -> usize {
    let mut split = 0;
    let old_faces = std::mem::take(&mut mesh.faces);
    let positions = &mesh.positions;

    for face in old_faces {
        match face.indices {
            FaceIndices::Tri(_) => mesh.faces.push(face),
            FaceIndices::Quad([a, b, c, d]) => {
                let quality_ac =
                    min_corner_angle(positions, [a, b, c]).min(min_corner_angle(positions, [a, c, d]));
                let quality_bd =
                    min_corner_angle(positions, [a, b, d]).min(min_corner_angle(positions, [b, c, d]));

                let (first, second) = if quality_ac >= quality_bd {
                    ([a, b, c], [a, c, d])
                } else {
                    ([a, b, d], [b, c, d])
                };
                mesh.faces.push(Face {
                    indices: FaceIndices::Tri(first),
                    zone: face.zone,
                });
                mesh.faces.push(Face {
                    indices: FaceIndices::Tri(second),
                    zone: face.zone,
                });
                split += 1;
            }
        }
    }
    split
}

/// True when every edge is shared by exactly two faces.
pub fn is_closed(mesh: &CraterMesh) -> bool {
    let mut edge_count: HashMap<(u32, u32), usize> = HashMap::new();
    for face in &mesh.faces {
        let corners = face.indices.as_slice();
        for k in 0..corners.len() {
            let key = undirected(corners[k], corners[(k + 1) % corners.len()]);
            *edge_count.entry(key).or_insert(0) += 1;
        }
    }
    !edge_count.is_empty() && edge_count.values().all(|&count| count == 2)
}

/// Indices referenced by no face.
pub fn unreferenced_vertices(mesh: &CraterMesh) -> Vec<u32> {
    let mut referenced: HashSet<u32> = HashSet::new();
    for face in &mesh.faces {
        referenced.extend(face.indices.as_slice().iter().copied());
    }
    (0..mesh.positions.len() as u32)
        .filter(|index| !referenced.contains(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::types::Zone;

    fn quad_mesh() -> CraterMesh {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.try_add_quad([0, 1, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn test_weld_merges_near_duplicates() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0002, 0.0, 0.0)); // near-duplicate of 1
        mesh.try_add_tri([0, 1, 2]).unwrap();
        mesh.try_add_tri([1, 3, 2]).unwrap();

        let merged = weld_vertices(&mut mesh, 0.001);

        assert_eq!(merged, 1);
        assert_eq!(mesh.vertex_count(), 3);
        // First triangle survives; the second collapses onto a shared edge.
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0].indices, FaceIndices::Tri([0, 1, 2]));
    }

    #[test]
    fn test_weld_keeps_first_occurrence_position() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.5, 0.5, 0.5));
        mesh.add_vertex(Vec3::new(0.5002, 0.5, 0.5));

        let merged = weld_vertices(&mut mesh, 0.001);

        assert_eq!(merged, 1);
        assert_eq!(mesh.positions, vec![Vec3::new(0.5, 0.5, 0.5)]);
    }

    #[test]
    fn test_weld_does_not_chain_beyond_epsilon() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0009, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0018, 0.0, 0.0));

        let merged = weld_vertices(&mut mesh, 0.001);

        // 1 merges into 0; 2 stays, it is 0.0018 from vertex 0.
        assert_eq!(merged, 1);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.positions[1], Vec3::new(0.0018, 0.0, 0.0));
    }

    #[test]
    fn test_weld_turns_quad_into_triangle() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0001, 1.0, 0.0)); // collapses onto 2
        mesh.try_add_quad([0, 1, 3, 2]).unwrap();

        // Corner 3 welds onto corner 2, leaving [0, 1, 2, 2].
        let merged = weld_vertices(&mut mesh, 0.001);

        assert_eq!(merged, 1);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0].indices, FaceIndices::Tri([0, 1, 2]));
    }

    #[test]
    fn test_degenerate_removal_drops_slivers() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(2.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(2.0, 0.00005, 0.0));
        mesh.try_add_tri([0, 1, 2]).unwrap(); // healthy
        mesh.try_add_tri([1, 3, 4]).unwrap(); // short edge 3-4

        let removed = remove_degenerate_faces(&mut mesh, 0.0001);

        assert_eq!(removed, 1);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0].indices, FaceIndices::Tri([0, 1, 2]));
    }

    #[test]
    fn test_degenerate_removal_drops_collinear_faces() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(2.0, 0.0, 0.0));

        mesh.try_add_tri([0, 1, 2]).unwrap();
        let removed = remove_degenerate_faces(&mut mesh, 0.0001);

        assert_eq!(removed, 1);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_winding_repair_flips_inconsistent_neighbor() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(2.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(2.0, 1.0, 0.0));
        mesh.try_add_quad([0, 1, 2, 3]).unwrap(); // up
        mesh.try_add_quad([2, 5, 4, 1]).unwrap(); // down, inconsistent

        let flipped = make_windings_consistent(&mut mesh);

        assert_eq!(flipped, 1);
        for face in &mesh.faces {
            assert!(mesh.face_normal(face.indices).z > 0.9);
        }
    }

    #[test]
    fn test_winding_repair_orients_open_surface_upward() {
        let mut mesh = quad_mesh();
        mesh.faces[0].indices = mesh.faces[0].indices.reversed(); // now facing down

        let flipped = make_windings_consistent(&mut mesh);

        assert_eq!(flipped, 1);
        assert!(mesh.face_normal(mesh.faces[0].indices).z > 0.9);
    }

    #[test]
    fn test_winding_repair_orients_closed_surface_outward() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 0.0, 1.0));
        // A tetrahedron wound inward.
        mesh.try_add_tri([0, 1, 2]).unwrap();
        mesh.try_add_tri([3, 1, 0]).unwrap();
        mesh.try_add_tri([3, 2, 1]).unwrap();
        mesh.try_add_tri([3, 0, 2]).unwrap();

        assert!(is_closed(&mesh));
        let flipped = make_windings_consistent(&mut mesh);
        assert_eq!(flipped, 4);

        // Every normal now points away from the centroid.
        let centroid = Vec3::new(0.25, 0.25, 0.25);
        for face in &mesh.faces {
            let normal = mesh.face_normal(face.indices);
            let outward = mesh.face_centroid(face.indices) - centroid;
            assert!(normal.dot(outward) > 0.0);
        }
    }

    #[test]
    fn test_winding_repair_is_idempotent() {
        let mut mesh = quad_mesh();
        mesh.add_vertex(Vec3::new(2.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(2.0, 1.0, 0.0));
        mesh.try_add_quad([2, 5, 4, 1]).unwrap(); // inconsistent with the first

        assert_eq!(make_windings_consistent(&mut mesh), 1);
        assert_eq!(make_windings_consistent(&mut mesh), 0);
    }

    #[test]
    fn test_triangulate_splits_quads() {
        let mut mesh = quad_mesh();
        mesh.faces[0].zone = Zone::Outer;

        let split = triangulate(&mut mesh);

        assert_eq!(split, 1);
        assert_eq!(mesh.face_count(), 2);
        for face in &mesh.faces {
            assert!(matches!(face.indices, FaceIndices::Tri(_)));
            assert_eq!(face.zone, Zone::Outer);
        }
    }

    #[test]
    fn test_triangulate_picks_better_diagonal() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0)); // a
        mesh.add_vertex(Vec3::new(1.0, 0.05, 0.0)); // b, almost on the a-c line
        mesh.add_vertex(Vec3::new(2.0, 0.0, 0.0)); // c
        mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0)); // d
        mesh.try_add_quad([0, 1, 2, 3]).unwrap();

        triangulate(&mut mesh);

        // Splitting along a-c would make triangle a-b-c a sliver, so the
        // b-d diagonal wins.
        assert_eq!(mesh.faces[0].indices, FaceIndices::Tri([0, 1, 3]));
        assert_eq!(mesh.faces[1].indices, FaceIndices::Tri([1, 2, 3]));
    }

    #[test]
    fn test_triangulate_leaves_triangles_alone() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::ZERO);
        mesh.add_vertex(Vec3::X);
        mesh.add_vertex(Vec3::Y);
        mesh.try_add_tri([0, 1, 2]).unwrap();

        assert_eq!(triangulate(&mut mesh), 0);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_optimize_is_idempotent() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0002, 0.0, 0.0)); // near-duplicate of 1
        mesh.try_add_quad([0, 1, 2, 3]).unwrap();
        mesh.try_add_tri([0, 4, 2]).unwrap();

        let params = OptimizeParams::default();
        let first = optimize(&mut mesh, &params);
        assert!(first.welded_vertices > 0 || first.split_quads > 0);

        let snapshot_positions = mesh.positions.clone();
        let snapshot_faces = mesh.faces.clone();
        let second = optimize(&mut mesh, &params);

        assert_eq!(second, OptimizeReport::default());
        assert_eq!(mesh.positions, snapshot_positions);
        assert_eq!(mesh.faces, snapshot_faces);
    }

    #[test]
    fn test_unreferenced_vertices_reported() {
        let mut mesh = CraterMesh::new();
        mesh.add_vertex(Vec3::ZERO);
        mesh.add_vertex(Vec3::X);
        mesh.add_vertex(Vec3::Y);
        mesh.add_vertex(Vec3::Z); // never used
        mesh.try_add_tri([0, 1, 2]).unwrap();

        assert_eq!(unreferenced_vertices(&mesh), vec![3]);
    }
}
