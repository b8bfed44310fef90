//! Vertex/edge/face adjacency for [`IndexedMesh`](super::IndexedMesh)

use hashbrown::HashMap;

/// **Mathematical Foundation: Incidence Tables over Indexed Triangles**
///
/// Built once from the face list and cached on the mesh:
/// - **Vertex → vertices**: one-ring neighbours, sorted and de-duplicated
/// - **Vertex → faces**: incident triangles in face order
/// - **Edge → faces**: keyed by the canonical edge `(min, max)`
///
/// An edge shared by one face is a boundary edge, by two a manifold edge and
/// by more a non-manifold edge.
#[derive(Debug, Clone, Default)]
pub struct Connectivity {
    vertex_neighbors: Vec<Vec<usize>>,
    vertex_faces: Vec<Vec<usize>>,
    edge_faces: HashMap<(usize, usize), Vec<usize>>,
}

impl Connectivity {
    pub fn build(vertex_count: usize, faces: &[[usize; 3]]) -> Self {
        let mut vertex_neighbors = vec![Vec::new(); vertex_count];
        let mut vertex_faces = vec![Vec::new(); vertex_count];
        let mut edge_faces: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for (face_idx, face) in faces.iter().enumerate() {
            for i in 0..3 {
                let v1 = face[i];
                let v2 = face[(i + 1) % 3];

                // Canonical edge representation (smaller index first)
                let edge = if v1 < v2 { (v1, v2) } else { (v2, v1) };
                edge_faces.entry(edge).or_default().push(face_idx);

                vertex_faces[v1].push(face_idx);
                vertex_neighbors[v1].push(v2);
                vertex_neighbors[v2].push(v1);
            }
        }

        for ring in &mut vertex_neighbors {
            ring.sort_unstable();
            ring.dedup();
        }

        Self {
            vertex_neighbors,
            vertex_faces,
            edge_faces,
        }
    }

    /// One-ring neighbours of `vertex`; empty for isolated or unknown vertices.
    pub fn vertex_neighbors(&self, vertex: usize) -> &[usize] {
        self.vertex_neighbors
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Faces incident to `vertex`.
    pub fn vertex_faces(&self, vertex: usize) -> &[usize] {
        self.vertex_faces
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Faces sharing the edge `(a, b)` in either orientation.
    pub fn edge_faces(&self, a: usize, b: usize) -> &[usize] {
        let edge = if a < b { (a, b) } else { (b, a) };
        self.edge_faces
            .get(&edge)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() == 1).count()
    }

    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() > 2).count()
    }

    /// Vertices not referenced by any face.
    pub fn isolated_vertex_count(&self) -> usize {
        self.vertex_faces.iter().filter(|f| f.is_empty()).count()
    }

    /// Closed when every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        !self.edge_faces.is_empty() && self.edge_faces.values().all(|f| f.len() == 2)
    }
}
