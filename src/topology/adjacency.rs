//! Vertex adjacency and face incidence derived from face lists.

use std::collections::BTreeSet;

use crate::geometry::FaceVertexMesh;

/// Per-vertex neighbor and incident-face sets.
///
/// Built in a single pass over the face list and never persisted across
/// flow steps: topology does not change between generations, only vertex
/// positions do, so each step derives adjacency fresh from the current
/// mesh. Ordered sets keep iteration deterministic.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<BTreeSet<usize>>,
    incident_faces: Vec<BTreeSet<usize>>,
}

impl Adjacency {
    /// Derives adjacency from a mesh's face list.
    ///
    /// Duplicated indices within one face (degenerate quads) never produce a
    /// self-adjacency entry or a double-counted incidence.
    pub fn build(mesh: &FaceVertexMesh) -> Self {
        let count = mesh.vertex_count();
        let mut neighbors = vec![BTreeSet::new(); count];
        let mut incident_faces = vec![BTreeSet::new(); count];

        for (face_index, face) in mesh.faces().iter().enumerate() {
            let ring = face.indices();
            for slot in 0..ring.len() {
                let a = ring[slot];
                let b = ring[(slot + 1) % ring.len()];
                if a != b {
                    neighbors[a].insert(b);
                    neighbors[b].insert(a);
                }
                incident_faces[a].insert(face_index);
            }
        }

        Adjacency {
            neighbors,
            incident_faces,
        }
    }

    /// Number of vertices covered by the adjacency.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// The neighbor set of `vertex`.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &BTreeSet<usize> {
        &self.neighbors[vertex]
    }

    /// The set of faces incident to `vertex`.
    #[inline]
    pub fn incident_faces(&self, vertex: usize) -> &BTreeSet<usize> {
        &self.incident_faces[vertex]
    }

    /// Number of neighbors of `vertex`.
    #[inline]
    pub fn valence(&self, vertex: usize) -> usize {
        self.neighbors[vertex].len()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::geometry::MeshFace;

    fn octahedron() -> FaceVertexMesh {
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        let faces = vec![
            MeshFace::Triangle([0, 2, 4]),
            MeshFace::Triangle([2, 1, 4]),
            MeshFace::Triangle([1, 3, 4]),
            MeshFace::Triangle([3, 0, 4]),
            MeshFace::Triangle([2, 0, 5]),
            MeshFace::Triangle([1, 2, 5]),
            MeshFace::Triangle([3, 1, 5]),
            MeshFace::Triangle([0, 3, 5]),
        ];
        FaceVertexMesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_cube_has_three_neighbors_and_three_faces_per_vertex() {
        let cube = FaceVertexMesh::cube(1.0).unwrap();
        let adjacency = Adjacency::build(&cube);
        assert_eq!(adjacency.vertex_count(), 8);
        for vertex in 0..8 {
            assert_eq!(adjacency.valence(vertex), 3, "vertex {}", vertex);
            assert_eq!(adjacency.incident_faces(vertex).len(), 3, "vertex {}", vertex);
        }
    }

    #[test]
    fn test_octahedron_has_valence_four() {
        let adjacency = Adjacency::build(&octahedron());
        for vertex in 0..6 {
            assert_eq!(adjacency.valence(vertex), 4);
            assert_eq!(adjacency.incident_faces(vertex).len(), 4);
        }
        // Opposite poles are not adjacent.
        assert!(!adjacency.neighbors(4).contains(&5));
    }

    #[test]
    fn test_degenerate_quad_creates_no_self_adjacency() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = FaceVertexMesh::new(vertices, vec![MeshFace::Quad([0, 1, 2, 2])]).unwrap();
        let adjacency = Adjacency::build(&mesh);
        assert!(!adjacency.neighbors(2).contains(&2));
        assert_eq!(adjacency.neighbors(2).len(), 2);
        assert_eq!(adjacency.incident_faces(2).len(), 1);
    }
}
