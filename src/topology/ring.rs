//! Ordered neighbor rings walked along the face fan.

use std::collections::BTreeSet;

use crate::topology::Adjacency;

/// The neighbors of a vertex ordered into a cyclic fan sequence.
///
/// Starting from the smallest-index neighbor, the walk repeatedly picks an
/// unvisited neighbor that shares an incident face with both the current
/// neighbor and the center vertex. Where no such neighbor exists (boundary
/// or non-manifold topology) the walk falls back to an arbitrary remaining
/// neighbor so that every neighbor is still visited exactly once, and the
/// ring is marked unverified. Winding consistency is not guaranteed on
/// unverified rings.
#[derive(Debug, Clone)]
pub struct NeighborRing {
    vertices: Vec<usize>,
    fan_verified: bool,
}

impl NeighborRing {
    /// Orders the neighbors of `center` along its face fan.
    pub fn around(center: usize, adjacency: &Adjacency) -> Self {
        let mut remaining = adjacency.neighbors(center).clone();
        let mut vertices = Vec::with_capacity(remaining.len());
        let mut fan_verified = true;

        if let Some(start) = remaining.pop_first() {
            vertices.push(start);
        }
        while !remaining.is_empty() {
            let current = vertices[vertices.len() - 1];
            match fan_successor(center, current, &remaining, adjacency) {
                Some(next) => {
                    remaining.remove(&next);
                    vertices.push(next);
                }
                None => {
                    // No shared face to follow; keep terminating but flag the ring.
                    fan_verified = false;
                    if let Some(next) = remaining.pop_first() {
                        vertices.push(next);
                    }
                }
            }
        }

        NeighborRing {
            vertices,
            fan_verified,
        }
    }

    /// The neighbor indices in fan order.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Ring length, equal to the center vertex's valence.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the ring is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether every consecutive pair was linked through a shared face.
    #[inline]
    pub fn fan_verified(&self) -> bool {
        self.fan_verified
    }
}

/// The first unvisited neighbor sharing a face with both `center` and
/// `current`, in index order.
fn fan_successor(
    center: usize,
    current: usize,
    remaining: &BTreeSet<usize>,
    adjacency: &Adjacency,
) -> Option<usize> {
    let center_faces = adjacency.incident_faces(center);
    let current_faces = adjacency.incident_faces(current);
    remaining.iter().copied().find(|&candidate| {
        adjacency
            .incident_faces(candidate)
            .iter()
            .any(|face| center_faces.contains(face) && current_faces.contains(face))
    })
}

/// Vertices whose neighbor ring needed the arbitrary-order fallback.
///
/// An empty result means every ring followed the face fan; a non-empty one
/// lists the vertices where flow results depend on an unverified ordering.
pub fn unverified_rings(adjacency: &Adjacency) -> Vec<usize> {
    (0..adjacency.vertex_count())
        .filter(|&vertex| !NeighborRing::around(vertex, adjacency).fan_verified())
        .collect()
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::geometry::{FaceVertexMesh, MeshFace};

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

    /// Two triangles joined only at vertex 0.
    fn bowtie() -> FaceVertexMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
        ];
        let faces = vec![MeshFace::Triangle([0, 1, 2]), MeshFace::Triangle([0, 3, 4])];
        FaceVertexMesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_octahedron_ring_follows_fan() {
        let adjacency = Adjacency::build(&octahedron());
        let ring = NeighborRing::around(0, &adjacency);
        assert!(ring.fan_verified());
        assert_eq!(ring.vertices(), &[2, 4, 3, 5]);
    }

    #[test]
    fn test_cube_ring_follows_fan() {
        let cube = FaceVertexMesh::cube(1.0).unwrap();
        let adjacency = Adjacency::build(&cube);
        let ring = NeighborRing::around(0, &adjacency);
        assert!(ring.fan_verified());
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.vertices()[0], 1);
    }

    #[test]
    fn test_bowtie_ring_falls_back() {
        let adjacency = Adjacency::build(&bowtie());
        let ring = NeighborRing::around(0, &adjacency);
        assert!(!ring.fan_verified());
        assert_eq!(ring.len(), 4);
        let mut visited: Vec<usize> = ring.vertices().to_vec();
        visited.sort_unstable();
        assert_eq!(visited, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unverified_rings_audit() {
        let octa_adjacency = Adjacency::build(&octahedron());
        assert!(unverified_rings(&octa_adjacency).is_empty());

        let bowtie_adjacency = Adjacency::build(&bowtie());
        assert_eq!(unverified_rings(&bowtie_adjacency), vec![0]);
    }
}
