//! Face-vertex meshes with triangle and quad faces.

use nalgebra::{Point3, Vector3};

use crate::error::{FlowError, Result};
use crate::geometry::plane::Plane;

/// A mesh face: an ordered ring of 3 or 4 vertex indices.
///
/// Quads may carry a duplicated index (a triangle stored in quad form, a
/// convention some inputs use); such faces are accepted as-is and never
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFace {
    /// A triangular face.
    Triangle([usize; 3]),
    /// A quadrilateral face.
    Quad([usize; 4]),
}

impl MeshFace {
    /// The face's vertex indices in ring order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        match self {
            MeshFace::Triangle(indices) => indices,
            MeshFace::Quad(indices) => indices,
        }
    }

    /// Number of indices stored in the face.
    #[inline]
    pub fn degree(&self) -> usize {
        self.indices().len()
    }

    /// Whether the face references `vertex`.
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        self.indices().contains(&vertex)
    }
}

/// An immutable mesh stored as a vertex list plus a face-index list.
///
/// The mesh owns no adjacency; topology is derived per flow step from the
/// face list (see [`crate::topology::Adjacency`]). Flow steps replace the
/// vertex list and keep the face list unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceVertexMesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<MeshFace>,
}

impl FaceVertexMesh {
    /// Builds a mesh, validating that every face index is in range.
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<MeshFace>) -> Result<Self> {
        if faces.is_empty() {
            return Err(FlowError::EmptyMesh);
        }
        for (face_index, face) in faces.iter().enumerate() {
            for &vertex in face.indices() {
                if vertex >= vertices.len() {
                    return Err(FlowError::InvalidVertexIndex {
                        face: face_index,
                        vertex,
                    });
                }
            }
        }
        Ok(FaceVertexMesh { vertices, faces })
    }

    /// An axis-aligned cube centered at the origin with the given side length.
    ///
    /// Quad faces, wound so that every face normal points outward.
    pub fn cube(side: f64) -> Result<Self> {
        if side <= 0.0 {
            return Err(FlowError::invalid_param("side", side, "must be positive"));
        }
        let h = side / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        let faces = vec![
            MeshFace::Quad([0, 3, 2, 1]),
            MeshFace::Quad([4, 5, 6, 7]),
            MeshFace::Quad([0, 1, 5, 4]),
            MeshFace::Quad([1, 2, 6, 5]),
            MeshFace::Quad([2, 3, 7, 6]),
            MeshFace::Quad([3, 0, 4, 7]),
        ];
        FaceVertexMesh::new(vertices, faces)
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The vertex at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn vertex(&self, index: usize) -> Point3<f64> {
        self.vertices[index]
    }

    /// All vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// All faces.
    #[inline]
    pub fn faces(&self) -> &[MeshFace] {
        &self.faces
    }

    /// The face at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn face(&self, index: usize) -> MeshFace {
        self.faces[index]
    }

    /// The positions of a face's vertices in ring order.
    pub fn face_points(&self, face: usize) -> Vec<Point3<f64>> {
        self.faces[face]
            .indices()
            .iter()
            .map(|&vertex| self.vertices[vertex])
            .collect()
    }

    /// The plane spanned by a face.
    ///
    /// Fails with [`FlowError::FaceWithoutPlane`] when the face's points are
    /// collinear or coincident.
    pub fn face_plane(&self, face: usize) -> Result<Plane> {
        Plane::fit(&self.face_points(face)).map_err(|_| FlowError::FaceWithoutPlane { face })
    }

    /// The planes of all faces, in face order.
    pub fn face_planes(&self) -> Result<Vec<Plane>> {
        (0..self.faces.len()).map(|face| self.face_plane(face)).collect()
    }

    /// The unit normal of a face.
    pub fn face_normal(&self, face: usize) -> Result<Vector3<f64>> {
        Ok(self.face_plane(face)?.normal())
    }

    /// The mean of a face's vertex positions.
    ///
    /// Duplicated indices in a quad contribute twice, matching the stored
    /// ring rather than the distinct point set.
    pub fn face_centroid(&self, face: usize) -> Point3<f64> {
        let points = self.face_points(face);
        let sum = points
            .iter()
            .fold(Vector3::zeros(), |sum, point| sum + point.coords);
        Point3::from(sum / points.len() as f64)
    }

    /// Verifies that every face spans a plane.
    ///
    /// Both mesh flows run this before computing motion so that malformed
    /// input fails up front rather than mid-solve.
    pub fn check_faces(&self) -> Result<()> {
        for face in 0..self.faces.len() {
            self.face_plane(face)?;
        }
        Ok(())
    }

    /// A new mesh with the same face list and replaced vertex positions.
    ///
    /// The replacement list must pair 1:1 by index with the existing
    /// vertices.
    pub fn with_vertices(&self, vertices: Vec<Point3<f64>>) -> Result<Self> {
        if vertices.len() != self.vertices.len() {
            return Err(FlowError::invalid_param(
                "vertices",
                vertices.len(),
                "must match the existing vertex count",
            ));
        }
        Ok(FaceVertexMesh {
            vertices,
            faces: self.faces.clone(),
        })
    }
}
