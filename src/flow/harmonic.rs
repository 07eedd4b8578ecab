//! Harmonic flow: ordered-neighbor smoothing for meshes.
//!
//! Each vertex moves along the weighted sum of the vectors to its ring
//! neighbors, resized to the fixed step length. Uniform weighting sums the
//! plain neighbor offsets; cotangent weighting applies the discrete
//! mean-curvature weights — for ring neighbor q, half the sum of the
//! cotangents of the two angles opposite the edge (center, q) in the fan
//! triangles on either side — with degenerate cotangents dropped as zero.
//!
//! Cotangent weights are known to misbehave at valence extremes (the poles
//! of a coarse sphere); the flow leaves such rings to the caller rather
//! than correcting them, and [`crate::topology::unverified_rings`] reports
//! the rings whose fan order could not be verified.
//!
//! # Example
//!
//! ```
//! use rheo::flow::{Flow, HarmonicFlow};
//! use rheo::geometry::{FaceVertexMesh, MeshFace};
//! use rheo::nalgebra::Point3;
//!
//! let octahedron = FaceVertexMesh::new(
//!     vec![
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(-1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.0, -1.0, 0.0),
//!         Point3::new(0.0, 0.0, 1.0),
//!         Point3::new(0.0, 0.0, -1.0),
//!     ],
//!     vec![
//!         MeshFace::Triangle([0, 2, 4]),
//!         MeshFace::Triangle([2, 1, 4]),
//!         MeshFace::Triangle([1, 3, 4]),
//!         MeshFace::Triangle([3, 0, 4]),
//!         MeshFace::Triangle([2, 0, 5]),
//!         MeshFace::Triangle([1, 2, 5]),
//!         MeshFace::Triangle([3, 1, 5]),
//!         MeshFace::Triangle([0, 3, 5]),
//!     ],
//! )?;
//! let smoothed = HarmonicFlow::default().with_step(0.25).step(&octahedron)?;
//! assert_eq!(smoothed.vertex(0), Point3::new(0.75, 0.0, 0.0));
//! # Ok::<(), rheo::FlowError>(())
//! ```

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::error::Result;
use crate::flow::{Flow, MotionField};
use crate::geometry::vector;
use crate::geometry::FaceVertexMesh;
use crate::topology::{Adjacency, NeighborRing};

/// Neighbor weighting for the harmonic sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Every neighbor contributes with weight 1.
    #[default]
    Uniform,
    /// Discrete mean-curvature (cotangent) weights from the fan triangles.
    Cotangent,
}

/// Options for harmonic flow.
#[derive(Debug, Clone)]
pub struct HarmonicFlow {
    /// Neighbor weighting.
    pub weighting: Weighting,
    /// Length every vertex moves per step.
    pub step: f64,
    /// Compute vertex motions on the rayon thread pool.
    pub parallel: bool,
}

impl Default for HarmonicFlow {
    fn default() -> Self {
        HarmonicFlow {
            weighting: Weighting::Uniform,
            step: 1.0,
            parallel: true,
        }
    }
}

impl HarmonicFlow {
    /// Sets the neighbor weighting.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Sets the per-step motion length.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Disables parallel computation.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Computes the per-vertex motion field without applying it.
    pub fn motion_vectors(&self, mesh: &FaceVertexMesh) -> Result<MotionField> {
        mesh.check_faces()?;
        let adjacency = Adjacency::build(mesh);

        let motions = if self.parallel {
            (0..mesh.vertex_count())
                .into_par_iter()
                .map(|vertex| self.vertex_motion(mesh, &adjacency, vertex))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..mesh.vertex_count())
                .map(|vertex| self.vertex_motion(mesh, &adjacency, vertex))
                .collect::<Result<Vec<_>>>()?
        };
        Ok(MotionField::new(motions))
    }

    fn vertex_motion(
        &self,
        mesh: &FaceVertexMesh,
        adjacency: &Adjacency,
        vertex: usize,
    ) -> Result<Vector3<f64>> {
        let ring = NeighborRing::around(vertex, adjacency);
        let center = mesh.vertex(vertex);

        let mut sum = Vector3::zeros();
        for (position, &neighbor) in ring.vertices().iter().enumerate() {
            let weight = match self.weighting {
                Weighting::Uniform => 1.0,
                Weighting::Cotangent => {
                    cotangent_weight(mesh, &center, ring.vertices(), position)
                }
            };
            sum += (mesh.vertex(neighbor) - center) * weight;
        }
        vector::resize(&sum, self.step, "resizing a weighted neighbor sum")
    }
}

/// Half-sum of the cotangents of the two angles opposite the edge from the
/// ring center to `ring[position]`, taken in the fan triangles on either
/// side of that edge.
fn cotangent_weight(
    mesh: &FaceVertexMesh,
    center: &Point3<f64>,
    ring: &[usize],
    position: usize,
) -> f64 {
    let count = ring.len();
    let target = mesh.vertex(ring[position]);
    let previous = mesh.vertex(ring[(position + count - 1) % count]);
    let next = mesh.vertex(ring[(position + 1) % count]);
    0.5 * (vector::cotangent(&previous, center, &target)
        + vector::cotangent(&next, center, &target))
}

impl Flow for HarmonicFlow {
    type Geometry = FaceVertexMesh;

    fn step(&self, current: &FaceVertexMesh) -> Result<FaceVertexMesh> {
        let motions = self.motion_vectors(current)?;
        current.with_vertices(motions.displace(current.vertices())?)
    }
}
