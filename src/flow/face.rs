//! Face flow: translating faces along their normals.
//!
//! Every face plane is translated along its unit normal by `step`, and each
//! vertex is re-derived as the intersection of its incident faces'
//! translated planes. A positive step on an outward-wound mesh grows it; a
//! negative step shrinks it. Only vertices with exactly 3 or 4 incident
//! faces can be re-derived (3 planes fix a point, a 4th must agree with
//! it), so any other valence fails before solving, and a 4-plane corner
//! whose translated planes are no longer concurrent surfaces the
//! inconsistent-planes error.

use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{FlowError, Result};
use crate::flow::{Flow, MotionField};
use crate::geometry::{FaceVertexMesh, Plane};
use crate::solve::planes;
use crate::topology::Adjacency;

/// Options for face flow.
#[derive(Debug, Clone)]
pub struct FaceFlow {
    /// Distance every face plane moves along its normal.
    pub step: f64,
    /// Solve vertex intersections on the rayon thread pool.
    pub parallel: bool,
}

impl Default for FaceFlow {
    fn default() -> Self {
        FaceFlow {
            step: 1.0,
            parallel: true,
        }
    }
}

impl FaceFlow {
    /// Sets the plane translation distance.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Disables parallel computation.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Computes the per-face motion field (scaled face normals) without
    /// applying it.
    pub fn motion_vectors(&self, mesh: &FaceVertexMesh) -> Result<MotionField> {
        mesh.check_faces()?;
        let motions = (0..mesh.face_count())
            .map(|face| Ok(mesh.face_normal(face)? * self.step))
            .collect::<Result<Vec<_>>>()?;
        Ok(MotionField::new(motions))
    }

    fn solved_vertex(
        &self,
        translated: &[Plane],
        adjacency: &Adjacency,
        vertex: usize,
    ) -> Result<Point3<f64>> {
        let corner: Vec<Plane> = adjacency
            .incident_faces(vertex)
            .iter()
            .map(|&face| translated[face])
            .collect();
        planes::intersection(&corner)
    }
}

impl Flow for FaceFlow {
    type Geometry = FaceVertexMesh;

    fn step(&self, current: &FaceVertexMesh) -> Result<FaceVertexMesh> {
        current.check_faces()?;
        let adjacency = Adjacency::build(current);
        for vertex in 0..current.vertex_count() {
            let incident = adjacency.incident_faces(vertex).len();
            if !(3..=4).contains(&incident) {
                return Err(FlowError::UnsupportedValence {
                    vertex,
                    incident_faces: incident,
                });
            }
        }

        let translated: Vec<Plane> = current
            .face_planes()?
            .into_iter()
            .map(|plane| plane.translated(&(plane.normal() * self.step)))
            .collect();

        let vertices = if self.parallel {
            (0..current.vertex_count())
                .into_par_iter()
                .map(|vertex| self.solved_vertex(&translated, &adjacency, vertex))
                .collect::<Result<Vec<_>>>()?
        } else {
            (0..current.vertex_count())
                .map(|vertex| self.solved_vertex(&translated, &adjacency, vertex))
                .collect::<Result<Vec<_>>>()?
        };
        current.with_vertices(vertices)
    }
}
