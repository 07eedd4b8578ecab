//! # Rheo
//!
//! Discrete geometric flows on polylines and polygonal meshes.
//!
//! Rheo evolves shapes by iterative local update rules: each flow step reads
//! one immutable geometry generation, computes per-vertex or per-face motion
//! from neighborhood quantities (angles, normals, curvatures), and produces
//! the next generation with the same topology and new positions.
//!
//! ## Flows
//!
//! - **Edge flow** ([`flow::EdgeFlow`]): offsets a closed polyline's edges
//!   along their normals, uniformly or weighted by discrete curvature.
//! - **Isometric flow** ([`flow::IsometricFlow`]): redistributes a polyline's
//!   turning toward the mean angle while preserving every edge length.
//! - **Laplace flow** ([`flow::LaplaceFlow`]): tangent-difference smoothing
//!   for closed curves, with optional perimeter preservation.
//! - **Harmonic flow** ([`flow::HarmonicFlow`]): moves mesh vertices along
//!   uniform or cotangent-weighted neighbor sums.
//! - **Face flow** ([`flow::FaceFlow`]): translates face planes along their
//!   normals and re-derives vertices as plane intersections.
//!
//! ## Quick start
//!
//! ```
//! use rheo::prelude::*;
//!
//! // Grow a cube by pushing every face 0.5 outward, three times over.
//! let cube = FaceVertexMesh::cube(2.0)?;
//! let flow = FaceFlow::default().with_step(0.5);
//! let grown = iterate(&flow, cube, 3)?;
//!
//! assert_eq!(grown.vertex_count(), 8);
//! assert!((grown.vertex(0).x.abs() - 2.5).abs() < 1e-9);
//! # Ok::<(), rheo::FlowError>(())
//! ```
//!
//! ## Design
//!
//! Generations are plain value types ([`geometry::FaceVertexMesh`],
//! [`geometry::ClosedPolyline`]); adjacency and motion fields are derived
//! fresh each step and never persisted. Host environments connect through
//! the [`host::GeometryProvider`] boundary, and evolution sequences can be
//! observed per step through [`flow::FrameRecorder`] without affecting the
//! geometry.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod flow;
pub mod geometry;
pub mod host;
pub mod solve;
pub mod topology;

pub use error::{CaptureError, FlowError, Result};

/// Prelude module for convenient imports.
///
/// ```
/// use rheo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CaptureError, FlowError, Result};
    pub use crate::flow::{
        iterate, iterate_recorded, EdgeFlow, EdgeMode, FaceFlow, Flow, FlowRecording,
        FrameRecorder, HarmonicFlow, IsometricFlow, LaplaceFlow, MotionField, SnapshotRecorder,
        StepScaling, Weighting,
    };
    pub use crate::geometry::{ClosedPolyline, FaceVertexMesh, MeshFace, Plane};
    pub use crate::host::{advance_mesh, advance_polyline, GeometryProvider, MemoryDocument};
    pub use crate::topology::{unverified_rings, Adjacency, NeighborRing};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::prelude::*;

    #[test]
    fn test_mesh_pipeline_end_to_end() {
        // Build, audit, evolve through a document, record the sequence.
        let cube = FaceVertexMesh::cube(2.0).unwrap();
        let adjacency = Adjacency::build(&cube);
        assert!(unverified_rings(&adjacency).is_empty());

        let mut document = MemoryDocument::new();
        let mut handle = document.add_mesh(cube);
        let flow = HarmonicFlow::default().with_step(0.1);
        for _ in 0..3 {
            handle = advance_mesh(&mut document, handle, &flow).unwrap();
        }
        assert_eq!(document.len(), 1);

        let smoothed = document.mesh(handle).unwrap();
        assert_eq!(smoothed.face_count(), 6);
        // Three steps along the corner diagonals, 0.1 each.
        let expected = 1.0 - 0.3 / 3f64.sqrt();
        assert_relative_eq!(smoothed.vertex(6).x, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_curve_pipeline_end_to_end() {
        let square = ClosedPolyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(8.0, 0.0, 0.0),
            Point3::new(8.0, 8.0, 0.0),
            Point3::new(0.0, 8.0, 0.0),
        ])
        .unwrap();

        let flow = EdgeFlow::default().with_step(0.5);
        let mut recorder = SnapshotRecorder::new();
        let recording = iterate_recorded(&flow, square, 4, &mut recorder).unwrap();

        assert_eq!(recording.frames_captured, 4);
        assert!(recording.capture_failures.is_empty());
        // Each step moves every side in by 0.5; after 4 steps the 8-square
        // has shrunk to a 4-square at offset 2.
        assert_relative_eq!(recording.geometry.perimeter(), 16.0, epsilon = 1e-9);
        assert_relative_eq!(recording.geometry.vertex(0).x, 2.0, epsilon = 1e-9);
        // The recorded frames shrink monotonically.
        for pair in recorder.frames().windows(2) {
            assert!(pair[1].perimeter() < pair[0].perimeter());
        }
    }
}
