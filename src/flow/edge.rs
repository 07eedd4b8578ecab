//! Edge flow: offsetting the edges of a closed polyline.
//!
//! Every edge is offset along its in-plane normal and every vertex moves to
//! the intersection of its two offset edges. With unit scaling all edges
//! offset by the same `step`; with curvature scaling each edge's offset is
//! weighted by the exterior turn angles at its endpoints over its length, so
//! short edges in tightly curved stretches move further than long straight
//! ones.
//!
//! For vertex i with unit outgoing edge v_out, unit incoming edge v_in and
//! interior angle a between −v_out and v_in, the offset-edge intersection
//! works out to (v_out·s_out − v_in·s_in) / sin a, where s_out and s_in are
//! the two edges' offset scales. A positive step moves a counterclockwise
//! convex polyline inward. Collinear edges (sin a ≈ 0) fail with the
//! degenerate-vector error.
//!
//! # Example
//!
//! ```
//! use rheo::flow::EdgeFlow;
//! use rheo::geometry::ClosedPolyline;
//! use rheo::nalgebra::{Point3, Vector3};
//!
//! let square = ClosedPolyline::new(vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ])?;
//! let motions = EdgeFlow::default().motion_vectors(&square)?;
//! assert_eq!(motions.motion(0), Vector3::new(1.0, 1.0, 0.0));
//! # Ok::<(), rheo::FlowError>(())
//! ```

use crate::error::{FlowError, Result};
use crate::flow::{Flow, MotionField};
use crate::geometry::vector;
use crate::geometry::ClosedPolyline;

/// Sine magnitude below which a vertex's edges count as collinear.
const SIN_TOLERANCE: f64 = 1e-9;

/// Scale applied to each edge's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Every edge offsets by the same `step`.
    #[default]
    Unit,
    /// Each edge offsets by `step` weighted by a discrete curvature proxy:
    /// (tan(t_a/2) + tan(t_b/2)) / length, from the exterior turn angles
    /// t_a, t_b at the edge's endpoints.
    Curvature,
}

/// Options for edge flow.
#[derive(Debug, Clone)]
pub struct EdgeFlow {
    /// Offset scaling mode.
    pub mode: EdgeMode,
    /// Offset distance. Positive steps move a counterclockwise convex
    /// polyline inward.
    pub step: f64,
}

impl Default for EdgeFlow {
    fn default() -> Self {
        EdgeFlow {
            mode: EdgeMode::Unit,
            step: 1.0,
        }
    }
}

impl EdgeFlow {
    /// Sets the offset scaling mode.
    pub fn with_mode(mut self, mode: EdgeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the offset distance.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Computes the per-vertex motion field without applying it.
    pub fn motion_vectors(&self, polyline: &ClosedPolyline) -> Result<MotionField> {
        let count = polyline.vertex_count();
        let scales = self.edge_scales(polyline)?;

        let mut motions = Vec::with_capacity(count);
        for index in 0..count {
            let (previous, _) = polyline.neighbors(index);
            let outgoing = vector::unitize(
                &polyline.edge(index),
                "unitizing an outgoing polyline edge",
            )?;
            let incoming = vector::unitize(
                &polyline.edge(previous),
                "unitizing an incoming polyline edge",
            )?;

            let interior = vector::angle_between(&(-outgoing), &incoming)?;
            let sin = interior.sin();
            if sin.abs() < SIN_TOLERANCE {
                return Err(FlowError::degenerate(
                    "offsetting collinear edges at a polyline vertex",
                ));
            }
            motions.push((outgoing * scales[index] - incoming * scales[previous]) / sin);
        }
        Ok(MotionField::new(motions))
    }

    /// Per-edge offset scales; edge i runs from vertex i to vertex i + 1.
    fn edge_scales(&self, polyline: &ClosedPolyline) -> Result<Vec<f64>> {
        let count = polyline.vertex_count();
        match self.mode {
            EdgeMode::Unit => Ok(vec![self.step; count]),
            EdgeMode::Curvature => {
                let (lengths, turns) = polyline.decompose()?;
                (0..count)
                    .map(|edge| {
                        let length = lengths[edge];
                        if length < vector::DEGENERATE_LENGTH {
                            return Err(FlowError::degenerate(
                                "scaling a zero-length polyline edge",
                            ));
                        }
                        let start = turns[edge];
                        let end = turns[polyline.offset_index(edge, 1)];
                        Ok(self.step * ((start / 2.0).tan() + (end / 2.0).tan()) / length)
                    })
                    .collect()
            }
        }
    }
}

impl Flow for EdgeFlow {
    type Geometry = ClosedPolyline;

    fn step(&self, current: &ClosedPolyline) -> Result<ClosedPolyline> {
        let motions = self.motion_vectors(current)?;
        ClosedPolyline::new(motions.displace(current.vertices())?)
    }
}
