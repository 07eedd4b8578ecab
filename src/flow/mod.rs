//! Discrete flows and the iteration driver.
//!
//! Every flow variant is an options struct implementing [`Flow`]: it holds
//! the variant's parameters and computes one step from the previous
//! generation to the next. The displacement-based variants also expose the
//! per-entity [`MotionField`] they would apply, for inspection.

use nalgebra::{Point3, Vector3};

use crate::error::{FlowError, Result};

pub mod driver;
pub mod edge;
pub mod face;
pub mod harmonic;
pub mod isometric;
pub mod laplace;

pub use driver::{iterate, iterate_recorded, FlowRecording, FrameRecorder, SnapshotRecorder};
pub use edge::{EdgeFlow, EdgeMode};
pub use face::FaceFlow;
pub use harmonic::{HarmonicFlow, Weighting};
pub use isometric::IsometricFlow;
pub use laplace::{LaplaceFlow, StepScaling};

/// One step of a discrete flow.
///
/// A flow is pure with respect to its geometry: `step` reads the previous
/// generation and returns the next one, leaving the input untouched.
pub trait Flow {
    /// The geometry the flow evolves.
    type Geometry;

    /// Computes the next generation from `current`.
    fn step(&self, current: &Self::Geometry) -> Result<Self::Geometry>;
}

/// Per-entity displacement vectors for one flow step.
///
/// Entities are vertices for the vertex-based flows and faces for face flow.
/// A field is computed fresh from one generation and applied to produce the
/// next; it is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionField {
    motions: Vec<Vector3<f64>>,
}

impl MotionField {
    /// Wraps per-entity motions, indexed like the entities they displace.
    pub fn new(motions: Vec<Vector3<f64>>) -> Self {
        MotionField { motions }
    }

    /// Number of entities covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.motions.len()
    }

    /// Whether the field covers no entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// The motion of entity `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn motion(&self, index: usize) -> Vector3<f64> {
        self.motions[index]
    }

    /// All motions, in entity order.
    #[inline]
    pub fn motions(&self) -> &[Vector3<f64>] {
        &self.motions
    }

    /// Displaces `points` by the field, pairing 1:1 by index.
    pub fn displace(&self, points: &[Point3<f64>]) -> Result<Vec<Point3<f64>>> {
        if points.len() != self.motions.len() {
            return Err(FlowError::invalid_param(
                "points",
                points.len(),
                "must match the motion field length",
            ));
        }
        Ok(points
            .iter()
            .zip(&self.motions)
            .map(|(point, motion)| point + motion)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;

    #[test]
    fn test_displace_pairs_by_index() {
        let field = MotionField::new(vec![Vector3::x(), Vector3::y()]);
        let points = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let moved = field.displace(&points).unwrap();
        assert_eq!(moved[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(moved[1], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_displace_rejects_mismatched_lengths() {
        let field = MotionField::new(vec![Vector3::x()]);
        assert!(matches!(
            field.displace(&[]),
            Err(FlowError::InvalidParameter { name: "points", .. })
        ));
    }
}
