//! Isometric flow: angle redistribution at fixed edge lengths.
//!
//! Pass 1 measures every edge length and exterior turn angle of the
//! polyline. The relaxation then moves each turn angle toward the ring mean
//! (2π/n on a convex ring) by the fraction `t` of its deviation, which
//! keeps the total turning unchanged. Pass 2 replays the ring from the
//! original first edge, rotating about the z axis by the relaxed angles and
//! restoring the measured lengths, so edge lengths are preserved and only
//! the turning is redistributed.
//!
//! The replay rotates counterclockwise, so it is exact for planar
//! counterclockwise convex rings. The ring closes by placing the last
//! vertex where the final two edges meet at their measured lengths, so
//! every edge length survives the step and the turn angles at the closure
//! vertices absorb whatever gap the relaxed angles leave open.

use std::f64::consts::PI;

use crate::error::Result;
use crate::flow::Flow;
use crate::geometry::ClosedPolyline;

/// Options for isometric flow.
#[derive(Debug, Clone)]
pub struct IsometricFlow {
    /// Fraction of each angle's deviation from the mean removed per step,
    /// in [0, 1]. 0 leaves the ring unchanged; 1 equalizes every angle in
    /// one step.
    pub t: f64,
}

impl Default for IsometricFlow {
    fn default() -> Self {
        IsometricFlow { t: 0.1 }
    }
}

impl IsometricFlow {
    /// Sets the relaxation fraction, clamped to [0, 1].
    pub fn with_t(mut self, t: f64) -> Self {
        self.t = t.clamp(0.0, 1.0);
        self
    }
}

impl Flow for IsometricFlow {
    type Geometry = ClosedPolyline;

    fn step(&self, current: &ClosedPolyline) -> Result<ClosedPolyline> {
        let (lengths, mut angles) = current.decompose()?;
        let mean = 2.0 * PI / angles.len() as f64;
        for angle in &mut angles {
            *angle -= self.t * (*angle - mean);
        }
        ClosedPolyline::from_lengths_and_angles(
            current.vertex(0),
            &current.edge(0),
            &lengths,
            &angles,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;
    use crate::geometry::vector;

    fn rectangle() -> ClosedPolyline {
        ClosedPolyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ])
        .unwrap()
    }

    fn convex_pentagon() -> ClosedPolyline {
        ClosedPolyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 1.5, 0.0),
            Point3::new(1.5, 3.0, 0.0),
            Point3::new(-0.5, 1.5, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_zero_t_reproduces_convex_ring() {
        let pentagon = convex_pentagon();
        let next = IsometricFlow::default().with_t(0.0).step(&pentagon).unwrap();
        for (replayed, original) in next.vertices().iter().zip(pentagon.vertices()) {
            assert_relative_eq!((replayed - original).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_edge_lengths_preserved_across_t() {
        // A non-equiangular ring, so the relaxation actually moves angles
        // and the closure has to work for the lengths to survive.
        let pentagon = convex_pentagon();
        let (original_lengths, _) = pentagon.decompose().unwrap();
        for &t in &[0.0, 0.25, 0.5, 1.0] {
            let next = IsometricFlow::default().with_t(t).step(&pentagon).unwrap();
            for (index, length) in original_lengths.iter().enumerate() {
                assert_relative_eq!(next.edge_length(index), *length, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_closing_edge_keeps_its_length() {
        let pentagon = convex_pentagon();
        let closing = pentagon.edge_length(4);
        let next = IsometricFlow::default().with_t(0.5).step(&pentagon).unwrap();
        assert_relative_eq!(next.edge_length(4), closing, epsilon = 1e-9);
        // The ring really moved; the lengths held anyway.
        assert!((next.vertex(3) - pentagon.vertex(3)).norm() > 1e-3);
    }

    #[test]
    fn test_equiangular_ring_is_a_fixed_point() {
        // Every rectangle angle already equals the mean, so any t leaves
        // the ring unchanged.
        let rectangle = rectangle();
        for &t in &[0.0, 0.5, 1.0] {
            let next = IsometricFlow::default().with_t(t).step(&rectangle).unwrap();
            for (new, old) in next.vertices().iter().zip(rectangle.vertices()) {
                assert_relative_eq!((new - old).norm(), 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_relaxation_moves_angles_toward_mean() {
        let pentagon = convex_pentagon();
        let (_, original_angles) = pentagon.decompose().unwrap();
        let mean = 2.0 * PI / 5.0;
        let next = IsometricFlow::default().with_t(0.5).step(&pentagon).unwrap();
        let (_, angles) = next.decompose().unwrap();
        // The replayed vertices carry exactly the relaxed angles; the two
        // closure vertices and the start absorb the replay gap.
        for index in 1..3 {
            let relaxed = original_angles[index] - 0.5 * (original_angles[index] - mean);
            assert_relative_eq!(angles[index], relaxed, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_full_relaxation_equalizes_replayed_angles() {
        let pentagon = convex_pentagon();
        let next = IsometricFlow::default().with_t(1.0).step(&pentagon).unwrap();
        let (_, angles) = next.decompose().unwrap();
        let mean = 2.0 * PI / 5.0;
        for index in 1..3 {
            assert_relative_eq!(angles[index], mean, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_start_vertex_and_heading_kept() {
        let pentagon = convex_pentagon();
        let next = IsometricFlow::default().with_t(0.3).step(&pentagon).unwrap();
        assert_relative_eq!(
            (next.vertex(0) - pentagon.vertex(0)).norm(),
            0.0,
            epsilon = 1e-12
        );
        let heading = vector::angle_between(&next.edge(0), &pentagon.edge(0)).unwrap();
        assert_relative_eq!(heading, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_builder_clamps_t() {
        assert_relative_eq!(IsometricFlow::default().with_t(2.0).t, 1.0);
        assert_relative_eq!(IsometricFlow::default().with_t(-0.5).t, 0.0);
    }
}
