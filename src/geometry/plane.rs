//! Plane equations fit from point sets.

use nalgebra::{Point3, Vector3};

use crate::error::{FlowError, Result};
use crate::geometry::vector;

/// A plane in normal form: points `p` on the plane satisfy
/// `normal . p + d = 0`, with `normal` kept at unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    d: f64,
}

impl Plane {
    /// Builds a plane from raw equation coefficients `(a, b, c, d)`.
    ///
    /// The coefficients are normalized so that `(a, b, c)` becomes a unit
    /// normal; fails when `(a, b, c)` has effectively zero length.
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let normal = Vector3::new(a, b, c);
        let length = normal.norm();
        if length < vector::DEGENERATE_LENGTH {
            return Err(FlowError::degenerate("normalizing plane coefficients"));
        }
        Ok(Plane {
            normal: normal / length,
            d: d / length,
        })
    }

    /// Fits a plane through a point set using Newell's method.
    ///
    /// The normal is accumulated over consecutive point pairs and the offset
    /// is anchored at the centroid, so the fit is exact for coplanar input
    /// and an area-weighted approximation for near-planar input. Needs at
    /// least three points; fails when the points do not span a plane.
    pub fn fit(points: &[Point3<f64>]) -> Result<Self> {
        if points.len() < 3 {
            return Err(FlowError::invalid_param(
                "points",
                points.len(),
                "plane fit needs at least three points",
            ));
        }

        let mut normal = Vector3::zeros();
        for (index, point) in points.iter().enumerate() {
            let next = &points[(index + 1) % points.len()];
            normal.x += (point.y - next.y) * (point.z + next.z);
            normal.y += (point.z - next.z) * (point.x + next.x);
            normal.z += (point.x - next.x) * (point.y + next.y);
        }
        let normal = vector::unitize(&normal, "fitting a plane through collinear points")?;

        let centroid = points
            .iter()
            .fold(Vector3::zeros(), |sum, point| sum + point.coords)
            / points.len() as f64;

        Ok(Plane {
            normal,
            d: -normal.dot(&centroid),
        })
    }

    /// The plane's unit normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// The plane's offset coefficient `d`.
    #[inline]
    pub fn d(&self) -> f64 {
        self.d
    }

    /// The equation coefficients `[a, b, c, d]`.
    #[inline]
    pub fn coefficients(&self) -> [f64; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.d]
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    #[inline]
    pub fn offset_of(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) + self.d
    }

    /// The plane translated by `motion`, keeping its orientation.
    pub fn translated(&self, motion: &Vector3<f64>) -> Self {
        Plane {
            normal: self.normal,
            d: self.d - self.normal.dot(motion),
        }
    }
}
