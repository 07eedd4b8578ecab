//! Vector helpers shared by the flow formulas.
//!
//! All helpers operate on `nalgebra` vectors and fail with
//! [`FlowError::DegenerateVector`] when a direction is required but the
//! input has effectively zero length.

use nalgebra::{Point3, Vector3};

use crate::error::{FlowError, Result};

/// Length below which a vector is treated as degenerate.
pub const DEGENERATE_LENGTH: f64 = 1e-12;

/// Returns the unit vector pointing along `vector`.
///
/// The `context` string describes what the direction was needed for and is
/// carried into the error when the input is degenerate.
pub fn unitize(vector: &Vector3<f64>, context: &str) -> Result<Vector3<f64>> {
    let length = vector.norm();
    if length < DEGENERATE_LENGTH {
        return Err(FlowError::degenerate(context));
    }
    Ok(vector / length)
}

/// Returns `vector` rescaled to the given length.
pub fn resize(vector: &Vector3<f64>, length: f64, context: &str) -> Result<Vector3<f64>> {
    Ok(unitize(vector, context)? * length)
}

/// Returns the angle between two vectors, in radians within `[0, pi]`.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Result<f64> {
    let denominator = a.norm() * b.norm();
    if denominator < DEGENERATE_LENGTH {
        return Err(FlowError::degenerate("measuring an angle between vectors"));
    }
    // Clamp against rounding before acos.
    let cos = (a.dot(b) / denominator).clamp(-1.0, 1.0);
    Ok(cos.acos())
}

/// Rotates `vector` about the z axis by `angle` radians (counterclockwise).
pub fn rotate_about_z(vector: &Vector3<f64>, angle: f64) -> Vector3<f64> {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(
        vector.x * cos - vector.y * sin,
        vector.x * sin + vector.y * cos,
        vector.z,
    )
}

/// Cotangent of the angle at `apex` in the triangle (`apex`, `b`, `c`).
///
/// Degenerate triangles yield 0 so that weighted sums simply drop the term.
pub fn cotangent(apex: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ab = b - apex;
    let ac = c - apex;

    let dot = ab.dot(&ac);
    let cross_norm = ab.cross(&ac).norm();

    if cross_norm < 1e-10 {
        return 0.0; // Degenerate triangle
    }

    dot / cross_norm
}
