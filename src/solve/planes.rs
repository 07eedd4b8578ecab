//! Common-point intersection of three or more planes.

use nalgebra::{DMatrix, Point3};

use crate::error::{FlowError, Result};
use crate::geometry::Plane;
use crate::solve::linear;

/// Default tolerance for checking extra planes against the solved point.
pub const INTERSECTION_TOLERANCE: f64 = 1e-9;

/// Intersects `planes` at a single point using the default tolerance.
///
/// See [`intersection_with_tolerance`].
pub fn intersection(planes: &[Plane]) -> Result<Point3<f64>> {
    intersection_with_tolerance(planes, INTERSECTION_TOLERANCE)
}

/// Intersects `planes` at a single point.
///
/// The first three planes form a 3x3 system (rows `[a b c | -d]`) solved by
/// [`linear::solve_augmented`]; every further plane is then required to
/// contain the solved point to within `tolerance`.
///
/// Fails with [`FlowError::TooFewPlanes`] for fewer than three planes, with
/// [`FlowError::SingularSystem`] when the first three planes have no unique
/// common point, and with [`FlowError::InconsistentPlanes`] when a later
/// plane misses the point.
pub fn intersection_with_tolerance(planes: &[Plane], tolerance: f64) -> Result<Point3<f64>> {
    if planes.len() < 3 {
        return Err(FlowError::TooFewPlanes {
            count: planes.len(),
        });
    }

    let mut system = DMatrix::zeros(3, 4);
    for (row, plane) in planes.iter().take(3).enumerate() {
        let [a, b, c, d] = plane.coefficients();
        system[(row, 0)] = a;
        system[(row, 1)] = b;
        system[(row, 2)] = c;
        system[(row, 3)] = -d;
    }
    let solution = linear::solve_augmented(system)?;
    let point = Point3::new(solution[0], solution[1], solution[2]);

    for (index, plane) in planes.iter().enumerate().skip(3) {
        let offset = plane.offset_of(&point);
        if offset.abs() > tolerance {
            return Err(FlowError::InconsistentPlanes {
                plane: index,
                offset,
                tolerance,
            });
        }
    }
    Ok(point)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::FlowError;

    fn coordinate_planes() -> Vec<Plane> {
        vec![
            Plane::from_coefficients(1.0, 0.0, 0.0, 0.0).unwrap(),
            Plane::from_coefficients(0.0, 1.0, 0.0, 0.0).unwrap(),
            Plane::from_coefficients(0.0, 0.0, 1.0, 0.0).unwrap(),
        ]
    }

    #[test]
    fn test_coordinate_planes_meet_at_origin() {
        let point = intersection(&coordinate_planes()).unwrap();
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(point.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shifted_planes_meet_at_known_point() {
        let planes = vec![
            Plane::from_coefficients(1.0, 0.0, 0.0, -1.0).unwrap(),
            Plane::from_coefficients(0.0, 1.0, 0.0, -2.0).unwrap(),
            Plane::from_coefficients(0.0, 0.0, 1.0, -3.0).unwrap(),
        ];
        let point = intersection(&planes).unwrap();
        assert_relative_eq!(point.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(point.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(point.z, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fourth_plane_off_the_point_is_inconsistent() {
        let mut planes = coordinate_planes();
        planes.push(Plane::from_coefficients(1.0, 1.0, 1.0, -1.0).unwrap());
        let result = intersection(&planes);
        assert!(matches!(
            result,
            Err(FlowError::InconsistentPlanes { plane: 3, .. })
        ));
    }

    #[test]
    fn test_fourth_plane_through_the_point_is_accepted() {
        let mut planes = coordinate_planes();
        planes.push(Plane::from_coefficients(1.0, 1.0, 1.0, 0.0).unwrap());
        let point = intersection(&planes).unwrap();
        assert_relative_eq!(point.coords.norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tolerance_is_caller_overridable() {
        let mut planes = coordinate_planes();
        planes.push(Plane::from_coefficients(1.0, 1.0, 1.0, -1.0).unwrap());
        assert!(intersection_with_tolerance(&planes, 2.0).is_ok());
    }

    #[test]
    fn test_too_few_planes_rejected() {
        let planes = coordinate_planes();
        assert!(matches!(
            intersection(&planes[..2]),
            Err(FlowError::TooFewPlanes { count: 2 })
        ));
    }

    #[test]
    fn test_parallel_planes_are_singular() {
        let planes = vec![
            Plane::from_coefficients(0.0, 0.0, 1.0, 0.0).unwrap(),
            Plane::from_coefficients(0.0, 0.0, 1.0, -1.0).unwrap(),
            Plane::from_coefficients(1.0, 0.0, 0.0, 0.0).unwrap(),
        ];
        assert!(matches!(
            intersection(&planes),
            Err(FlowError::SingularSystem { .. })
        ));
    }
}
