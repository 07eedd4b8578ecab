//! Dense linear solve by Gaussian elimination with partial pivoting.

use nalgebra::{DMatrix, DVector};

use crate::error::{FlowError, Result};

/// Pivot magnitude below which the system is reported singular.
pub const PIVOT_TOLERANCE: f64 = 1e-9;

/// Solves `n` linear equations in `n` unknowns from an augmented matrix.
///
/// The input must be `n x (n + 1)`: each row holds one equation's
/// coefficients followed by its right-hand side. Rows are reduced to upper
/// triangular form with partial pivoting (the largest-magnitude leading
/// coefficient is swapped into each pivot position), then the solution is
/// recovered by back-substitution. A single direct pass, no refinement.
///
/// Fails with [`FlowError::SingularSystem`] when the best available pivot
/// magnitude falls below [`PIVOT_TOLERANCE`]. Plane-intersection systems get
/// near-degenerate for nearly-parallel faces, which is exactly the case the
/// pivoting and the tolerance are there to catch.
pub fn solve_augmented(mut system: DMatrix<f64>) -> Result<DVector<f64>> {
    let rows = system.nrows();
    if rows == 0 || system.ncols() != rows + 1 {
        return Err(FlowError::invalid_param(
            "system",
            format!("{}x{}", system.nrows(), system.ncols()),
            "expected an n x (n + 1) augmented matrix",
        ));
    }

    // Forward elimination.
    for column in 0..rows {
        let mut pivot_row = column;
        let mut pivot_magnitude = system[(column, column)].abs();
        for row in (column + 1)..rows {
            let magnitude = system[(row, column)].abs();
            if magnitude > pivot_magnitude {
                pivot_row = row;
                pivot_magnitude = magnitude;
            }
        }
        if pivot_magnitude < PIVOT_TOLERANCE {
            return Err(FlowError::SingularSystem { column });
        }
        if pivot_row != column {
            system.swap_rows(pivot_row, column);
        }
        for row in (column + 1)..rows {
            let factor = system[(row, column)] / system[(column, column)];
            if factor == 0.0 {
                continue;
            }
            for target in column..=rows {
                system[(row, target)] -= factor * system[(column, target)];
            }
        }
    }

    // Back-substitution.
    let mut solution = DVector::zeros(rows);
    for row in (0..rows).rev() {
        let mut value = system[(row, rows)];
        for column in (row + 1)..rows {
            value -= system[(row, column)] * solution[column];
        }
        solution[row] = value / system[(row, row)];
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::error::FlowError;

    #[test]
    fn test_identity_system() {
        let system = DMatrix::from_row_slice(
            3,
            4,
            &[
                1.0, 0.0, 0.0, 4.0, //
                0.0, 1.0, 0.0, -2.0, //
                0.0, 0.0, 1.0, 7.0,
            ],
        );
        let solution = solve_augmented(system).unwrap();
        assert_relative_eq!(solution[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(solution[1], -2.0, epsilon = 1e-12);
        assert_relative_eq!(solution[2], 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_two_by_two_system() {
        // 2x + y = 5, x + 3y = 5 has the solution (2, 1).
        let system = DMatrix::from_row_slice(2, 3, &[2.0, 1.0, 5.0, 1.0, 3.0, 5.0]);
        let solution = solve_augmented(system).unwrap();
        assert_relative_eq!(solution[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(solution[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pivoting_handles_zero_leading_coefficient() {
        // The first pivot position is zero; row swapping must recover.
        let system = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 3.0, 2.0, 0.0, 4.0]);
        let solution = solve_augmented(system).unwrap();
        assert_relative_eq!(solution[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(solution[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_system_reports_column() {
        let system = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0]);
        assert!(matches!(
            solve_augmented(system),
            Err(FlowError::SingularSystem { column: 1 })
        ));
    }

    #[test]
    fn test_non_augmented_shape_rejected() {
        let system = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        assert!(matches!(
            solve_augmented(system),
            Err(FlowError::InvalidParameter { name: "system", .. })
        ));
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for size in 2..6 {
            // Diagonally dominant systems stay comfortably non-singular.
            let mut matrix = DMatrix::from_fn(size, size, |_, _| rng.gen_range(-1.0..1.0));
            for diagonal in 0..size {
                matrix[(diagonal, diagonal)] += size as f64;
            }
            let expected = DVector::from_fn(size, |_, _| rng.gen_range(-5.0..5.0));
            let rhs = &matrix * &expected;

            let mut system = DMatrix::zeros(size, size + 1);
            system.view_mut((0, 0), (size, size)).copy_from(&matrix);
            system.view_mut((0, size), (size, 1)).copy_from(&rhs);

            let solution = solve_augmented(system).unwrap();
            let reproduced = &matrix * &solution;
            for row in 0..size {
                assert_relative_eq!(reproduced[row], rhs[row], epsilon = 1e-9);
            }
        }
    }
}
