//! The dense alternation solve.
//!
//! ## Purpose
//!
//! This module builds and solves the linear system at the heart of each
//! exchange iteration. For test points `x_0 < x_1 < ... < x_{n+1}` the system
//! is
//!
//! ```text
//! c_0 + c_1 x_i + ... + c_n x_i^n + (-1)^i e = f(x_i),   i = 0..n+1
//! ```
//!
//! with the `n + 1` coefficients and the signed level error `e` as unknowns.
//! Solving it yields a polynomial whose residual equioscillates exactly on
//! the test points, by construction.
//!
//! ## Design notes
//!
//! * Gaussian elimination with partial pivoting on the augmented matrix.
//!   The system is a Vandermonde matrix with one appended sign column, and
//!   unpivoted elimination on Vandermonde systems loses digits quickly.
//! * Singularity is decided against a tolerance scaled from the matrix
//!   infinity norm, so duplicate test points and degenerate spacing are
//!   reported as [`RemezError::SingularSystem`] rather than returning
//!   garbage coefficients.
//! * Pure function of its inputs; no state is carried between solves.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * `trial` indices are strictly increasing and within the grid.
//! * The returned coefficient vector has length `trial.len() - 1`.
//!
//! ## Non-goals
//!
//! * This module does not decide which test points to solve for.
//! * This module does not verify the equioscillation of the result against
//!   the full grid (handled by the engine).

use num_traits::Float;

use crate::primitives::errors::RemezError;
use crate::primitives::grid::Grid;

// ============================================================================
// Polynomial State
// ============================================================================

/// Coefficients and signed level error produced by one alternation solve.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialState<T> {
    /// Coefficients in ascending powers, length `degree + 1`.
    pub coefficients: Vec<T>,

    /// Signed level error `e`; the residual at test point `i` equals
    /// `(-1)^i e`.
    pub level_error: T,
}

// ============================================================================
// Solve
// ============================================================================

/// Solve the alternation system for the given test points.
///
/// `f_grid` holds the target function sampled over the whole grid; only the
/// entries selected by `trial` are read.
pub fn solve_alternation<T: Float>(
    grid: &Grid<T>,
    f_grid: &[T],
    trial: &[usize],
) -> Result<PolynomialState<T>, RemezError> {
    let n = trial.len();
    debug_assert!(n >= 2, "alternation system needs at least two test points");

    // Augmented matrix: n rows of [1, x, .., x^(n-2), (-1)^i | f(x_i)].
    let mut a = vec![vec![T::zero(); n + 1]; n];
    for (i, &index) in trial.iter().enumerate() {
        let x = grid.value(index);
        let row = &mut a[i];
        let mut power = T::one();
        for cell in row.iter_mut().take(n - 1) {
            *cell = power;
            power = power * x;
        }
        row[n - 1] = if i % 2 == 0 { T::one() } else { -T::one() };
        row[n] = f_grid[index];
    }

    let solution = eliminate(&mut a)?;

    let level_error = solution[n - 1];
    let mut coefficients = solution;
    coefficients.truncate(n - 1);

    Ok(PolynomialState {
        coefficients,
        level_error,
    })
}

/// Forward elimination with partial pivoting, then back substitution.
///
/// `a` is an `n x (n + 1)` augmented matrix, consumed in place.
fn eliminate<T: Float>(a: &mut [Vec<T>]) -> Result<Vec<T>, RemezError> {
    let n = a.len();

    // Pivot tolerance scaled from the infinity norm of the coefficient part.
    let mut norm = T::zero();
    for row in a.iter() {
        let row_sum = row
            .iter()
            .take(n)
            .fold(T::zero(), |acc, &v| acc + v.abs());
        norm = norm.max(row_sum);
    }
    let tolerance = norm * T::epsilon() * T::from(n).unwrap();

    for col in 0..n {
        // Select the largest pivot in this column.
        let mut pivot_row = col;
        let mut pivot_mag = a[col][col].abs();
        for (row, candidate) in a.iter().enumerate().skip(col + 1) {
            let mag = candidate[col].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = row;
            }
        }
        if pivot_mag <= tolerance {
            return Err(RemezError::SingularSystem {
                column: col,
                pivot: pivot_mag.to_f64().unwrap_or(f64::NAN),
            });
        }
        a.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == T::zero() {
                continue;
            }
            for c in col..=n {
                let delta = factor * a[col][c];
                a[row][c] = a[row][c] - delta;
            }
        }
    }

    // Back substitution.
    let mut x = vec![T::zero(); n];
    for row in (0..n).rev() {
        let mut acc = a[row][n];
        for (c, &xc) in x.iter().enumerate().skip(row + 1) {
            acc = acc - a[row][c] * xc;
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample<T: Float, F: Fn(T) -> T>(grid: &Grid<T>, f: F) -> Vec<T> {
        grid.values().iter().map(|&x| f(x)).collect()
    }

    #[test]
    fn recovers_exact_polynomial_with_zero_level_error() {
        // Target is itself a degree-2 polynomial; the degree-2 alternation
        // solve must reproduce it with level error at roundoff.
        let grid = Grid::build(-1.0_f64, 1.0, 21).unwrap();
        let f_grid = sample(&grid, |x| 0.5 - 2.0 * x + 0.25 * x * x);
        let trial = [0, 7, 13, 20];

        let state = solve_alternation(&grid, &f_grid, &trial).unwrap();
        assert!((state.coefficients[0] - 0.5).abs() < 1e-12);
        assert!((state.coefficients[1] + 2.0).abs() < 1e-12);
        assert!((state.coefficients[2] - 0.25).abs() < 1e-12);
        assert!(state.level_error.abs() < 1e-12);
    }

    #[test]
    fn level_error_alternates_on_test_points() {
        let grid = Grid::build(0.0_f64, 1.0, 51).unwrap();
        let f_grid = sample(&grid, |x: f64| x.exp());
        let trial = [0, 12, 25, 38, 50];

        let state = solve_alternation(&grid, &f_grid, &trial).unwrap();
        for (i, &index) in trial.iter().enumerate() {
            let p = crate::math::polynomial::evaluate(&state.coefficients, grid.value(index));
            let residual = f_grid[index] - p;
            let expected = if i % 2 == 0 {
                state.level_error
            } else {
                -state.level_error
            };
            assert!(
                (residual - expected).abs() < 1e-10,
                "residual {} vs expected {} at test point {}",
                residual,
                expected,
                i
            );
        }
    }

    #[test]
    fn coincident_test_points_are_singular() {
        // Two coincident points are still rescued by the sign column; three
        // produce a repeated row and must be rejected.
        let grid = Grid::build(0.0_f64, 1.0, 11).unwrap();
        let f_grid = sample(&grid, |x: f64| x.sin());
        let trial = [3, 3, 3];

        let err = solve_alternation(&grid, &f_grid, &trial).unwrap_err();
        assert!(matches!(err, RemezError::SingularSystem { .. }));
    }
}
