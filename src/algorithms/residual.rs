//! Residual profile over the grid.
//!
//! ## Purpose
//!
//! This module computes and inspects the residual `f(x) - p(x)` at every
//! grid point. The profile drives every exchange decision: the single-point
//! rule reads its global peak, the multi-point rule searches its brackets,
//! and the engine checks the alternation invariant against it.
//!
//! ## Design notes
//!
//! * The profile is recomputed in full each iteration and tagged with the
//!   iteration that produced it; it is never incrementally patched.
//! * `peak` and the bracket searches resolve ties by taking the first
//!   candidate in ascending index order, which keeps runs deterministic.
//! * Zero is treated as positive everywhere a sign is compared. This single
//!   convention is shared by the exchange rules and the invariant check
//!   through [`same_sign`].
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * The profile has exactly one entry per grid point.
//! * Every stored residual is finite.
//!
//! ## Non-goals
//!
//! * This module does not choose replacement test points (exchange rules).
//! * This module does not decide convergence.

use num_traits::Float;

use crate::math::polynomial;
use crate::primitives::errors::RemezError;
use crate::primitives::grid::Grid;

// ============================================================================
// Sign Convention
// ============================================================================

/// Check two values for matching signs, counting zero as positive.
#[inline]
pub fn same_sign<T: Float>(first: T, second: T) -> bool {
    (first < T::zero() && second < T::zero())
        || (first >= T::zero() && second >= T::zero())
}

// ============================================================================
// Residual Profile
// ============================================================================

/// Residual `f(x_i) - p(x_i)` at every grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualProfile<T> {
    values: Vec<T>,
    iteration: usize,
}

impl<T: Float> ResidualProfile<T> {
    /// Compute the residual over the whole grid.
    ///
    /// Returns [`RemezError::NumericDomain`] if any residual is non-finite.
    pub fn scan(
        grid: &Grid<T>,
        f_grid: &[T],
        coefficients: &[T],
        iteration: usize,
    ) -> Result<Self, RemezError> {
        let values: Vec<T> = grid
            .values()
            .iter()
            .zip(f_grid.iter())
            .map(|(&x, &fx)| fx - polynomial::evaluate(coefficients, x))
            .collect();
        Self::from_values(values, iteration)
    }

    /// Wrap precomputed residual values, checking finiteness.
    pub(crate) fn from_values(values: Vec<T>, iteration: usize) -> Result<Self, RemezError> {
        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(RemezError::NumericDomain(format!(
                    "residual at grid index {} is {}",
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(Self { values, iteration })
    }

    /// Residual values in grid order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Residual at a single grid index.
    pub fn value(&self, index: usize) -> T {
        self.values[index]
    }

    /// Number of grid points covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the profile is empty. Scans over a built grid never are.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iteration that produced this profile.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Index and signed value of the global peak of `|r|`.
    ///
    /// Ties resolve to the first index in ascending scan order.
    pub fn peak(&self) -> (usize, T) {
        let mut index = 0;
        let mut magnitude = self.values[0].abs();
        for (i, &v) in self.values.iter().enumerate().skip(1) {
            if v.abs() > magnitude {
                magnitude = v.abs();
                index = i;
            }
        }
        (index, self.values[index])
    }

    /// Locate sign-retaining local extrema in one left-to-right pass.
    ///
    /// Both boundary points are always reported; an interior point is an
    /// extremum when the slope of the residual changes sign across it.
    pub fn local_extrema(&self) -> Vec<(usize, T)> {
        let n = self.values.len();
        let mut extrema = Vec::new();
        extrema.push((0, self.values[0]));
        for i in 1..n.saturating_sub(1) {
            let left = self.values[i] - self.values[i - 1];
            let right = self.values[i + 1] - self.values[i];
            if !same_sign(left, right) {
                extrema.push((i, self.values[i]));
            }
        }
        if n > 1 {
            extrema.push((n - 1, self.values[n - 1]));
        }
        extrema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_from(values: Vec<f64>) -> ResidualProfile<f64> {
        ResidualProfile::from_values(values, 1).unwrap()
    }

    #[test]
    fn same_sign_counts_zero_as_positive() {
        assert!(same_sign(0.0, 1.0));
        assert!(same_sign(0.0, 0.0));
        assert!(!same_sign(0.0, -1.0));
        assert!(same_sign(-2.0, -0.5));
        assert!(!same_sign(-2.0, 3.0));
    }

    #[test]
    fn scan_matches_function_minus_polynomial() {
        let grid = Grid::build(0.0_f64, 1.0, 5).unwrap();
        let f_grid: Vec<f64> = grid.values().iter().map(|&x| 2.0 * x).collect();
        // p(x) = x, so the residual is x.
        let profile = ResidualProfile::scan(&grid, &f_grid, &[0.0, 1.0], 3).unwrap();
        assert_eq!(profile.iteration(), 3);
        for (i, &x) in grid.values().iter().enumerate() {
            assert!((profile.value(i) - x).abs() < 1e-15);
        }
    }

    #[test]
    fn scan_rejects_non_finite_residual() {
        let grid = Grid::build(0.0_f64, 1.0, 3).unwrap();
        let f_grid = vec![0.0, f64::NAN, 0.0];
        let err = ResidualProfile::scan(&grid, &f_grid, &[0.0], 1).unwrap_err();
        assert!(matches!(err, RemezError::NumericDomain(_)));
    }

    #[test]
    fn peak_takes_first_of_equal_magnitudes() {
        let profile = profile_from(vec![0.5, -2.0, 1.0, 2.0, 0.0]);
        let (index, value) = profile.peak();
        assert_eq!(index, 1);
        assert_eq!(value, -2.0);
    }

    #[test]
    fn local_extrema_include_boundaries_and_turning_points() {
        let profile = profile_from(vec![0.0, 1.0, 0.5, -1.0, -0.25, 0.75]);
        let extrema = profile.local_extrema();
        let indices: Vec<usize> = extrema.iter().map(|&(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 3, 5]);
        assert_eq!(extrema[2], (3, -1.0));
    }
}
