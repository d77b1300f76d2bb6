//! The immutable sample grid.
//!
//! ## Purpose
//!
//! This module provides [`Grid`], the ascending, equally spaced sequence of
//! abscissas on which the approximation problem is posed. Every residual,
//! test point, and exchange decision refers to positions on this grid.
//!
//! ## Design notes
//!
//! * Built once from `(lower, upper, len)`; read-only afterwards.
//! * Both interval endpoints are always grid points.
//! * The last point is pinned to `upper` exactly rather than accumulated,
//!   so rounding in the step size cannot shift the right endpoint.
//! * Generic over `Float` types to support f32 and f64.
//! * `Grid` is `Send + Sync`; engine instances may share one grid freely.
//!
//! ## Invariants
//!
//! * Points are strictly increasing.
//! * Spacing is uniform to within floating-point rounding of the step.
//! * `len() >= 2`.
//!
//! ## Non-goals
//!
//! * This module does not support non-uniform or user-supplied abscissas.
//! * This module does not validate grid size against the polynomial degree
//!   (handled by the validator, which knows the degree).

use num_traits::Float;

use crate::primitives::errors::RemezError;

// ============================================================================
// Grid
// ============================================================================

/// Ascending, equally spaced sample abscissas over a closed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    points: Vec<T>,
}

impl<T: Float> Grid<T> {
    /// Build a grid of `len` equally spaced points spanning `[lower, upper]`.
    ///
    /// Requires finite bounds with `lower < upper` and `len >= 2`.
    pub fn build(lower: T, upper: T, len: usize) -> Result<Self, RemezError> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(RemezError::InvalidInterval {
                lower: lower.to_f64().unwrap_or(f64::NAN),
                upper: upper.to_f64().unwrap_or(f64::NAN),
            });
        }
        if len < 2 {
            return Err(RemezError::TooFewGridPoints { got: len, min: 2 });
        }

        let step = (upper - lower) / T::from(len - 1).unwrap();
        let mut points = Vec::with_capacity(len);
        for i in 0..len {
            points.push(lower + step * T::from(i).unwrap());
        }
        // Pin the right endpoint exactly.
        points[len - 1] = upper;

        Ok(Self { points })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the grid holds no points. Construction forbids this; the
    /// method exists to satisfy the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Abscissa at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn value(&self, index: usize) -> T {
        self.points[index]
    }

    /// All abscissas in ascending order.
    pub fn values(&self) -> &[T] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_includes_both_endpoints() {
        let grid = Grid::build(-1.0_f64, 1.0, 5).unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.value(0), -1.0);
        assert_eq!(grid.value(4), 1.0);
        assert_eq!(grid.value(2), 0.0);
    }

    #[test]
    fn build_spacing_is_uniform() {
        let grid = Grid::build(0.0_f64, 1.0, 11).unwrap();
        let step = grid.value(1) - grid.value(0);
        for i in 1..grid.len() {
            let gap = grid.value(i) - grid.value(i - 1);
            assert!((gap - step).abs() < 1e-15);
        }
    }

    #[test]
    fn build_rejects_inverted_interval() {
        let err = Grid::build(1.0_f64, -1.0, 10).unwrap_err();
        assert!(matches!(err, RemezError::InvalidInterval { .. }));
        let err = Grid::build(1.0_f64, 1.0, 10).unwrap_err();
        assert!(matches!(err, RemezError::InvalidInterval { .. }));
    }

    #[test]
    fn build_rejects_non_finite_bounds() {
        let err = Grid::build(f64::NAN, 1.0, 10).unwrap_err();
        assert!(matches!(err, RemezError::InvalidInterval { .. }));
        let err = Grid::build(0.0, f64::INFINITY, 10).unwrap_err();
        assert!(matches!(err, RemezError::InvalidInterval { .. }));
    }

    #[test]
    fn build_rejects_tiny_grid() {
        let err = Grid::build(0.0_f64, 1.0, 1).unwrap_err();
        assert_eq!(err, RemezError::TooFewGridPoints { got: 1, min: 2 });
    }
}
