//! Configuration validation.
//!
//! ## Purpose
//!
//! This module checks every configurable parameter before a run begins, so
//! that iteration code never sees a malformed configuration. Validation is
//! fail-fast: the first violation is returned immediately with the
//! offending value embedded in the error.
//!
//! ## Validated parameters
//!
//! * **Grid size**: at least 2 points, and at least `degree + 2` so the
//!   alternation set fits
//! * **Convergence threshold**: finite and at least 1
//! * **Iteration cap**: between 1 and 10000
//! * **Builder hygiene**: no parameter set twice
//!
//! Interval bounds are validated by [`Grid::build`](crate::primitives::grid::Grid::build)
//! when the domain is supplied, not here.
//!
//! ## Visibility
//!
//! This module is an internal implementation detail used by the builder.

use num_traits::Float;

use crate::primitives::errors::RemezError;

/// Largest accepted iteration cap.
const MAX_ITERATION_CAP: usize = 10_000;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for Remez configuration.
///
/// All methods return `Result<(), RemezError>` and fail fast on the first
/// violation.
pub struct Validator;

impl Validator {
    /// Validate that the grid can hold the alternation set for `degree`.
    pub fn validate_grid_size(grid_points: usize, degree: usize) -> Result<(), RemezError> {
        let min = (degree + 2).max(2);
        if grid_points < min {
            return Err(RemezError::TooFewGridPoints {
                got: grid_points,
                min,
            });
        }
        Ok(())
    }

    /// Validate the convergence ratio threshold.
    pub fn validate_threshold<T: Float>(threshold: T) -> Result<(), RemezError> {
        if !threshold.is_finite() || threshold < T::one() {
            return Err(RemezError::InvalidThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the iteration cap.
    pub fn validate_max_iterations(max_iterations: usize) -> Result<(), RemezError> {
        if max_iterations == 0 || max_iterations > MAX_ITERATION_CAP {
            return Err(RemezError::InvalidIterations(max_iterations));
        }
        Ok(())
    }

    /// Validate that no builder parameter was set multiple times.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), RemezError> {
        if let Some(parameter) = duplicate_param {
            return Err(RemezError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
