//! Output types for Remez approximation.
//!
//! ## Purpose
//!
//! This module defines [`RemezResult`], the container returned by every
//! successful run. It carries the approximation itself (coefficients and
//! level error), the quality figures callers act on (peak residual,
//! iteration count, wall-clock time), and the optional extras a reporting
//! layer needs (residual profile, final alternation set, iteration
//! history).
//!
//! ## Design notes
//!
//! * Optional outputs use `Option<Vec<_>>` and are only populated when the
//!   corresponding builder flag was set, keeping the default result small.
//! * The result re-evaluates its own polynomial via the shared Horner
//!   routine, so downstream consumers never reimplement evaluation.
//! * `Display` renders the report the way the reference drivers print
//!   theirs: order, error, iteration count, duration, then the coefficient
//!   listing in scientific notation.
//!
//! ## Invariants
//!
//! * `coefficients.len() == degree + 1`.
//! * `max_residual >= level_error.abs()` up to roundoff; on a converged run
//!   the two agree closely.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations beyond evaluation; it only
//!   stores results.
//! * This module does not provide serialization.
//!
//! ## Visibility
//!
//! [`RemezResult`] is part of the public API and is the primary result type
//! of the crate.

use core::fmt;
use std::time::Duration;

use num_traits::Float;

use crate::algorithms::convergence::IterationRecord;
use crate::math::polynomial;

// ============================================================================
// Result Structure
// ============================================================================

/// Outcome of a successful approximation run.
#[derive(Debug, Clone)]
pub struct RemezResult<T> {
    /// Polynomial coefficients in ascending powers, length `degree + 1`.
    pub coefficients: Vec<T>,

    /// Signed level error at the accepted alternation set.
    pub level_error: T,

    /// Largest residual magnitude over the whole grid.
    pub max_residual: T,

    /// Number of alternation solves performed.
    pub iterations: usize,

    /// Wall-clock time spent in the run.
    pub duration: Duration,

    /// Full-grid residual profile of the accepted polynomial.
    pub residuals: Option<Vec<T>>,

    /// Final alternation set, as grid indices.
    pub trial_points: Option<Vec<usize>>,

    /// Level-error history, one record per iteration.
    pub history: Option<Vec<IterationRecord<T>>>,
}

impl<T: Float> RemezResult<T> {
    /// Degree of the accepted polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate the accepted polynomial at `x`.
    pub fn evaluate(&self, x: T) -> T {
        polynomial::evaluate(&self.coefficients, x)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + fmt::LowerExp> fmt::Display for RemezResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Minimax polynomial approximation")?;
        writeln!(f, "  Degree: {}", self.degree())?;
        writeln!(f, "  Level error: {:.15e}", self.level_error)?;
        writeln!(f, "  Peak residual: {:.15e}", self.max_residual)?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Duration: {:?}", self.duration)?;

        writeln!(f, "Coefficients:")?;
        for (k, &c) in self.coefficients.iter().enumerate() {
            writeln!(f, "  c[{:>2}] = {:+.15e}", k, c)?;
        }

        if let Some(trial) = &self.trial_points {
            writeln!(f, "Alternation set: {:?}", trial)?;
        }
        if let Some(history) = &self.history {
            writeln!(f, "History:")?;
            for record in history {
                writeln!(
                    f,
                    "  iteration {:>3}: level error {:.15e}",
                    record.iteration, record.level_error
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> RemezResult<f64> {
        RemezResult {
            coefficients: vec![0.5, -1.0, 0.25],
            level_error: -0.125,
            max_residual: 0.125,
            iterations: 7,
            duration: Duration::from_millis(3),
            residuals: None,
            trial_points: Some(vec![0, 3, 8, 12]),
            history: None,
        }
    }

    #[test]
    fn degree_follows_coefficient_length() {
        assert_eq!(result().degree(), 2);
    }

    #[test]
    fn evaluate_uses_stored_coefficients() {
        let r = result();
        let x = 2.0;
        let expected = 0.5 - 1.0 * x + 0.25 * x * x;
        assert!((r.evaluate(x) - expected).abs() < 1e-15);
    }

    #[test]
    fn display_reports_core_figures() {
        let text = result().to_string();
        assert!(text.contains("Degree: 2"));
        assert!(text.contains("Iterations: 7"));
        assert!(text.contains("c[ 0]"));
        assert!(text.contains("Alternation set"));
    }
}
