//! Error types for Remez approximation.
//!
//! ## Purpose
//!
//! This module defines the unified [`RemezError`] enum covering every failure
//! mode of the crate, from malformed construction parameters to fatal
//! invariant violations inside the exchange iteration. Variants carry the
//! offending values so callers can diagnose a failed run without re-deriving
//! state.
//!
//! ## Design notes
//!
//! * One flat enum for the whole crate; no nested error hierarchies.
//! * Configuration errors are detected before iteration begins (fail-fast).
//! * Iteration errors are fatal to the run; the engine performs no retry.
//! * Numeric context is stored as `f64` regardless of the working precision.
//!
//! ## Key concepts
//!
//! ### Configuration versus iteration failures
//!
//! `TooFewGridPoints`, `InvalidInterval`, `InvalidThreshold`,
//! `InvalidIterations` and `DuplicateParameter` are reported by the validator
//! before any linear algebra runs. `SingularSystem`, `NoValidExchange`,
//! `NonAlternatingResidual`, `MaxIterations` and `NumericDomain` surface from
//! inside the iteration and terminate it.
//!
//! ### Defect signals
//!
//! `NonAlternatingResidual` is an internal invariant violation. Correct
//! exchange logic makes it unreachable; when it occurs the engine halts
//! immediately rather than attempting recovery.
//!
//! ## Visibility
//!
//! `RemezError` is part of the public API and is the error type of every
//! fallible operation in the crate.

use core::fmt;

// ============================================================================
// Error Enum
// ============================================================================

/// Unified error type for Remez approximation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RemezError {
    /// The grid cannot hold the requested alternation set.
    ///
    /// Raised when the grid has fewer than two points, or fewer than
    /// `degree + 2` points.
    TooFewGridPoints {
        /// Number of grid points requested.
        got: usize,
        /// Minimum number of grid points required.
        min: usize,
    },

    /// The approximation interval is empty, inverted, or non-finite.
    InvalidInterval {
        /// Lower bound as supplied.
        lower: f64,
        /// Upper bound as supplied.
        upper: f64,
    },

    /// The convergence ratio threshold is below one or non-finite.
    InvalidThreshold(f64),

    /// The iteration cap is zero or beyond the supported maximum.
    InvalidIterations(usize),

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    /// A non-finite value was encountered during evaluation.
    NumericDomain(String),

    /// The alternation linear system is singular to working precision.
    SingularSystem {
        /// Elimination column at which the pivot collapsed.
        column: usize,
        /// Magnitude of the rejected pivot.
        pivot: f64,
    },

    /// An exchange step found no replacement preserving sign alternation.
    NoValidExchange {
        /// Alternation position whose bracket was exhausted.
        position: usize,
    },

    /// The residual failed to alternate at the accepted test points.
    ///
    /// Internal invariant violation; reported as a defect, not retried.
    NonAlternatingResidual {
        /// Grid index at which alternation broke.
        position: usize,
        /// Iteration that produced the violation.
        iteration: usize,
    },

    /// The iteration cap was reached without convergence.
    MaxIterations {
        /// Configured iteration cap.
        limit: usize,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for RemezError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewGridPoints { got, min } => {
                write!(f, "grid has {} points but at least {} are required", got, min)
            }
            Self::InvalidInterval { lower, upper } => {
                write!(
                    f,
                    "invalid interval [{}, {}]: bounds must be finite with lower < upper",
                    lower, upper
                )
            }
            Self::InvalidThreshold(t) => {
                write!(
                    f,
                    "invalid convergence threshold {}: must be finite and at least 1",
                    t
                )
            }
            Self::InvalidIterations(n) => {
                write!(f, "invalid iteration cap {}: must be between 1 and 10000", n)
            }
            Self::DuplicateParameter { parameter } => {
                write!(f, "parameter '{}' was set more than once", parameter)
            }
            Self::NumericDomain(detail) => {
                write!(f, "non-finite value encountered: {}", detail)
            }
            Self::SingularSystem { column, pivot } => {
                write!(
                    f,
                    "alternation system is singular at column {} (pivot magnitude {:e})",
                    column, pivot
                )
            }
            Self::NoValidExchange { position } => {
                write!(
                    f,
                    "no sign-preserving exchange exists for alternation position {}",
                    position
                )
            }
            Self::NonAlternatingResidual { position, iteration } => {
                write!(
                    f,
                    "residual does not alternate at grid index {} (iteration {})",
                    position, iteration
                )
            }
            Self::MaxIterations { limit } => {
                write!(f, "no convergence within {} iterations", limit)
            }
        }
    }
}

impl std::error::Error for RemezError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = RemezError::TooFewGridPoints { got: 5, min: 12 };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("12"));

        let err = RemezError::SingularSystem {
            column: 3,
            pivot: 1e-18,
        };
        assert!(err.to_string().contains("column 3"));
    }
}
