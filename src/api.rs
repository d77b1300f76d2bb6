//! High-level API for minimax polynomial approximation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point of the crate: a
//! fluent builder for configuring an approximation, and the [`Remez`]
//! processor that runs it against a target function on an interval.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a builder via [`Remez::new`].
//! 2. Chain configuration methods (`.degree()`, `.grid_points()`, ...).
//! 3. Call `.build()` to validate and obtain a [`Remez`] processor.
//! 4. Call `.approximate(lower, upper, f)` to run the exchange iteration.
//!
//! ```
//! use remez::prelude::*;
//!
//! let result = Remez::<f64>::new()
//!     .degree(5)
//!     .grid_points(201)
//!     .exchange_method(ExchangeMethod::MultiPoint)
//!     .build()
//!     .unwrap()
//!     .approximate(0.0, 1.0, |x: f64| x.exp())
//!     .unwrap();
//!
//! assert!(result.max_residual < 1e-5);
//! ```
//!
//! ### Exchange variants
//!
//! * [`ExchangeMethod::SinglePoint`] moves one test point per iteration.
//! * [`ExchangeMethod::MultiPoint`] (default) moves all of them at once.
//!
//! Both converge to the same polynomial; they differ in iteration count.
//!
//! ## Visibility
//!
//! This is the primary public API. Types re-exported here are considered
//! stable.

use core::result;

use num_traits::Float;

use crate::engine::executor::{self, RemezConfig};
use crate::engine::validator::Validator;
use crate::primitives::grid::Grid;

// Publicly re-exported types
pub use crate::algorithms::convergence::IterationRecord;
pub use crate::algorithms::exchange::ExchangeMethod;
pub use crate::engine::output::RemezResult;
pub use crate::primitives::errors::RemezError;

/// Result type alias for Remez operations.
pub type Result<T> = result::Result<T, RemezError>;

/// Default convergence ratio threshold.
///
/// Barely above one: the iteration stops once the level error grows by less
/// than one part in 10^15.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1.000000000000001;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a minimax approximation.
#[derive(Debug, Clone)]
pub struct RemezBuilder<T> {
    /// Polynomial degree.
    pub degree: Option<usize>,

    /// Number of grid points spanning the interval.
    pub grid_points: Option<usize>,

    /// Exchange rule variant.
    pub exchange_method: Option<ExchangeMethod>,

    /// Convergence ratio threshold.
    pub convergence_threshold: Option<T>,

    /// Iteration cap.
    pub max_iterations: Option<usize>,

    /// Use rayon-backed scans and bracket searches.
    pub parallel: Option<bool>,

    /// Include the final residual profile in the result.
    pub return_residuals: bool,

    /// Include the final alternation set in the result.
    pub return_trial_points: bool,

    /// Include the iteration history in the result.
    pub return_history: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for RemezBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> RemezBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            degree: None,
            grid_points: None,
            exchange_method: None,
            convergence_threshold: None,
            max_iterations: None,
            parallel: None,
            return_residuals: false,
            return_trial_points: false,
            return_history: false,
            duplicate_param: None,
        }
    }

    /// Set the polynomial degree (default: 5).
    pub fn degree(mut self, degree: usize) -> Self {
        if self.degree.is_some() {
            self.duplicate_param = Some("degree");
        }
        self.degree = Some(degree);
        self
    }

    /// Set the number of grid points (default: 51).
    pub fn grid_points(mut self, grid_points: usize) -> Self {
        if self.grid_points.is_some() {
            self.duplicate_param = Some("grid_points");
        }
        self.grid_points = Some(grid_points);
        self
    }

    /// Set the exchange rule variant (default: MultiPoint).
    pub fn exchange_method(mut self, method: ExchangeMethod) -> Self {
        if self.exchange_method.is_some() {
            self.duplicate_param = Some("exchange_method");
        }
        self.exchange_method = Some(method);
        self
    }

    /// Set the convergence ratio threshold (default:
    /// [`DEFAULT_CONVERGENCE_THRESHOLD`]).
    pub fn convergence_threshold(mut self, threshold: T) -> Self {
        if self.convergence_threshold.is_some() {
            self.duplicate_param = Some("convergence_threshold");
        }
        self.convergence_threshold = Some(threshold);
        self
    }

    /// Set the iteration cap (default: 100).
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Enable or disable parallel execution (default: enabled when the
    /// `parallel` feature is compiled in).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Include the final residual profile in the result.
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = true;
        self
    }

    /// Include the final alternation set in the result.
    pub fn return_trial_points(mut self) -> Self {
        self.return_trial_points = true;
        self
    }

    /// Include the iteration history in the result.
    pub fn return_history(mut self) -> Self {
        self.return_history = true;
        self
    }

    /// Validate the configuration and build the processor.
    pub fn build(self) -> Result<Remez<T>> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let degree = self.degree.unwrap_or(5);
        let grid_points = self.grid_points.unwrap_or(51);
        Validator::validate_grid_size(grid_points, degree)?;

        let convergence_threshold = self
            .convergence_threshold
            .unwrap_or_else(|| T::from(DEFAULT_CONVERGENCE_THRESHOLD).unwrap());
        Validator::validate_threshold(convergence_threshold)?;

        let max_iterations = self.max_iterations.unwrap_or(100);
        Validator::validate_max_iterations(max_iterations)?;

        Ok(Remez {
            config: RemezConfig {
                degree,
                exchange_method: self.exchange_method.unwrap_or_default(),
                convergence_threshold,
                max_iterations,
                parallel: self.parallel.unwrap_or(cfg!(feature = "parallel")),
            },
            grid_points,
            return_residuals: self.return_residuals,
            return_trial_points: self.return_trial_points,
            return_history: self.return_history,
        })
    }
}

// ============================================================================
// Processor
// ============================================================================

/// Validated minimax approximation processor.
#[derive(Debug, Clone)]
pub struct Remez<T> {
    config: RemezConfig<T>,
    grid_points: usize,
    return_residuals: bool,
    return_trial_points: bool,
    return_history: bool,
}

impl<T: Float> Remez<T> {
    /// Start configuring an approximation.
    pub fn new() -> RemezBuilder<T> {
        RemezBuilder::new()
    }
}

impl<T: Float + Send + Sync> Remez<T> {
    /// Approximate `func` over `[lower, upper]`.
    ///
    /// Builds the grid, runs the exchange iteration, and packages the
    /// report. Fails without iterating when the interval or grid is
    /// malformed; fails during iteration on a singular system, an exhausted
    /// exchange, a broken alternation invariant, or the iteration cap.
    pub fn approximate<F>(&self, lower: T, upper: T, func: F) -> Result<RemezResult<T>>
    where
        F: Fn(T) -> T,
    {
        let grid = Grid::build(lower, upper, self.grid_points)?;
        let output = executor::run(&grid, func, &self.config)?;

        Ok(RemezResult {
            coefficients: output.coefficients,
            level_error: output.level_error,
            max_residual: output.max_residual,
            iterations: output.iterations,
            duration: output.duration,
            residuals: self
                .return_residuals
                .then(|| output.residuals.values().to_vec()),
            trial_points: self.return_trial_points.then_some(output.trial_points),
            history: self.return_history.then_some(output.history),
        })
    }
}
