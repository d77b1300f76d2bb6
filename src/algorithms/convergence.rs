//! Convergence tracking for the exchange iteration.
//!
//! ## Purpose
//!
//! This module owns the level-error history of one engine run and decides
//! when the fixed-point iteration has stopped making progress. The level
//! error grows (weakly) from iteration to iteration as the alternation set
//! improves; convergence is declared when it stops growing by a meaningful
//! ratio.
//!
//! ## Design notes
//!
//! * The test is `current < threshold * previous` with a threshold barely
//!   above one, so a stalled level error reads as converged while genuine
//!   growth keeps iterating. The first assessment always continues because
//!   there is no previous magnitude to compare against.
//! * The iteration cap is a distinct outcome: running out of iterations is
//!   [`RemezError::MaxIterations`], never silent convergence.
//! * Each monitor instance is owned by one engine run; concurrent runs
//!   cannot interfere through shared state.
//!
//! ## Invariants
//!
//! * History records are appended once per iteration, in order.
//! * The stored previous magnitude is the one from the latest `Continue`.
//!
//! ## Non-goals
//!
//! * This module does not compute level errors or residuals.
//! * This module does not inspect the alternation set beyond recording it.

use num_traits::Float;

use crate::primitives::errors::RemezError;

// ============================================================================
// Decision
// ============================================================================

/// Outcome of one convergence assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep iterating.
    Continue,

    /// The level error has stopped growing; accept the current polynomial.
    Converged,
}

// ============================================================================
// Iteration Record
// ============================================================================

/// One accepted iteration: its level-error magnitude and alternation set.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord<T> {
    /// Iteration index, starting at 1.
    pub iteration: usize,

    /// Magnitude of the level error solved for this iteration.
    pub level_error: T,

    /// Alternation set the iteration solved against.
    pub trial_points: Vec<usize>,
}

// ============================================================================
// Convergence Monitor
// ============================================================================

/// Ratio-based convergence test with owned history and an iteration cap.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor<T> {
    threshold: T,
    max_iterations: usize,
    previous: Option<T>,
    history: Vec<IterationRecord<T>>,
}

impl<T: Float> ConvergenceMonitor<T> {
    /// Create a monitor with the given ratio threshold and iteration cap.
    pub fn new(threshold: T, max_iterations: usize) -> Self {
        Self {
            threshold,
            max_iterations,
            previous: None,
            history: Vec::new(),
        }
    }

    /// Append one iteration to the history.
    pub fn record(&mut self, iteration: usize, level_error: T, trial_points: &[usize]) {
        self.history.push(IterationRecord {
            iteration,
            level_error,
            trial_points: trial_points.to_vec(),
        });
    }

    /// Decide whether the iteration has converged.
    ///
    /// The first call always continues; afterwards the current magnitude is
    /// compared against the previous one scaled by the threshold. An exact
    /// repeat also converges, which covers the level error pinning to zero
    /// (where the ratio test is vacuous).
    pub fn assess(&mut self, current: T) -> Decision {
        match self.previous {
            Some(previous) if current < self.threshold * previous || current == previous => {
                Decision::Converged
            }
            _ => {
                self.previous = Some(current);
                Decision::Continue
            }
        }
    }

    /// Enforce the iteration cap after a `Continue` decision.
    pub fn enforce_cap(&self, iteration: usize) -> Result<(), RemezError> {
        if iteration >= self.max_iterations {
            return Err(RemezError::MaxIterations {
                limit: self.max_iterations,
            });
        }
        Ok(())
    }

    /// Configured iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Recorded history so far.
    pub fn history(&self) -> &[IterationRecord<T>] {
        &self.history
    }

    /// Consume the monitor, yielding its history.
    pub fn into_history(self) -> Vec<IterationRecord<T>> {
        self.history
    }
}
