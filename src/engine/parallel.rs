//! Rayon-backed execution paths.
//!
//! ## Purpose
//!
//! This module parallelizes the two data-parallel steps of an iteration:
//! the full-grid residual scan and the per-bracket searches of the
//! multi-point exchange. Both produce results identical to their sequential
//! counterparts, so toggling parallelism never changes the approximation.
//!
//! ## Design notes
//!
//! * The residual scan maps grid indices to residuals and collects in index
//!   order; values are bitwise identical to the sequential scan.
//! * The bracket searches run in two phases. Phase one searches every
//!   bracket bounded by the current test points only, which makes the
//!   searches independent. Phase two walks the winners left to right and
//!   re-searches the rare bracket whose winner fell at or below the
//!   tightened lower bound from its left neighbor. A winner inside the
//!   tightened bracket is the same point the sequential rule finds, because
//!   the tightened bracket is a suffix of the searched one and the scan
//!   takes the first extremum.
//! * Each bracket is scanned sequentially by one task, preserving the
//!   ascending-index tie-break.
//!
//! ## Invariants
//!
//! * Outputs equal the sequential implementations on identical inputs.
//!
//! ## Non-goals
//!
//! * This module does not parallelize the alternation solve; at the system
//!   sizes the alternation admits (degree + 2), elimination is cheaper than
//!   any fork overhead.
//! * This module does not schedule across engine instances.

use num_traits::Float;
use rayon::prelude::*;

use crate::algorithms::exchange::{bracket_winner, extend_endpoints};
use crate::algorithms::residual::ResidualProfile;
use crate::math::polynomial;
use crate::primitives::errors::RemezError;
use crate::primitives::grid::Grid;

// ============================================================================
// Parallel Residual Scan
// ============================================================================

/// Compute the residual over the whole grid in parallel.
pub fn scan_parallel<T>(
    grid: &Grid<T>,
    f_grid: &[T],
    coefficients: &[T],
    iteration: usize,
) -> Result<ResidualProfile<T>, RemezError>
where
    T: Float + Send + Sync,
{
    let values: Vec<T> = grid
        .values()
        .par_iter()
        .zip(f_grid.par_iter())
        .map(|(&x, &fx)| fx - polynomial::evaluate(coefficients, x))
        .collect();
    ResidualProfile::from_values(values, iteration)
}

// ============================================================================
// Parallel Multi-Point Exchange
// ============================================================================

/// Multi-point exchange with parallel bracket searches.
pub fn multi_point_parallel<T>(
    trial: &[usize],
    profile: &ResidualProfile<T>,
) -> Result<Vec<usize>, RemezError>
where
    T: Float + Send + Sync,
{
    let r = profile.values();
    let m = r.len();
    let k = trial.len();

    // Phase 1: independent winners over brackets bounded by the current set.
    let seeds: Vec<Result<usize, RemezError>> = (0..k)
        .into_par_iter()
        .map(|i| {
            let lo = if i == 0 { 0 } else { trial[i - 1] + 1 };
            let hi = if i == k - 1 { m } else { trial[i + 1] };
            bracket_winner(r, lo, hi, r[trial[i]] < T::zero(), i)
        })
        .collect();

    // Phase 2: left-to-right fan-in with lower-bound tightening.
    let mut update = vec![0usize; k];
    for (i, seed) in seeds.into_iter().enumerate() {
        let winner = seed?;
        if i == 0 {
            update[0] = winner;
            continue;
        }
        let lo = trial[i - 1].max(update[i - 1]) + 1;
        if winner >= lo {
            update[i] = winner;
        } else {
            let hi = if i == k - 1 { m } else { trial[i + 1] };
            update[i] = bracket_winner(r, lo, hi, r[trial[i]] < T::zero(), i)?;
        }
    }

    extend_endpoints(&mut update, trial, r);

    debug_assert!(update.windows(2).all(|w| w[0] < w[1]));
    Ok(update)
}
