//! Test-point exchange rules.
//!
//! ## Purpose
//!
//! This module implements the two exchange rules that refine the alternation
//! set between iterations. Both consume the current test points and the
//! full-grid residual profile and propose a replacement set of the same
//! size; neither mutates the set it was given.
//!
//! ## Available methods
//!
//! * **SinglePoint**: moves exactly one test point per iteration, to the
//!   grid point of globally maximal residual magnitude.
//! * **MultiPoint** (default): moves every test point at once, each to the
//!   extremum of matching sign inside its bracket. Costs more per iteration
//!   and typically converges in far fewer iterations.
//!
//! ## Key concepts
//!
//! ### Single-point placement
//!
//! The global peak lands in one of three places. Left of the whole set: the
//! set shifts right by one position when the peak's sign disagrees with the
//! first point, then the peak becomes the new first point. Right of the set:
//! mirrored. Inside the set: the peak falls into exactly one bracket
//! `[u_i, u_{i+1}]` and replaces whichever end shares its sign. All three
//! cases keep the indices strictly increasing and the signs alternating.
//!
//! ### Multi-point brackets
//!
//! Position `i` searches from just past the larger of (previous original
//! point, previous replacement) up to the next original point, for the
//! minimum where the current residual is negative and the maximum where it
//! is non-negative. The first and last positions search out to the grid
//! boundaries. After the sweep, an opposite-signed extremum beyond either
//! end may rotate into the set when its magnitude dominates the
//! corresponding endpoint, letting the alternation set slide along the grid.
//!
//! ### Tie-breaking
//!
//! Equal magnitudes resolve to the first candidate in ascending index
//! order. The reference material leaves this open; a fixed scan order keeps
//! results reproducible.
//!
//! ## Invariants
//!
//! * Proposed sets are strictly increasing with unchanged length.
//! * Every proposed point carries the residual sign its position requires.
//!
//! ## Non-goals
//!
//! * This module does not solve for coefficients or test convergence.
//! * This module does not handle the zero-level-error degeneracy (the
//!   engine falls back to the single-point rule for that cycle).

use num_traits::Float;

use crate::algorithms::residual::{same_sign, ResidualProfile};
use crate::primitives::errors::RemezError;

// ============================================================================
// Exchange Method
// ============================================================================

/// Exchange rule used to refine the alternation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeMethod {
    /// Replace one test point per iteration (first Remez algorithm).
    SinglePoint,

    /// Replace all test points per iteration (second Remez algorithm).
    #[default]
    MultiPoint,
}

impl ExchangeMethod {
    /// Propose the next alternation set from the current one.
    ///
    /// Fails with [`RemezError::NoValidExchange`] when a bracket offers no
    /// replacement carrying the required sign.
    pub fn propose<T: Float>(
        &self,
        trial: &[usize],
        profile: &ResidualProfile<T>,
    ) -> Result<Vec<usize>, RemezError> {
        match self {
            Self::SinglePoint => single_point(trial, profile),
            Self::MultiPoint => multi_point(trial, profile),
        }
    }
}

// ============================================================================
// Single-Point Rule
// ============================================================================

/// Move one test point to the global residual peak.
///
/// The single-point rule always has a sign-preserving placement, so this
/// never reports `NoValidExchange`.
pub(crate) fn single_point<T: Float>(
    trial: &[usize],
    profile: &ResidualProfile<T>,
) -> Result<Vec<usize>, RemezError> {
    let r = profile.values();
    let mut u = trial.to_vec();
    let k = u.len();
    let (pos, _) = profile.peak();

    if pos < u[0] {
        if !same_sign(r[u[0]], r[pos]) {
            u.rotate_right(1);
        }
        u[0] = pos;
    } else if pos > u[k - 1] {
        if !same_sign(r[pos], r[u[k - 1]]) {
            u.rotate_left(1);
        }
        u[k - 1] = pos;
    } else {
        for i in 0..k - 1 {
            if u[i] <= pos && pos <= u[i + 1] {
                if same_sign(r[u[i]], r[pos]) {
                    u[i] = pos;
                } else {
                    u[i + 1] = pos;
                }
                break;
            }
        }
    }

    debug_assert!(u.windows(2).all(|w| w[0] < w[1]));
    Ok(u)
}

// ============================================================================
// Multi-Point Rule
// ============================================================================

/// Move every test point to the extremum of matching sign in its bracket.
pub(crate) fn multi_point<T: Float>(
    trial: &[usize],
    profile: &ResidualProfile<T>,
) -> Result<Vec<usize>, RemezError> {
    let r = profile.values();
    let m = r.len();
    let k = trial.len();
    let mut update = vec![0usize; k];

    update[0] = bracket_winner(r, 0, trial[1], r[trial[0]] < T::zero(), 0)?;
    for i in 1..k - 1 {
        let lo = trial[i - 1].max(update[i - 1]) + 1;
        update[i] = bracket_winner(r, lo, trial[i + 1], r[trial[i]] < T::zero(), i)?;
    }
    let lo = trial[k - 2].max(update[k - 2]) + 1;
    update[k - 1] = bracket_winner(r, lo, m, r[trial[k - 1]] < T::zero(), k - 1)?;

    extend_endpoints(&mut update, trial, r);

    debug_assert!(update.windows(2).all(|w| w[0] < w[1]));
    Ok(update)
}

/// First index of the signed extremum in `[lo, hi)`.
///
/// Searches for the minimum when `want_negative`, the maximum otherwise,
/// and insists the winner actually carries the wanted sign.
pub(crate) fn bracket_winner<T: Float>(
    r: &[T],
    lo: usize,
    hi: usize,
    want_negative: bool,
    position: usize,
) -> Result<usize, RemezError> {
    if lo >= hi {
        return Err(RemezError::NoValidExchange { position });
    }

    let mut best = lo;
    for (j, &v) in r.iter().enumerate().take(hi).skip(lo + 1) {
        let better = if want_negative {
            v < r[best]
        } else {
            v > r[best]
        };
        if better {
            best = j;
        }
    }

    if want_negative != (r[best] < T::zero()) {
        return Err(RemezError::NoValidExchange { position });
    }
    Ok(best)
}

/// Rotate in an opposite-signed extremum beyond either end of the set.
///
/// Mirrors the endpoint-extension step of the multi-point rule: when the
/// residual holds a dominant extremum of opposite sign outside the updated
/// set, the set slides one position toward it, dropping the far endpoint.
pub(crate) fn extend_endpoints<T: Float>(update: &mut [usize], trial: &[usize], r: &[T]) {
    let m = r.len();
    let k = update.len();

    // Candidate left of the first updated point.
    let bound_first = update[0].min(trial[0]);
    let mut pos_first = bound_first;
    let mut mag_first = T::zero();
    if bound_first > 0 {
        pos_first = abs_argmax(r, 0, bound_first);
        if !same_sign(r[pos_first], r[update[0]]) {
            let mag = r[pos_first].abs();
            if mag > r[update[k - 1]].abs() {
                mag_first = mag;
            }
        }
    }

    // Candidate right of the last updated point.
    let bound_last = update[k - 1].max(trial[k - 1]) + 1;
    let mut pos_last = bound_last;
    let mut mag_last = T::zero();
    if bound_last < m {
        pos_last = abs_argmax(r, bound_last, m);
        if !same_sign(r[pos_last], r[update[k - 1]]) {
            let mag = r[pos_last].abs();
            let accept = if mag_first == T::zero() {
                mag > r[update[0]].abs()
            } else {
                mag > mag_first
            };
            if accept {
                mag_last = mag;
            }
        }
    }

    if mag_last > T::zero() {
        update.rotate_left(1);
        update[k - 1] = pos_last;
    } else if mag_first > T::zero() {
        update.rotate_right(1);
        update[0] = pos_first;
    }
}

/// First index of the largest `|r|` in `[lo, hi)`.
fn abs_argmax<T: Float>(r: &[T], lo: usize, hi: usize) -> usize {
    let mut best = lo;
    for j in lo + 1..hi {
        if r[j].abs() > r[best].abs() {
            best = j;
        }
    }
    best
}
