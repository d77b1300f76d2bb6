//! The Remez iteration loop.
//!
//! ## Purpose
//!
//! This module drives one approximation run from start to finish. It samples
//! the target function, places the initial test points, and repeats the
//! solve / scan / assess / exchange cycle until the level error stops
//! growing, an invariant breaks, or the iteration cap is reached.
//!
//! ## Execution Flow
//!
//! 1. Sample the target over the grid (rejecting non-finite values)
//! 2. Place `degree + 2` initial test points at rounded Chebyshev nodes
//! 3. Each iteration:
//!    - Solve the alternation system for coefficients and level error
//!    - Scan the residual over the whole grid
//!    - Check that the residual alternates at the test points
//!    - Assess convergence against the previous level error
//!    - Propose the next test-point set via the configured exchange rule
//! 4. Package coefficients, level error, peak residual, iteration count,
//!    elapsed time, and the final profile into an [`EngineOutput`]
//!
//! ## Key concepts
//!
//! ### State machine
//!
//! A run moves through Initializing → Iterating → Converged, or stops in a
//! failed state on the first error. Nothing is retried internally and no
//! partial result is ever returned.
//!
//! ### Full-grid alternation set
//!
//! On a grid with exactly `degree + 2` points the initial set is the whole
//! grid. No candidate points exist outside the alternation set, so the run
//! is accepted directly after the first solve with zero exchange steps. In
//! every other case the loop re-solves after each exchange, even an
//! exchange that moved nothing; the repeated level error then satisfies the
//! ratio test, which keeps iteration counts aligned with the classical
//! formulation.
//!
//! ### Zero level error
//!
//! A level error of exactly zero leaves the multi-point brackets without a
//! sign to follow; the engine falls back to the single-point rule for that
//! cycle, matching the classical treatment of this degeneracy.
//!
//! ## Invariants
//!
//! * The test-point set is strictly increasing at every iteration.
//! * The residual profile is recomputed in full each iteration.
//! * History records are appended exactly once per solve.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (builder/validator).
//! * This module does not choose between sequential and parallel rayon
//!   scheduling beyond honoring the configured switch.

use std::time::{Duration, Instant};

use log::{debug, trace};
use num_traits::Float;

use crate::algorithms::convergence::{ConvergenceMonitor, Decision, IterationRecord};
use crate::algorithms::exchange::{self, ExchangeMethod};
use crate::algorithms::residual::{same_sign, ResidualProfile};
use crate::math::solver::{solve_alternation, PolynomialState};
use crate::primitives::errors::RemezError;
use crate::primitives::grid::Grid;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for one engine run.
#[derive(Debug, Clone)]
pub struct RemezConfig<T> {
    /// Polynomial degree.
    pub degree: usize,

    /// Exchange rule applied between iterations.
    pub exchange_method: ExchangeMethod,

    /// Convergence ratio threshold, slightly above one.
    pub convergence_threshold: T,

    /// Iteration cap; exceeding it is an error, not convergence.
    pub max_iterations: usize,

    /// Use the rayon-backed scan and bracket searches when available.
    pub parallel: bool,
}

// ============================================================================
// Output
// ============================================================================

/// Everything one converged run produces.
#[derive(Debug, Clone)]
pub struct EngineOutput<T> {
    /// Coefficients in ascending powers, length `degree + 1`.
    pub coefficients: Vec<T>,

    /// Signed level error at the accepted alternation set.
    pub level_error: T,

    /// Largest residual magnitude over the whole grid at acceptance.
    pub max_residual: T,

    /// Number of alternation solves performed.
    pub iterations: usize,

    /// Wall-clock time spent in the run.
    pub duration: Duration,

    /// Final full-grid residual profile.
    pub residuals: ResidualProfile<T>,

    /// Final alternation set.
    pub trial_points: Vec<usize>,

    /// Per-iteration history.
    pub history: Vec<IterationRecord<T>>,
}

// ============================================================================
// Run
// ============================================================================

/// Run the exchange iteration for `func` on `grid`.
pub fn run<T, F>(
    grid: &Grid<T>,
    func: F,
    config: &RemezConfig<T>,
) -> Result<EngineOutput<T>, RemezError>
where
    T: Float + Send + Sync,
    F: Fn(T) -> T,
{
    let start = Instant::now();

    // Initializing: sample the target and place the starting test points.
    let f_grid = sample_target(grid, func)?;
    let f_scale = f_grid
        .iter()
        .fold(T::zero(), |acc, &v| acc.max(v.abs()));
    let mut trial = initial_trial_points::<T>(config.degree, grid.len());
    trace!("initial test points: {:?}", trial);

    let mut monitor =
        ConvergenceMonitor::new(config.convergence_threshold, config.max_iterations);

    // Iterating.
    let mut iteration = 0;
    loop {
        iteration += 1;

        let state = solve_alternation(grid, &f_grid, &trial)?;
        let profile = scan_profile(grid, &f_grid, &state.coefficients, iteration, config)?;
        verify_alternation(&trial, &profile, state.level_error, f_scale, iteration)?;

        let magnitude = state.level_error.abs();
        monitor.record(iteration, magnitude, &trial);
        debug!(
            "iteration {}: level error {:e}",
            iteration,
            magnitude.to_f64().unwrap_or(f64::NAN)
        );

        // The set spans the grid: no candidate points exist outside it.
        if trial.len() == grid.len() {
            return Ok(finish(state, profile, trial, iteration, monitor, start));
        }

        if monitor.assess(magnitude) == Decision::Converged {
            return Ok(finish(state, profile, trial, iteration, monitor, start));
        }

        monitor.enforce_cap(iteration)?;
        let proposal = propose_next(&trial, &profile, state.level_error, config)?;
        trace!("iteration {}: test points {:?}", iteration, proposal);
        trial = proposal;
    }
}

/// Package a converged run.
fn finish<T: Float>(
    state: PolynomialState<T>,
    profile: ResidualProfile<T>,
    trial: Vec<usize>,
    iterations: usize,
    monitor: ConvergenceMonitor<T>,
    start: Instant,
) -> EngineOutput<T> {
    let (_, peak) = profile.peak();
    EngineOutput {
        coefficients: state.coefficients,
        level_error: state.level_error,
        max_residual: peak.abs(),
        iterations,
        duration: start.elapsed(),
        residuals: profile,
        trial_points: trial,
        history: monitor.into_history(),
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Sample the target function over the grid, rejecting non-finite values.
fn sample_target<T, F>(grid: &Grid<T>, func: F) -> Result<Vec<T>, RemezError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let mut f_grid = Vec::with_capacity(grid.len());
    for (i, &x) in grid.values().iter().enumerate() {
        let fx = func(x);
        if !fx.is_finite() {
            return Err(RemezError::NumericDomain(format!(
                "target function value at grid index {} is {}",
                i,
                fx.to_f64().unwrap_or(f64::NAN)
            )));
        }
        f_grid.push(fx);
    }
    Ok(f_grid)
}

/// Starting test points: Chebyshev nodes mapped onto grid indices.
///
/// The continuous node positions `((m-1)/2)(1 - cos(iπ/(n+1)))` are rounded
/// half-to-even. On coarse grids rounding can collide neighboring nodes, so
/// a forward pass restores strict ascent and a backward pass pulls any
/// overflow back inside the grid; with `m == degree + 2` this yields every
/// grid index.
pub(crate) fn initial_trial_points<T: Float>(degree: usize, grid_len: usize) -> Vec<usize> {
    let count = degree + 2;
    debug_assert!(count <= grid_len);

    let half = T::from(0.5).unwrap();
    let span = T::from(grid_len - 1).unwrap();
    let denom = T::from(degree + 1).unwrap();
    let pi = T::from(core::f64::consts::PI).unwrap();

    let mut points: Vec<usize> = (0..count)
        .map(|i| {
            let theta = pi * T::from(i).unwrap() / denom;
            let node = half * span * (T::one() - theta.cos());
            round_half_to_even(node).to_usize().unwrap()
        })
        .collect();

    for i in 1..count {
        if points[i] <= points[i - 1] {
            points[i] = points[i - 1] + 1;
        }
    }
    if points[count - 1] > grid_len - 1 {
        points[count - 1] = grid_len - 1;
        for i in (0..count - 1).rev() {
            if points[i] >= points[i + 1] {
                points[i] = points[i + 1] - 1;
            }
        }
    }

    points
}

/// Round to the nearest integer, ties to the even neighbor.
fn round_half_to_even<T: Float>(value: T) -> T {
    let floor = value.floor();
    let diff = value - floor;
    let half = T::from(0.5).unwrap();
    if diff > half {
        floor + T::one()
    } else if diff < half {
        floor
    } else {
        let two = T::from(2.0).unwrap();
        if (floor / two).fract() == T::zero() {
            floor
        } else {
            floor + T::one()
        }
    }
}

// ============================================================================
// Iteration Steps
// ============================================================================

/// Scan the residual profile, honoring the parallel switch.
fn scan_profile<T>(
    grid: &Grid<T>,
    f_grid: &[T],
    coefficients: &[T],
    iteration: usize,
    config: &RemezConfig<T>,
) -> Result<ResidualProfile<T>, RemezError>
where
    T: Float + Send + Sync,
{
    if config.parallel {
        #[cfg(feature = "parallel")]
        return crate::engine::parallel::scan_parallel(grid, f_grid, coefficients, iteration);
    }
    ResidualProfile::scan(grid, f_grid, coefficients, iteration)
}

/// Propose the next test-point set via the configured exchange rule.
fn propose_next<T>(
    trial: &[usize],
    profile: &ResidualProfile<T>,
    level_error: T,
    config: &RemezConfig<T>,
) -> Result<Vec<usize>, RemezError>
where
    T: Float + Send + Sync,
{
    // A zero level error gives the brackets no sign to follow.
    if level_error == T::zero() {
        return exchange::single_point(trial, profile);
    }

    match config.exchange_method {
        ExchangeMethod::SinglePoint => exchange::single_point(trial, profile),
        ExchangeMethod::MultiPoint => {
            if config.parallel {
                #[cfg(feature = "parallel")]
                return crate::engine::parallel::multi_point_parallel(trial, profile);
            }
            exchange::multi_point(trial, profile)
        }
    }
}

/// Check the equioscillation invariant at the test points.
///
/// The solve makes the residual equal `(-1)^i e` at test point `i` exactly,
/// so a sign that disagrees beyond roundoff slack is an internal defect and
/// halts the run.
fn verify_alternation<T: Float>(
    trial: &[usize],
    profile: &ResidualProfile<T>,
    level_error: T,
    f_scale: T,
    iteration: usize,
) -> Result<(), RemezError> {
    let magnitude = level_error.abs();

    // Below solver noise the recomputed residual signs carry no information.
    let noise = T::epsilon() * (T::one() + f_scale) * T::from(64.0).unwrap();
    if magnitude <= noise {
        return Ok(());
    }

    let slack = magnitude * T::epsilon().sqrt();
    for (i, &index) in trial.iter().enumerate() {
        let expected = if i % 2 == 0 {
            level_error
        } else {
            -level_error
        };
        let actual = profile.value(index);
        if !same_sign(actual, expected) && actual.abs() > slack {
            return Err(RemezError::NonAlternatingResidual {
                position: index,
                iteration,
            });
        }
    }
    Ok(())
}
