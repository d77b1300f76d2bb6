//! Layer 3: Algorithms
//!
//! Core exchange-iteration algorithms.
//!
//! This layer implements the decision logic of the Remez iteration: residual
//! scanning, the two exchange rules, and the convergence test. It contains
//! the "business logic" of the crate but is orchestrated by the engine layer.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine (executor, parallel, validator, output)
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math (polynomial, solver)
//!   ↓
//! Layer 1: Primitives (errors, grid)
//! ```

/// Residual profile over the grid.
///
/// Provides:
/// - Full-grid residual computation
/// - Global peak and local extrema location
/// - The shared sign convention
pub mod residual;

/// Test-point exchange rules.
///
/// Provides:
/// - The single-point (first algorithm) exchange rule
/// - The multi-point (second algorithm) exchange rule
/// - Bracket searches shared with the parallel path
pub mod exchange;

/// Convergence tracking.
///
/// Provides:
/// - Ratio-based level-error convergence test
/// - Iteration history records
/// - Iteration cap enforcement
pub mod convergence;
