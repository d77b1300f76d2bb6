//! Layer 4: Engine
//!
//! Core execution logic for the Remez iteration.
//!
//! This layer orchestrates one approximation run by coordinating the math
//! layer (alternation solve) and the algorithms layer (residual scan,
//! exchange, convergence). It owns the iteration state machine and the
//! packaging of results.
//!
//! # Module Organization
//!
//! - **executor**: the iteration loop, from initial test points to a report
//! - **parallel**: rayon-backed scan and bracket searches (feature-gated)
//! - **validator**: configuration validation rules
//! - **output**: the `RemezResult` returned to callers
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms (residual, exchange, convergence)
//!   ↓
//! Layer 2: Math (polynomial, solver)
//!   ↓
//! Layer 1: Primitives (errors, grid)
//! ```

/// The iteration loop.
///
/// Provides:
/// - Target sampling and initial test-point placement
/// - The solve / scan / assess / exchange cycle
/// - Alternation invariant enforcement
pub mod executor;

/// Rayon-backed execution paths.
///
/// Provides:
/// - Parallel full-grid residual scan
/// - Two-phase parallel multi-point bracket search
#[cfg(feature = "parallel")]
pub mod parallel;

/// Validation utilities.
///
/// Provides:
/// - Configuration bound checks shared by the builder
/// - Duplicate-parameter detection
pub mod validator;

/// Output types.
///
/// Provides:
/// - The `RemezResult` container struct
/// - Human-readable report formatting
pub mod output;
