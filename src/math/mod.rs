//! Layer 2: Math
//!
//! Pure mathematical functions.
//!
//! This layer provides the numerical building blocks of the exchange
//! iteration: polynomial evaluation and the dense alternation solve. These
//! functions carry no iteration state and no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine (executor, parallel, validator, output)
//!   ↓
//! Layer 3: Algorithms (residual, exchange, convergence)
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives (errors, grid)
//! ```

/// Polynomial evaluation.
///
/// Provides:
/// - Nested-multiplication (Horner) evaluation
/// - A finiteness-checked entry point
pub mod polynomial;

/// Dense alternation solve.
///
/// Provides:
/// - Assembly of the alternation linear system
/// - Gaussian elimination with partial pivoting
/// - The `PolynomialState` produced by each solve
pub mod solver;
