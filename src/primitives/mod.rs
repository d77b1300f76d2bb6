//! Layer 1: Primitives
//!
//! Core building blocks and types.
//!
//! This layer provides the primitive data structures and shared types used
//! throughout the crate. It has zero internal dependencies within the crate.
//!
//! # Module Organization
//!
//! - **errors**: Shared error types (RemezError)
//! - **grid**: The immutable sample grid
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
//! Layer 2: Math (polynomial, solver)
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
///
/// Provides:
/// - Unified `RemezError` enum
/// - Specific error variants with diagnostic context
pub mod errors;

/// Sample grid construction and access.
///
/// Provides:
/// - Equally spaced abscissa generation
/// - Read-only indexed access
pub mod grid;
