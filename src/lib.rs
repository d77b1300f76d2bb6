//! Discrete Remez exchange engine for minimax polynomial approximation.
//!
//! This crate computes the polynomial of a given degree that minimizes the
//! maximum absolute deviation from a target function over a finite, equally
//! spaced grid of sample points. Two variants of the Remez exchange
//! iteration are provided: a single-point exchange that moves one test
//! point per iteration, and a multi-point exchange that moves all of them
//! at once.
//!
//! # Quick start
//!
//! ```
//! use remez::prelude::*;
//!
//! // Degree-10 minimax approximation of |x| on [-1, 1].
//! let result = Remez::<f64>::new()
//!     .degree(10)
//!     .grid_points(999)
//!     .build()
//!     .unwrap()
//!     .approximate(-1.0, 1.0, |x: f64| x.abs())
//!     .unwrap();
//!
//! println!("{}", result);
//! assert!(result.max_residual < 0.03);
//! ```
//!
//! # Architecture
//!
//! The crate is organized in layers, each depending only on the layers
//! below it:
//!
//! ```text
//! Layer 5: API        (api)
//! Layer 4: Engine     (engine: executor, parallel, validator, output)
//! Layer 3: Algorithms (algorithms: residual, exchange, convergence)
//! Layer 2: Math       (math: polynomial, solver)
//! Layer 1: Primitives (primitives: errors, grid)
//! ```
//!
//! With the `parallel` feature (enabled by default), the full-grid residual
//! scan and the multi-point bracket searches run on rayon; results are
//! identical to the sequential paths.

pub mod algorithms;
pub mod api;
pub mod engine;
pub mod math;
pub mod primitives;

/// Commonly used types, re-exported for glob import.
pub mod prelude {
    pub use crate::api::{
        ExchangeMethod, IterationRecord, Remez, RemezBuilder, RemezError, RemezResult, Result,
        DEFAULT_CONVERGENCE_THRESHOLD,
    };
    pub use crate::primitives::grid::Grid;
}

pub use api::{ExchangeMethod, Remez, RemezBuilder, RemezError, RemezResult, Result};
