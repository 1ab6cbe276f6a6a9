//! Error types for solver operations.

use fd_core::FdError;
use thiserror::Error;

/// Errors that can occur while inverting areas into angles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error(
        "Solver did not converge: {unmatched} of {targets} target areas unmatched at table size {table_size}"
    )]
    NotConverged {
        table_size: usize,
        unmatched: usize,
        targets: usize,
    },

    #[error("Solver budget of {budget_s:.3} s exhausted at table size {table_size}")]
    BudgetExhausted { table_size: usize, budget_s: f64 },

    #[error("Series length mismatch: {volumes} volumes vs {lengths} lengths")]
    LengthMismatch { volumes: usize, lengths: usize },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Numeric error: {0}")]
    Core(#[from] FdError),
}

pub type SolverResult<T> = Result<T, SolverError>;
