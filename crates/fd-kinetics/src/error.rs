//! Error types for kinetics operations.

use fd_core::FdError;
use thiserror::Error;

/// Errors encountered while stepping a kinetics model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KineticsError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Division by zero: {what}")]
    DivisionByZero { what: &'static str },

    #[error("Invalid time grid: {what}")]
    InvalidGrid { what: &'static str },

    #[error("Numeric error: {0}")]
    Core(FdError),
}

pub type KineticsResult<T> = Result<T, KineticsError>;

impl From<FdError> for KineticsError {
    fn from(e: FdError) -> Self {
        match e {
            FdError::DivisionByZero { what } => KineticsError::DivisionByZero { what },
            FdError::InvalidArg { what } | FdError::Invariant { what } => {
                KineticsError::InvalidGrid { what }
            }
            other => KineticsError::Core(other),
        }
    }
}
