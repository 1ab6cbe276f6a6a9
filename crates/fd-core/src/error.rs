use thiserror::Error;

pub type FdResult<T> = Result<T, FdError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Division by zero: {what}")]
    DivisionByZero { what: &'static str },

    #[error("Series length mismatch: {what} (times={times}, values={values})")]
    LengthMismatch {
        what: &'static str,
        times: usize,
        values: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
