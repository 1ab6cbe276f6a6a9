//! Error types for syringe and foam descriptions.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyringeError {
    #[error("Unknown syringe size: {volume_ml} mL (expected 3, 5, 10 or 20)")]
    UnknownSize { volume_ml: f64 },

    #[error("Invalid gas ratio 1:{ratio}")]
    InvalidGasRatio { ratio: u32 },

    #[error("Unknown foam type: {name}")]
    UnknownFoamType { name: String },

    #[error(transparent)]
    Core(#[from] fd_core::FdError),
}

pub type SyringeResult<T> = Result<T, SyringeError>;
