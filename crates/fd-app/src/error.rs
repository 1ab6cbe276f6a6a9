//! Error types for the fd-app service layer.

use std::path::PathBuf;

use fd_core::FdError;
use fd_kinetics::KineticsError;
use fd_solver::SolverError;

/// Run-level failure: the run could not be set up or its output could not
/// be produced. Failures inside a single pair are [`PairError`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read run file: {path}")]
    RunFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write run file: {path}")]
    RunFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Run file validation failed: {0}")]
    Validation(String),

    #[error("Syringe or foam setup failed: {0}")]
    Setup(String),

    #[error("Solver configuration error: {0}")]
    Solver(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fd-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<fd_project::ProjectError> for AppError {
    fn from(err: fd_project::ProjectError) -> Self {
        match err {
            fd_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<fd_project::ValidationError> for AppError {
    fn from(err: fd_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<fd_syringe::SyringeError> for AppError {
    fn from(err: fd_syringe::SyringeError) -> Self {
        AppError::Setup(err.to_string())
    }
}

impl From<SolverError> for AppError {
    fn from(err: SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Failure of one flow rate / foam volume pair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PairError {
    #[error("kinetics: {0}")]
    Kinetics(#[from] KineticsError),

    #[error("solver: {0}")]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Core(#[from] FdError),
}

impl PairError {
    /// True when the solver ran out of table sizes or time.
    pub fn is_solver_exhaustion(&self) -> bool {
        matches!(
            self,
            PairError::Solver(SolverError::NotConverged { .. })
                | PairError::Solver(SolverError::BudgetExhausted { .. })
        )
    }
}
