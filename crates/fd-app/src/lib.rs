//! Shared application service layer for foamdrain.
//!
//! Turns validated run files into simulation setups, drives every
//! flow rate / foam volume pair through the drainage pipeline and offers
//! query helpers for rendering the outcomes.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;
pub mod runtime_compile;

pub use error::{AppError, AppResult, PairError};
pub use progress::{PairProgress, RunProgressEvent, RunStage};
pub use project_service::{load_run_file, save_run_file, validate_run_file};
pub use query::{FlowRateGroup, OutcomeRecord, RunSummary, get_run_summary, group_by_flow_rate};
pub use run_service::{
    DriverOptions, PairOutcome, SimulationResult, simulate_injection,
    simulate_injection_with_progress, simulate_pair,
};
pub use runtime_compile::{RunParameters, SimulationSetup, compile_run};
