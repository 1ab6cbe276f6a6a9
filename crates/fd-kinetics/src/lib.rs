//! Time-stepped kinetics of foam drainage inside a syringe.
//!
//! Provides:
//! - `TransientModel` trait and forward Euler integrator
//! - Fixed-grid runner recording the state at every grid point
//! - Drainage kinetics: cumulative drained liquid volume over time
//! - Column length model: liquid column shortening as foam is expelled

pub mod column;
pub mod drainage;
pub mod error;
pub mod integrator;
pub mod model;
pub mod sim;

pub use column::{ColumnLengthModel, column_length_series};
pub use drainage::{DrainageModel, DrainageState, KineticsMode, drained_volume_series};
pub use error::{KineticsError, KineticsResult};
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use sim::{SimRecord, run_on_grid};
