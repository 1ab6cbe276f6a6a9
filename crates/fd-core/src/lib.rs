//! fd-core: stable foundation for foamdrain.
//!
//! Contains:
//! - units (uom SI types + flow-rate conversion)
//! - numeric (Real + tolerances + rounding to accuracy digits)
//! - series (immutable time series + uniform time grids)
//! - timing (wall-clock timer for solver passes)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod series;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FdError, FdResult};
pub use numeric::*;
pub use series::{TimeSeries, time_grid};
pub use timing::{Deadline, Timer};
pub use units::*;
