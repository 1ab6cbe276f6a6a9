//! Syringe and foam descriptions plus circular-segment geometry.
//!
//! Provides:
//! - Syringe catalog (3/5/10/20 mL bores) and cross-section area
//! - Foam catalog (Tessari, DSS) with half time and liquid fraction
//! - Segment model: area from central angle, liquid height from angle

pub mod error;
pub mod foam;
pub mod segment;
pub mod syringe;

pub use error::{SyringeError, SyringeResult};
pub use foam::{FoamSpec, FoamType};
pub use segment::{calculate_height, model_area};
pub use syringe::{SyringeSize, SyringeSpec};
