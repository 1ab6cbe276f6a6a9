//! Inverse segment solver: liquid height from cross-section area.
//!
//! The segment area `(r²/2)(θ − sin θ)` has no closed-form inverse. Target
//! areas are rounded to a user-chosen number of digits and matched against a
//! sampled, equally rounded angle table whose resolution grows until every
//! target matches or the table-size cap is reached.

pub mod bisection;
pub mod config;
pub mod error;
pub mod solve;
pub mod table;
pub mod target;

pub use config::{SolverConfig, SolverStrategy};
pub use error::{SolverError, SolverResult};
pub use solve::{AngleAreaSolver, AngleSolution, HeightSolution, solve_angles};
pub use table::AngleTable;
pub use target::{TargetAreas, target_areas};
