//! Liquid column length while foam is pushed out of the barrel.

use crate::error::{KineticsError, KineticsResult};
use crate::model::TransientModel;
use crate::sim::run_on_grid;
use fd_core::{TimeSeries, ensure_finite, ensure_positive_divisor};
use tracing::debug;

/// Column shortening at a constant volumetric flow.
///
/// The length is not floored at zero: once the barrel is empty it keeps
/// going negative and those samples are discarded downstream.
#[derive(Clone, Debug)]
pub struct ColumnLengthModel {
    initial_length_mm: f64,
    /// Rate of change of length in mm/s (non-positive)
    dl_dt: f64,
}

impl ColumnLengthModel {
    pub fn new(
        flow_rate_ml_per_s: f64,
        cross_section_area_mm2: f64,
        initial_length_mm: f64,
    ) -> KineticsResult<Self> {
        let area = ensure_positive_divisor(cross_section_area_mm2, "cross-section area")?;
        let q = ensure_finite(flow_rate_ml_per_s, "flow rate")?;
        if q < 0.0 {
            return Err(KineticsError::InvalidArg {
                what: "flow rate must be non-negative",
            });
        }
        let initial_length_mm = ensure_finite(initial_length_mm, "initial column length")?;
        Ok(Self {
            initial_length_mm,
            dl_dt: (-q * 1000.0) / area,
        })
    }

    /// Model for a barrel whose full nominal volume defines `L0`.
    pub fn for_syringe(
        flow_rate_ml_per_s: f64,
        cross_section_area_mm2: f64,
        syringe_volume_ml: f64,
    ) -> KineticsResult<Self> {
        let area = ensure_positive_divisor(cross_section_area_mm2, "cross-section area")?;
        Self::new(flow_rate_ml_per_s, area, syringe_volume_ml * 1000.0 / area)
    }

    pub fn initial_length_mm(&self) -> f64 {
        self.initial_length_mm
    }

    pub fn dl_dt(&self) -> f64 {
        self.dl_dt
    }
}

impl TransientModel for ColumnLengthModel {
    type State = f64;

    fn initial_state(&self) -> f64 {
        self.initial_length_mm
    }

    fn rhs(&self, _t: f64, _x: &f64) -> KineticsResult<f64> {
        Ok(self.dl_dt)
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn scale(&self, a: &f64, scale: f64) -> f64 {
        a * scale
    }
}

/// Column length (mm) at every point of `grid`; sample 0 is `L0`.
pub fn column_length_series(grid: &[f64], model: &ColumnLengthModel) -> KineticsResult<TimeSeries> {
    let record = run_on_grid(model, grid)?;
    debug!(
        points = record.x.len(),
        l0_mm = model.initial_length_mm,
        l_end_mm = record.x.last().copied().unwrap_or(model.initial_length_mm),
        "column length series"
    );
    Ok(TimeSeries::new(record.t, record.x)?)
}
