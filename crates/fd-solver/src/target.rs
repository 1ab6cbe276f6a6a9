//! Target cross-section areas from drained volume and column length.

use crate::error::{SolverError, SolverResult};
use fd_core::TimeSeries;

/// Liquid cross-section areas that correspond to a physical segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetAreas {
    /// Areas in mm², in grid order
    pub areas: Vec<f64>,
    /// Grid points discarded because their area fell outside `(0, bore)`
    pub dropped: usize,
}

impl TargetAreas {
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// `volume·1000 / length` per grid point, keeping only `0 < area < bore`.
///
/// Points where the column has emptied (length ≤ 0) or where the liquid
/// would overfill the bore are dropped, so the result can be shorter than
/// the inputs.
pub fn target_areas(
    volumes_ml: &TimeSeries,
    lengths_mm: &TimeSeries,
    cross_section_area_mm2: f64,
) -> SolverResult<TargetAreas> {
    if volumes_ml.len() != lengths_mm.len() {
        return Err(SolverError::LengthMismatch {
            volumes: volumes_ml.len(),
            lengths: lengths_mm.len(),
        });
    }

    let mut targets = TargetAreas::default();
    for (&v, &l) in volumes_ml.values().iter().zip(lengths_mm.values()) {
        let area = v * 1000.0 / l;
        if area > 0.0 && area < cross_section_area_mm2 {
            targets.areas.push(area);
        } else {
            targets.dropped += 1;
        }
    }
    Ok(targets)
}
