//! Rounded angle/area lookup table.

use fd_core::round_ticks;
use fd_syringe::model_area;
use std::f64::consts::TAU;

/// `size` equally spaced angles over `[0, 2π]` with their segment areas
/// rounded to `digits` decimals (stored as integer ticks).
///
/// The area is non-decreasing in the angle, so the tick column is sorted and
/// the first index holding a tick is found by binary search.
#[derive(Clone, Debug)]
pub struct AngleTable {
    step: f64,
    ticks: Vec<i64>,
}

impl AngleTable {
    pub fn build(size: usize, radius: f64, digits: u32) -> Self {
        let size = size.max(2);
        let step = TAU / (size - 1) as f64;
        let ticks = (0..size)
            .map(|i| round_ticks(model_area(Self::angle(step, size, i), radius), digits))
            .collect();
        Self { step, ticks }
    }

    fn angle(step: f64, size: usize, i: usize) -> f64 {
        // Ensure exact endpoint
        if i + 1 == size { TAU } else { i as f64 * step }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn angle_at(&self, index: usize) -> f64 {
        Self::angle(self.step, self.ticks.len(), index)
    }

    /// Smallest index whose rounded area equals `tick`.
    pub fn first_match(&self, tick: i64) -> Option<usize> {
        let index = self.ticks.partition_point(|&t| t < tick);
        (self.ticks.get(index) == Some(&tick)).then_some(index)
    }
}
