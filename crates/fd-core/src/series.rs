//! Immutable time series and uniform time grids.

use crate::error::{FdError, FdResult};
use crate::numeric::{Real, ensure_finite};

/// A sampled quantity over time.
///
/// `times` start at 0 and ascend; `values` has the same length. The series
/// cannot be changed once built.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSeries {
    times: Vec<Real>,
    values: Vec<Real>,
}

impl TimeSeries {
    pub fn new(times: Vec<Real>, values: Vec<Real>) -> FdResult<Self> {
        if times.len() != values.len() {
            return Err(FdError::LengthMismatch {
                what: "time series",
                times: times.len(),
                values: values.len(),
            });
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FdError::Invariant {
                what: "time series times must be strictly increasing",
            });
        }
        Ok(Self { times, values })
    }

    /// Pair `values` with the leading entries of `grid`.
    ///
    /// Used when a filter upstream dropped samples: the values keep their
    /// order and take the first `values.len()` grid times.
    pub fn aligned(grid: &[Real], values: Vec<Real>) -> FdResult<Self> {
        if values.len() > grid.len() {
            return Err(FdError::LengthMismatch {
                what: "aligned series longer than grid",
                times: grid.len(),
                values: values.len(),
            });
        }
        Self::new(grid[..values.len()].to_vec(), values)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Largest value, or `None` for an empty series.
    pub fn max_value(&self) -> Option<Real> {
        self.values.iter().copied().reduce(Real::max)
    }

    /// Last sample time, or `None` for an empty series.
    pub fn end_time(&self) -> Option<Real> {
        self.times.last().copied()
    }
}

/// Largest grid `time_grid` will allocate (about 11 h at 50 Hz).
pub const MAX_GRID_LEN: usize = 2_000_001;

/// Number of points in the nominal grid for `duration_s` at `frequency_hz`.
///
/// Whole seconds of injection times the sample frequency, plus the starting
/// point. Sub-second durations still get one interval. Grids longer than
/// [`MAX_GRID_LEN`] are rejected.
pub fn nominal_grid_len(duration_s: Real, frequency_hz: u32) -> FdResult<usize> {
    let too_long = FdError::InvalidArg {
        what: "time grid exceeds the maximum number of samples",
    };
    let seconds = duration_s.floor();
    if !(seconds < MAX_GRID_LEN as Real) {
        return Err(too_long);
    }
    let n = (seconds as usize)
        .checked_mul(frequency_hz as usize)
        .map(|intervals| intervals.max(1) + 1)
        .ok_or(too_long.clone())?;
    if n > MAX_GRID_LEN {
        return Err(too_long);
    }
    Ok(n)
}

/// Uniform grid `linspace(0, duration_s, nominal_grid_len)`.
pub fn time_grid(duration_s: Real, frequency_hz: u32) -> FdResult<Vec<Real>> {
    let duration_s = ensure_finite(duration_s, "grid duration")?;
    if duration_s <= 0.0 {
        return Err(FdError::InvalidArg {
            what: "grid duration must be positive",
        });
    }
    if frequency_hz == 0 {
        return Err(FdError::DivisionByZero {
            what: "sample frequency",
        });
    }

    let n = nominal_grid_len(duration_s, frequency_hz)?;
    let delta = duration_s / (n - 1) as Real;
    let mut grid: Vec<Real> = (0..n).map(|i| i as Real * delta).collect();
    // Ensure exact endpoint
    grid[n - 1] = duration_s;
    Ok(grid)
}

/// Step of a uniform grid, taken from its first interval.
pub fn grid_step(grid: &[Real]) -> FdResult<Real> {
    if grid.len() < 2 {
        return Err(FdError::InvalidArg {
            what: "time grid needs at least two points",
        });
    }
    let dt = grid[1] - grid[0];
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(FdError::Invariant {
            what: "time grid must be strictly increasing",
        });
    }
    Ok(dt)
}
