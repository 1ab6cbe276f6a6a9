//! Solver configuration.

use crate::error::{SolverError, SolverResult};
use fd_core::MAX_ACCURACY_DIGITS;
use std::time::Duration;

/// How target areas are turned into angles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolverStrategy {
    /// Match against a rounded, linearly sampled area table that is rebuilt
    /// with more samples until every target matches.
    #[default]
    BruteForce,
    /// Bisect the unrounded area function per target, then check the angle
    /// rounds back to the target.
    Bisection,
}

/// Solver configuration.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Decimal places areas are rounded to before matching
    pub accuracy_digits: u32,
    /// Table size of the first attempt
    pub initial_table_size: usize,
    /// Table growth after a failed attempt
    pub table_size_step: usize,
    /// Largest table tried before giving up
    pub max_table_size: usize,
    pub strategy: SolverStrategy,
    /// Wall-clock limit across all attempts for one solve
    pub time_budget: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            accuracy_digits: 2,
            initial_table_size: 10_000,
            table_size_step: 5_000,
            max_table_size: 500_000,
            strategy: SolverStrategy::default(),
            time_budget: None,
        }
    }
}

impl SolverConfig {
    pub fn with_accuracy(accuracy_digits: u32) -> Self {
        Self {
            accuracy_digits,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.accuracy_digits > MAX_ACCURACY_DIGITS {
            return Err(SolverError::InvalidConfig {
                what: "accuracy_digits must be at most 5",
            });
        }
        if self.initial_table_size < 2 {
            return Err(SolverError::InvalidConfig {
                what: "initial_table_size must be at least 2",
            });
        }
        if self.table_size_step == 0 {
            return Err(SolverError::InvalidConfig {
                what: "table_size_step must be positive",
            });
        }
        if self.max_table_size < self.initial_table_size {
            return Err(SolverError::InvalidConfig {
                what: "max_table_size must not be below initial_table_size",
            });
        }
        Ok(())
    }

    /// Table sizes tried in order: initial, initial + step, ... up to the cap.
    pub fn table_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        (self.initial_table_size..=self.max_table_size).step_by(self.table_size_step.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule() {
        let config = SolverConfig::default();
        config.validate().unwrap();
        let sizes: Vec<usize> = config.table_sizes().collect();
        assert_eq!(sizes.first(), Some(&10_000));
        assert_eq!(sizes[1], 15_000);
        assert_eq!(sizes.last(), Some(&500_000));
        assert_eq!(sizes.len(), 99);
    }

    #[test]
    fn invalid_configs() {
        assert!(SolverConfig::with_accuracy(6).validate().is_err());
        let config = SolverConfig {
            table_size_step: 0,
            ..SolverConfig::default()
        };
        assert!(config.validate().is_err());
        let config = SolverConfig {
            max_table_size: 100,
            ..SolverConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
