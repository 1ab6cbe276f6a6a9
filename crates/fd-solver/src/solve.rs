//! Bounded adaptive inversion of target areas into central angles.

use crate::bisection::smallest_angle_for_tick;
use crate::config::{SolverConfig, SolverStrategy};
use crate::error::{SolverError, SolverResult};
use crate::table::AngleTable;
use crate::target::{TargetAreas, target_areas};
use fd_core::timing::Deadline;
use fd_core::{TimeSeries, round_ticks};
use fd_syringe::{SyringeSpec, calculate_height};
use tracing::{debug, info, warn};

/// Central angles recovered for a target series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AngleSolution {
    /// One angle (rad) per target area, same order
    pub angles: Vec<f64>,
    /// Table size that matched every target (0 for bisection or no targets)
    pub table_size: usize,
    /// Number of tables built
    pub attempts: usize,
}

/// Liquid heights recovered for a pair of volume/length series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeightSolution {
    /// Heights in mm, clamped to the bore radius
    pub heights: Vec<f64>,
    pub table_size: usize,
    pub attempts: usize,
    /// Grid points dropped before solving
    pub dropped: usize,
}

/// Recover the central angle of every target area.
///
/// Targets and table entries are compared after rounding to
/// `config.accuracy_digits`. With the brute-force strategy a table is built
/// for each size of the schedule until every target has a match; running
/// off the end of the schedule, or past the time budget, is an error.
pub fn solve_angles(
    targets: &[f64],
    radius_mm: f64,
    config: &SolverConfig,
) -> SolverResult<AngleSolution> {
    config.validate()?;
    if targets.is_empty() {
        return Ok(AngleSolution::default());
    }

    let digits = config.accuracy_digits;
    let ticks: Vec<i64> = targets.iter().map(|&a| round_ticks(a, digits)).collect();

    match config.strategy {
        SolverStrategy::BruteForce => brute_force(&ticks, radius_mm, config),
        SolverStrategy::Bisection => bisection(&ticks, radius_mm, digits),
    }
}

fn brute_force(ticks: &[i64], radius_mm: f64, config: &SolverConfig) -> SolverResult<AngleSolution> {
    let deadline = Deadline::after(config.time_budget);
    let mut attempts = 0;
    let mut last = (config.initial_table_size, ticks.len());

    for size in config.table_sizes() {
        if deadline.expired() {
            let budget_s = deadline.budget().map_or(0.0, |b| b.as_secs_f64());
            warn!(table_size = size, budget_s, "solver budget exhausted");
            return Err(SolverError::BudgetExhausted {
                table_size: size,
                budget_s,
            });
        }

        attempts += 1;
        let table = AngleTable::build(size, radius_mm, config.accuracy_digits);
        let matches: Vec<Option<usize>> = ticks.iter().map(|&t| table.first_match(t)).collect();
        let unmatched = matches.iter().filter(|m| m.is_none()).count();

        if unmatched == 0 {
            let angles = matches
                .into_iter()
                .flatten()
                .map(|i| table.angle_at(i))
                .collect();
            info!(table_size = size, attempts, "solution found");
            return Ok(AngleSolution {
                angles,
                table_size: size,
                attempts,
            });
        }

        debug!(table_size = size, unmatched, "table attempt failed");
        last = (size, unmatched);
    }

    warn!(
        table_size = last.0,
        unmatched = last.1,
        "solver did not converge"
    );
    Err(SolverError::NotConverged {
        table_size: last.0,
        unmatched: last.1,
        targets: ticks.len(),
    })
}

fn bisection(ticks: &[i64], radius_mm: f64, digits: u32) -> SolverResult<AngleSolution> {
    let found: Vec<Option<f64>> = ticks
        .iter()
        .map(|&t| smallest_angle_for_tick(t, radius_mm, digits))
        .collect();
    let unmatched = found.iter().filter(|a| a.is_none()).count();
    if unmatched > 0 {
        warn!(unmatched, "bisection could not match every target");
        return Err(SolverError::NotConverged {
            table_size: 0,
            unmatched,
            targets: ticks.len(),
        });
    }
    Ok(AngleSolution {
        angles: found.into_iter().flatten().collect(),
        table_size: 0,
        attempts: 0,
    })
}

/// Area-to-height solver bound to one syringe bore.
#[derive(Clone, Debug)]
pub struct AngleAreaSolver {
    diameter_mm: f64,
    cross_section_area_mm2: f64,
    config: SolverConfig,
}

impl AngleAreaSolver {
    pub fn new(syringe: &SyringeSpec, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self {
            diameter_mm: syringe.diameter_mm(),
            cross_section_area_mm2: syringe.cross_section_area_mm2(),
            config,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn radius_mm(&self) -> f64 {
        self.diameter_mm / 2.0
    }

    pub fn target_areas(
        &self,
        volumes_ml: &TimeSeries,
        lengths_mm: &TimeSeries,
    ) -> SolverResult<TargetAreas> {
        target_areas(volumes_ml, lengths_mm, self.cross_section_area_mm2)
    }

    pub fn solve(&self, targets: &[f64]) -> SolverResult<AngleSolution> {
        solve_angles(targets, self.radius_mm(), &self.config)
    }

    /// Angle to clamped liquid height for this bore.
    pub fn height(&self, theta: f64) -> f64 {
        calculate_height(self.diameter_mm, theta)
    }

    /// Filter, invert and convert drained volume / column length to heights.
    pub fn heights(
        &self,
        volumes_ml: &TimeSeries,
        lengths_mm: &TimeSeries,
    ) -> SolverResult<HeightSolution> {
        let targets = self.target_areas(volumes_ml, lengths_mm)?;
        if targets.is_empty() {
            debug!(dropped = targets.dropped, "no physical target areas");
        }
        let solution = self.solve(&targets.areas)?;
        Ok(HeightSolution {
            heights: solution.angles.iter().map(|&a| self.height(a)).collect(),
            table_size: solution.table_size,
            attempts: solution.attempts,
            dropped: targets.dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fd_syringe::{SyringeSize, model_area};
    use std::f64::consts::PI;

    #[test]
    fn empty_targets_are_a_valid_empty_solution() {
        let solution = solve_angles(&[], 7.98, &SolverConfig::default()).unwrap();
        assert!(solution.angles.is_empty());
        assert_eq!(solution.attempts, 0);
    }

    #[test]
    fn brute_force_matches_rounded_area() {
        let r = 7.98;
        let targets: Vec<f64> = [0.3, 1.0, 2.0, PI].iter().map(|&t| model_area(t, r)).collect();
        let solution = solve_angles(&targets, r, &SolverConfig::default()).unwrap();
        assert_eq!(solution.angles.len(), targets.len());
        assert!(solution.table_size >= 10_000);
        for (theta, area) in solution.angles.iter().zip(&targets) {
            assert_eq!(round_ticks(model_area(*theta, r), 2), round_ticks(*area, 2));
        }
    }

    #[test]
    fn angles_are_non_decreasing_for_sorted_targets() {
        let r = 7.98;
        let targets: Vec<f64> = (1..200).map(|i| i as f64 * 0.05).collect();
        let solution = solve_angles(&targets, r, &SolverConfig::default()).unwrap();
        for w in solution.angles.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn cap_reached_is_not_converged() {
        // Three digits near half fill need far more than 20k samples.
        let config = SolverConfig {
            accuracy_digits: 3,
            initial_table_size: 10_000,
            table_size_step: 5_000,
            max_table_size: 20_000,
            ..SolverConfig::default()
        };
        let r = 7.98;
        let targets: Vec<f64> = (0..500).map(|i| 90.0 + i as f64 * 0.001).collect();
        let err = solve_angles(&targets, r, &config).unwrap_err();
        match err {
            SolverError::NotConverged {
                table_size,
                unmatched,
                targets: n,
            } => {
                assert_eq!(table_size, 20_000);
                assert!(unmatched > 0);
                assert_eq!(n, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_budget_stops_before_first_table() {
        let config = SolverConfig {
            time_budget: Some(std::time::Duration::ZERO),
            ..SolverConfig::default()
        };
        let err = solve_angles(&[1.0], 7.98, &config).unwrap_err();
        assert!(matches!(err, SolverError::BudgetExhausted { .. }));
    }

    #[test]
    fn bisection_agrees_with_brute_force_after_rounding() {
        let r = 7.98;
        let targets = [0.5, 3.0, 12.0, 60.0, 150.0];
        let brute = solve_angles(&targets, r, &SolverConfig::default()).unwrap();
        let config = SolverConfig {
            strategy: SolverStrategy::Bisection,
            ..SolverConfig::default()
        };
        let bisect = solve_angles(&targets, r, &config).unwrap();
        for (a, b) in brute.angles.iter().zip(&bisect.angles) {
            assert_eq!(
                round_ticks(model_area(*a, r), 2),
                round_ticks(model_area(*b, r), 2)
            );
        }
    }

    #[test]
    fn solver_heights_stay_within_radius() {
        let syringe = SyringeSpec::new(SyringeSize::Ml10);
        let solver = AngleAreaSolver::new(&syringe, SolverConfig::default()).unwrap();
        let r = solver.radius_mm();
        let near_full = model_area(1.9 * PI, r);
        let solution = solver.solve(&[near_full]).unwrap();
        assert_eq!(solver.height(solution.angles[0]), syringe.diameter_mm() / 2.0);
    }
}
