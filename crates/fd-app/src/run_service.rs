//! Simulation driver: every flow rate × foam volume pair through the
//! column, drainage and area-to-height pipeline.

use std::time::Instant;

use fd_core::{TimeSeries, Timer, ensure_finite, ensure_positive_divisor, time_grid};
use fd_kinetics::{ColumnLengthModel, column_length_series, drained_volume_series};
use fd_solver::AngleAreaSolver;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::PairError;
use crate::progress::{PairProgress, RunProgressEvent, RunStage};
use crate::runtime_compile::SimulationSetup;

/// Options for driving a run.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Run pairs on the rayon pool
    pub parallel: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Liquid height curve for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub flow_rate_ml_per_s: f64,
    pub foam_volume_ml: f64,
    /// Liquid height (mm) against time (s)
    pub heights: TimeSeries,
    /// Table size the solver matched with (0 for bisection)
    pub table_size: usize,
    pub attempts: usize,
    /// Grid points removed as non-physical before solving
    pub dropped_samples: usize,
    /// Injection duration `foam_volume / flow_rate` (s)
    pub duration_s: f64,
    pub wall_time_s: f64,
}

/// Result or error of one pair, in driver output order.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome {
    pub flow_rate_ml_per_s: f64,
    pub foam_volume_ml: f64,
    pub result: Result<SimulationResult, PairError>,
}

impl PairOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn flow_rate_ml_per_min(&self) -> f64 {
        self.flow_rate_ml_per_s * 60.0
    }
}

/// Simulate a single pair.
pub fn simulate_pair(
    setup: &SimulationSetup,
    flow_rate_ml_per_s: f64,
    foam_volume_ml: f64,
) -> Result<SimulationResult, PairError> {
    let timer = Timer::start();
    let q = ensure_positive_divisor(flow_rate_ml_per_s, "flow rate")?;
    let duration_s = ensure_finite(foam_volume_ml, "foam volume")? / q;
    let grid = time_grid(duration_s, setup.params.sample_frequency_hz())?;

    let column = ColumnLengthModel::for_syringe(
        q,
        setup.syringe.cross_section_area_mm2(),
        setup.syringe.volume_ml(),
    )?;
    let lengths = column_length_series(&grid, &column)?;
    let volumes = drained_volume_series(
        &grid,
        setup.foam.liquid_content_ml(foam_volume_ml),
        setup.foam.half_time_s(),
        setup.kinetics,
    )?;

    let solver = AngleAreaSolver::new(&setup.syringe, setup.solver.clone())?;
    let solution = solver.heights(&volumes, &lengths)?;
    let heights = TimeSeries::aligned(&grid, solution.heights)?;

    let wall_time_s = timer.stop();
    info!(
        flow_rate_ml_per_s = q,
        foam_volume_ml,
        points = heights.len(),
        dropped = solution.dropped,
        table_size = solution.table_size,
        wall_time_s,
        "pair simulated"
    );
    Ok(SimulationResult {
        flow_rate_ml_per_s: q,
        foam_volume_ml,
        heights,
        table_size: solution.table_size,
        attempts: solution.attempts,
        dropped_samples: solution.dropped,
        duration_s,
        wall_time_s,
    })
}

fn run_pair(setup: &SimulationSetup, (q, v): (f64, f64)) -> PairOutcome {
    let result = simulate_pair(setup, q, v);
    if let Err(err) = &result {
        warn!(flow_rate_ml_per_s = q, foam_volume_ml = v, %err, "pair failed");
    }
    PairOutcome {
        flow_rate_ml_per_s: q,
        foam_volume_ml: v,
        result,
    }
}

/// Simulate every pair of `setup`, flow-major and volume-minor.
pub fn simulate_injection(setup: &SimulationSetup, options: &DriverOptions) -> Vec<PairOutcome> {
    simulate_injection_with_progress(setup, options, None)
}

/// Simulate every pair and report each finished pair to `progress_cb`.
///
/// Output order does not depend on `options.parallel`. In parallel mode the
/// per-pair events are emitted once the whole collection is done.
pub fn simulate_injection_with_progress(
    setup: &SimulationSetup,
    options: &DriverOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> Vec<PairOutcome> {
    let started = Instant::now();
    let pairs = setup.params.pairs();
    let total = pairs.len();
    info!(
        name = %setup.name,
        pairs = total,
        parallel = options.parallel,
        "starting injection run"
    );

    emit(
        &mut progress_cb,
        RunProgressEvent::stage(
            RunStage::Simulating,
            started.elapsed().as_secs_f64(),
            Some(format!("{total} pairs")),
        ),
    );

    let outcomes: Vec<PairOutcome> = if options.parallel {
        let outcomes: Vec<PairOutcome> = pairs.par_iter().map(|&p| run_pair(setup, p)).collect();
        for (index, outcome) in outcomes.iter().enumerate() {
            emit(&mut progress_cb, pair_event(index, total, outcome, started));
        }
        outcomes
    } else {
        let mut outcomes = Vec::with_capacity(total);
        for (index, &pair) in pairs.iter().enumerate() {
            let outcome = run_pair(setup, pair);
            emit(&mut progress_cb, pair_event(index, total, &outcome, started));
            outcomes.push(outcome);
        }
        outcomes
    };

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    emit(
        &mut progress_cb,
        RunProgressEvent::stage(
            RunStage::Completed,
            started.elapsed().as_secs_f64(),
            Some(format!("{} ok, {failed} failed", total - failed)),
        ),
    );
    outcomes
}

fn emit(progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>, event: RunProgressEvent) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(event);
    }
}

fn pair_event(
    index: usize,
    total: usize,
    outcome: &PairOutcome,
    started: Instant,
) -> RunProgressEvent {
    let wall_time_s = outcome.result.as_ref().map_or(0.0, |r| r.wall_time_s);
    RunProgressEvent {
        stage: RunStage::PairFinished,
        elapsed_wall_s: started.elapsed().as_secs_f64(),
        message: outcome.result.as_ref().err().map(|e| e.to_string()),
        pair: Some(PairProgress {
            index,
            total,
            flow_rate_ml_per_s: outcome.flow_rate_ml_per_s,
            foam_volume_ml: outcome.foam_volume_ml,
            succeeded: outcome.is_ok(),
            wall_time_s,
        }),
    }
}
