//! Compile a validated run file into a simulation setup.

use std::time::Duration;

use fd_core::{MAX_ACCURACY_DIGITS, in_ml_per_s, ml_per_min};
use fd_kinetics::KineticsMode;
use fd_project::schema::{FoamKindDef, KineticsDef, RunFile, StrategyDef};
use fd_solver::{SolverConfig, SolverStrategy};
use fd_syringe::{FoamSpec, FoamType, SyringeSpec};

use crate::error::{AppError, AppResult};

/// Flow rates and foam volumes to cross, plus sampling and rounding settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    flow_rates_ml_per_s: Vec<f64>,
    foam_volumes_ml: Vec<f64>,
    accuracy_digits: u32,
    sample_frequency_hz: u32,
}

impl RunParameters {
    /// Both value sets are deduplicated and sorted ascending.
    ///
    /// Zero flow rates are accepted here and fail per pair, so one bad value
    /// does not stop the others from running.
    pub fn new(
        flow_rates_ml_per_s: Vec<f64>,
        foam_volumes_ml: Vec<f64>,
        accuracy_digits: u32,
        sample_frequency_hz: u32,
    ) -> AppResult<Self> {
        if accuracy_digits > MAX_ACCURACY_DIGITS {
            return Err(AppError::InvalidInput(format!(
                "accuracy digits must be at most {MAX_ACCURACY_DIGITS}, got {accuracy_digits}"
            )));
        }
        if !(1..=50).contains(&sample_frequency_hz) {
            return Err(AppError::InvalidInput(format!(
                "sample frequency must be between 1 and 50 Hz, got {sample_frequency_hz}"
            )));
        }
        Ok(Self {
            flow_rates_ml_per_s: normalized("flow rates", flow_rates_ml_per_s)?,
            foam_volumes_ml: normalized("foam volumes", foam_volumes_ml)?,
            accuracy_digits,
            sample_frequency_hz,
        })
    }

    pub fn flow_rates_ml_per_s(&self) -> &[f64] {
        &self.flow_rates_ml_per_s
    }

    pub fn foam_volumes_ml(&self) -> &[f64] {
        &self.foam_volumes_ml
    }

    pub fn accuracy_digits(&self) -> u32 {
        self.accuracy_digits
    }

    pub fn sample_frequency_hz(&self) -> u32 {
        self.sample_frequency_hz
    }

    /// Every (flow rate, foam volume) pair, flow-major.
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.flow_rates_ml_per_s
            .iter()
            .flat_map(|&q| self.foam_volumes_ml.iter().map(move |&v| (q, v)))
            .collect()
    }
}

fn normalized(what: &str, mut values: Vec<f64>) -> AppResult<Vec<f64>> {
    if values.is_empty() {
        return Err(AppError::InvalidInput(format!("no {what} given")));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(AppError::InvalidInput(format!(
            "{what} must be finite and non-negative, got {bad}"
        )));
    }
    values.sort_by(f64::total_cmp);
    values.dedup();
    Ok(values)
}

/// Everything one injection study needs, read-only once built.
#[derive(Debug, Clone)]
pub struct SimulationSetup {
    pub name: String,
    pub syringe: SyringeSpec,
    pub foam: FoamSpec,
    pub params: RunParameters,
    pub kinetics: KineticsMode,
    pub solver: SolverConfig,
}

impl SimulationSetup {
    pub fn new(
        name: impl Into<String>,
        syringe: SyringeSpec,
        foam: FoamSpec,
        params: RunParameters,
    ) -> Self {
        let solver = SolverConfig::with_accuracy(params.accuracy_digits());
        Self {
            name: name.into(),
            syringe,
            foam,
            params,
            kinetics: KineticsMode::default(),
            solver,
        }
    }

    pub fn with_kinetics(mut self, kinetics: KineticsMode) -> Self {
        self.kinetics = kinetics;
        self
    }

    pub fn with_strategy(mut self, strategy: SolverStrategy) -> Self {
        self.solver.strategy = strategy;
        self
    }

    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.solver.time_budget = budget;
        self
    }
}

pub fn foam_type(kind: FoamKindDef) -> FoamType {
    match kind {
        FoamKindDef::Tessari => FoamType::Tessari,
        FoamKindDef::Dss => FoamType::Dss,
    }
}

pub fn kinetics_mode(def: KineticsDef) -> KineticsMode {
    match def {
        KineticsDef::Stepped => KineticsMode::Stepped,
        KineticsDef::ClosedForm => KineticsMode::ClosedForm,
    }
}

pub fn solver_strategy(def: StrategyDef) -> SolverStrategy {
    match def {
        StrategyDef::BruteForce => SolverStrategy::BruteForce,
        StrategyDef::Bisection => SolverStrategy::Bisection,
    }
}

/// Validate `run` and build the setup it describes.
///
/// Flow rates are converted from mL/min to mL/s.
pub fn compile_run(run: &RunFile) -> AppResult<SimulationSetup> {
    fd_project::validate_run_file(run)?;

    let syringe = SyringeSpec::from_volume_ml(run.syringe_ml)?;
    let foam = FoamSpec::from_catalog(foam_type(run.foam.kind), run.foam.gas_ratio)?;
    let flow_rates = run
        .flow_rates_ml_per_min
        .iter()
        .map(|&q| in_ml_per_s(ml_per_min(q)))
        .collect();
    let params = RunParameters::new(
        flow_rates,
        run.foam_volumes_ml.clone(),
        run.accuracy_digits,
        run.sample_frequency_hz,
    )?;

    let time_budget = run
        .time_budget_s
        .map(|budget_s| {
            Duration::try_from_secs_f64(budget_s).map_err(|e| {
                AppError::InvalidInput(format!("time budget of {budget_s} s: {e}"))
            })
        })
        .transpose()?;

    let setup = SimulationSetup::new(run.name.clone(), syringe, foam, params)
        .with_kinetics(kinetics_mode(run.kinetics))
        .with_strategy(solver_strategy(run.strategy))
        .with_time_budget(time_budget);
    setup.solver.validate()?;
    Ok(setup)
}
