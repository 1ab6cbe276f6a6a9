//! End-to-end driver runs over small pair grids.

use fd_app::{
    DriverOptions, PairError, RunParameters, RunProgressEvent, RunStage, SimulationSetup,
    compile_run, group_by_flow_rate, query, simulate_injection, simulate_injection_with_progress,
};
use fd_core::{FdError, series::nominal_grid_len};
use fd_project::RunFile;
use fd_solver::SolverError;
use fd_syringe::{FoamSpec, FoamType, SyringeSize, SyringeSpec};

fn sequential() -> DriverOptions {
    DriverOptions { parallel: false }
}

fn small_sweep() -> RunFile {
    RunFile {
        name: "sweep".to_string(),
        flow_rates_ml_per_min: vec![20.0, 10.0],
        foam_volumes_ml: vec![5.0, 2.0],
        ..RunFile::default()
    }
}

#[test]
fn reference_scenario_heights_rise_within_the_bore() {
    let setup = compile_run(&RunFile::default()).unwrap();
    let outcomes = simulate_injection(&setup, &sequential());
    assert_eq!(outcomes.len(), 1);

    let result = outcomes[0].result.as_ref().unwrap();
    let radius = setup.syringe.diameter_mm() / 2.0;
    let nominal = nominal_grid_len(result.duration_s, 20).unwrap();
    assert!((result.duration_s - 30.0).abs() < 1e-9);
    assert!(result.heights.len() < nominal);
    assert!(result.heights.len() >= 580);
    assert_eq!(result.heights.times()[0], 0.0);

    let heights = result.heights.values();
    assert!(heights[0] < 0.1);
    assert!(heights.iter().all(|&h| (0.0..=radius).contains(&h)));
    for w in heights.windows(2) {
        assert!(w[1] >= w[0]);
    }
    assert!(result.table_size >= 10_000);
}

#[test]
fn outcomes_are_flow_major_and_ascending() {
    let setup = compile_run(&small_sweep()).unwrap();
    let outcomes = simulate_injection(&setup, &DriverOptions::default());
    let keys: Vec<(f64, f64)> = outcomes
        .iter()
        .map(|o| (o.flow_rate_ml_per_min().round(), o.foam_volume_ml))
        .collect();
    assert_eq!(keys, vec![(10.0, 2.0), (10.0, 5.0), (20.0, 2.0), (20.0, 5.0)]);

    let groups = group_by_flow_rate(&outcomes);
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.outcomes.len() == 2));
    assert!((groups[1].flow_rate_ml_per_min() - 20.0).abs() < 1e-9);
}

#[test]
fn parallel_and_sequential_agree() {
    let setup = compile_run(&small_sweep()).unwrap();
    let parallel = simulate_injection(&setup, &DriverOptions { parallel: true });
    let serial = simulate_injection(&setup, &sequential());
    assert_eq!(parallel.len(), serial.len());
    for (a, b) in parallel.iter().zip(&serial) {
        let (ra, rb) = (a.result.as_ref().unwrap(), b.result.as_ref().unwrap());
        assert_eq!(ra.heights, rb.heights);
        assert_eq!(ra.table_size, rb.table_size);
        assert_eq!(ra.dropped_samples, rb.dropped_samples);
    }
}

#[test]
fn zero_flow_fails_only_its_own_pairs() {
    let params = RunParameters::new(vec![0.0, 10.0 / 60.0], vec![2.0], 2, 20).unwrap();
    let setup = SimulationSetup::new(
        "zero-flow",
        SyringeSpec::new(SyringeSize::Ml10),
        FoamSpec::from_catalog(FoamType::Tessari, 4).unwrap(),
        params,
    );
    let outcomes = simulate_injection(&setup, &sequential());
    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        outcomes[0].result,
        Err(PairError::Core(FdError::DivisionByZero { what: "flow rate" }))
    );
    assert!(outcomes[1].is_ok());

    let summary = query::get_run_summary(&outcomes);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn overlong_injection_fails_only_its_own_pairs() {
    let run = RunFile {
        flow_rates_ml_per_min: vec![1e-300, 20.0],
        foam_volumes_ml: vec![2.0],
        ..RunFile::default()
    };
    let setup = compile_run(&run).unwrap();
    let outcomes = simulate_injection(&setup, &DriverOptions::default());
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0].result,
        Err(PairError::Core(FdError::InvalidArg { .. }))
    ));
    assert!(outcomes[1].is_ok());
}

#[test]
fn exhausted_budget_is_reported_per_pair() {
    let setup = compile_run(&small_sweep())
        .unwrap()
        .with_time_budget(Some(std::time::Duration::ZERO));
    let outcomes = simulate_injection(&setup, &DriverOptions::default());
    assert_eq!(outcomes.len(), 4);
    for outcome in &outcomes {
        let err = outcome.result.as_ref().unwrap_err();
        assert!(err.is_solver_exhaustion());
        assert!(matches!(
            err,
            PairError::Solver(SolverError::BudgetExhausted { .. })
        ));
    }
}

#[test]
fn progress_reports_every_pair_then_completion() {
    let setup = compile_run(&small_sweep()).unwrap();
    for parallel in [false, true] {
        let mut events: Vec<RunProgressEvent> = Vec::new();
        let outcomes = simulate_injection_with_progress(
            &setup,
            &DriverOptions { parallel },
            Some(&mut |event| events.push(event)),
        );
        assert_eq!(events.first().map(|e| e.stage), Some(RunStage::Simulating));
        assert_eq!(events.last().map(|e| e.stage), Some(RunStage::Completed));

        let pairs: Vec<_> = events.iter().filter_map(|e| e.pair.as_ref()).collect();
        assert_eq!(pairs.len(), outcomes.len());
        for (i, p) in pairs.iter().enumerate() {
            assert_eq!(p.index, i);
            assert!(p.succeeded);
        }
        assert_eq!(pairs.last().map(|p| p.fraction_complete()), Some(1.0));
    }
}

#[test]
fn json_and_csv_exports() {
    let params = RunParameters::new(vec![0.0, 20.0 / 60.0], vec![1.0], 1, 5).unwrap();
    let setup = SimulationSetup::new(
        "export",
        SyringeSpec::new(SyringeSize::Ml5),
        FoamSpec::from_catalog(FoamType::Dss, 5).unwrap(),
        params,
    );
    let outcomes = simulate_injection(&setup, &sequential());

    let json = query::outcomes_to_json(&outcomes).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].get("error").is_some());
    assert!(records[0].get("heights_mm").is_none());
    assert!(records[1]["heights_mm"]["values"].is_array());

    let csv = query::outcomes_to_csv(&outcomes);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("flow_rate_ml_per_min,foam_volume_ml,time_s,height_mm")
    );
    let rows = lines.count();
    assert_eq!(rows, outcomes[1].result.as_ref().unwrap().heights.len());
}
