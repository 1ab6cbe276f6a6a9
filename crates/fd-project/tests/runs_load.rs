use std::path::PathBuf;

use fd_project::schema::*;
use fd_project::{ProjectError, ValidationError, from_yaml_str, load_yaml, save_yaml};

fn runs_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // crates
    path.pop(); // repo root
    path.push("runs");
    path
}

#[test]
fn bundled_run_files_load() {
    let tessari = load_yaml(&runs_dir().join("tessari_10ml.yaml")).unwrap();
    assert_eq!(tessari, RunFile::default());

    let dss = load_yaml(&runs_dir().join("dss_sweep.yaml")).unwrap();
    assert_eq!(dss.foam.kind, FoamKindDef::Dss);
    assert_eq!(dss.foam.gas_ratio, 3);
    assert_eq!(dss.flow_rates_ml_per_min.len(), 4);
    assert_eq!(dss.kinetics, KineticsDef::ClosedForm);
    assert_eq!(dss.time_budget_s, Some(120.0));
}

#[test]
fn omitted_fields_take_defaults() {
    let run = from_yaml_str(
        r#"
version: 1
name: minimal
foam:
  type: Tessari
  gas_ratio: 5
flow_rates_ml_per_min: [20.0, 40.0]
foam_volumes_ml: [2.0]
"#,
    )
    .unwrap();
    assert_eq!(run.syringe_ml, 10.0);
    assert_eq!(run.accuracy_digits, 2);
    assert_eq!(run.sample_frequency_hz, 20);
    assert_eq!(run.kinetics, KineticsDef::Stepped);
    assert_eq!(run.strategy, StrategyDef::BruteForce);
    assert_eq!(run.time_budget_s, None);
}

#[test]
fn invalid_content_is_rejected_after_parsing() {
    let err = from_yaml_str(
        r#"
version: 1
name: too-big
syringe_ml: 5.0
foam:
  type: Tessari
  gas_ratio: 4
flow_rates_ml_per_min: [10.0]
foam_volumes_ml: [6.0]
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::InvalidValue { .. })
    ));

    let err = from_yaml_str("version: 1\nname: broken\n").unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}

#[test]
fn roundtrip_yaml() {
    let run = RunFile {
        name: "roundtrip".to_string(),
        syringe_ml: 20.0,
        foam: FoamDef {
            kind: FoamKindDef::Dss,
            gas_ratio: 5,
        },
        flow_rates_ml_per_min: vec![7.5, 15.0],
        foam_volumes_ml: vec![3.0, 6.0, 9.0],
        accuracy_digits: 1,
        sample_frequency_hz: 25,
        kinetics: KineticsDef::ClosedForm,
        strategy: StrategyDef::Bisection,
        time_budget_s: Some(30.0),
        ..RunFile::default()
    };

    let path = std::env::temp_dir().join("fd_project_roundtrip.yaml");
    save_yaml(&path, &run).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(run, loaded);
}

#[test]
fn save_refuses_invalid_run() {
    let run = RunFile {
        accuracy_digits: 9,
        ..RunFile::default()
    };
    let path = std::env::temp_dir().join("fd_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &run),
        Err(ProjectError::Validation(_))
    ));
}
