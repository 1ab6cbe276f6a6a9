//! Run file schema definitions.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// One injection study: a syringe, a foam, and the flow rates and foam
/// volumes to simulate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunFile {
    pub version: u32,
    pub name: String,
    #[serde(default = "default_syringe_ml")]
    pub syringe_ml: f64,
    pub foam: FoamDef,
    pub flow_rates_ml_per_min: Vec<f64>,
    pub foam_volumes_ml: Vec<f64>,
    #[serde(default = "default_accuracy_digits")]
    pub accuracy_digits: u32,
    #[serde(default = "default_sample_frequency_hz")]
    pub sample_frequency_hz: u32,
    #[serde(default)]
    pub kinetics: KineticsDef,
    #[serde(default)]
    pub strategy: StrategyDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_budget_s: Option<f64>,
}

impl Default for RunFile {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "tessari-10ml".to_string(),
            syringe_ml: default_syringe_ml(),
            foam: FoamDef {
                kind: FoamKindDef::Tessari,
                gas_ratio: 4,
            },
            flow_rates_ml_per_min: vec![10.0],
            foam_volumes_ml: vec![5.0],
            accuracy_digits: default_accuracy_digits(),
            sample_frequency_hz: default_sample_frequency_hz(),
            kinetics: KineticsDef::default(),
            strategy: StrategyDef::default(),
            time_budget_s: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoamDef {
    #[serde(rename = "type")]
    pub kind: FoamKindDef,
    pub gas_ratio: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FoamKindDef {
    Tessari,
    #[serde(alias = "DSS")]
    Dss,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum KineticsDef {
    #[default]
    Stepped,
    ClosedForm,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StrategyDef {
    #[default]
    BruteForce,
    Bisection,
}

fn default_syringe_ml() -> f64 {
    10.0
}

fn default_accuracy_digits() -> u32 {
    2
}

fn default_sample_frequency_hz() -> u32 {
    20
}
