//! Query helpers for rendering driver outcomes.

use fd_core::TimeSeries;
use serde::Serialize;

use crate::error::AppResult;
use crate::run_service::PairOutcome;

/// Outcomes sharing one flow rate: one plot, one curve per foam volume.
#[derive(Debug, Clone)]
pub struct FlowRateGroup<'a> {
    pub flow_rate_ml_per_s: f64,
    pub outcomes: Vec<&'a PairOutcome>,
}

impl FlowRateGroup<'_> {
    pub fn flow_rate_ml_per_min(&self) -> f64 {
        self.flow_rate_ml_per_s * 60.0
    }
}

/// Group driver output by flow rate, keeping driver order.
pub fn group_by_flow_rate(outcomes: &[PairOutcome]) -> Vec<FlowRateGroup<'_>> {
    outcomes
        .chunk_by(|a, b| a.flow_rate_ml_per_s == b.flow_rate_ml_per_s)
        .map(|chunk| FlowRateGroup {
            flow_rate_ml_per_s: chunk[0].flow_rate_ml_per_s,
            outcomes: chunk.iter().collect(),
        })
        .collect()
}

/// Counts and extremes over a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub pair_count: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub max_height_mm: Option<f64>,
    pub largest_table_size: usize,
    pub total_wall_time_s: f64,
}

pub fn get_run_summary(outcomes: &[PairOutcome]) -> RunSummary {
    let mut summary = RunSummary {
        pair_count: outcomes.len(),
        ..RunSummary::default()
    };
    for result in outcomes.iter().map(|o| &o.result) {
        match result {
            Ok(r) => {
                summary.succeeded += 1;
                summary.total_wall_time_s += r.wall_time_s;
                summary.largest_table_size = summary.largest_table_size.max(r.table_size);
                if let Some(h) = r.heights.max_value() {
                    summary.max_height_mm = Some(summary.max_height_mm.map_or(h, |m| m.max(h)));
                }
            }
            Err(_) => summary.failed += 1,
        }
    }
    summary
}

/// Serializable view of one outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRecord {
    pub flow_rate_ml_per_min: f64,
    pub foam_volume_ml: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_samples: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_time_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heights_mm: Option<TimeSeries>,
}

impl From<&PairOutcome> for OutcomeRecord {
    fn from(outcome: &PairOutcome) -> Self {
        let ok = outcome.result.as_ref().ok();
        Self {
            flow_rate_ml_per_min: outcome.flow_rate_ml_per_min(),
            foam_volume_ml: outcome.foam_volume_ml,
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
            table_size: ok.map(|r| r.table_size),
            dropped_samples: ok.map(|r| r.dropped_samples),
            wall_time_s: ok.map(|r| r.wall_time_s),
            heights_mm: ok.map(|r| r.heights.clone()),
        }
    }
}

pub fn outcomes_to_json(outcomes: &[PairOutcome]) -> AppResult<String> {
    let records: Vec<OutcomeRecord> = outcomes.iter().map(OutcomeRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Long-format CSV of every successful curve.
pub fn outcomes_to_csv(outcomes: &[PairOutcome]) -> String {
    let mut csv = String::from("flow_rate_ml_per_min,foam_volume_ml,time_s,height_mm\n");
    for outcome in outcomes {
        if let Ok(result) = &outcome.result {
            for (t, h) in result.heights.iter() {
                csv.push_str(&format!(
                    "{},{},{},{}\n",
                    outcome.flow_rate_ml_per_min(),
                    outcome.foam_volume_ml,
                    t,
                    h
                ));
            }
        }
    }
    csv
}
