//! Run file validation.
//!
//! Everything that reaches the simulation core has passed these checks.

use fd_core::MAX_ACCURACY_DIGITS;

use crate::schema::{LATEST_VERSION, RunFile};

pub const SYRINGE_SIZES_ML: [f64; 4] = [3.0, 5.0, 10.0, 20.0];
pub const GAS_RATIOS: [u32; 3] = [3, 4, 5];
pub const MAX_FLOW_RATES: usize = 6;
pub const MAX_FOAM_VOLUMES: usize = 4;
/// Flow rates must stay strictly below this (mL/min).
pub const MAX_FLOW_RATE_ML_PER_MIN: f64 = 100.0;
pub const SAMPLE_FREQUENCY_RANGE_HZ: std::ops::RangeInclusive<u32> = 1..=50;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Empty list: {field}")]
    EmptyList { field: String },

    #[error("Too many values in {field}: {count} distinct (maximum {max})")]
    TooManyValues {
        field: String,
        count: usize,
        max: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Number of distinct values once duplicates are removed.
fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

pub fn validate_run_file(run: &RunFile) -> Result<(), ValidationError> {
    if run.version == 0 || run.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: run.version,
        });
    }

    if !SYRINGE_SIZES_ML.contains(&run.syringe_ml) {
        return Err(invalid(
            "syringe_ml",
            run.syringe_ml,
            "must be one of 3, 5, 10, 20",
        ));
    }

    if !GAS_RATIOS.contains(&run.foam.gas_ratio) {
        return Err(invalid(
            "foam.gas_ratio",
            run.foam.gas_ratio,
            "must be one of 3, 4, 5",
        ));
    }

    validate_list(
        "flow_rates_ml_per_min",
        &run.flow_rates_ml_per_min,
        MAX_FLOW_RATES,
    )?;
    for &q in &run.flow_rates_ml_per_min {
        if q >= MAX_FLOW_RATE_ML_PER_MIN {
            return Err(invalid(
                "flow_rates_ml_per_min",
                q,
                "must be less than 100 mL/min",
            ));
        }
    }

    validate_list("foam_volumes_ml", &run.foam_volumes_ml, MAX_FOAM_VOLUMES)?;
    for &v in &run.foam_volumes_ml {
        if v > run.syringe_ml {
            return Err(invalid(
                "foam_volumes_ml",
                v,
                "must not exceed the syringe volume",
            ));
        }
    }

    if run.accuracy_digits > MAX_ACCURACY_DIGITS {
        return Err(invalid(
            "accuracy_digits",
            run.accuracy_digits,
            "must be between 0 and 5",
        ));
    }

    if !SAMPLE_FREQUENCY_RANGE_HZ.contains(&run.sample_frequency_hz) {
        return Err(invalid(
            "sample_frequency_hz",
            run.sample_frequency_hz,
            "must be between 1 and 50",
        ));
    }

    if let Some(budget) = run.time_budget_s {
        if !budget.is_finite() || budget <= 0.0 {
            return Err(invalid("time_budget_s", budget, "must be positive"));
        }
    }

    Ok(())
}

fn validate_list(field: &str, values: &[f64], max: usize) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::EmptyList {
            field: field.to_string(),
        });
    }
    for &v in values {
        if !v.is_finite() || v <= 0.0 {
            return Err(invalid(field, v, "must be positive"));
        }
    }
    let count = distinct_count(values);
    if count > max {
        return Err(ValidationError::TooManyValues {
            field: field.to_string(),
            count,
            max,
        });
    }
    Ok(())
}
