//! File loaders for projection inputs
//!
//! Inputs come from a JSON document shaped like [`ProjectionInputs`] (every
//! field optional) and optionally a year-plan CSV with the header
//! `year,price_increase,vip_share,mezz_share,admin_share`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use thiserror::Error;

use super::plan::{YearPlan, YearPlanRow};
use super::validate::ValidationError;
use super::ProjectionInputs;

/// Errors raised while reading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid year plan CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn open(path: &Path) -> Result<File, ConfigError> {
    File::open(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load projection inputs from a JSON file
pub fn load_inputs(path: &Path) -> Result<ProjectionInputs, ConfigError> {
    let inputs = load_inputs_from_reader(open(path)?)?;
    debug!("loaded inputs from {} ({} plan rows)", path.display(), inputs.plan.len());
    Ok(inputs)
}

/// Load projection inputs from any JSON reader
pub fn load_inputs_from_reader<R: Read>(reader: R) -> Result<ProjectionInputs, ConfigError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a year plan from a CSV file
pub fn load_year_plan(path: &Path) -> Result<YearPlan, ConfigError> {
    let plan = load_year_plan_from_reader(open(path)?)?;
    debug!("loaded {} plan rows from {}", plan.len(), path.display());
    Ok(plan)
}

/// Load a year plan from any CSV reader
pub fn load_year_plan_from_reader<R: Read>(reader: R) -> Result<YearPlan, ConfigError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: YearPlanRow = result?;
        rows.push(row);
    }

    Ok(YearPlan::new(rows))
}
