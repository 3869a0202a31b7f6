//! CSV and JSON export of projection results

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::projection::{CostBreakdown, ProjectionResult};

/// Errors raised while writing reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to flush CSV output: {0}")]
    Flush(#[source] std::io::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

pub const YEARLY_REVENUE_FILE: &str = "yearly_revenue.csv";
pub const DISCOUNT_SCHEDULE_FILE: &str = "discount_schedule.csv";
pub const BREAK_EVEN_FILE: &str = "break_even_schedule.csv";
pub const COST_BREAKDOWN_FILE: &str = "cost_breakdown.csv";
pub const RESULT_JSON_FILE: &str = "projection.json";

#[derive(Serialize)]
struct CostLine {
    item: &'static str,
    amount: f64,
}

fn cost_lines(costs: &CostBreakdown) -> [CostLine; 8] {
    [
        CostLine { item: "Land", amount: costs.land_cost },
        CostLine { item: "Administrative floors", amount: costs.admin_floors_cost },
        CostLine { item: "Basement floors", amount: costs.basement_floors_cost },
        CostLine { item: "Technical area", amount: costs.technical_area_cost },
        CostLine { item: "Shared areas", amount: costs.shared_areas_cost },
        CostLine { item: "Sales commission", amount: costs.sales_commission },
        CostLine { item: "Total variable cost", amount: costs.total_variable_cost },
        CostLine { item: "Total cost", amount: costs.total_cost },
    ]
}

/// Serialize rows as CSV with a header taken from the field names
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .into_inner()
        .map_err(|err| ReportError::Flush(err.into_error()))?;
    Ok(())
}

/// Write the cost breakdown as `item,amount` lines
pub fn write_costs<W: Write>(writer: W, costs: &CostBreakdown) -> Result<(), ReportError> {
    write_rows(writer, &cost_lines(costs))
}

/// Write the full result as pretty-printed JSON
pub fn write_json<W: Write>(writer: W, result: &ProjectionResult) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}

fn create(path: &Path) -> Result<File, ReportError> {
    File::create(path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write every report into `dir`, creating it if needed
///
/// Returns the paths written.
pub fn write_all(dir: &Path, result: &ProjectionResult) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let yearly = dir.join(YEARLY_REVENUE_FILE);
    write_rows(create(&yearly)?, &result.yearly)?;

    let discount = dir.join(DISCOUNT_SCHEDULE_FILE);
    write_rows(create(&discount)?, &result.discount_schedule)?;

    let break_even = dir.join(BREAK_EVEN_FILE);
    write_rows(create(&break_even)?, &result.break_even_schedule)?;

    let costs = dir.join(COST_BREAKDOWN_FILE);
    write_costs(create(&costs)?, &result.costs)?;

    let json = dir.join(RESULT_JSON_FILE);
    write_json(create(&json)?, result)?;

    info!("reports written to {}", dir.display());
    Ok(vec![yearly, discount, break_even, costs, json])
}
