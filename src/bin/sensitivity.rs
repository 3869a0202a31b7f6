//! Sensitivity sweep over discount rate and price escalation
//!
//! Runs the base configuration across every combination of the given
//! discount rates and escalation rates in parallel and prints one line per
//! scenario. `--json` emits the scenario summaries instead.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use realestate_projection::config::loader;
use realestate_projection::projection::ProjectionSummary;
use realestate_projection::scenario::{sensitivity_grid, ScenarioRunner};
use realestate_projection::ProjectionInputs;

#[derive(Debug, Parser)]
#[command(name = "sensitivity", about = "Sweep discount and escalation rates over a projection")]
struct Args {
    /// JSON file with the base inputs
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV year plan replacing the configured one
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Annual discount rates in percent
    #[arg(long, value_delimiter = ',', default_values_t = vec![5.0, 7.0, 9.0, 11.0])]
    discount_rates: Vec<f64>,

    /// Annual price escalation rates as decimals
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.04, 0.08])]
    price_increases: Vec<f64>,

    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SensitivityLine {
    scenario: String,
    discount_rate: f64,
    price_increase: f64,
    summary: ProjectionSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let mut base = match &args.config {
        Some(path) => loader::load_inputs(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ProjectionInputs::default(),
    };
    if let Some(path) = &args.plan {
        base.plan = loader::load_year_plan(path)
            .with_context(|| format!("loading year plan from {}", path.display()))?;
    }

    let runner = ScenarioRunner::new(base);
    let scenarios = sensitivity_grid(&args.discount_rates, &args.price_increases);

    let mut lines = Vec::with_capacity(scenarios.len());
    for outcome in runner.run_scenarios(&scenarios) {
        let outcome = outcome.context("scenario inputs are invalid")?;
        lines.push(SensitivityLine {
            discount_rate: outcome.scenario.discount_factor.unwrap_or_default(),
            price_increase: outcome.scenario.price_increase.unwrap_or_default(),
            scenario: outcome.scenario.name,
            summary: outcome.result.summary(),
        });
    }

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &lines)?;
        println!();
        return Ok(());
    }

    println!("{:>9} {:>10} {:>18} {:>18} {:>9} {:>18} {:>9} {:>7}",
        "Discount", "Escalation", "Revenue", "Total Cost", "ROI", "XNPV", "XIRR", "DPP");
    println!("{}", "-".repeat(106));
    for line in &lines {
        let s = &line.summary;
        println!("{:>8.2}% {:>9.2}% {:>18.2} {:>18.2} {:>8.2}% {:>18.2} {:>9} {:>7}",
            line.discount_rate,
            line.price_increase * 100.0,
            s.total_revenues,
            s.total_cost,
            s.roi,
            s.xnpv,
            s.xirr.map(|r| format!("{:.2}%", r)).unwrap_or_else(|| "n/a".to_string()),
            s.dpp.map(|y| format!("{:.1}", y)).unwrap_or_else(|| "-".to_string()),
        );
    }

    println!("\n{} scenarios in {:?}", lines.len(), start.elapsed());
    Ok(())
}
