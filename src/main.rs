//! Real-estate projection CLI
//!
//! Runs a single projection from a JSON configuration (or the built-in
//! reference tower), prints the schedules and optionally writes reports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use realestate_projection::config::{loader, ShareCategory};
use realestate_projection::{report, ProjectionEngine, ProjectionInputs, ProjectionResult};

#[derive(Debug, Parser)]
#[command(name = "realestate_projection", version, about = "Project costs, revenue and returns for a real-estate development")]
struct Args {
    /// JSON file with building, plan, valuation and base price inputs
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV year plan (year,price_increase,vip_share,mezz_share,admin_share)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Override the annual discount rate (percent)
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Resize the plan to this many years
    #[arg(long)]
    years: Option<usize>,

    /// First year used when growing an empty plan
    #[arg(long, default_value_t = 2025)]
    start_year: i32,

    /// Directory for CSV and JSON reports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn load_inputs(args: &Args) -> Result<ProjectionInputs> {
    let mut inputs = match &args.config {
        Some(path) => loader::load_inputs(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ProjectionInputs::default(),
    };

    if let Some(path) = &args.plan {
        inputs.plan = loader::load_year_plan(path)
            .with_context(|| format!("loading year plan from {}", path.display()))?;
    }
    if let Some(years) = args.years {
        inputs.plan.resize(years, args.start_year);
    }
    if let Some(rate) = args.discount_rate {
        inputs = inputs.with_discount_factor(rate);
    }

    Ok(inputs)
}

fn print_tables(result: &ProjectionResult) {
    let costs = &result.costs;
    println!("Cost Breakdown:");
    println!("  Land:                  {:>18.2}", costs.land_cost);
    println!("  Administrative floors: {:>18.2}", costs.admin_floors_cost);
    println!("  Basement floors:       {:>18.2}", costs.basement_floors_cost);
    println!("  Technical area:        {:>18.2}", costs.technical_area_cost);
    println!("  Shared areas:          {:>18.2}", costs.shared_areas_cost);
    println!("  Sales commission:      {:>18.2}", costs.sales_commission);
    println!("  Total variable cost:   {:>18.2}", costs.total_variable_cost);
    println!("  Total cost:            {:>18.2}", costs.total_cost);
    println!();

    println!("Yearly Revenue:");
    println!("{:>6} {:>12} {:>18} {:>12} {:>18} {:>12} {:>18} {:>18}",
        "Year", "VIP Price", "VIP Revenue", "Mezz Price", "Mezz Revenue", "Admin Price", "Admin Revenue", "Total");
    println!("{}", "-".repeat(122));
    for row in &result.yearly {
        println!("{:>6} {:>12.2} {:>18.2} {:>12.2} {:>18.2} {:>12.2} {:>18.2} {:>18.2}",
            row.year,
            row.vip_price,
            row.vip_revenue,
            row.mezz_price,
            row.mezz_revenue,
            row.admin_price,
            row.admin_revenue,
            row.total,
        );
    }
    println!();

    println!("Discounted Cash Flow:");
    println!("{:>6} {:>18} {:>18} {:>18} {:>18}", "Year", "Flow", "Discounted", "Cumulative", "Break-even");
    for (row, be) in result.discount_schedule.iter().zip(&result.break_even_schedule) {
        println!("{:>6} {:>18.2} {:>18.2} {:>18.2} {:>18.2}",
            row.year, row.flow, row.discounted_flow, row.cumulative, be.break_even_portion);
    }
    println!();

    let totals = &result.totals;
    let metrics = &result.metrics;
    println!("Summary:");
    println!("  Total Revenues:       {:.2}", totals.total_revenues);
    println!("  Net Operating Profit: {:.2} ({}%)", totals.net_operating_profit, totals.net_operating_profit_percent);
    println!("  ROI:                  {:.2}%", totals.roi);
    println!("  Break-even:           {:.2}%", totals.break_even_percent);
    println!("  XNPV:                 {:.2}", metrics.xnpv);
    match metrics.xirr {
        Some(rate) => println!("  XIRR:                 {:.2}%", rate),
        None => println!("  XIRR:                 n/a"),
    }
    match metrics.dpp {
        Some(years) => println!("  DPP:                  {:.1} years", years),
        None => println!("  DPP:                  not recovered"),
    }

    for category in ShareCategory::ALL {
        if result.share_usage.exceeded(category) {
            println!("  Warning: {} shares sum to {:.0}% of the area",
                category.label(), result.share_usage.sum(category) * 100.0);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let inputs = load_inputs(&args)?;
    let engine = ProjectionEngine::try_from_inputs(inputs).context("invalid projection inputs")?;
    let result = engine.project();

    if args.json {
        report::write_json(std::io::stdout().lock(), &result)?;
        println!();
    } else {
        print_tables(&result);
    }

    if let Some(dir) = &args.output_dir {
        let written = report::write_all(dir, &result)
            .with_context(|| format!("writing reports to {}", dir.display()))?;
        if !args.json {
            println!();
            for path in written {
                println!("Written: {}", path.display());
            }
        }
    }

    Ok(())
}
