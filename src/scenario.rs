//! Scenario runner for sensitivity studies
//!
//! Holds one base set of inputs and runs variations of it (discount rate,
//! price escalation, commission) without the caller rebuilding the full
//! configuration each time. Independent scenarios run in parallel.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ProjectionInputs, ValidationError};
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Overrides applied on top of the base inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Annual discount rate in percent
    pub discount_factor: Option<f64>,
    /// Escalation applied uniformly to every plan row
    pub price_increase: Option<f64>,
    pub sales_commission_pct: Option<f64>,
}

impl Scenario {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Inputs for this scenario
    pub fn apply(&self, base: &ProjectionInputs) -> ProjectionInputs {
        let mut inputs = base.clone();
        if let Some(rate) = self.discount_factor {
            inputs = inputs.with_discount_factor(rate);
        }
        if let Some(increase) = self.price_increase {
            inputs = inputs.with_uniform_price_increase(increase);
        }
        if let Some(pct) = self.sales_commission_pct {
            inputs.building.sales_commission_pct = pct;
        }
        inputs
    }
}

/// Every combination of discount rate (percent) and price escalation
pub fn sensitivity_grid(discount_rates: &[f64], price_increases: &[f64]) -> Vec<Scenario> {
    discount_rates
        .iter()
        .flat_map(|&rate| {
            price_increases.iter().map(move |&increase| Scenario {
                name: format!("discount {:.2}% / escalation {:.2}%", rate, increase * 100.0),
                discount_factor: Some(rate),
                price_increase: Some(increase),
                sales_commission_pct: None,
            })
        })
        .collect()
}

/// Result of one scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub result: ProjectionResult,
}

/// Runs projections over variations of a base configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_inputs: ProjectionInputs,
}

impl ScenarioRunner {
    pub fn new(base_inputs: ProjectionInputs) -> Self {
        Self { base_inputs }
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioOutcome, ValidationError> {
        let engine = ProjectionEngine::try_from_inputs(scenario.apply(&self.base_inputs))?;
        debug!("running scenario '{}'", scenario.name);
        Ok(ScenarioOutcome {
            scenario: scenario.clone(),
            result: engine.project(),
        })
    }

    /// Run the base inputs unchanged
    pub fn run_base(&self) -> Result<ProjectionResult, ValidationError> {
        Ok(ProjectionEngine::try_from_inputs(self.base_inputs.clone())?.project())
    }

    /// Run scenarios in parallel, results in the same order as `scenarios`
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<Result<ScenarioOutcome, ValidationError>> {
        scenarios.par_iter().map(|scenario| self.run(scenario)).collect()
    }

    /// Get reference to base inputs for inspection
    pub fn base_inputs(&self) -> &ProjectionInputs {
        &self.base_inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_covers_all_combinations() {
        let grid = sensitivity_grid(&[5.0, 7.0, 9.0], &[0.0, 0.08]);

        assert_eq!(grid.len(), 6);
        assert_eq!(grid[1].discount_factor, Some(5.0));
        assert_eq!(grid[1].price_increase, Some(0.08));
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::default();
        let scenarios = sensitivity_grid(&[5.0, 10.0], &[0.08]);

        let outcomes: Vec<_> = runner
            .run_scenarios(&scenarios)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(outcomes.len(), 2);

        // Higher discount rate lowers the present value of the same revenue
        assert!(outcomes[0].result.metrics.xnpv > outcomes[1].result.metrics.xnpv);
        assert_eq!(
            outcomes[0].result.totals.total_revenues,
            outcomes[1].result.totals.total_revenues
        );
    }

    #[test]
    fn test_higher_escalation_raises_revenue() {
        let runner = ScenarioRunner::default();
        let scenarios = sensitivity_grid(&[7.0], &[0.0, 0.1]);

        let outcomes = runner.run_scenarios(&scenarios);
        let flat = outcomes[0].as_ref().unwrap();
        let rising = outcomes[1].as_ref().unwrap();

        assert!(rising.result.totals.total_revenues > flat.result.totals.total_revenues);
    }

    #[test]
    fn test_invalid_override_reports_error() {
        let runner = ScenarioRunner::default();
        let scenario = Scenario {
            sales_commission_pct: Some(f64::INFINITY),
            ..Scenario::named("broken")
        };

        assert!(runner.run(&scenario).is_err());
        assert!(runner.run_base().is_ok());
    }
}
