//! Projection inputs: building, sales plan, valuation and base prices

mod building;
mod plan;
mod valuation;
mod validate;
pub mod loader;

pub use building::BuildingConfig;
pub use plan::{ShareCategory, ShareUsage, YearPlan, YearPlanRow, DEFAULT_PRICE_INCREASE};
pub use valuation::{BasePrices, ValuationConfig};
pub use validate::{parse_amount, ValidatedInputs, ValidationError};
pub use loader::ConfigError;

use serde::{Deserialize, Serialize};

/// Everything a projection needs, fixed for the duration of one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionInputs {
    pub building: BuildingConfig,
    pub plan: YearPlan,
    pub valuation: ValuationConfig,
    pub base_prices: BasePrices,
}

impl ProjectionInputs {
    /// Replace the sales plan
    pub fn with_plan(mut self, plan: YearPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Replace the annual discount rate (percent)
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.valuation.discount_factor = discount_factor;
        self
    }

    /// Apply the same price escalation to every plan row
    pub fn with_uniform_price_increase(mut self, price_increase: f64) -> Self {
        for row in self.plan.rows_mut() {
            row.price_increase = price_increase;
        }
        self
    }
}
