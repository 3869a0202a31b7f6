//! Core projection engine for development cost and revenue projections

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::config::{ProjectionInputs, ValidatedInputs, ValidationError};
use super::cashflows::{
    BreakEvenRow, InvestmentMetrics, ProjectionResult, ProjectionTotals, YearlyRevenue,
};
use super::costs::CostBreakdown;
use super::discount::{discounted_payback, DiscountCurve};
use super::irr::{xirr, DatedCashflow};
use super::round2;
use super::state::PriceState;

/// Main projection engine
///
/// Holds one validated set of inputs. [`ProjectionEngine::project`] is pure:
/// calling it again returns an identical result.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    inputs: ValidatedInputs,
}

impl ProjectionEngine {
    /// Create a new projection engine over validated inputs
    pub fn new(inputs: ValidatedInputs) -> Self {
        Self { inputs }
    }

    /// Validate raw inputs and build an engine over them
    pub fn try_from_inputs(inputs: ProjectionInputs) -> Result<Self, ValidationError> {
        Ok(Self::new(inputs.validate()?))
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        self.inputs.inputs()
    }

    /// Run the full projection
    pub fn project(&self) -> ProjectionResult {
        let inputs = self.inputs();

        let mut costs = CostBreakdown::construction(&inputs.building);
        debug!(
            "construction costs: land={:.2} variable(before commission)={:.2}",
            costs.land_cost, costs.total_variable_cost
        );

        let (yearly, total_revenues) = self.accrue_revenue();

        // Commission depends on revenue, so it is only known after accrual
        costs.apply_sales_commission(inputs.building.sales_commission_pct, total_revenues);

        let totals = calculate_totals(total_revenues, &costs);

        let curve = DiscountCurve::single_rate(inputs.valuation.discount_rate());
        let discount_schedule = curve.schedule(&yearly);

        let break_even_schedule = yearly
            .iter()
            .map(|row| BreakEvenRow {
                year: row.year,
                revenue: row.total,
                break_even_portion: row.total * totals.break_even_percent / 100.0,
            })
            .collect();

        let final_cumulative = discount_schedule.last().map(|r| r.cumulative).unwrap_or(0.0);
        let metrics = InvestmentMetrics {
            xnpv: final_cumulative - costs.total_cost,
            xirr: self.calculate_xirr(&yearly, costs.total_cost),
            dpp: discounted_payback(&discount_schedule, costs.total_cost),
        };

        info!(
            "projected {} years: revenue={:.2} cost={:.2} roi={:.2}% xnpv={:.2}",
            yearly.len(),
            totals.total_revenues,
            costs.total_cost,
            totals.roi,
            metrics.xnpv
        );

        ProjectionResult {
            costs,
            yearly,
            totals,
            share_usage: inputs.plan.share_usage(),
            discount_schedule,
            break_even_schedule,
            metrics,
        }
    }

    /// Accrue sales year by year with compounding unit prices
    ///
    /// Returns the yearly rows and their left-to-right sum.
    fn accrue_revenue(&self) -> (Vec<YearlyRevenue>, f64) {
        let inputs = self.inputs();
        let building = &inputs.building;
        let mut prices = PriceState::from_base(&inputs.base_prices);

        let vip_total = building.saleable_vip_area();
        let mezz_total = building.saleable_mezzanine_area();
        let admin_total = building.saleable_admin_area();

        let mut total_revenues = 0.0;
        let mut yearly = Vec::with_capacity(inputs.plan.len());

        for plan_row in inputs.plan.rows() {
            prices.enter_year(plan_row);

            let mut row = YearlyRevenue::new(plan_row.year);
            row.vip_area = vip_total * plan_row.vip_share;
            row.mezz_area = mezz_total * plan_row.mezz_share;
            row.admin_area = admin_total * plan_row.admin_share;

            row.vip_price = prices.vip_price;
            row.mezz_price = prices.mezz_price;
            row.admin_price = prices.admin_price;

            row.vip_revenue = row.vip_area * row.vip_price;
            row.mezz_revenue = row.mezz_area * row.mezz_price;
            row.admin_revenue = row.admin_area * row.admin_price;

            row.total = row.vip_revenue + row.mezz_revenue + row.admin_revenue;
            total_revenues += row.total;

            debug!("year {}: revenue={:.2}", row.year, row.total);
            yearly.push(row);
        }

        (yearly, total_revenues)
    }

    /// IRR of the development: total cost paid at the start of the first plan
    /// year, each year's revenue received at the start of the following year
    fn calculate_xirr(&self, yearly: &[YearlyRevenue], total_cost: f64) -> Option<f64> {
        let first_year = yearly.first()?.year;
        let Some(start) = NaiveDate::from_ymd_opt(first_year, 1, 1) else {
            warn!("year {} is out of range for IRR dating", first_year);
            return None;
        };

        let mut flows = Vec::with_capacity(yearly.len() + 1);
        flows.push(DatedCashflow::new(start, -total_cost));
        for row in yearly {
            let Some(date) = row.year.checked_add(1).and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            else {
                warn!("year {} is out of range for IRR dating", row.year);
                return None;
            };
            flows.push(DatedCashflow::new(date, row.total));
        }

        let rate = xirr(&flows);
        if rate.is_none() {
            debug!("no IRR exists for this cash-flow schedule");
        }
        rate.map(|r| r * 100.0)
    }
}

/// Profit, ROI and break-even ratios, each guarded against a zero divisor
fn calculate_totals(total_revenues: f64, costs: &CostBreakdown) -> ProjectionTotals {
    let total_cost = costs.total_cost;
    let net_operating_profit = total_revenues - total_cost;

    // Margin is rounded as a fraction, then scaled
    let net_operating_profit_percent = if total_revenues > 0.0 {
        round2(net_operating_profit / total_revenues) * 100.0
    } else {
        0.0
    };

    let roi = if total_cost > 0.0 {
        round2(net_operating_profit / total_cost * 100.0)
    } else {
        0.0
    };

    let break_even_percent = if total_revenues > 0.0 {
        round2(total_cost / total_revenues * 100.0)
    } else {
        0.0
    };

    ProjectionTotals {
        total_revenues,
        net_operating_profit,
        net_operating_profit_percent,
        roi,
        break_even_percent,
    }
}

/// Validate inputs and run a projection in one step
pub fn project(inputs: &ProjectionInputs) -> Result<ProjectionResult, ValidationError> {
    Ok(ProjectionEngine::try_from_inputs(inputs.clone())?.project())
}
