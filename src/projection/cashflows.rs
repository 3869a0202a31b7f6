//! Output structures for projections

use serde::{Deserialize, Serialize};

use crate::config::ShareUsage;
use super::costs::CostBreakdown;

/// Sales accrued in one plan year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRevenue {
    pub year: i32,

    // Area sold this year (m²)
    pub vip_area: f64,
    pub mezz_area: f64,
    pub admin_area: f64,

    // Running unit prices for this year
    pub vip_price: f64,
    pub mezz_price: f64,
    pub admin_price: f64,

    // Revenue per category
    pub vip_revenue: f64,
    pub mezz_revenue: f64,
    pub admin_revenue: f64,

    pub total: f64,
}

impl YearlyRevenue {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            vip_area: 0.0,
            mezz_area: 0.0,
            admin_area: 0.0,
            vip_price: 0.0,
            mezz_price: 0.0,
            admin_price: 0.0,
            vip_revenue: 0.0,
            mezz_revenue: 0.0,
            admin_revenue: 0.0,
            total: 0.0,
        }
    }
}

/// Profitability ratios over the whole plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionTotals {
    pub total_revenues: f64,
    pub net_operating_profit: f64,
    /// Profit margin in percent, rounded to whole hundredths of a fraction
    pub net_operating_profit_percent: f64,
    /// Return on total cost in percent (2dp)
    pub roi: f64,
    /// Total cost as a percentage of total revenue (2dp)
    pub break_even_percent: f64,
}

/// One row of the discounted revenue schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRow {
    pub year: i32,
    pub flow: f64,
    pub discounted_flow: f64,
    pub cumulative: f64,
}

/// Revenue needed in each year to cover costs at the break-even percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenRow {
    pub year: i32,
    pub revenue: f64,
    pub break_even_portion: f64,
}

/// Investment appraisal figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// Cumulative discounted revenue less total cost
    pub xnpv: f64,
    /// Internal rate of return in percent, if one exists
    pub xirr: Option<f64>,
    /// Discounted payback period in years, if costs are ever recovered
    pub dpp: Option<f64>,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub costs: CostBreakdown,
    pub yearly: Vec<YearlyRevenue>,
    pub totals: ProjectionTotals,
    pub share_usage: ShareUsage,
    pub discount_schedule: Vec<DiscountRow>,
    pub break_even_schedule: Vec<BreakEvenRow>,
    pub metrics: InvestmentMetrics,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let peak = self
            .yearly
            .iter()
            .max_by(|a, b| a.total.total_cmp(&b.total));

        ProjectionSummary {
            plan_years: self.yearly.len() as u32,
            total_cost: self.costs.total_cost,
            total_revenues: self.totals.total_revenues,
            net_operating_profit: self.totals.net_operating_profit,
            roi: self.totals.roi,
            break_even_percent: self.totals.break_even_percent,
            peak_year: peak.map(|r| r.year),
            peak_revenue: peak.map(|r| r.total).unwrap_or(0.0),
            final_cumulative_discounted: self
                .discount_schedule
                .last()
                .map(|r| r.cumulative)
                .unwrap_or(0.0),
            xnpv: self.metrics.xnpv,
            xirr: self.metrics.xirr,
            dpp: self.metrics.dpp,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub plan_years: u32,
    pub total_cost: f64,
    pub total_revenues: f64,
    pub net_operating_profit: f64,
    pub roi: f64,
    pub break_even_percent: f64,
    pub peak_year: Option<i32>,
    pub peak_revenue: f64,
    pub final_cumulative_discounted: f64,
    pub xnpv: f64,
    pub xirr: Option<f64>,
    pub dpp: Option<f64>,
}
