//! Projection engine: costs, yearly revenue, discounting and investment metrics

mod state;
mod engine;
mod cashflows;
mod costs;
mod discount;
mod irr;

pub use state::PriceState;
pub use engine::{project, ProjectionEngine};
pub use cashflows::{
    BreakEvenRow, DiscountRow, InvestmentMetrics, ProjectionResult, ProjectionSummary,
    ProjectionTotals, YearlyRevenue,
};
pub use costs::CostBreakdown;
pub use discount::{discounted_payback, DiscountCurve};
pub use irr::{xirr, xnpv, DatedCashflow};

/// Round to two decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(12.0), 12.0);
    }
}
