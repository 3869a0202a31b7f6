//! Discounting of the yearly revenue schedule
//!
//! Year `k` of the plan (1-based) is discounted by `(1 + rate)^k`, so even
//! the first plan year is one full period away from the valuation date.

use super::cashflows::{DiscountRow, YearlyRevenue};

/// Flat annual discount curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountCurve {
    /// Annual discount rate as a decimal
    pub annual_rate: f64,
}

impl DiscountCurve {
    /// Create a curve from a decimal annual rate
    pub fn single_rate(annual_rate: f64) -> Self {
        Self { annual_rate }
    }

    /// Create a curve from a rate quoted in percent
    pub fn from_percent(rate_pct: f64) -> Self {
        Self::single_rate(rate_pct / 100.0)
    }

    /// Compounding divisor for a 1-based year index
    pub fn divisor(&self, year_index: u32) -> f64 {
        (1.0 + self.annual_rate).powi(year_index as i32)
    }

    /// Present value of a stream of year-end flows, first flow at year 1
    pub fn present_value(&self, flows: &[f64]) -> f64 {
        flows
            .iter()
            .enumerate()
            .map(|(i, flow)| flow / self.divisor(i as u32 + 1))
            .sum()
    }

    /// Discount every plan year and keep a running cumulative total
    pub fn schedule(&self, yearly: &[YearlyRevenue]) -> Vec<DiscountRow> {
        let mut cumulative = 0.0;
        yearly
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let discounted_flow = row.total / self.divisor(i as u32 + 1);
                cumulative += discounted_flow;
                DiscountRow {
                    year: row.year,
                    flow: row.total,
                    discounted_flow,
                    cumulative,
                }
            })
            .collect()
    }
}

/// Discounted payback period in years
///
/// Counts whole years until cumulative discounted revenue covers the
/// investment, interpolating linearly inside the year it is recovered.
/// Returns `None` if the schedule never covers the investment.
pub fn discounted_payback(schedule: &[DiscountRow], investment: f64) -> Option<f64> {
    if investment <= 0.0 {
        return Some(0.0);
    }

    let mut previous = 0.0;
    for (i, row) in schedule.iter().enumerate() {
        if row.cumulative >= investment {
            let within_year = if row.discounted_flow > 0.0 {
                (investment - previous) / row.discounted_flow
            } else {
                0.0
            };
            return Some(i as f64 + within_year);
        }
        previous = row.cumulative;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn revenue(year: i32, total: f64) -> YearlyRevenue {
        YearlyRevenue { total, ..YearlyRevenue::new(year) }
    }

    #[test]
    fn test_schedule_discount_law() {
        let curve = DiscountCurve::from_percent(7.0);
        let yearly = vec![revenue(2025, 100.0), revenue(2026, 200.0), revenue(2027, 300.0)];

        let schedule = curve.schedule(&yearly);

        assert_eq!(schedule.len(), 3);
        for (k, row) in schedule.iter().enumerate() {
            assert_relative_eq!(
                row.discounted_flow,
                row.flow / 1.07_f64.powi(k as i32 + 1),
                max_relative = 1e-14
            );
            if k > 0 {
                assert_eq!(row.cumulative, schedule[k - 1].cumulative + row.discounted_flow);
            }
        }
        assert_relative_eq!(
            schedule[2].cumulative,
            curve.present_value(&[100.0, 200.0, 300.0]),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_rate_is_undiscounted() {
        let curve = DiscountCurve::single_rate(0.0);
        let schedule = curve.schedule(&[revenue(2025, 50.0), revenue(2026, 70.0)]);

        assert_relative_eq!(schedule[1].cumulative, 120.0);
    }

    #[test]
    fn test_payback_interpolates() {
        let curve = DiscountCurve::single_rate(0.0);
        let schedule = curve.schedule(&[revenue(1, 100.0), revenue(2, 100.0), revenue(3, 100.0)]);

        assert_relative_eq!(discounted_payback(&schedule, 250.0).unwrap(), 2.5);
        assert_relative_eq!(discounted_payback(&schedule, 100.0).unwrap(), 1.0);
        assert_relative_eq!(discounted_payback(&schedule, 0.0).unwrap(), 0.0);
        assert!(discounted_payback(&schedule, 301.0).is_none());
    }
}
