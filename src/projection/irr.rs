//! Internal Rate of Return over dated cash flows (XIRR)
//!
//! Flows are discounted by actual days elapsed over a 365-day year, measured
//! from the first flow's date.

use chrono::NaiveDate;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// A cash flow on a calendar date (positive = inflow, negative = outflow)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedCashflow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl DatedCashflow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Calculate the annual IRR of dated cash flows using Newton-Raphson,
/// falling back to bisection when the derivative vanishes or iteration
/// does not converge.
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal (e.g., 0.05 for 5%), or None if no solution found
pub fn xirr(cashflows: &[DatedCashflow]) -> Option<f64> {
    let first = cashflows.first()?;

    if cashflows.iter().all(|cf| cf.amount.abs() < TOLERANCE) {
        return Some(0.0);
    }

    // A rate only exists if money flows both ways
    let has_positive = cashflows.iter().any(|cf| cf.amount > TOLERANCE);
    let has_negative = cashflows.iter().any(|cf| cf.amount < -TOLERANCE);
    if !has_positive || !has_negative {
        return None;
    }

    let timed: Vec<(f64, f64)> = cashflows
        .iter()
        .map(|cf| (year_fraction(first.date, cf.date), cf.amount))
        .collect();

    // NPV tolerance scales with the size of the flows
    let scale = timed.iter().fold(0.0_f64, |acc, &(_, cf)| acc.max(cf.abs()));
    let npv_tolerance = scale * 1e-9;

    let mut rate = 0.1;
    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(&timed, rate);

        if dnpv.abs() < 1e-20 {
            return xirr_bisection(&timed);
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < TOLERANCE {
            // Pinned at a bound is not a root; let bisection decide
            if npv_at_rate(&timed, new_rate).abs() <= npv_tolerance {
                return Some(new_rate);
            }
            break;
        }

        rate = new_rate;
    }

    xirr_bisection(&timed)
}

/// Net present value of dated cash flows at an annual rate
pub fn xnpv(rate: f64, cashflows: &[DatedCashflow]) -> f64 {
    let Some(first) = cashflows.first() else {
        return 0.0;
    };
    cashflows
        .iter()
        .map(|cf| cf.amount / (1.0 + rate).powf(year_fraction(first.date, cf.date)))
        .sum()
}

fn year_fraction(start: NaiveDate, date: NaiveDate) -> f64 {
    (date - start).num_days() as f64 / 365.0
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(timed: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(t, cf) in timed {
        npv += cf / (1.0 + rate).powf(t);
        if t != 0.0 {
            dnpv -= t * cf / (1.0 + rate).powf(t + 1.0);
        }
    }

    (npv, dnpv)
}

fn npv_at_rate(timed: &[(f64, f64)], rate: f64) -> f64 {
    timed.iter().map(|&(t, cf)| cf / (1.0 + rate).powf(t)).sum()
}

fn xirr_bisection(timed: &[(f64, f64)]) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;
    let mut npv_low = npv_at_rate(timed, low);
    let npv_high = npv_at_rate(timed, high);

    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(timed, mid);

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_year_return() {
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), -1000.0),
            DatedCashflow::new(date(2026, 1, 1), 1100.0),
        ];

        let irr = xirr(&flows).unwrap();
        assert!((irr - 0.10).abs() < 1e-6, "Expected ~10% IRR, got {}", irr);
    }

    #[test]
    fn test_two_year_bullet() {
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), -1000.0),
            DatedCashflow::new(date(2026, 1, 1), 0.0),
            DatedCashflow::new(date(2027, 1, 1), 1210.0),
        ];

        let irr = xirr(&flows).unwrap();
        assert!((irr - 0.10).abs() < 1e-6, "Expected ~10% IRR, got {}", irr);
        assert_relative_eq!(xnpv(irr, &flows), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_no_sign_change() {
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), 1000.0),
            DatedCashflow::new(date(2026, 1, 1), 1100.0),
        ];

        assert!(xirr(&flows).is_none());
        assert!(xirr(&[]).is_none());
    }

    #[test]
    fn test_root_below_rate_floor_is_none() {
        // True rate is -99.9%, below the -99% floor
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), -1000.0),
            DatedCashflow::new(date(2026, 1, 1), 1.0),
        ];

        assert!(xirr(&flows).is_none());
    }

    #[test]
    fn test_root_above_rate_cap_is_none() {
        // True rate is 9900%, above the 1000% cap
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), -1.0),
            DatedCashflow::new(date(2026, 1, 1), 100.0),
        ];

        assert!(xirr(&flows).is_none());
    }

    #[test]
    fn test_large_flows_converge() {
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), -200_000_000.0),
            DatedCashflow::new(date(2026, 1, 1), 351_000_000.0),
        ];

        let irr = xirr(&flows).unwrap();
        assert_relative_eq!(irr, 0.755, max_relative = 1e-8);
    }

    #[test]
    fn test_loss_gives_negative_rate() {
        let flows = [
            DatedCashflow::new(date(2025, 1, 1), -1000.0),
            DatedCashflow::new(date(2026, 1, 1), 500.0),
        ];

        let irr = xirr(&flows).unwrap();
        assert!((irr + 0.5).abs() < 1e-6, "Expected ~-50% IRR, got {}", irr);
    }
}
