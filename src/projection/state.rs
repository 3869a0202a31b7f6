//! Running unit prices carried through the sales plan

use crate::config::{BasePrices, YearPlanRow};

/// Unit sale prices in effect for the plan year being accrued
#[derive(Debug, Clone, PartialEq)]
pub struct PriceState {
    /// Number of plan rows entered so far
    pub rows_entered: u32,

    pub vip_price: f64,
    pub mezz_price: f64,
    pub admin_price: f64,
}

impl PriceState {
    /// Start from the base prices, before the first plan row
    pub fn from_base(prices: &BasePrices) -> Self {
        Self {
            rows_entered: 0,
            vip_price: prices.vip,
            mezz_price: prices.mezzanine,
            admin_price: prices.administrative,
        }
    }

    /// Move into the next plan row
    ///
    /// The first row sells at base prices. Every later row compounds all
    /// three prices by its own `price_increase`.
    pub fn enter_year(&mut self, row: &YearPlanRow) {
        if self.rows_entered > 0 {
            let escalation = 1.0 + row.price_increase;
            self.vip_price *= escalation;
            self.mezz_price *= escalation;
            self.admin_price *= escalation;
        }
        self.rows_entered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_row_keeps_base_prices() {
        let mut state = PriceState::from_base(&BasePrices::default());
        state.enter_year(&YearPlanRow::new(2025, 0.5, 0.0, 0.0, 0.0));

        assert_relative_eq!(state.vip_price, 23000.0);
        assert_relative_eq!(state.admin_price, 13000.0);
        assert_eq!(state.rows_entered, 1);
    }

    #[test]
    fn test_each_row_uses_its_own_increase() {
        let mut state = PriceState::from_base(&BasePrices::default());
        state.enter_year(&YearPlanRow::new(2025, 0.0, 0.0, 0.0, 0.0));
        state.enter_year(&YearPlanRow::new(2026, 0.10, 0.0, 0.0, 0.0));
        state.enter_year(&YearPlanRow::new(2027, 0.05, 0.0, 0.0, 0.0));

        assert_relative_eq!(state.mezz_price, 17000.0 * 1.10 * 1.05, max_relative = 1e-12);
    }
}
