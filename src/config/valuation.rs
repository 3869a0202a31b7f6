//! Valuation parameters and base unit sale prices

use serde::{Deserialize, Serialize};

/// Discounting and tax-like parameters
///
/// Only `discount_factor` feeds the projection. The remaining rates are
/// carried through to reports for the reader but are not part of any total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Annual discount rate in percent
    pub discount_factor: f64,
    pub property_transfer_tax: f64,
    pub vat_rate: f64,
    pub zakat_rate: f64,
    pub municipal_fees: f64,
}

impl ValuationConfig {
    /// Annual discount rate as a decimal
    pub fn discount_rate(&self) -> f64 {
        self.discount_factor / 100.0
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            discount_factor: 7.0,
            property_transfer_tax: 5.0,
            vat_rate: 15.0,
            zakat_rate: 2.5,
            municipal_fees: 0.0,
        }
    }
}

/// Unit sale prices (per m²) at the start of the plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasePrices {
    pub vip: f64,
    pub mezzanine: f64,
    pub administrative: f64,
}

impl Default for BasePrices {
    fn default() -> Self {
        Self {
            vip: 23000.0,
            mezzanine: 17000.0,
            administrative: 13000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_rate_is_decimal() {
        let valuation = ValuationConfig {
            discount_factor: 12.5,
            ..Default::default()
        };

        assert_relative_eq!(valuation.discount_rate(), 0.125);
        assert_relative_eq!(ValuationConfig::default().vat_rate, 15.0);
    }
}
