//! Input validation at the configuration boundary
//!
//! The projection formulas are plain arithmetic, so a single NaN or infinite
//! input would silently poison every figure downstream. Inputs are checked
//! once here and the engine only accepts [`ValidatedInputs`].

use thiserror::Error;

use super::plan::ShareCategory;
use super::ProjectionInputs;

/// Errors found while validating projection inputs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: String, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    PercentOutOfRange { field: String, value: f64 },

    #[error("{category} share for year {year} must be between 0 and 1, got {value}")]
    ShareOutOfRange { year: i32, category: &'static str, value: f64 },

    #[error("price increase for year {year} must be greater than -100%, got {value}")]
    PriceIncreaseOutOfRange { year: i32, value: f64 },

    #[error("discount rate must be greater than -100%, got {0}")]
    DiscountRateOutOfRange(f64),

    #[error("invalid number for {field}: '{input}'")]
    InvalidNumber { field: String, input: String },
}

/// Projection inputs that passed [`ProjectionInputs::validate`]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInputs {
    inputs: ProjectionInputs,
}

impl ValidatedInputs {
    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    pub fn into_inner(self) -> ProjectionInputs {
        self.inputs
    }
}

impl ProjectionInputs {
    /// Check every numeric input and wrap the result for the engine
    pub fn validate(self) -> Result<ValidatedInputs, ValidationError> {
        let b = &self.building;
        for (field, value) in [
            ("total_land_area", b.total_land_area),
            ("ground_floor_area", b.ground_floor_area),
            ("mezzanine_floor_area", b.mezzanine_floor_area),
            ("vip_floor_area", b.vip_floor_area),
            ("administrative_floor_area", b.administrative_floor_area),
            ("technical_floor_area", b.technical_floor_area),
            ("basement_floor_area", b.basement_floor_area),
            ("shared_areas", b.shared_areas),
            ("price_per_sq_meter", b.price_per_sq_meter),
            ("administrative_cost", b.administrative_cost),
            ("parking_cost", b.parking_cost),
            ("technical_floors_cost", b.technical_floors_cost),
            ("shared_areas_cost", b.shared_areas_cost),
            ("tax_rate", b.tax_rate),
        ] {
            non_negative(field, value)?;
        }
        percentage("sales_commission_pct", b.sales_commission_pct)?;

        for row in self.plan.rows() {
            let increase = finite("price_increase", row.price_increase)?;
            if increase <= -1.0 {
                return Err(ValidationError::PriceIncreaseOutOfRange {
                    year: row.year,
                    value: increase,
                });
            }
            for category in ShareCategory::ALL {
                let share = row.share(category);
                if !(0.0..=1.0).contains(&share) {
                    return Err(ValidationError::ShareOutOfRange {
                        year: row.year,
                        category: category.label(),
                        value: share,
                    });
                }
            }
        }

        let v = &self.valuation;
        let discount = finite("discount_factor", v.discount_factor)?;
        if discount <= -100.0 {
            return Err(ValidationError::DiscountRateOutOfRange(discount));
        }
        for (field, value) in [
            ("property_transfer_tax", v.property_transfer_tax),
            ("vat_rate", v.vat_rate),
            ("zakat_rate", v.zakat_rate),
            ("municipal_fees", v.municipal_fees),
        ] {
            non_negative(field, value)?;
        }

        let p = &self.base_prices;
        for (field, value) in [
            ("vip_price", p.vip),
            ("mezzanine_price", p.mezzanine),
            ("administrative_price", p.administrative),
        ] {
            non_negative(field, value)?;
        }

        Ok(ValidatedInputs { inputs: self })
    }
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field: field.to_string(), value })
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field: field.to_string(), value });
    }
    Ok(value)
}

fn percentage(field: &str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::PercentOutOfRange { field: field.to_string(), value });
    }
    Ok(value)
}

/// Parse a form-style numeric field
///
/// Surrounding whitespace and thousands separators are ignored and empty
/// input reads as 0. Text that is not a finite number is an error.
pub fn parse_amount(field: &str, input: &str) -> Result<f64, ValidationError> {
    let normalized = input.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = normalized.parse().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        input: input.to_string(),
    })?;
    finite(field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{YearPlan, YearPlanRow};

    #[test]
    fn test_defaults_are_valid() {
        assert!(ProjectionInputs::default().validate().is_ok());
    }

    #[test]
    fn test_nan_area_rejected() {
        let mut inputs = ProjectionInputs::default();
        inputs.building.vip_floor_area = f64::NAN;

        match inputs.validate() {
            Err(ValidationError::NonFinite { field, .. }) => assert_eq!(field, "vip_floor_area"),
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut inputs = ProjectionInputs::default();
        inputs.building.parking_cost = -1.0;

        assert!(matches!(inputs.validate(), Err(ValidationError::Negative { .. })));
    }

    #[test]
    fn test_commission_over_100_rejected() {
        let mut inputs = ProjectionInputs::default();
        inputs.building.sales_commission_pct = 120.0;

        assert!(matches!(
            inputs.validate(),
            Err(ValidationError::PercentOutOfRange { .. })
        ));
    }

    #[test]
    fn test_share_out_of_range_rejected() {
        let mut inputs = ProjectionInputs::default();
        inputs.plan = YearPlan::new(vec![YearPlanRow::new(2025, 0.0, 1.5, 0.0, 0.0)]);

        let err = inputs.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::ShareOutOfRange { year: 2025, category: "VIP", value: 1.5 }
        );
    }

    #[test]
    fn test_share_overflow_across_years_is_not_an_error() {
        let mut inputs = ProjectionInputs::default();
        inputs.plan = YearPlan::new(vec![
            YearPlanRow::new(2025, 0.0, 0.8, 0.0, 0.0),
            YearPlanRow::new(2026, 0.0, 0.8, 0.0, 0.0),
        ]);

        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_discount_rate_floor() {
        let mut inputs = ProjectionInputs::default();
        inputs.valuation.discount_factor = -100.0;

        assert_eq!(
            inputs.validate().unwrap_err(),
            ValidationError::DiscountRateOutOfRange(-100.0)
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("land", " 3,200 ").unwrap(), 3200.0);
        assert_eq!(parse_amount("land", "").unwrap(), 0.0);
        assert_eq!(parse_amount("rate", "7.5").unwrap(), 7.5);
        assert!(matches!(
            parse_amount("land", "abc"),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_amount("land", "NaN"),
            Err(ValidationError::NonFinite { .. })
        ));
    }
}
