//! Building geometry, floor areas and construction unit costs

use serde::{Deserialize, Serialize};

/// Physical description of the development and its cost schedule
///
/// Areas are in square meters, unit costs are per square meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    // Floor counts
    /// Floors above ground (informational only)
    pub total_floors: u32,
    /// Repeated administrative floors
    pub administrative_floors: u32,
    pub technical_floors: u32,
    pub ground_floors: u32,
    pub mezzanine_floors: u32,
    pub vip_floors: u32,
    pub basement_floors: u32,

    // Areas (m²)
    pub total_land_area: f64,
    pub ground_floor_area: f64,
    pub mezzanine_floor_area: f64,
    pub vip_floor_area: f64,
    /// Area of a single repeated administrative floor
    pub administrative_floor_area: f64,
    pub technical_floor_area: f64,
    /// Area of a single basement floor
    pub basement_floor_area: f64,
    pub shared_areas: f64,

    // Unit costs (per m²)
    /// Land purchase price
    pub price_per_sq_meter: f64,
    pub administrative_cost: f64,
    pub parking_cost: f64,
    pub technical_floors_cost: f64,
    pub shared_areas_cost: f64,

    /// Sales commission as a percentage (0-100) of total revenue
    pub sales_commission_pct: f64,

    /// Tax rate percentage, displayed alongside the revenue schedule but not
    /// folded into any total
    pub tax_rate: f64,
}

impl BuildingConfig {
    /// Administrative, mezzanine, VIP and ground floor area combined
    ///
    /// This is the area costed at the administrative construction rate.
    pub fn total_admin_area(&self) -> f64 {
        self.administrative_floor_area * self.administrative_floors as f64
            + self.mezzanine_floor_area
            + self.vip_floor_area
            + self.ground_floor_area
    }

    /// Basement floor area times the number of basement floors
    pub fn total_basement_area(&self) -> f64 {
        self.basement_floor_area * self.basement_floors as f64
    }

    /// Saleable VIP area across all VIP floors
    pub fn saleable_vip_area(&self) -> f64 {
        self.vip_floor_area * self.vip_floors as f64
    }

    /// Saleable mezzanine area across all mezzanine floors
    pub fn saleable_mezzanine_area(&self) -> f64 {
        self.mezzanine_floor_area * self.mezzanine_floors as f64
    }

    /// Saleable area across the repeated administrative floors
    pub fn saleable_admin_area(&self) -> f64 {
        self.administrative_floor_area * self.administrative_floors as f64
    }
}

impl Default for BuildingConfig {
    /// Reference 22-floor tower used as the starting point for new studies
    fn default() -> Self {
        Self {
            total_floors: 22,
            administrative_floors: 20,
            technical_floors: 1,
            ground_floors: 1,
            mezzanine_floors: 1,
            vip_floors: 1,
            basement_floors: 4,

            total_land_area: 3200.0,
            ground_floor_area: 940.0,
            mezzanine_floor_area: 780.0,
            vip_floor_area: 780.0,
            administrative_floor_area: 1350.0,
            technical_floor_area: 1350.0,
            basement_floor_area: 3200.0,
            shared_areas: 2260.0,

            price_per_sq_meter: 20000.0,
            administrative_cost: 2600.0,
            parking_cost: 2200.0,
            technical_floors_cost: 1400.0,
            shared_areas_cost: 300.0,
            sales_commission_pct: 5.0,

            tax_rate: 14.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_areas() {
        let building = BuildingConfig::default();

        // 1350 * 20 + 780 + 780 + 940
        assert_relative_eq!(building.total_admin_area(), 29_500.0);
        assert_relative_eq!(building.total_basement_area(), 12_800.0);
        assert_relative_eq!(building.saleable_admin_area(), 27_000.0);
        assert_relative_eq!(building.saleable_vip_area(), 780.0);
    }

    #[test]
    fn test_saleable_area_scales_with_floor_count() {
        let building = BuildingConfig {
            vip_floors: 2,
            mezzanine_floors: 3,
            ..Default::default()
        };

        assert_relative_eq!(building.saleable_vip_area(), 1560.0);
        assert_relative_eq!(building.saleable_mezzanine_area(), 2340.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let building: BuildingConfig =
            serde_json::from_str(r#"{ "administrative_floors": 10 }"#).unwrap();

        assert_eq!(building.administrative_floors, 10);
        assert_eq!(building.basement_floors, 4);
        assert_relative_eq!(building.price_per_sq_meter, 20000.0);
    }
}
