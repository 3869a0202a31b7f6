//! Development cost breakdown

use serde::{Deserialize, Serialize};

use crate::config::BuildingConfig;

/// Land, construction and sales costs of the development
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Area costed at the administrative rate (admin, mezzanine, VIP, ground)
    pub total_admin_area: f64,
    pub total_basement_area: f64,

    pub land_cost: f64,
    pub admin_floors_cost: f64,
    pub basement_floors_cost: f64,
    pub technical_area_cost: f64,
    pub shared_areas_cost: f64,

    /// Commission on total revenue, zero until revenue is known
    pub sales_commission: f64,
    pub total_variable_cost: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Land and construction costs, before any sales commission
    pub fn construction(building: &BuildingConfig) -> Self {
        let total_admin_area = building.total_admin_area();
        let total_basement_area = building.total_basement_area();

        let mut costs = Self {
            total_admin_area,
            total_basement_area,
            land_cost: building.total_land_area * building.price_per_sq_meter,
            admin_floors_cost: total_admin_area * building.administrative_cost,
            basement_floors_cost: total_basement_area * building.parking_cost,
            technical_area_cost: building.technical_floor_area * building.technical_floors_cost,
            shared_areas_cost: building.shared_areas * building.shared_areas_cost,
            sales_commission: 0.0,
            total_variable_cost: 0.0,
            total_cost: 0.0,
        };
        costs.update_totals();
        costs
    }

    /// Charge the sales commission on the accrued revenue and refresh the totals
    pub fn apply_sales_commission(&mut self, commission_pct: f64, total_revenues: f64) {
        self.sales_commission = (commission_pct / 100.0) * total_revenues;
        self.update_totals();
    }

    fn update_totals(&mut self) {
        self.total_variable_cost = self.admin_floors_cost
            + self.basement_floors_cost
            + self.technical_area_cost
            + self.shared_areas_cost
            + self.sales_commission;
        self.total_cost = self.land_cost + self.total_variable_cost;
    }
}
