//! Real-estate projection - deterministic cost and revenue projections for a development
//!
//! This library provides:
//! - Cost breakdown from building geometry and unit costs
//! - Year-by-year sales accrual with compounding price escalation
//! - Profitability, break-even and discounted cash-flow schedules
//! - Investment metrics (XNPV, XIRR, discounted payback)
//! - Multi-scenario sensitivity runs

pub mod config;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use config::{BuildingConfig, ProjectionInputs, ValidationError, YearPlan, YearPlanRow};
pub use projection::{project, ProjectionEngine, ProjectionResult, YearlyRevenue};
pub use scenario::{Scenario, ScenarioRunner};
