pub mod dashboard_model;
pub mod dashboard_service;
pub mod dashboard_traits;

pub use dashboard_model::*;
pub use dashboard_service::{DashboardService, PeriodMode};
pub use dashboard_traits::DashboardServiceTrait;
