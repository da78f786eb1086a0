use chrono::NaiveDateTime;

use crate::dashboard::dashboard_model::DashboardSnapshot;
use crate::errors::Result;

/// Trait for dashboard aggregation. `reference` is the instant the period is
/// anchored to, normally "now"; tests pass a fixed timestamp.
pub trait DashboardServiceTrait: Send + Sync {
    fn get_dashboard(&self, user_id: &str, reference: NaiveDateTime) -> Result<DashboardSnapshot>;

    /// Static spending hints shown on the dashboard.
    fn suggestions(&self) -> Vec<String>;
}
