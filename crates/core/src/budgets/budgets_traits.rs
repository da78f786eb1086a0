use crate::budgets::budgets_model::{Budget, BudgetWithCategory, NewBudget};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations.
pub trait BudgetRepositoryTrait: Send + Sync {
    fn list_with_category(&self, user_id: &str) -> Result<Vec<(Budget, String)>>;

    /// Budgets a user defined for one `(month, year)` pair.
    fn list_for_month(&self, user_id: &str, month: i32, year: i32)
        -> Result<Vec<(Budget, String)>>;

    /// Insert or, when a row for `(user_id, category_id, month, year)`
    /// already exists, overwrite its limit. The flag is `true` when a new
    /// row was created.
    fn upsert(&self, new_budget: NewBudget) -> Result<(Budget, bool)>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn list_budgets(&self, user_id: &str) -> Result<Vec<BudgetWithCategory>>;

    /// Set the spending limit for a category in a given month, creating the
    /// budget if none exists yet.
    async fn upsert_budget(
        &self,
        user_id: &str,
        category_name: &str,
        monthly_limit: f64,
        month: i32,
        year: i32,
    ) -> Result<(BudgetWithCategory, bool)>;
}
