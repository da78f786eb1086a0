use std::sync::Arc;

use crate::budgets::budgets_model::{BudgetWithCategory, NewBudget};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::Result;
use crate::Error;
use async_trait::async_trait;

pub struct BudgetService<B: BudgetRepositoryTrait, C: CategoryRepositoryTrait> {
    budget_repo: Arc<B>,
    category_repo: Arc<C>,
}

impl<B: BudgetRepositoryTrait, C: CategoryRepositoryTrait> BudgetService<B, C> {
    pub fn new(budget_repo: Arc<B>, category_repo: Arc<C>) -> Self {
        BudgetService {
            budget_repo,
            category_repo,
        }
    }
}

#[async_trait]
impl<B, C> BudgetServiceTrait for BudgetService<B, C>
where
    B: BudgetRepositoryTrait + Send + Sync,
    C: CategoryRepositoryTrait + Send + Sync,
{
    fn list_budgets(&self, user_id: &str) -> Result<Vec<BudgetWithCategory>> {
        Ok(self
            .budget_repo
            .list_with_category(user_id)?
            .into_iter()
            .map(|(budget, name)| BudgetWithCategory::from_parts(budget, name))
            .collect())
    }

    async fn upsert_budget(
        &self,
        user_id: &str,
        category_name: &str,
        monthly_limit: f64,
        month: i32,
        year: i32,
    ) -> Result<(BudgetWithCategory, bool)> {
        let category = self
            .category_repo
            .find_by_name(user_id, category_name)?
            .ok_or_else(|| Error::NotFound("Category".to_string()))?;

        let (budget, created) = self.budget_repo.upsert(NewBudget {
            id: None,
            user_id: user_id.to_string(),
            category_id: category.id,
            monthly_limit,
            month,
            year,
        })?;

        Ok((BudgetWithCategory::from_parts(budget, category.name), created))
    }
}
