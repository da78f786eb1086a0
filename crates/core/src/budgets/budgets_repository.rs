use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::budgets::budgets_model::{Budget, NewBudget};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::{budgets, categories};
use crate::Error;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        BudgetRepository { pool }
    }
}

impl BudgetRepositoryTrait for BudgetRepository {
    fn list_with_category(&self, user_id: &str) -> Result<Vec<(Budget, String)>> {
        let mut conn = get_connection(&self.pool)?;

        Ok(budgets::table
            .inner_join(categories::table.on(categories::id.eq(budgets::category_id)))
            .filter(budgets::user_id.eq(user_id))
            .select((Budget::as_select(), categories::name))
            .order((
                budgets::year.asc(),
                budgets::month.asc(),
                categories::name.asc(),
            ))
            .load::<(Budget, String)>(&mut conn)?)
    }

    fn list_for_month(
        &self,
        user_id: &str,
        month: i32,
        year: i32,
    ) -> Result<Vec<(Budget, String)>> {
        let mut conn = get_connection(&self.pool)?;

        Ok(budgets::table
            .inner_join(categories::table.on(categories::id.eq(budgets::category_id)))
            .filter(budgets::user_id.eq(user_id))
            .filter(budgets::month.eq(month))
            .filter(budgets::year.eq(year))
            .select((Budget::as_select(), categories::name))
            .order(categories::name.asc())
            .load::<(Budget, String)>(&mut conn)?)
    }

    fn upsert(&self, mut new_budget: NewBudget) -> Result<(Budget, bool)> {
        let mut conn = get_connection(&self.pool)?;

        // The existence probe and the write share one transaction so the
        // created flag matches what the upsert actually did.
        conn.transaction::<_, Error, _>(|conn| {
            let existing: Option<String> = budgets::table
                .filter(budgets::user_id.eq(&new_budget.user_id))
                .filter(budgets::category_id.eq(&new_budget.category_id))
                .filter(budgets::month.eq(new_budget.month))
                .filter(budgets::year.eq(new_budget.year))
                .select(budgets::id)
                .first::<String>(conn)
                .optional()?;

            new_budget.id = Some(Uuid::new_v4().to_string());
            let monthly_limit = new_budget.monthly_limit;

            let saved: Budget = diesel::insert_into(budgets::table)
                .values(&new_budget)
                .on_conflict((
                    budgets::user_id,
                    budgets::category_id,
                    budgets::month,
                    budgets::year,
                ))
                .do_update()
                .set((
                    budgets::monthly_limit.eq(monthly_limit),
                    budgets::updated_at.eq(diesel::dsl::now),
                ))
                .returning(budgets::all_columns)
                .get_result(conn)?;

            Ok((saved, existing.is_none()))
        })
    }
}
