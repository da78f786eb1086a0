use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Serialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub monthly_limit: f64,
    pub month: i32,
    pub year: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudget {
    pub id: Option<String>,
    pub user_id: String,
    pub category_id: String,
    pub monthly_limit: f64,
    pub month: i32,
    pub year: i32,
}

/// Read model for budget listings; carries the category name alongside the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetWithCategory {
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    pub monthly_limit: f64,
    pub month: i32,
    pub year: i32,
}

impl BudgetWithCategory {
    pub fn from_parts(budget: Budget, category_name: String) -> Self {
        BudgetWithCategory {
            id: budget.id,
            category_id: budget.category_id,
            category_name,
            monthly_limit: budget.monthly_limit,
            month: budget.month,
            year: budget.year,
        }
    }
}
