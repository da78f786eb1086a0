use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::budgets::BudgetRepositoryTrait;
use crate::dashboard::dashboard_model::{BudgetVsActual, CategorySpend, DashboardSnapshot};
use crate::dashboard::dashboard_traits::DashboardServiceTrait;
use crate::errors::Result;
use crate::transactions::transactions_service::month_range;
use crate::transactions::TransactionRepositoryTrait;

const SUGGESTIONS: &[&str] = &["You've spent more than usual on dining."];

/// How the dashboard period is derived from the reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodMode {
    /// First of the month up to (exclusive) 31 days later. The window can
    /// spill into the next month, so early-next-month rows are counted too.
    /// Kept as the default because existing clients expect these totals.
    #[default]
    Legacy31Day,
    /// First of the month up to (exclusive) the first of the next month.
    CalendarMonth,
}

impl PeriodMode {
    /// Half-open `[start, end)` window around `reference`.
    pub fn window(&self, reference: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match self {
            PeriodMode::Legacy31Day => {
                let start = NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
                    .unwrap_or_else(|| reference.date())
                    .and_time(NaiveTime::MIN);
                (start, start + Duration::days(31))
            }
            PeriodMode::CalendarMonth => {
                // reference.month() is always 1..=12 so the range exists.
                month_range(reference.year(), reference.month() as i32).unwrap_or_else(|| {
                    let start = reference.date().and_time(NaiveTime::MIN);
                    (start, start + Duration::days(31))
                })
            }
        }
    }
}

pub struct DashboardService<T: TransactionRepositoryTrait, B: BudgetRepositoryTrait> {
    transaction_repo: Arc<T>,
    budget_repo: Arc<B>,
    period_mode: PeriodMode,
}

impl<T: TransactionRepositoryTrait, B: BudgetRepositoryTrait> DashboardService<T, B> {
    pub fn new(transaction_repo: Arc<T>, budget_repo: Arc<B>, period_mode: PeriodMode) -> Self {
        DashboardService {
            transaction_repo,
            budget_repo,
            period_mode,
        }
    }
}

fn decimal(amount: f64) -> Decimal {
    Decimal::from_f64(amount).unwrap_or_default()
}

impl<T, B> DashboardServiceTrait for DashboardService<T, B>
where
    T: TransactionRepositoryTrait + Send + Sync,
    B: BudgetRepositoryTrait + Send + Sync,
{
    fn get_dashboard(&self, user_id: &str, reference: NaiveDateTime) -> Result<DashboardSnapshot> {
        let window = self.period_mode.window(reference);
        let rows = self
            .transaction_repo
            .list_with_category(user_id, Some(window), None)?;

        let mut total_income = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        // Keyed by name for the breakdown, by id for budget lookups.
        let mut by_category_name: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut by_category_id: BTreeMap<String, Decimal> = BTreeMap::new();

        for (transaction, category_name) in &rows {
            let amount = decimal(transaction.amount);
            if transaction.transaction_type == "Income" {
                total_income += amount;
            } else {
                total_expenses += amount;
                *by_category_name.entry(category_name.clone()).or_default() += amount;
                *by_category_id
                    .entry(transaction.category_id.clone())
                    .or_default() += amount;
            }
        }

        let expense_breakdown = by_category_name
            .into_iter()
            .map(|(category, amount)| CategorySpend { category, amount })
            .collect();

        // Budgets are keyed to the reference's calendar month even in the
        // 31-day mode; only the spent window differs.
        let budgets = self.budget_repo.list_for_month(
            user_id,
            reference.month() as i32,
            reference.year(),
        )?;
        let budget_vs_actual = budgets
            .into_iter()
            .map(|(budget, category)| BudgetVsActual {
                category,
                limit: decimal(budget.monthly_limit),
                spent: by_category_id
                    .get(&budget.category_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
            })
            .collect();

        Ok(DashboardSnapshot {
            balance: total_income - total_expenses,
            total_income,
            total_expenses,
            expense_breakdown,
            trend_data: Vec::new(),
            budget_vs_actual,
        })
    }

    fn suggestions(&self) -> Vec<String> {
        SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    }
}
