use rust_decimal::Decimal;
use serde::Serialize;

/// Expense total for one category inside the dashboard period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
}

/// A month's budget next to what was actually spent in the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetVsActual {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub expense_breakdown: Vec<CategorySpend>,
    /// Reserved for spending-over-time charts; always empty for now.
    pub trend_data: Vec<serde_json::Value>,
    pub budget_vs_actual: Vec<BudgetVsActual>,
}
