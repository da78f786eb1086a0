use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use moneylens_core::budgets::BudgetWithCategory;
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct UpsertBudgetRequest {
    category: Option<String>,
    monthly_limit: Option<f64>,
    month: Option<i32>,
    year: Option<i32>,
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<BudgetWithCategory>>> {
    let budgets = state.budget_service.list_budgets(&user.id)?;
    Ok(Json(budgets))
}

async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpsertBudgetRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let (Some(category), Some(monthly_limit), Some(month), Some(year)) = (
        payload.category,
        payload.monthly_limit,
        payload.month,
        payload.year,
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let (_, created) = state
        .budget_service
        .upsert_budget(&user.id, &category, monthly_limit, month, year)
        .await?;

    if created {
        Ok((
            StatusCode::CREATED,
            Json(json!({"message": "Budget added successfully"})),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(json!({"message": "Budget updated successfully"})),
        ))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/budgets", get(list_budgets).post(upsert_budget))
}
