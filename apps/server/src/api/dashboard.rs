use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::Utc;
use moneylens_core::dashboard::DashboardSnapshot;
use serde_json::json;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<DashboardSnapshot>> {
    let snapshot = state
        .dashboard_service
        .get_dashboard(&user.id, Utc::now().naive_utc())?;
    Ok(Json(snapshot))
}

async fn get_suggestions(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({"suggestions": state.dashboard_service.suggestions()}))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/suggestions", get(get_suggestions))
}
