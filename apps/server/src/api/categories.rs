use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use moneylens_core::categories::Category;
use serde::Deserialize;
use serde_json::json;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct CreateCategoryRequest {
    name: Option<String>,
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.category_service.list_categories(&user.id)?;
    Ok(Json(categories))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    // An absent name and an empty name get the same rejection.
    let name = payload.name.unwrap_or_default();
    state.category_service.create_category(&user.id, name).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Category added successfully"})),
    ))
}

async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    state.category_service.delete_category(&user.id, &id).await?;
    Ok(Json(json!({"message": "Category deleted successfully"})))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
}
