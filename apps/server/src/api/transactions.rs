use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use moneylens_core::transactions::{
    TransactionFilter, TransactionInput, TransactionPatch, TransactionType,
    TransactionWithCategory,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Accepts both a bare date and a full date-time in ISO-8601 form.
fn parse_iso_datetime(raw: &str) -> ApiResult<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .or_else(|_| raw.parse::<NaiveDate>().map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| ApiError::BadRequest("Invalid date format".into()))
}

/// Shared by create and update; create enforces presence in the handler,
/// update treats absent fields as "keep the stored value".
#[derive(Deserialize)]
struct TransactionRequest {
    title: Option<String>,
    amount: Option<f64>,
    #[serde(rename = "type")]
    transaction_type: Option<String>,
    date: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct FilterParams {
    month: Option<String>,
    year: Option<String>,
    category: Option<String>,
    search: Option<String>,
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TransactionWithCategory>>> {
    let transactions = state.transaction_service.list_transactions(&user.id)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<TransactionRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let TransactionRequest {
        title,
        amount,
        transaction_type,
        date,
        category,
        description,
    } = payload;
    let (Some(title), Some(amount), Some(transaction_type), Some(date), Some(category)) =
        (title, amount, transaction_type, date, category)
    else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };
    if title.is_empty() || transaction_type.is_empty() || category.is_empty() {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    }

    let date = parse_iso_datetime(&date)?;
    let transaction_type: TransactionType = transaction_type.parse()?;

    state
        .transaction_service
        .create_transaction(
            &user.id,
            TransactionInput {
                title,
                amount,
                transaction_type,
                date,
                category_name: category,
                description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Transaction added successfully"})),
    ))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<TransactionWithCategory>> {
    let transaction = state.transaction_service.get_transaction(&user.id, &id)?;
    Ok(Json(transaction))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<TransactionRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let date = payload
        .date
        .as_deref()
        .map(parse_iso_datetime)
        .transpose()?;
    let transaction_type = payload
        .transaction_type
        .as_deref()
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;

    state
        .transaction_service
        .update_transaction(
            &user.id,
            &id,
            TransactionPatch {
                title: payload.title,
                amount: payload.amount,
                transaction_type,
                date,
                category_name: payload.category,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(json!({"message": "Transaction updated successfully"})))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .transaction_service
        .delete_transaction(&user.id, &id)
        .await?;
    Ok(Json(json!({"message": "Transaction deleted successfully"})))
}

async fn filter_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Vec<TransactionWithCategory>>> {
    // Empty query values behave like absent parameters.
    let month_raw = params.month.filter(|s| !s.is_empty());
    let year_raw = params.year.filter(|s| !s.is_empty());

    // The month window only applies when both parts are present.
    let (month, year) = match (month_raw, year_raw) {
        (Some(m), Some(y)) => {
            let invalid = || ApiError::BadRequest("Invalid month or year format".into());
            (
                Some(m.parse::<i32>().map_err(|_| invalid())?),
                Some(y.parse::<i32>().map_err(|_| invalid())?),
            )
        }
        _ => (None, None),
    };

    let transactions = state.transaction_service.filter_transactions(
        &user.id,
        TransactionFilter {
            month,
            year,
            category_name: params.category.filter(|s| !s.is_empty()),
            search_term: params.search.filter(|s| !s.is_empty()),
        },
    )?;
    Ok(Json(transactions))
}

async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let csv = state.transaction_service.export_csv(&user.id)?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"transactions.csv\"",
        ),
    ];
    Ok((headers, csv))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/filter", get(filter_transactions))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/export", get(export_transactions))
}
