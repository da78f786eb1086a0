use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use moneylens_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

fn test_config(db_path: String) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        cors_allow: vec!["*".into()],
        request_timeout: Duration::from_secs(5),
        jwt_secret: b"0123456789abcdef0123456789abcdef".to_vec(),
        token_ttl: Duration::from_secs(3600),
        calendar_month_window: false,
    }
}

fn test_app(tmp: &tempfile::TempDir) -> Router {
    let config = test_config(tmp.path().join("test.db").to_string_lossy().to_string());
    let state = build_state(&config).unwrap();
    app_router(state, &config)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter2!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": username, "password": "hunter2!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_and_bad_credentials() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);

    let token = register_and_login(&app, "alice").await;
    assert!(!token.is_empty());

    // Duplicate username is rejected.
    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "username": "alice",
            "email": "second@example.com",
            "password": "hunter2!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");

    // Wrong password and unknown user produce identical failures.
    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({"username": "nobody", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    let (status, _) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({"username": "carol"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transaction_crud_round_trip() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app, "alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/categories",
        Some(&token),
        Some(json!({"name": "Food"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Unknown category on create is a 404.
    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(&token),
        Some(json!({
            "title": "Groceries",
            "amount": 42.5,
            "type": "Expense",
            "date": "2024-03-05",
            "category": "Travel"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");

    let (status, _) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(&token),
        Some(json!({
            "title": "Groceries",
            "amount": 42.5,
            "type": "Expense",
            "date": "2024-03-05",
            "category": "Food",
            "description": "weekly run"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/transactions", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Groceries");
    assert_eq!(listed[0]["type"], "Expense");
    assert_eq!(listed[0]["category"], "Food");
    let id = listed[0]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/transactions/{id}"),
        Some(&token),
        Some(json!({"amount": 50.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], 50.0);
    assert_eq!(body["title"], "Groceries");

    // A malformed date is rejected before anything is written.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/transactions/{id}"),
        Some(&token),
        Some(json!({"date": "not-a-date"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date format");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ownership_is_isolated_between_users() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/categories",
        Some(&alice),
        Some(json!({"name": "Food"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(&alice),
        Some(json!({
            "title": "Groceries",
            "amount": 10.0,
            "type": "Expense",
            "date": "2024-03-05",
            "category": "Food"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Bob sees nothing of Alice's data.
    let (_, body) = send(&app, Method::GET, "/transactions", Some(&bob), None).await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = send(&app, Method::GET, "/categories", Some(&bob), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // Guessing Alice's transaction id looks like a missing record.
    let (_, body) = send(&app, Method::GET, "/transactions", Some(&alice), None).await;
    let id = body.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/transactions/{id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/transactions/{id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn budgets_upsert_and_list() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app, "alice").await;

    send(
        &app,
        Method::POST,
        "/categories",
        Some(&token),
        Some(json!({"name": "Food"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/budgets",
        Some(&token),
        Some(json!({"category": "Food", "monthly_limit": 100.0, "month": 3, "year": 2024})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Budget added successfully");

    let (status, body) = send(
        &app,
        Method::POST,
        "/budgets",
        Some(&token),
        Some(json!({"category": "Food", "monthly_limit": 250.0, "month": 3, "year": 2024})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget updated successfully");

    let (status, body) = send(&app, Method::GET, "/budgets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let budgets = body.as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["category_name"], "Food");
    assert_eq!(budgets[0]["monthly_limit"], 250.0);

    let (status, body) = send(
        &app,
        Method::POST,
        "/budgets",
        Some(&token),
        Some(json!({"category": "Food", "monthly_limit": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields");
}

#[tokio::test]
async fn filter_validation_and_suggestions() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/filter?month=abc&year=2024",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid month or year format");

    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/filter?category=Travel",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");

    // Month 13 is accepted and simply matches nothing.
    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/filter?month=13&year=2024",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::GET, "/suggestions", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["suggestions"].as_array().unwrap().len() == 1);
}

#[tokio::test]
async fn dashboard_reflects_current_month_activity() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app, "alice").await;

    for name in ["Food", "Rent"] {
        send(
            &app,
            Method::POST,
            "/categories",
            Some(&token),
            Some(json!({"name": name})),
        )
        .await;
    }

    // The dashboard is anchored to "now", so the fixtures use today's date.
    let today = chrono::Utc::now().date_naive().to_string();
    for (title, amount, kind, category) in [
        ("Salary", 200.0, "Income", "Food"),
        ("Groceries", 50.0, "Expense", "Food"),
        ("Flat", 30.0, "Expense", "Rent"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/transactions",
            Some(&token),
            Some(json!({
                "title": title,
                "amount": amount,
                "type": kind,
                "date": today,
                "category": category
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let now = chrono::Utc::now();
    use chrono::Datelike;
    send(
        &app,
        Method::POST,
        "/budgets",
        Some(&token),
        Some(json!({
            "category": "Food",
            "monthly_limit": 100.0,
            "month": now.month(),
            "year": now.year()
        })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/dashboard", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_income"], 200.0);
    assert_eq!(body["total_expenses"], 80.0);
    assert_eq!(body["balance"], 120.0);
    assert!(body["trend_data"].as_array().unwrap().is_empty());

    let breakdown = body["expense_breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0]["category"], "Food");
    assert_eq!(breakdown[0]["amount"], 50.0);
    assert_eq!(breakdown[1]["category"], "Rent");
    assert_eq!(breakdown[1]["amount"], 30.0);

    let budget_vs_actual = body["budget_vs_actual"].as_array().unwrap();
    assert_eq!(budget_vs_actual.len(), 1);
    assert_eq!(budget_vs_actual[0]["category"], "Food");
    assert_eq!(budget_vs_actual[0]["limit"], 100.0);
    assert_eq!(budget_vs_actual[0]["spent"], 50.0);
}

#[tokio::test]
async fn export_returns_csv_attachment() {
    let tmp = tempdir().unwrap();
    let app = test_app(&tmp);
    let token = register_and_login(&app, "alice").await;

    send(
        &app,
        Method::POST,
        "/categories",
        Some(&token),
        Some(json!({"name": "Food"})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/transactions",
        Some(&token),
        Some(json!({
            "title": "Groceries",
            "amount": 42.5,
            "type": "Expense",
            "date": "2024-03-05",
            "category": "Food"
        })),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/export")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"transactions.csv\""
    );
    assert_eq!(response.headers()["content-type"], "text/csv");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Title,Amount,Type,Date,Category,Description");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Groceries,42.5,Expense,2024-03-05T00:00:00,Food,"));
}
