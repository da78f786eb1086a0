use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use moneylens_core::{
    budgets::{BudgetRepository, BudgetService, BudgetServiceTrait},
    categories::{CategoryRepository, CategoryService, CategoryServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait, PeriodMode},
    db,
    transactions::{TransactionRepository, TransactionService, TransactionServiceTrait},
    users::{UserRepository, UserService, UserServiceTrait},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let category_repo = Arc::new(CategoryRepository::new(pool.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone()));

    let period_mode = if config.calendar_month_window {
        PeriodMode::CalendarMonth
    } else {
        PeriodMode::Legacy31Day
    };

    let user_service = Arc::new(UserService::new(user_repo));
    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repo.clone(),
        category_repo.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(budget_repo.clone(), category_repo));
    let dashboard_service = Arc::new(DashboardService::new(
        transaction_repo,
        budget_repo,
        period_mode,
    ));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        category_service,
        transaction_service,
        budget_service,
        dashboard_service,
        auth,
    }))
}
