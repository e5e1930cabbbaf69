use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::{auth_service::AuthService, ledger::Ledger};
use crate::infra::repositories::{
    sqlite_ledger_repo::SqliteLedgerRepo, sqlite_member_repo::SqliteMemberRepo,
    sqlite_notification_repo::SqliteNotificationRepo, sqlite_project_repo::SqliteProjectRepo,
    sqlite_report_repo::SqliteReportRepo, sqlite_store_repo::SqliteStoreRepo,
    sqlite_technician_repo::SqliteTechnicianRepo, sqlite_transaction_repo::SqliteTransactionRepo,
};
use crate::infra::sms::http_sms_service::HttpSmsService;
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    build_state(config, pool)
}

pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let store_repo = Arc::new(SqliteStoreRepo::new(pool.clone()));
    let member_repo = Arc::new(SqliteMemberRepo::new(pool.clone()));
    let project_repo = Arc::new(SqliteProjectRepo::new(pool.clone()));
    let technician_repo = Arc::new(SqliteTechnicianRepo::new(pool.clone()));
    let ledger_repo = Arc::new(SqliteLedgerRepo::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(store_repo.clone(), config));
    let ledger = Arc::new(Ledger::new(
        member_repo.clone(),
        project_repo.clone(),
        technician_repo.clone(),
        ledger_repo,
    ));
    let sms_service = Arc::new(HttpSmsService::new(
        config.sms_gateway_url.clone(),
        config.sms_gateway_token.clone(),
        config.sms_sign_name.clone(),
    ));

    AppState {
        config: config.clone(),
        store_repo,
        member_repo,
        project_repo,
        technician_repo,
        transaction_repo: Arc::new(SqliteTransactionRepo::new(pool.clone())),
        report_repo: Arc::new(SqliteReportRepo::new(pool.clone())),
        notification_repo: Arc::new(SqliteNotificationRepo::new(pool)),
        auth_service,
        ledger,
        sms_service,
    }
}

pub async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
