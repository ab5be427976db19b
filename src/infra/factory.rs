use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::auth_service::AuthService;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_category_repo::PostgresCategoryRepo, postgres_payment_repo::PostgresPaymentRepo,
    postgres_tenant_repo::PostgresTenantRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_category_repo::SqliteCategoryRepo, sqlite_payment_repo::SqlitePaymentRepo,
    sqlite_tenant_repo::SqliteTenantRepo, sqlite_user_repo::SqliteUserRepo,
};

const SLOW_QUERY_THRESHOLD: Duration = Duration::from_millis(500);

fn is_postgres_url(url: &str) -> bool {
    ["postgres://", "postgresql://"].iter().any(|scheme| url.starts_with(scheme))
}

/// Statement logging shared by both backends: every query at debug, slow ones at warn.
fn with_statement_logging<O: ConnectOptions>(opts: O) -> O {
    opts.log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, SLOW_QUERY_THRESHOLD)
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let auth_service = Arc::new(AuthService::new(config));

    if is_postgres_url(&config.database_url) {
        info!("Using PostgreSQL storage");
        let pool = connect_postgres(&config.database_url).await;
        postgres_state(config, pool, auth_service)
    } else {
        info!("Using SQLite storage (WAL journal)");
        let pool = connect_sqlite(&config.database_url).await;
        sqlite_state(config, pool, auth_service)
    }
}

fn postgres_state(config: &Config, pool: PgPool, auth_service: Arc<AuthService>) -> AppState {
    AppState {
        config: config.clone(),
        tenant_repo: Arc::new(PostgresTenantRepo::new(pool.clone())),
        user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
        category_repo: Arc::new(PostgresCategoryRepo::new(pool.clone())),
        payment_repo: Arc::new(PostgresPaymentRepo::new(pool)),
        auth_service,
    }
}

/// Wires the SQLite repositories over an existing, migrated pool.
pub fn sqlite_state(config: &Config, pool: SqlitePool, auth_service: Arc<AuthService>) -> AppState {
    AppState {
        config: config.clone(),
        tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        category_repo: Arc::new(SqliteCategoryRepo::new(pool.clone())),
        payment_repo: Arc::new(SqlitePaymentRepo::new(pool)),
        auth_service,
    }
}

async fn connect_postgres(url: &str) -> PgPool {
    let opts: PgConnectOptions = url.parse().expect("DATABASE_URL is not a valid Postgres URL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(with_statement_logging(opts))
        .await
        .expect("Could not connect to Postgres");

    sqlx::migrate!("./migrations/postgres")
        .run(&pool)
        .await
        .expect("Postgres migrations failed");

    pool
}

async fn connect_sqlite(url: &str) -> SqlitePool {
    // Category deletion relies on ON DELETE SET NULL, which needs foreign keys enabled
    let opts = SqliteConnectOptions::from_str(url)
        .expect("DATABASE_URL is not a valid SQLite URL")
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(with_statement_logging(opts))
        .await
        .expect("Could not open SQLite database");

    sqlx::migrate!("./migrations/sqlite")
        .run(&pool)
        .await
        .expect("SQLite migrations failed");

    pool
}
