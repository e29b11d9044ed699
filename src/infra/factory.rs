use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use crate::domain::services::auth_service::hash_password;
use crate::infra::repositories::{
    postgres_user_repo::PostgresUserRepo, postgres_auth_repo::PostgresAuthRepo,
    postgres_default_schedule_repo::PostgresDefaultScheduleRepo, postgres_schedule_repo::PostgresScheduleRepo,
    postgres_booking_repo::PostgresBookingRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_auth_repo::SqliteAuthRepo,
    sqlite_default_schedule_repo::SqliteDefaultScheduleRepo, sqlite_schedule_repo::SqliteScheduleRepo,
    sqlite_booking_repo::SqliteBookingRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState::new(
            config.clone(),
            Arc::new(PostgresUserRepo::new(pool.clone())),
            Arc::new(PostgresAuthRepo::new(pool.clone())),
            Arc::new(PostgresDefaultScheduleRepo::new(pool.clone())),
            Arc::new(PostgresScheduleRepo::new(pool.clone())),
            Arc::new(PostgresBookingRepo::new(pool)),
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
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

        run_sqlite_migrations(&pool).await;

        AppState::new(
            config.clone(),
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteAuthRepo::new(pool.clone())),
            Arc::new(SqliteDefaultScheduleRepo::new(pool.clone())),
            Arc::new(SqliteScheduleRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool)),
        )
    };

    if let Err(e) = ensure_admin(&state).await {
        warn!("Admin bootstrap failed: {}", e);
    }
    state
}

/// Creates the first admin from config when the user table is empty.
pub async fn ensure_admin(state: &AppState) -> Result<(), AppError> {
    let (Some(username), Some(password)) = (&state.config.admin_username, &state.config.admin_password) else {
        return Ok(());
    };
    if state.user_repo.count().await? > 0 {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    let admin = state.user_repo.create(&User::new(username.clone(), password_hash, Role::Admin)).await?;
    info!("Bootstrapped admin user {}", admin.id);
    Ok(())
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
