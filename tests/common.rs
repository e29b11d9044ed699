#![allow(dead_code)]

use gym_scheduler::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::models::user::{Role, User},
    domain::services::auth_service::hash_password,
    infra::repositories::{
        sqlite_auth_repo::SqliteAuthRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_default_schedule_repo::SqliteDefaultScheduleRepo,
        sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const PASSWORD: &str = "correct-horse";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            gym_timezone: chrono_tz::UTC,
            program_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            admin_username: None,
            admin_password: None,
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteAuthRepo::new(pool.clone())),
            Arc::new(SqliteDefaultScheduleRepo::new(pool.clone())),
            Arc::new(SqliteScheduleRepo::new(pool.clone())),
            Arc::new(SqliteBookingRepo::new(pool.clone())),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn seed_user(&self, username: &str, role: Role) -> User {
        let password_hash = hash_password(PASSWORD).unwrap();
        self.state.user_repo
            .create(&User::new(username.to_string(), password_hash, role))
            .await
            .unwrap()
    }

    /// Seeds a user and logs them in.
    pub async fn seed_and_login(&self, username: &str, role: Role) -> (User, AuthHeaders) {
        let user = self.seed_user(username, role).await;
        let auth = self.login(username, PASSWORD).await;
        (user, auth)
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": username,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let access_token = cookie_value(&response, "access_token")
            .expect("No access_token cookie returned");

        let body_json = parse_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Sends an authenticated request; `body` is sent as JSON.
    pub async fn send(&self, method: &str, uri: &str, auth: &AuthHeaders, body: Option<Value>) -> Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token);

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    /// Creates a weekly template as `auth` and returns its id.
    pub async fn create_template(&self, auth: &AuthHeaders, day_of_week: i32, time: &str, capacity: i32, workout_type: &str) -> String {
        let res = self.send("POST", "/api/v1/default-schedules", auth, Some(serde_json::json!({
            "day_of_week": day_of_week,
            "time": time,
            "capacity": capacity,
            "workout_type": workout_type,
        }))).await;
        assert_eq!(res.status(), axum::http::StatusCode::CREATED);
        parse_body(res).await["id"].as_str().unwrap().to_string()
    }

    pub async fn participants(&self, schedule_id: &str) -> i64 {
        sqlx::query_scalar("SELECT current_participants FROM schedules WHERE id = ?")
            .bind(schedule_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with(&prefix))
        .map(|c| c[prefix.len()..].split(';').next().unwrap_or("").to_string())
}
