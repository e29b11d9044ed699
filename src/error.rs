use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};
use crate::domain::models::UnknownVariant;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Class is full")]
    CapacityExceeded,
    #[error("Already booked for this class")]
    AlreadyBooked,
    #[error("Not booked for this class")]
    NotBooked,
    #[error("Workout type required for day {day_of_week}")]
    WorkoutTypeRequired { day_of_week: u32 },
    #[error("Schedule already exists: {schedule_id}")]
    AlreadyExists { schedule_id: String },
    #[error("Invalid program week: {0}")]
    InvalidWeek(i32),
    #[error("No class currently in session")]
    NoClassInSession,
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Internal | AppError::InternalWithMsg(_) => "INTERNAL",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION",
            AppError::CapacityExceeded => "CAPACITY_EXCEEDED",
            AppError::AlreadyBooked => "ALREADY_BOOKED",
            AppError::NotBooked => "NOT_BOOKED",
            AppError::WorkoutTypeRequired { .. } => "WORKOUT_TYPE_REQUIRED",
            AppError::AlreadyExists { .. } => "ALREADY_EXISTS",
            AppError::InvalidWeek(_) => "INVALID_WEEK",
            AppError::NoClassInSession => "NO_CLASS_IN_SESSION",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal | AppError::InternalWithMsg(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) | AppError::NoClassInSession => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) | AppError::InvalidWeek(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_)
            | AppError::CapacityExceeded
            | AppError::AlreadyBooked
            | AppError::NotBooked
            | AppError::WorkoutTypeRequired { .. }
            | AppError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }
}

impl From<UnknownVariant> for AppError {
    fn from(e: UnknownVariant) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// True when the error is a unique-constraint violation on either backend.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            // 2067 = SQLite Unique Constraint
            // 23505 = PostgreSQL Unique Violation
            let code = db_err.code().unwrap_or_default();
            db_err.is_unique_violation() || code == "2067" || code == "23505"
        }
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Database(e) => {
                if is_unique_violation(e) {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({ "error": "Resource already exists (duplicate entry)", "code": "CONFLICT" }))
                    ).into_response();
                }

                error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Internal => "Internal error".to_string(),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                "Internal error".to_string()
            }
            AppError::NoClassInSession => {
                debug!("No class in session for requested hour");
                self.to_string()
            }
            AppError::NotFound(msg) | AppError::Forbidden(msg) | AppError::Conflict(msg) | AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        let mut body = json!({
            "error": message,
            "code": self.code(),
        });

        if let Value::Object(ref mut map) = body {
            match &self {
                AppError::WorkoutTypeRequired { day_of_week } => {
                    map.insert("day_of_week".into(), json!(day_of_week));
                }
                AppError::AlreadyExists { schedule_id } => {
                    map.insert("schedule_id".into(), json!(schedule_id));
                }
                AppError::InvalidWeek(week) => {
                    map.insert("week".into(), json!(week));
                }
                _ => {}
            }
        }

        (self.status(), Json(body)).into_response()
    }
}
