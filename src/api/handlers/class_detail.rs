use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::{AppPath, AppQuery};
use crate::api::dtos::requests::{CurrentClassQuery, DetailQuery};
use crate::domain::services::calendar::parse_date;
use crate::error::AppError;
use chrono::{NaiveTime, Timelike, Utc};
use std::sync::Arc;

/// Class at the current gym-local hour. `date` and `hour` override the clock.
pub async fn current_class(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppQuery(query): AppQuery<CurrentClassQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now().with_timezone(&state.config.gym_timezone).naive_local();

    let date = match query.date {
        Some(raw) => parse_date(&raw)?,
        None => now.date(),
    };
    let hour = query.hour.unwrap_or(now.hour());
    let time = NaiveTime::from_hms_opt(hour, 0, 0)
        .ok_or(AppError::Validation("hour must be 0-23".into()))?;

    let view = state.class_detail.current(date.and_time(time), query.week).await?;
    Ok(Json(view))
}

pub async fn schedule_detail(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppPath(id): AppPath<String>,
    AppQuery(query): AppQuery<DetailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.class_detail.for_schedule(&id, query.week).await?;
    Ok(Json(view))
}
