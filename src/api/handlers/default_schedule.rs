use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::{AppJson, AppPath};
use crate::api::dtos::requests::{MaterializeRequest, TemplateBookRequest, UpsertDefaultScheduleRequest};
use crate::domain::models::schedule::MaterializeResult;
use crate::domain::services::{calendar::parse_date, registry::TemplateInput};
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_default_schedules(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.registry.list().await?))
}

pub async fn get_default_schedule(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.registry.get(&id).await?))
}

pub async fn upsert_default_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppJson(payload): AppJson<UpsertDefaultScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let creating = payload.id.as_deref().is_none_or(str::is_empty);

    let template = state.registry.upsert(&user.0, TemplateInput {
        id: payload.id,
        day_of_week: payload.day_of_week,
        time: payload.time,
        capacity: payload.capacity,
        workout_type: payload.workout_type,
        is_active: payload.is_active,
        coach_id: payload.coach_id,
    }).await?;

    let status = if creating { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(template)))
}

pub async fn delete_default_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    state.registry.delete(&user.0, &id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// 201 with the new instance, or 409 naming the one that already exists.
pub async fn materialize(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<MaterializeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;

    match state.materializer.materialize(&id, date).await? {
        MaterializeResult::Created(schedule) => Ok((StatusCode::CREATED, Json(schedule))),
        MaterializeResult::AlreadyExists(schedule) => Err(AppError::AlreadyExists { schedule_id: schedule.id }),
    }
}

pub async fn book_from_template(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<TemplateBookRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let booking = state.booking_manager
        .book_from_template(&id, date, user.id(), payload.workout_type)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}
