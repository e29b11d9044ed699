use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::{AppJson, AppPath, AppQuery};
use crate::api::dtos::requests::{CreateScheduleRequest, RangeQuery, UpdateScheduleRequest, WeekQuery};
use crate::domain::models::{
    booking::Booking,
    schedule::{CoachSummary, NewScheduleParams, ScheduleDetails, ScheduleInstance},
};
use crate::domain::services::calendar::{normalize_time, parse_date, project_week};
use crate::error::AppError;
use chrono::{Datelike, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppQuery(query): AppQuery<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = parse_date(&query.start)?;
    let end = parse_date(&query.end)?;
    if end < start {
        return Err(AppError::Validation("end must not be before start".into()));
    }

    let schedules = state.schedule_repo.list_by_range(start, end).await?;
    let bookings = state.booking_repo.list_by_range(start, end).await?;

    let mut by_schedule: HashMap<String, Vec<Booking>> = HashMap::new();
    for booking in bookings {
        by_schedule.entry(booking.schedule_id.clone()).or_default().push(booking);
    }

    let mut coaches: HashMap<String, Option<CoachSummary>> = HashMap::new();
    let mut details = Vec::with_capacity(schedules.len());
    for schedule in schedules {
        if !coaches.contains_key(&schedule.coach_id) {
            let coach = lookup_coach(&state, &schedule.coach_id).await?;
            coaches.insert(schedule.coach_id.clone(), coach);
        }
        details.push(ScheduleDetails {
            coach: coaches.get(&schedule.coach_id).cloned().flatten(),
            bookings: by_schedule.remove(&schedule.id).unwrap_or_default(),
            schedule,
        });
    }

    Ok(Json(details))
}

/// Templates and instances merged over seven days. Defaults to the current week.
pub async fn week_view(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppQuery(query): AppQuery<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = match query.start {
        Some(raw) => parse_date(&raw)?,
        None => {
            let today = Utc::now().with_timezone(&state.config.gym_timezone).date_naive();
            today - Duration::days(today.weekday().num_days_from_monday() as i64)
        }
    };
    let end = start + Duration::days(6);

    let templates = state.registry.list().await?;
    let instances = state.schedule_repo.list_by_range(start, end).await?;

    Ok(Json(project_week(start, &templates, &instances)))
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = find_schedule(&state, &id).await?;
    let coach = lookup_coach(&state, &schedule.coach_id).await?;
    let bookings = state.booking_repo.list_by_schedule(&schedule.id).await?;

    Ok(Json(ScheduleDetails { schedule, coach, bookings }))
}

/// Ad-hoc class with no template behind it.
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_manager()?;

    let date = parse_date(&payload.date)?;
    let time = normalize_time(&payload.time)?;
    if payload.capacity <= 0 {
        return Err(AppError::Validation("capacity must be positive".into()));
    }
    let coach_id = payload.coach_id
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| user.id().to_string());

    let schedule = ScheduleInstance::new(NewScheduleParams {
        date,
        time,
        capacity: payload.capacity,
        workout_type: payload.workout_type,
        coach_id,
    });
    let created = state.schedule_repo.create(&schedule).await?;

    info!("Created ad-hoc schedule {} on {} at {}", created.id, created.date, created.time);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppPath(id): AppPath<String>,
    AppJson(payload): AppJson<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_manager()?;

    let mut schedule = find_schedule(&state, &id).await?;

    if let Some(time) = payload.time {
        schedule.time = normalize_time(&time)?;
    }
    if let Some(capacity) = payload.capacity {
        if capacity <= 0 {
            return Err(AppError::Validation("capacity must be positive".into()));
        }
        schedule.capacity = capacity;
    }
    if let Some(workout_type) = payload.workout_type {
        schedule.workout_type = workout_type;
    }
    if let Some(coach_id) = payload.coach_id.filter(|c| !c.trim().is_empty()) {
        schedule.coach_id = coach_id;
    }

    let updated = state.schedule_repo.update(&schedule).await?;
    info!("Updated schedule {}", updated.id);
    Ok(Json(updated))
}

/// Removes the instance and every booking on it.
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppPath(id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_manager()?;

    state.schedule_repo.delete(&id).await?;
    info!("Deleted schedule {} with its bookings", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

async fn find_schedule(state: &AppState, id: &str) -> Result<ScheduleInstance, AppError> {
    state.schedule_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Schedule not found".into()))
}

async fn lookup_coach(state: &AppState, coach_id: &str) -> Result<Option<CoachSummary>, AppError> {
    Ok(state.user_repo.find_by_id(coach_id).await?
        .map(|u| CoachSummary { id: u.id, username: u.username }))
}
