use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::{AppJson, AppPath};
use crate::api::dtos::{requests::BookRequest, responses::MyBookingResponse};
use crate::error::AppError;
use std::sync::Arc;

pub async fn book(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppPath(schedule_id): AppPath<String>,
    AppJson(payload): AppJson<BookRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_manager
        .book(&schedule_id, user.id(), payload.workout_type)
        .await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn cancel(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppPath(schedule_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_manager.cancel(&schedule_id, user.id()).await?;
    Ok(Json(serde_json::json!({"status": "cancelled"})))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(user.id()).await?;

    let mut out = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let schedule = state.schedule_repo.find_by_id(&booking.schedule_id).await?;
        out.push(MyBookingResponse { booking, schedule });
    }

    Ok(Json(out))
}
