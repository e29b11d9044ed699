use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::AppJson;
use crate::api::dtos::responses::MemberResponse;
use crate::domain::models::workout::MemberMaxLifts;
use crate::domain::services::weights::validate_max_lifts;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.user_repo.find_by_id(user.id()).await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(MemberResponse::from(profile)))
}

pub async fn update_my_max_lifts(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppJson(payload): AppJson<MemberMaxLifts>,
) -> Result<impl IntoResponse, AppError> {
    validate_max_lifts(&payload)?;

    let updated = state.user_repo.update_max_lifts(user.id(), &payload).await?;
    info!("User {} updated own max lifts", user.id());

    Ok(Json(MemberResponse::from(updated)))
}
