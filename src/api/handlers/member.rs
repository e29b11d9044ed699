use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::{AppJson, AppPath};
use crate::api::dtos::{requests::CreateMemberRequest, responses::MemberResponse};
use crate::domain::models::{user::{Role, User}, workout::MemberMaxLifts};
use crate::domain::services::{auth_service::hash_password, weights::validate_max_lifts};
use std::sync::Arc;
use crate::error::AppError;
use tracing::{info, error};

pub async fn create_member(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    AppJson(payload): AppJson<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_admin()?;

    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Username and password are required".into()));
    }
    if state.user_repo.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.username, password_hash, payload.role.unwrap_or(Role::User));
    let created = state.user_repo.create(&user).await?;

    info!("Created member user: {} ({})", created.id, created.role.as_str());

    Ok((StatusCode::CREATED, Json(MemberResponse::from(created))))
}

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    caller.require_manager()?;

    let members: Vec<MemberResponse> = state.user_repo.list().await?
        .into_iter()
        .map(MemberResponse::from)
        .collect();

    Ok(Json(members))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    admin: AuthUser,
    AppPath(user_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_admin()?;
    if admin.id() == user_id {
        return Err(AppError::Conflict("Cannot delete yourself".into()));
    }

    let target = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    // Seats go back to the classes before the bookings disappear with the user.
    state.booking_manager.cancel_all_for_user(&target.id).await?;

    match state.user_repo.delete(&target.id).await {
        Ok(_) => {
            info!("Deleted user {}", user_id);
            Ok(Json(serde_json::json!({"status": "deleted"})))
        },
        Err(e) => {
            error!("Failed to delete user {}: {:?}", user_id, e);
            Err(e)
        }
    }
}

pub async fn set_member_max_lifts(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    AppPath(user_id): AppPath<String>,
    AppJson(payload): AppJson<MemberMaxLifts>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_manager()?;
    validate_max_lifts(&payload)?;

    let updated = state.user_repo.update_max_lifts(&user_id, &payload).await?;
    info!("Max lifts for {} set by {}", user_id, caller.id());

    Ok(Json(MemberResponse::from(updated)))
}
