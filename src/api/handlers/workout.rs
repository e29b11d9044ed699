use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::validated::{AppPath, AppQuery};
use crate::api::dtos::{requests::WeightQuery, responses::WeightResponse};
use crate::domain::models::workout::{Lift, Weight};
use crate::domain::services::{schemes, weights};
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_scheme(
    _user: AuthUser,
    AppPath((week, day)): AppPath<(i32, u32)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(schemes::get_scheme(week, day)?))
}

/// Working weight for the caller's own max.
pub async fn get_weight(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    AppQuery(query): AppQuery<WeightQuery>,
) -> Result<impl IntoResponse, AppError> {
    let lift: Lift = query.lift.parse()?;
    if !query.percentage.is_finite() || query.percentage < 0.0 {
        return Err(AppError::Validation("percentage must be a non-negative number".into()));
    }

    let profile = state.user_repo.find_by_id(user.id()).await?
        .ok_or(AppError::Unauthorized)?;
    let max = profile.max_lifts().get(lift);

    Ok(Json(WeightResponse {
        lift,
        max,
        percentage: query.percentage,
        weight: weights::calculate(max, query.percentage).map(Weight::Scalar),
    }))
}
