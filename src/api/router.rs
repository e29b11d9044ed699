use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{
    auth, booking, class_detail, default_schedule, health, member, profile, schedule, workout,
};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Profile
        .route("/api/v1/me", get(profile::me))
        .route("/api/v1/me/max-lifts", put(profile::update_my_max_lifts))

        // Members
        .route("/api/v1/members", post(member::create_member).get(member::list_members))
        .route("/api/v1/members/{user_id}", delete(member::delete_member))
        .route("/api/v1/members/{user_id}/max-lifts", put(member::set_member_max_lifts))

        // Weekly templates
        .route("/api/v1/default-schedules", get(default_schedule::list_default_schedules).post(default_schedule::upsert_default_schedule))
        .route("/api/v1/default-schedules/{id}", get(default_schedule::get_default_schedule).delete(default_schedule::delete_default_schedule))
        .route("/api/v1/default-schedules/{id}/materialize", post(default_schedule::materialize))
        .route("/api/v1/default-schedules/{id}/book", post(default_schedule::book_from_template))

        // Instances
        .route("/api/v1/schedules", get(schedule::list_schedules).post(schedule::create_schedule))
        .route("/api/v1/schedules/week", get(schedule::week_view))
        .route("/api/v1/schedules/{id}", get(schedule::get_schedule).put(schedule::update_schedule).delete(schedule::delete_schedule))
        .route("/api/v1/schedules/{id}/book", post(booking::book).delete(booking::cancel))
        .route("/api/v1/schedules/{id}/detail", get(class_detail::schedule_detail))

        // Bookings & programming
        .route("/api/v1/bookings/mine", get(booking::my_bookings))
        .route("/api/v1/classes/current", get(class_detail::current_class))
        .route("/api/v1/schemes/{week}/{day}", get(workout::get_scheme))
        .route("/api/v1/weights", get(workout::get_weight))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
