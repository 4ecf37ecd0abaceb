use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    activity::{create_activity, get_activities, get_activity},
    completion::complete_activity,
    health::{healthz, readyz},
    otp::{generate_otp, validate_otp},
    participation::{get_user_status, join_activity},
    review::{get_reviews, submit_review},
    user::{create_user, get_leaderboard, get_user},
};
use crate::middleware::request_id_layer;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/api/users", post(create_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/leaderboard", get(get_leaderboard))
        // Activities
        .route("/api/activities", post(create_activity))
        .route("/api/activities", get(get_activities))
        .route("/api/activities/{id}", get(get_activity))
        // Participation
        .route("/api/activities/{id}/join", post(join_activity))
        .route(
            "/api/activities/{id}/user-status/{user_id}",
            get(get_user_status),
        )
        // Attendance lifecycle
        .route("/api/activities/{id}/generate-otp", post(generate_otp))
        .route("/api/activities/{id}/validate-otp", post(validate_otp))
        .route("/api/activities/{id}/complete", post(complete_activity))
        // Reviews
        .route("/api/activities/{id}/review", post(submit_review))
        .route("/api/activities/{id}/reviews", get(get_reviews))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
