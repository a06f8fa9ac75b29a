//! Route definitions
//!
//! API routes are mounted under /api/v1; health routes sit at the root.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{attendance, auth, health, users};
use crate::state::AppState;

/// Create the main API router (health routes are separate so they bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(attendance_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
}

/// User administration routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/team", get(users::list_team))
        .route(
            "/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::deactivate_user),
        )
        .route("/users/:user_id/activate", post(users::activate_user))
        .route("/users/:user_id/profile", put(users::update_profile))
        .route("/users/:user_id/manager", put(users::assign_manager))
}

/// Attendance routes
fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance/checkin", post(attendance::check_in))
        .route("/attendance/checkout", post(attendance::check_out))
        .route("/attendance/history", get(attendance::history))
        .route(
            "/attendance",
            get(attendance::list_attendance).post(attendance::create_attendance),
        )
        .route(
            "/attendance/:attendance_id",
            get(attendance::get_attendance)
                .put(attendance::update_attendance)
                .delete(attendance::delete_attendance),
        )
}
