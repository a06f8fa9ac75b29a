//! Authentication handlers
//!
//! Endpoints for registration, login, logout, token refresh and the
//! current user's profile.

use axum::{extract::State, Json};
use roster_service::dto::{
    CreateUserRequest, LoginRequest, MessageResponse, RefreshResponse, TokenResponse,
    UserResponse,
};
use roster_service::AuthService;

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Close the current session
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(auth): CurrentUser,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.logout(&auth).await?;
    Ok(Json(response))
}

/// Issue a new token for the current session
///
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    CurrentUser(auth): CurrentUser,
) -> ApiResult<Json<RefreshResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(&auth).await?;
    Ok(Json(response))
}

/// Get the current user
///
/// GET /auth/me
pub async fn me(State(state): State<AppState>, CurrentUser(auth): CurrentUser) -> Json<UserResponse> {
    Json(AuthService::new(state.service_context()).me(&auth))
}
