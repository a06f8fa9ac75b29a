//! User administration handlers
//!
//! Managers create, list and maintain the accounts of their direct reports.

use axum::{extract::State, Json};
use roster_core::UserId;
use roster_service::dto::{
    AssignManagerRequest, CreateUserRequest, ListUsersQuery, MessageResponse,
    UpdateProfileRequest, UpdateUserRequest, UserResponse,
};
use roster_service::UserService;

use crate::extractors::{CurrentUser, IdPath, Pagination, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List direct reports
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
    QueryParams(query): QueryParams<ListUsersQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.list_users(current.user(), query, page).await?;
    Ok(Json(users))
}

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let user = service.create_user(current.user(), request).await?;
    Ok(Created(Json(user)))
}

/// List every direct report, active or not
///
/// GET /users/team
pub async fn list_team(
    State(state): State<AppState>,
    current: CurrentUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.list_team(current.user(), page).await?;
    Ok(Json(users))
}

/// Get a direct report
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_user(current.user(), user_id).await?;
    Ok(Json(user))
}

/// Update a direct report
///
/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_user(current.user(), user_id, request).await?;
    Ok(Json(user))
}

/// Deactivate a direct report
///
/// DELETE /users/{user_id}
pub async fn deactivate_user(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.deactivate(current.user(), user_id).await?;
    Ok(Json(response))
}

/// Reactivate a direct report
///
/// POST /users/{user_id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.activate(current.user(), user_id).await?;
    Ok(Json(response))
}

/// Update profile fields of a direct report
///
/// PUT /users/{user_id}/profile
pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.update_profile(current.user(), user_id, request).await?;
    Ok(Json(user))
}

/// Assign a new manager to a direct report
///
/// PUT /users/{user_id}/manager
pub async fn assign_manager(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<AssignManagerRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.assign_manager(current.user(), user_id, request).await?;
    Ok(Json(response))
}
