//! Attendance handlers

use axum::{extract::State, Json};
use roster_core::AttendanceId;
use roster_service::dto::{
    AttendanceFilter, AttendanceResponse, CheckInResponse, CheckOutResponse,
    CreateAttendanceRequest, UpdateAttendanceRequest,
};
use roster_service::AttendanceService;

use crate::extractors::{CurrentUser, IdPath, Pagination, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /attendance/checkin
pub async fn check_in(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<CheckInResponse>> {
    let service = AttendanceService::new(state.service_context());
    let response = service.check_in(current.user()).await?;
    Ok(Json(response))
}

/// POST /attendance/checkout
pub async fn check_out(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<CheckOutResponse>> {
    let service = AttendanceService::new(state.service_context());
    let response = service.check_out(current.user()).await?;
    Ok(Json(response))
}

/// GET /attendance/history
pub async fn history(
    State(state): State<AppState>,
    current: CurrentUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<Vec<AttendanceResponse>>> {
    let service = AttendanceService::new(state.service_context());
    let records = service.history(current.user(), page).await?;
    Ok(Json(records))
}

/// GET /attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    QueryParams(filter): QueryParams<AttendanceFilter>,
    Pagination(page): Pagination,
) -> ApiResult<Json<Vec<AttendanceResponse>>> {
    let service = AttendanceService::new(state.service_context());
    let records = service.list(current.user(), filter, page).await?;
    Ok(Json(records))
}

/// POST /attendance
pub async fn create_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreateAttendanceRequest>,
) -> ApiResult<Created<Json<AttendanceResponse>>> {
    let service = AttendanceService::new(state.service_context());
    let record = service.create(current.user(), request).await?;
    Ok(Created(Json(record)))
}

/// GET /attendance/{attendance_id}
pub async fn get_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(attendance_id): IdPath<AttendanceId>,
) -> ApiResult<Json<AttendanceResponse>> {
    let service = AttendanceService::new(state.service_context());
    let record = service.get(current.user(), attendance_id).await?;
    Ok(Json(record))
}

/// PUT /attendance/{attendance_id}
pub async fn update_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(attendance_id): IdPath<AttendanceId>,
    ValidatedJson(request): ValidatedJson<UpdateAttendanceRequest>,
) -> ApiResult<Json<AttendanceResponse>> {
    let service = AttendanceService::new(state.service_context());
    let record = service.update(current.user(), attendance_id, request).await?;
    Ok(Json(record))
}

/// DELETE /attendance/{attendance_id}
pub async fn delete_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    IdPath(attendance_id): IdPath<AttendanceId>,
) -> ApiResult<NoContent> {
    let service = AttendanceService::new(state.service_context());
    service.delete(current.user(), attendance_id).await?;
    Ok(NoContent)
}
