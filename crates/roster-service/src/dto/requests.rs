//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement `Validate`.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{AttendanceChanges, AttendanceStatus, UserId};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Phone ID or browser fingerprint
    pub device_id: Option<String>,

    /// Human-readable device location
    pub device_location: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Account creation, used by public registration and by managers
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// One of the role names, e.g. `driver`
    pub role: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2048, message = "Picture must be at most 2048 characters"))]
    pub picture: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
    pub joined_date: Option<NaiveDate>,
    pub manager_id: Option<UserId>,
    pub is_active: Option<bool>,
}

/// Partial account update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub role: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2048, message = "Picture must be at most 2048 characters"))]
    pub picture: Option<String>,

    pub date_of_birth: Option<NaiveDate>,
    pub joined_date: Option<NaiveDate>,
    pub manager_id: Option<UserId>,
    pub is_active: Option<bool>,
}

/// Profile fields a manager may edit
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 2048, message = "Picture must be at most 2048 characters"))]
    pub picture: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub joined_date: Option<NaiveDate>,
}

/// Assign a manager to a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignManagerRequest {
    pub manager_id: UserId,
}

/// Query parameters for listing users
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

// ============================================================================
// Attendance Requests
// ============================================================================

/// Manual attendance creation
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAttendanceRequest {
    /// Defaults to the caller
    pub user_id: Option<UserId>,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    /// Defaults to `present`
    pub status: Option<AttendanceStatus>,
}

/// Partial attendance edit
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAttendanceRequest {
    pub date: Option<NaiveDate>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
}

impl From<UpdateAttendanceRequest> for AttendanceChanges {
    fn from(request: UpdateAttendanceRequest) -> Self {
        Self {
            date: request.date,
            check_in: request.check_in,
            check_out: request.check_out,
            status: request.status,
        }
    }
}

/// Query parameters for listing attendance
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFilter {
    /// Whose records to list; defaults to the caller
    pub user_id: Option<UserId>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
    /// Stored status
    pub status: Option<AttendanceStatus>,
    /// Oldest first instead of newest first
    #[serde(default)]
    pub asc: bool,
}

// ============================================================================
// Pagination
// ============================================================================

/// Offset pagination with a bounded page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    /// Clamp raw values: `limit` into `1..=200` (default 50), `offset` to at least 0
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
