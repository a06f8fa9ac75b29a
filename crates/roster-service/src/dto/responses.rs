//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{AttendanceId, AttendanceStatus, Role, UserId};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Device details of the session created at login
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub user_id: UserId,
    pub device_id: Option<String>,
    pub device_location: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: Role,
    pub session: SessionInfo,
}

/// Token refresh response
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

// ============================================================================
// User Responses
// ============================================================================

/// User profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub joined_date: Option<NaiveDate>,
    pub manager_id: Option<UserId>,
    pub is_active: bool,
}

// ============================================================================
// Attendance Responses
// ============================================================================

/// Attendance record with its displayed status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceResponse {
    pub id: AttendanceId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub message: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutResponse {
    pub message: String,
    /// Rounded to two decimals
    pub total_hours: f64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health of each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn from_checks(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
