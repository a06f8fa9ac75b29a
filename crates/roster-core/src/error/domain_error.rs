//! Domain errors - error types for the domain layer

use chrono::NaiveDate;
use thiserror::Error;

use crate::value_objects::{AttendanceId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Attendance not found: {0}")]
    AttendanceNotFound(AttendanceId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Manager or supervisor role required")]
    NotManager,

    #[error("User is not in your team")]
    NotInTeam,

    #[error("Not allowed to view this record")]
    NotRecordViewer,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Already checked in today")]
    AlreadyCheckedIn,

    #[error("Attendance record already exists for date {0}")]
    AttendanceAlreadyExists(NaiveDate),

    #[error("Another record already exists for that date")]
    AttendanceDateTaken,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("No check-in record found")]
    NoCheckIn,

    #[error("Already checked out today")]
    AlreadyCheckedOut,

    #[error("check_out must be after check_in")]
    CheckOutNotAfterCheckIn,

    #[error("You cannot deactivate your own account")]
    SelfDeactivation,

    #[error("User cannot be their own manager")]
    SelfManagement,

    #[error("Assigned manager must have manager/supervisor role")]
    InvalidManager,

    #[error("User still manages {0} direct report(s) and must keep a managerial role")]
    ManagerHasReports(i64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::AttendanceNotFound(_) => "UNKNOWN_ATTENDANCE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::WeakPassword(_) => "WEAK_PASSWORD",

            // Authorization
            Self::NotManager => "NOT_MANAGER",
            Self::NotInTeam => "NOT_IN_TEAM",
            Self::NotRecordViewer => "NOT_RECORD_VIEWER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::AttendanceAlreadyExists(_) => "ATTENDANCE_ALREADY_EXISTS",
            Self::AttendanceDateTaken => "ATTENDANCE_DATE_TAKEN",

            // Business Rules
            Self::NoCheckIn => "NO_CHECK_IN",
            Self::AlreadyCheckedOut => "ALREADY_CHECKED_OUT",
            Self::CheckOutNotAfterCheckIn => "CHECK_OUT_NOT_AFTER_CHECK_IN",
            Self::SelfDeactivation => "SELF_DEACTIVATION",
            Self::SelfManagement => "SELF_MANAGEMENT",
            Self::InvalidManager => "INVALID_MANAGER",
            Self::ManagerHasReports(_) => "MANAGER_HAS_REPORTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::AttendanceNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidRole(_) | Self::WeakPassword(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotManager | Self::NotInTeam | Self::NotRecordViewer)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::AlreadyCheckedIn
                | Self::AttendanceAlreadyExists(_)
                | Self::AttendanceDateTaken
        )
    }

    /// Check if this is a business rule violation
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            Self::NoCheckIn
                | Self::AlreadyCheckedOut
                | Self::CheckOutNotAfterCheckIn
                | Self::SelfDeactivation
                | Self::SelfManagement
                | Self::InvalidManager
                | Self::ManagerHasReports(_)
        )
    }

    /// HTTP status for this error
    ///
    /// Not found 404, authorization 403, conflict 409, validation and
    /// invalid operations 400, infrastructure 500.
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_conflict() {
            409
        } else if self.is_validation() || self.is_invalid_operation() {
            400
        } else {
            500
        }
    }
}
