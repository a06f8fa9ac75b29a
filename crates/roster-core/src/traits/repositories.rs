//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Inserts report unique-constraint violations
//! as the matching conflict error.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{AttendanceRecord, NewAttendance, NewSession, NewUser, Session, User};
use crate::error::DomainError;
use crate::value_objects::{AttendanceId, AttendanceStatus, SessionId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

/// Pagination options for listing a manager's reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub include_inactive: bool,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert a user and return it with its assigned id
    ///
    /// Fails with `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Update an existing user
    ///
    /// Fails with `EmailAlreadyExists` on a duplicate email.
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// List direct reports of a manager, ordered by id
    async fn find_reports(&self, manager_id: UserId, query: ReportQuery) -> RepoResult<Vec<User>>;

    /// Count direct reports of a manager, active or not
    async fn count_reports(&self, manager_id: UserId) -> RepoResult<i64>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new active session
    async fn create(&self, session: &NewSession) -> RepoResult<Session>;

    /// Find the active session holding `token` for a user
    async fn find_active(&self, user_id: UserId, token: &str) -> RepoResult<Option<Session>>;

    /// Mark the active session holding `token` inactive
    ///
    /// Returns whether a session was deactivated.
    async fn deactivate(&self, user_id: UserId, token: &str) -> RepoResult<bool>;

    /// Mark a session inactive by id
    async fn deactivate_by_id(&self, id: SessionId) -> RepoResult<()>;

    /// Replace the token and login time of a session
    async fn rotate_token(
        &self,
        id: SessionId,
        token: &str,
        login_time: DateTime<Utc>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

/// Filter and pagination for attendance listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceQuery {
    pub user_id: UserId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub limit: i64,
    pub offset: i64,
    /// Order by date ascending instead of descending
    pub ascending: bool,
}

impl AttendanceQuery {
    /// All records of a user, newest first
    pub fn for_user(user_id: UserId, limit: i64, offset: i64) -> Self {
        Self {
            user_id,
            start_date: None,
            end_date: None,
            status: None,
            limit,
            offset,
            ascending: false,
        }
    }

    /// Check a record against the filter, ignoring pagination
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        record.user_id == self.user_id
            && self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end)
            && self.status.is_none_or(|status| record.status == status)
    }
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Find record by ID
    async fn find_by_id(&self, id: AttendanceId) -> RepoResult<Option<AttendanceRecord>>;

    /// Find a user's record for a date
    async fn find_by_user_and_date(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceRecord>>;

    /// Insert a record and return it with its assigned id
    ///
    /// Fails with `AttendanceAlreadyExists` if the user already has a record
    /// for that date.
    async fn create(&self, record: &NewAttendance) -> RepoResult<AttendanceRecord>;

    /// Update an existing record
    ///
    /// Fails with `AttendanceDateTaken` if the new date collides with another
    /// record of the same user.
    async fn update(&self, record: &AttendanceRecord) -> RepoResult<()>;

    /// Delete a record
    async fn delete(&self, id: AttendanceId) -> RepoResult<()>;

    /// List records matching a query
    async fn list(&self, query: &AttendanceQuery) -> RepoResult<Vec<AttendanceRecord>>;
}
