//! Error handling utilities for repositories

use roster_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map constraint violations on writes
///
/// Unique violations become `on_unique()`. A failed `check_out > check_in`
/// CHECK becomes `CheckOutNotAfterCheckIn`, and a failed self-manager CHECK
/// becomes `SelfManagement`. Anything else is a database error.
pub fn map_write_error<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_check_violation() {
            match db_err.constraint() {
                Some("attendance_check_out_after_check_in") => {
                    return DomainError::CheckOutNotAfterCheckIn;
                }
                Some("users_not_own_manager") => return DomainError::SelfManagement,
                _ => {}
            }
        }
        if db_err.is_foreign_key_violation() && db_err.constraint() == Some("users_manager_id_fkey") {
            return DomainError::InvalidManager;
        }
    }
    DomainError::DatabaseError(e.to_string())
}
