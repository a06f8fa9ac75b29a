//! Attendance database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for attendance table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub status: String,
}
