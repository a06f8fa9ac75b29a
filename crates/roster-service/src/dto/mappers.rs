//! Entity to DTO mappers

use chrono::NaiveDate;
use roster_core::entities::{AttendanceRecord, User};

use super::responses::{AttendanceResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            location: user.location.clone(),
            picture: user.picture.clone(),
            date_of_birth: user.date_of_birth,
            joined_date: user.joined_date,
            manager_id: user.manager_id,
            is_active: user.is_active,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl AttendanceResponse {
    /// Render a record as seen on `today`
    pub fn from_record(record: &AttendanceRecord, today: NaiveDate) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            date: record.date,
            check_in: record.check_in,
            check_out: record.check_out,
            total_hours: record.total_hours,
            status: record.displayed_status(today),
        }
    }
}
