//! Attendance model -> entity mapper

use roster_core::{AttendanceId, AttendanceRecord, AttendanceStatus, DomainError, UserId};

use crate::models::AttendanceModel;

impl TryFrom<AttendanceModel> for AttendanceRecord {
    type Error = DomainError;

    fn try_from(model: AttendanceModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<AttendanceStatus>()
            .map_err(|e| DomainError::DatabaseError(format!("attendance.id={}: {e}", model.id)))?;

        Ok(AttendanceRecord {
            id: AttendanceId::new(model.id),
            user_id: UserId::new(model.user_id),
            date: model.date,
            check_in: model.check_in,
            check_out: model.check_out,
            total_hours: model.total_hours,
            status,
        })
    }
}
