//! Attendance entity - one user's presence on one calendar day

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainError;
use crate::value_objects::{AttendanceId, AttendanceStatus, UserId};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours elapsed between two instants
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Round hours to two decimal places for display
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Worked hours for an optional pair of timestamps
///
/// Fails when both are present and `check_out` is not after `check_in`.
fn worked_hours(
    check_in: Option<DateTime<Utc>>,
    check_out: Option<DateTime<Utc>>,
) -> Result<f64, DomainError> {
    match (check_in, check_out) {
        (Some(start), Some(end)) if end <= start => Err(DomainError::CheckOutNotAfterCheckIn),
        (Some(start), Some(end)) => Ok(hours_between(start, end)),
        _ => Ok(0.0),
    }
}

/// Attendance record for a (user, date) pair
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Status shown to clients on `today`
    ///
    /// A past day without a check-in reads as absent, and a past day that was
    /// never checked out reads as a half day. The stored status is untouched.
    pub fn displayed_status(&self, today: NaiveDate) -> AttendanceStatus {
        if self.date < today {
            if self.check_in.is_none() {
                return AttendanceStatus::Absent;
            }
            if self.check_out.is_none() {
                return AttendanceStatus::HalfDay;
            }
        }
        self.status
    }

    /// Close the day at `now`
    pub fn check_out_at(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        let check_in = self.check_in.ok_or(DomainError::NoCheckIn)?;
        if self.check_out.is_some() {
            return Err(DomainError::AlreadyCheckedOut);
        }
        if now <= check_in {
            return Err(DomainError::CheckOutNotAfterCheckIn);
        }

        self.check_out = Some(now);
        self.total_hours = hours_between(check_in, now);
        Ok(())
    }

    /// Merge a partial edit and recompute the worked hours
    ///
    /// The record is left unchanged if the merged timestamps are out of order.
    pub fn apply(&mut self, changes: AttendanceChanges) -> Result<(), DomainError> {
        let check_in = changes.check_in.or(self.check_in);
        let check_out = changes.check_out.or(self.check_out);
        let total_hours = worked_hours(check_in, check_out)?;

        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.check_in = check_in;
        self.check_out = check_out;
        self.total_hours = total_hours;
        Ok(())
    }
}

/// Data for inserting an attendance record
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub status: AttendanceStatus,
}

impl NewAttendance {
    /// Build a record, computing `total_hours` from the timestamps
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        check_in: Option<DateTime<Utc>>,
        check_out: Option<DateTime<Utc>>,
        status: AttendanceStatus,
    ) -> Result<Self, DomainError> {
        let total_hours = worked_hours(check_in, check_out)?;
        Ok(Self {
            user_id,
            date,
            check_in,
            check_out,
            total_hours,
            status,
        })
    }

    /// A check-in at `now`, dated on the UTC day of `now`
    pub fn check_in(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            date: now.date_naive(),
            check_in: Some(now),
            check_out: None,
            total_hours: 0.0,
            status: AttendanceStatus::Present,
        }
    }
}

/// Partial edit of an attendance record; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceChanges {
    pub date: Option<NaiveDate>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
}
