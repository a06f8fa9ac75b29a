//! Attendance service
//!
//! Daily check-in/check-out for every user, plus manual record
//! management for managers over their direct reports. All responses carry
//! the displayed status for the clock's current day.

use roster_core::entities::{AttendanceRecord, NewAttendance, User};
use roster_core::policy::{ensure, Operation};
use roster_core::traits::AttendanceQuery;
use roster_core::{round_hours, AttendanceId, DomainError, UserId};
use tracing::{info, instrument};

use crate::dto::{
    AttendanceFilter, AttendanceResponse, CheckInResponse, CheckOutResponse,
    CreateAttendanceRequest, Page, UpdateAttendanceRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn find_user(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    async fn find_record(&self, id: AttendanceId) -> ServiceResult<AttendanceRecord> {
        Ok(self
            .ctx
            .attendance_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::AttendanceNotFound(id))?)
    }

    /// Load a record and check the caller may manage it
    async fn load_managed(&self, actor: &User, id: AttendanceId) -> ServiceResult<AttendanceRecord> {
        let record = self.find_record(id).await?;
        let owner = self.find_user(record.user_id).await?;
        ensure(actor, Operation::ManageAttendance, Some(&owner))?;
        Ok(record)
    }

    fn respond(&self, record: &AttendanceRecord) -> AttendanceResponse {
        AttendanceResponse::from_record(record, self.ctx.clock().today())
    }

    /// Open today's record for the caller
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn check_in(&self, actor: &User) -> ServiceResult<CheckInResponse> {
        ensure(actor, Operation::SelfService, None)?;

        let now = self.ctx.clock().now();
        let today = now.date_naive();

        if self
            .ctx
            .attendance_repo()
            .find_by_user_and_date(actor.id, today)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyCheckedIn.into());
        }

        // Two concurrent check-ins race past the lookup; storage decides
        let record = self
            .ctx
            .attendance_repo()
            .create(&NewAttendance::check_in(actor.id, now))
            .await
            .map_err(|e| match e {
                DomainError::AttendanceAlreadyExists(_) => DomainError::AlreadyCheckedIn,
                other => other,
            })?;

        info!(attendance_id = %record.id, "Checked in");

        Ok(CheckInResponse {
            message: format!("{} checked in successfully", actor.name),
            time: now,
        })
    }

    /// Close today's record for the caller
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn check_out(&self, actor: &User) -> ServiceResult<CheckOutResponse> {
        ensure(actor, Operation::SelfService, None)?;

        let now = self.ctx.clock().now();
        let mut record = self
            .ctx
            .attendance_repo()
            .find_by_user_and_date(actor.id, now.date_naive())
            .await?
            .ok_or(DomainError::NoCheckIn)?;

        record.check_out_at(now)?;
        self.ctx.attendance_repo().update(&record).await?;

        info!(attendance_id = %record.id, total_hours = record.total_hours, "Checked out");

        Ok(CheckOutResponse {
            message: format!("{} checked out successfully", actor.name),
            total_hours: round_hours(record.total_hours),
        })
    }

    /// The caller's own records, newest first
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn history(&self, actor: &User, page: Page) -> ServiceResult<Vec<AttendanceResponse>> {
        ensure(actor, Operation::SelfService, None)?;

        let records = self
            .ctx
            .attendance_repo()
            .list(&AttendanceQuery::for_user(actor.id, page.limit, page.offset))
            .await?;

        Ok(records.iter().map(|r| self.respond(r)).collect())
    }

    /// Create a record by hand, for the caller or a direct report
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateAttendanceRequest,
    ) -> ServiceResult<AttendanceResponse> {
        let user_id = request.user_id.unwrap_or(actor.id);

        if user_id == actor.id {
            ensure(actor, Operation::CreateAttendance, None)?;
        } else {
            // Role gate before revealing whether the user exists
            ensure(actor, Operation::ManageAttendance, None)?;
            let subject = self.find_user(user_id).await?;
            ensure(actor, Operation::CreateAttendance, Some(&subject))?;
        }

        let date = request.date.unwrap_or_else(|| self.ctx.clock().today());
        let new = NewAttendance::new(
            user_id,
            date,
            request.check_in,
            request.check_out,
            request.status.unwrap_or_default(),
        )?;

        if self
            .ctx
            .attendance_repo()
            .find_by_user_and_date(user_id, date)
            .await?
            .is_some()
        {
            return Err(DomainError::AttendanceAlreadyExists(date).into());
        }

        let record = self.ctx.attendance_repo().create(&new).await?;

        info!(attendance_id = %record.id, user_id = %user_id, "Attendance created");

        Ok(self.respond(&record))
    }

    /// Filtered listing of one user's records
    ///
    /// Defaults to the caller; another user's records need a manager link.
    #[instrument(skip(self, actor, filter), fields(actor_id = %actor.id))]
    pub async fn list(
        &self,
        actor: &User,
        filter: AttendanceFilter,
        page: Page,
    ) -> ServiceResult<Vec<AttendanceResponse>> {
        let user_id = filter.user_id.unwrap_or(actor.id);

        if user_id != actor.id {
            let subject = self.find_user(user_id).await?;
            ensure(actor, Operation::ViewAttendance, Some(&subject))?;
        }

        let query = AttendanceQuery {
            user_id,
            start_date: filter.start_date,
            end_date: filter.end_date,
            status: filter.status,
            limit: page.limit,
            offset: page.offset,
            ascending: filter.asc,
        };
        let records = self.ctx.attendance_repo().list(&query).await?;

        Ok(records.iter().map(|r| self.respond(r)).collect())
    }

    /// Get one record
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn get(&self, actor: &User, id: AttendanceId) -> ServiceResult<AttendanceResponse> {
        let record = self.find_record(id).await?;

        if record.user_id != actor.id {
            let owner = self.find_user(record.user_id).await?;
            ensure(actor, Operation::ViewAttendance, Some(&owner))?;
        }

        Ok(self.respond(&record))
    }

    /// Edit a direct report's record
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn update(
        &self,
        actor: &User,
        id: AttendanceId,
        request: UpdateAttendanceRequest,
    ) -> ServiceResult<AttendanceResponse> {
        let mut record = self.load_managed(actor, id).await?;

        record.apply(request.into())?;
        self.ctx.attendance_repo().update(&record).await?;

        info!(attendance_id = %record.id, "Attendance updated");

        Ok(self.respond(&record))
    }

    /// Delete a direct report's record
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete(&self, actor: &User, id: AttendanceId) -> ServiceResult<()> {
        let record = self.load_managed(actor, id).await?;

        self.ctx.attendance_repo().delete(record.id).await?;

        info!(attendance_id = %record.id, "Attendance deleted");

        Ok(())
    }
}
