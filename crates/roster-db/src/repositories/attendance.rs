//! PostgreSQL implementation of AttendanceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{AttendanceRecord, NewAttendance};
use roster_core::error::DomainError;
use roster_core::traits::{AttendanceQuery, AttendanceRepository, RepoResult};
use roster_core::value_objects::{AttendanceId, AttendanceStatus, UserId};

use crate::models::AttendanceModel;

use super::error::{map_db_error, map_write_error};

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    /// Create a new PgAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AttendanceId) -> RepoResult<Option<AttendanceRecord>> {
        let result = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT id, user_id, date, check_in, check_out, total_hours, status
            FROM attendance
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AttendanceRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_date(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let result = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT id, user_id, date, check_in, check_out, total_hours, status
            FROM attendance
            WHERE user_id = $1 AND date = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AttendanceRecord::try_from).transpose()
    }

    #[instrument(skip(self, record), fields(user_id = %record.user_id, date = %record.date))]
    async fn create(&self, record: &NewAttendance) -> RepoResult<AttendanceRecord> {
        let date = record.date;
        let model = sqlx::query_as::<_, AttendanceModel>(
            r"
            INSERT INTO attendance (user_id, date, check_in, check_out, total_hours, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, date, check_in, check_out, total_hours, status
            ",
        )
        .bind(record.user_id.into_inner())
        .bind(record.date)
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.total_hours)
        .bind(record.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || DomainError::AttendanceAlreadyExists(date)))?;

        AttendanceRecord::try_from(model)
    }

    #[instrument(skip(self, record), fields(attendance_id = %record.id))]
    async fn update(&self, record: &AttendanceRecord) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE attendance
            SET date = $2, check_in = $3, check_out = $4, total_hours = $5, status = $6
            WHERE id = $1
            ",
        )
        .bind(record.id.into_inner())
        .bind(record.date)
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.total_hours)
        .bind(record.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || DomainError::AttendanceDateTaken))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AttendanceNotFound(record.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AttendanceId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AttendanceNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &AttendanceQuery) -> RepoResult<Vec<AttendanceRecord>> {
        // NULL filters match everything
        let models = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT id, user_id, date, check_in, check_out, total_hours, status
            FROM attendance
            WHERE user_id = $1
              AND ($2::DATE IS NULL OR date >= $2)
              AND ($3::DATE IS NULL OR date <= $3)
              AND ($4::TEXT IS NULL OR status = $4)
            ORDER BY
              CASE WHEN $5 THEN date END ASC,
              CASE WHEN NOT $5 THEN date END DESC,
              id
            LIMIT $6 OFFSET $7
            ",
        )
        .bind(query.user_id.into_inner())
        .bind(query.start_date)
        .bind(query.end_date)
        .bind(query.status.map(AttendanceStatus::as_str))
        .bind(query.ascending)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(AttendanceRecord::try_from).collect()
    }
}
