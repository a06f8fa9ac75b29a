//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{NewSession, Session};
use roster_core::traits::{RepoResult, SessionRepository};
use roster_core::value_objects::{SessionId, UserId};

use crate::models::SessionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SessionRepository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    async fn create(&self, session: &NewSession) -> RepoResult<Session> {
        let model = sqlx::query_as::<_, SessionModel>(
            r"
            INSERT INTO user_sessions (user_id, device_id, device_location, token, login_time, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING id, user_id, device_id, device_location, token, login_time, is_active
            ",
        )
        .bind(session.user_id.into_inner())
        .bind(&session.device_id)
        .bind(&session.device_location)
        .bind(&session.token)
        .bind(session.login_time)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Session::from(model))
    }

    #[instrument(skip(self, token))]
    async fn find_active(&self, user_id: UserId, token: &str) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT id, user_id, device_id, device_location, token, login_time, is_active
            FROM user_sessions
            WHERE user_id = $1 AND token = $2 AND is_active
            ",
        )
        .bind(user_id.into_inner())
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Session::from))
    }

    #[instrument(skip(self, token))]
    async fn deactivate(&self, user_id: UserId, token: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE user_sessions
            SET is_active = FALSE
            WHERE user_id = $1 AND token = $2 AND is_active
            ",
        )
        .bind(user_id.into_inner())
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate_by_id(&self, id: SessionId) -> RepoResult<()> {
        sqlx::query("UPDATE user_sessions SET is_active = FALSE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn rotate_token(
        &self,
        id: SessionId,
        token: &str,
        login_time: DateTime<Utc>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE user_sessions
            SET token = $2, login_time = $3
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(token)
        .bind(login_time)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
