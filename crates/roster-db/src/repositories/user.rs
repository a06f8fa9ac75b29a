//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{NewUser, User};
use roster_core::error::DomainError;
use roster_core::traits::{RepoResult, ReportQuery, UserRepository};
use roster_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_write_error};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, location, picture, date_of_birth, joined_date,
                   manager_id, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, location, picture, date_of_birth, joined_date,
                   manager_id, is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (name, email, password_hash, role, location, picture,
                               date_of_birth, joined_date, manager_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, email, role, location, picture, date_of_birth, joined_date,
                      manager_id, is_active, created_at, updated_at
            ",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.location)
        .bind(&user.picture)
        .bind(user.date_of_birth)
        .bind(user.joined_date)
        .bind(user.manager_id.map(UserId::into_inner))
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || DomainError::EmailAlreadyExists))?;

        User::try_from(model)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $2, email = $3, role = $4, location = $5, picture = $6,
                date_of_birth = $7, joined_date = $8, manager_id = $9, is_active = $10,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.location)
        .bind(&user.picture)
        .bind(user.date_of_birth)
        .bind(user.joined_date)
        .bind(user.manager_id.map(UserId::into_inner))
        .bind(user.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, || DomainError::EmailAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_reports(&self, manager_id: UserId, query: ReportQuery) -> RepoResult<Vec<User>> {
        let models = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, email, role, location, picture, date_of_birth, joined_date,
                   manager_id, is_active, created_at, updated_at
            FROM users
            WHERE manager_id = $1 AND ($2 OR is_active)
            ORDER BY id
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(manager_id.into_inner())
        .bind(query.include_inactive)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_reports(&self, manager_id: UserId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE manager_id = $1")
            .bind(manager_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
