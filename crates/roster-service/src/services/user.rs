//! User service
//!
//! Account administration for managers. Every operation passes the role
//! gate before storage is touched; operations on a specific account then
//! require the account to be a direct report of the caller.

use roster_common::validate_password_strength;
use roster_core::entities::{NewUser, User};
use roster_core::policy::{
    ensure, ensure_not_self_deactivation, validate_manager_assignment, validate_role_change,
    Operation,
};
use roster_core::traits::ReportQuery;
use roster_core::{DomainError, Role, RoleParseError, UserId};
use tracing::{info, instrument};

use crate::dto::{
    AssignManagerRequest, CreateUserRequest, ListUsersQuery, MessageResponse, Page,
    UpdateProfileRequest, UpdateUserRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Parse a role name from a request
pub(super) fn parse_role(raw: &str) -> Result<Role, DomainError> {
    raw.parse()
        .map_err(|RoleParseError(name)| DomainError::InvalidRole(name))
}

/// Check that `manager_id` names a user who may manage `target`
///
/// `target` is `None` while the account is being created.
pub(super) async fn check_manager(
    ctx: &ServiceContext,
    target: Option<UserId>,
    manager_id: UserId,
) -> ServiceResult<()> {
    let manager = ctx.user_repo().find_by_id(manager_id).await?;
    validate_manager_assignment(target, manager_id, manager.as_ref())?;
    Ok(())
}

/// Insert data for an account creation request
pub(super) fn new_user(
    request: CreateUserRequest,
    password_hash: String,
    role: Role,
    manager_id: Option<UserId>,
) -> NewUser {
    NewUser {
        name: request.name,
        email: request.email,
        password_hash,
        role,
        manager_id,
        is_active: request.is_active.unwrap_or(true),
        location: request.location,
        picture: request.picture,
        date_of_birth: request.date_of_birth,
        joined_date: request.joined_date,
    }
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a direct report of `actor` for `operation`
    async fn load_report(
        &self,
        actor: &User,
        user_id: UserId,
        operation: Operation,
    ) -> ServiceResult<User> {
        ensure(actor, operation, None)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        ensure(actor, operation, Some(&user))?;
        Ok(user)
    }

    /// Create an account, reporting to the caller unless another manager is named
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id, email = %request.email))]
    pub async fn create_user(
        &self,
        actor: &User,
        request: CreateUserRequest,
    ) -> ServiceResult<UserResponse> {
        ensure(actor, Operation::CreateUser, None)?;
        validate_password_strength(&request.password)?;
        let role = parse_role(&request.role)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let manager_id = match request.manager_id {
            Some(manager_id) => {
                check_manager(self.ctx, None, manager_id).await?;
                manager_id
            }
            None => actor.id,
        };

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&new_user(request, password_hash, role, Some(manager_id)))
            .await?;

        info!(user_id = %user.id, manager_id = %manager_id, "User created");

        Ok(UserResponse::from(user))
    }

    /// Direct reports of the caller, active only unless asked otherwise
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list_users(
        &self,
        actor: &User,
        query: ListUsersQuery,
        page: Page,
    ) -> ServiceResult<Vec<UserResponse>> {
        self.reports(actor, query.include_inactive, page).await
    }

    /// Every direct report of the caller
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list_team(&self, actor: &User, page: Page) -> ServiceResult<Vec<UserResponse>> {
        self.reports(actor, true, page).await
    }

    async fn reports(
        &self,
        actor: &User,
        include_inactive: bool,
        page: Page,
    ) -> ServiceResult<Vec<UserResponse>> {
        ensure(actor, Operation::ListTeam, None)?;

        let users = self
            .ctx
            .user_repo()
            .find_reports(
                actor.id,
                ReportQuery {
                    include_inactive,
                    limit: page.limit,
                    offset: page.offset,
                },
            )
            .await?;

        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Get a direct report
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn get_user(&self, actor: &User, user_id: UserId) -> ServiceResult<UserResponse> {
        let user = self.load_report(actor, user_id, Operation::ManageUser).await?;
        Ok(UserResponse::from(user))
    }

    /// Partially update a direct report's account
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn update_user(
        &self,
        actor: &User,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        if request.is_active == Some(false) {
            ensure(actor, Operation::DeactivateUser, None)?;
            ensure_not_self_deactivation(actor, user_id)?;
        }

        let mut user = self.load_report(actor, user_id, Operation::ManageUser).await?;

        if let Some(email) = request.email {
            if email != user.email && self.ctx.user_repo().email_exists(&email).await? {
                return Err(DomainError::EmailAlreadyExists.into());
            }
            user.email = email;
        }

        if let Some(raw) = request.role.as_deref() {
            let role = parse_role(raw)?;
            let reports = self.ctx.user_repo().count_reports(user.id).await?;
            validate_role_change(&user, role, reports)?;
            user.role = role;
        }

        if let Some(manager_id) = request.manager_id {
            check_manager(self.ctx, Some(user.id), manager_id).await?;
            user.manager_id = Some(manager_id);
        }

        if let Some(name) = request.name {
            user.name = name;
        }
        if request.location.is_some() {
            user.location = request.location;
        }
        if request.picture.is_some() {
            user.picture = request.picture;
        }
        if request.date_of_birth.is_some() {
            user.date_of_birth = request.date_of_birth;
        }
        if request.joined_date.is_some() {
            user.joined_date = request.joined_date;
        }
        if let Some(is_active) = request.is_active {
            user.is_active = is_active;
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User updated");

        Ok(UserResponse::from(user))
    }

    /// Update the profile fields of a direct report
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn update_profile(
        &self,
        actor: &User,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load_report(actor, user_id, Operation::ManageUser).await?;

        if request.picture.is_some() {
            user.picture = request.picture;
        }
        if request.date_of_birth.is_some() {
            user.date_of_birth = request.date_of_birth;
        }
        if request.joined_date.is_some() {
            user.joined_date = request.joined_date;
        }

        self.ctx.user_repo().update(&user).await?;

        Ok(UserResponse::from(user))
    }

    /// Move a direct report under another manager
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn assign_manager(
        &self,
        actor: &User,
        user_id: UserId,
        request: AssignManagerRequest,
    ) -> ServiceResult<MessageResponse> {
        let mut user = self.load_report(actor, user_id, Operation::ManageUser).await?;

        check_manager(self.ctx, Some(user.id), request.manager_id).await?;
        user.manager_id = Some(request.manager_id);
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, manager_id = %request.manager_id, "Manager assigned");

        Ok(MessageResponse::new(format!(
            "Assigned user {} to manager {}",
            user.id, request.manager_id
        )))
    }

    /// Soft-delete a direct report
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn deactivate(&self, actor: &User, user_id: UserId) -> ServiceResult<MessageResponse> {
        ensure(actor, Operation::DeactivateUser, None)?;
        ensure_not_self_deactivation(actor, user_id)?;

        let mut user = self
            .load_report(actor, user_id, Operation::DeactivateUser)
            .await?;

        if !user.is_active {
            return Ok(MessageResponse::new("User already deactivated"));
        }

        user.is_active = false;
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User deactivated");

        Ok(MessageResponse::new(format!("User {} deactivated", user.id)))
    }

    /// Reactivate a direct report
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn activate(&self, actor: &User, user_id: UserId) -> ServiceResult<MessageResponse> {
        let mut user = self.load_report(actor, user_id, Operation::ManageUser).await?;

        if user.is_active {
            return Ok(MessageResponse::new("User already active"));
        }

        user.is_active = true;
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "User activated");

        Ok(MessageResponse::new(format!("User {} activated", user.id)))
    }
}
