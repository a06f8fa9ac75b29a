//! Authentication service
//!
//! Handles registration, login, bearer token validation, token refresh,
//! and logout. Every token is tied to a session row; a token is only
//! accepted while its session is active and younger than the token TTL.

use roster_common::{validate_password_strength, AppError, TOKEN_TYPE};
use roster_core::entities::{NewSession, Session, User};
use roster_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{
    CreateUserRequest, LoginRequest, MessageResponse, RefreshResponse, SessionInfo,
    TokenResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::{check_manager, new_user, parse_role};

/// The user and session behind a validated bearer token
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: User,
    pub session: Session,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: CreateUserRequest) -> ServiceResult<MessageResponse> {
        validate_password_strength(&request.password)?;
        let role = parse_role(&request.role)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        if let Some(manager_id) = request.manager_id {
            check_manager(self.ctx, None, manager_id).await?;
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let manager_id = request.manager_id;
        let user = self
            .ctx
            .user_repo()
            .create(&new_user(request, password_hash, role, manager_id))
            .await?;

        info!(user_id = %user.id, "User registered");

        Ok(MessageResponse::new(format!(
            "User {} registered successfully",
            user.name
        )))
    }

    /// Login with email and password, opening a new session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: invalid password"))?;

        if !user.is_active {
            warn!(user_id = %user.id, "Login rejected: account deactivated");
            return Err(AppError::AccountDeactivated.into());
        }

        let token = self.ctx.jwt_service().issue(&user)?;
        let session = self
            .ctx
            .session_repo()
            .create(&NewSession {
                user_id: user.id,
                device_id: request.device_id,
                device_location: request.device_location,
                token: token.clone(),
                login_time: self.ctx.clock().now(),
            })
            .await?;

        info!(user_id = %user.id, session_id = %session.id, "User logged in");

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE.to_string(),
            role: user.role,
            session: SessionInfo {
                user_id: user.id,
                device_id: session.device_id,
                device_location: session.device_location,
            },
        })
    }

    /// Resolve a bearer token to its user and active session
    ///
    /// Sessions older than the token TTL are deactivated here and rejected.
    #[instrument(skip_all)]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<Authenticated> {
        let claims = self
            .ctx
            .jwt_service()
            .decode(token)
            .inspect_err(|e| warn!(error = %e, "Rejected bearer token"))?;
        let user_id = claims.user_id()?;

        let session = self
            .ctx
            .session_repo()
            .find_active(user_id, token)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "No active session for token");
                AppError::SessionInactive
            })?;

        let now = self.ctx.clock().now();
        if session.is_expired(now, self.ctx.jwt_service().token_ttl()) {
            self.ctx.session_repo().deactivate_by_id(session.id).await?;
            info!(user_id = %user_id, session_id = %session.id, "Session expired");
            return Err(AppError::TokenExpired.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            warn!(user_id = %user_id, "Token presented for deactivated account");
            return Err(AppError::AccountDeactivated.into());
        }

        Ok(Authenticated { user, session })
    }

    /// Close the caller's session
    #[instrument(skip_all, fields(user_id = %auth.user.id))]
    pub async fn logout(&self, auth: &Authenticated) -> ServiceResult<MessageResponse> {
        let closed = self
            .ctx
            .session_repo()
            .deactivate(auth.user.id, &auth.session.token)
            .await?;

        if closed {
            info!(session_id = %auth.session.id, "User logged out");
        }

        Ok(MessageResponse::new("Logged out successfully"))
    }

    /// Issue a fresh token on the caller's session
    #[instrument(skip_all, fields(user_id = %auth.user.id))]
    pub async fn refresh(&self, auth: &Authenticated) -> ServiceResult<RefreshResponse> {
        let token = self.ctx.jwt_service().issue(&auth.user)?;
        self.ctx
            .session_repo()
            .rotate_token(auth.session.id, &token, self.ctx.clock().now())
            .await?;

        info!(session_id = %auth.session.id, "Token refreshed");

        Ok(RefreshResponse {
            access_token: token,
            token_type: TOKEN_TYPE.to_string(),
        })
    }

    /// Profile of the authenticated user
    pub fn me(&self, auth: &Authenticated) -> UserResponse {
        UserResponse::from(&auth.user)
    }
}
