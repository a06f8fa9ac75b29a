//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to an active
//! session and its user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use roster_core::User;
use roster_service::{AuthService, Authenticated};

use crate::response::ApiError;
use crate::state::AppState;

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Authenticated);

impl CurrentUser {
    /// The caller's account
    pub fn user(&self) -> &User {
        &self.0.user
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let authenticated = AuthService::new(app_state.service_context())
            .validate_token(bearer.token())
            .await?;

        Ok(CurrentUser(authenticated))
    }
}
