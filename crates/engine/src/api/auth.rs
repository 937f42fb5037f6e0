//! Principal extraction.
//!
//! Authentication happens upstream. The identity collaborator forwards the verified caller in
//! the `x-user-id` and `x-user-role` headers, which are trusted as given.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pokerledger_domain::{UserId, UserRole};

use super::error::ApiError;
use crate::use_cases::Principal;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let Some(id) = header(USER_ID_HEADER) else {
            tracing::debug!(uri = %parts.uri, "Request without principal");
            return Err(ApiError::Unauthorized("Authentication required".into()));
        };
        let id = UserId::new(id).map_err(|_| ApiError::Unauthorized("Invalid user id".into()))?;

        // A missing role means an ordinary user.
        let role = match header(USER_ROLE_HEADER) {
            Some(role) => role
                .parse::<UserRole>()
                .map_err(|_| ApiError::Unauthorized("Invalid user role".into()))?,
            None => UserRole::User,
        };

        Ok(Principal::new(id, role))
    }
}
