//! Mapping of use-case failures onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pokerledger_domain::DomainError;
use pokerledger_shared::{ErrorCode, ErrorResponse};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::{GameError, StatsError, UserError};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(String),
    PreconditionFailed(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    /// Detail is logged, never returned.
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorCode) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            ApiError::PreconditionFailed(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::PreconditionFailed)
            }
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::PreconditionFailed(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) | DomainError::Parse(msg) => {
                ApiError::Validation(msg)
            }
            DomainError::PreconditionFailed(msg) => ApiError::PreconditionFailed(msg),
            DomainError::Constraint(msg) => ApiError::Conflict(msg),
            e @ DomainError::NotFound { .. } => ApiError::NotFound(e.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            RepoError::Conflict(msg) => ApiError::Conflict(msg),
            RepoError::Database { .. } | RepoError::Serialization(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            GameError::Forbidden(msg) => ApiError::Forbidden(msg),
            GameError::Domain(e) => e.into(),
            GameError::Repo(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            UserError::Forbidden(msg) => ApiError::Forbidden(msg),
            UserError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            UserError::Domain(e) => e.into(),
            UserError::Repo(e) => e.into(),
            UserError::Password(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StatsError> for ApiError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::WouldGoNegative { .. } | StatsError::WouldOverflow { .. } => {
                ApiError::Validation(e.to_string())
            }
            StatsError::Domain(e) => e.into(),
            StatsError::Repo(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
