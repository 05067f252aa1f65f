//! Policy Error Types
//!
//! This module provides policy-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::DomainListId;
use thiserror::Error;

use crate::domain::value_object::domain_name::DomainNameError;
use crate::domain::value_object::host_addr::HostAddrError;

/// Policy-specific result type alias
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Policy-specific error variants
///
/// Validation and not-found conditions are always returned, never panicked;
/// storage failures carry the collaborator's message verbatim.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Client not found
    #[error("Client not found")]
    ClientNotFound,

    /// Domain list not found
    #[error("Domain list not found")]
    DomainListNotFound,

    /// Removing a deny target that no rule references
    #[error("Domain list {0} is not blocked for this client")]
    TargetNotBlocked(DomainListId),

    /// A client with the same IP is already registered
    #[error("A client with ip address '{0}' already exists.")]
    DuplicateClientIp(String),

    /// Malformed domain name
    #[error(transparent)]
    InvalidDomainName(#[from] DomainNameError),

    /// Malformed client address
    #[error(transparent)]
    InvalidHostAddr(#[from] HostAddrError),

    /// Pause duration outside the preset set
    #[error("Unsupported pause duration: {0} minutes")]
    UnsupportedDuration(i64),

    /// Load/save failure from the storage collaborator
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PolicyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PolicyError::ClientNotFound
            | PolicyError::DomainListNotFound
            | PolicyError::TargetNotBlocked(_) => StatusCode::NOT_FOUND,
            PolicyError::DuplicateClientIp(_) => StatusCode::CONFLICT,
            PolicyError::InvalidDomainName(_)
            | PolicyError::InvalidHostAddr(_)
            | PolicyError::UnsupportedDuration(_) => StatusCode::BAD_REQUEST,
            PolicyError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::ClientNotFound
            | PolicyError::DomainListNotFound
            | PolicyError::TargetNotBlocked(_) => ErrorKind::NotFound,
            PolicyError::DuplicateClientIp(_) => ErrorKind::Conflict,
            PolicyError::InvalidDomainName(_)
            | PolicyError::InvalidHostAddr(_)
            | PolicyError::UnsupportedDuration(_) => ErrorKind::BadRequest,
            PolicyError::Storage(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PolicyError::Storage(msg) => {
                tracing::error!(message = %msg, "Policy storage error");
            }
            PolicyError::DuplicateClientIp(ip) => {
                tracing::warn!(ip = %ip, "Rejected duplicate client registration");
            }
            _ => {
                tracing::debug!(error = %self, "Policy error");
            }
        }
    }
}

impl IntoResponse for PolicyError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for PolicyError {
    fn from(err: AppError) -> Self {
        PolicyError::Storage(err.to_string())
    }
}
