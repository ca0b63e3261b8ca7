//! Domain-level error types.

use quill_shared::ErrorResponse;
use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }

    /// Problem-details payload a transport can answer with.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::NotFound { .. } | DomainError::Storage(RepoError::NotFound) => {
                ErrorResponse::not_found(self.to_string())
            }
            DomainError::InvalidArgument(msg) => ErrorResponse::bad_request(msg.clone()),
            DomainError::Duplicate(msg) => ErrorResponse::conflict(msg.clone()),
            DomainError::Storage(RepoError::Constraint(msg)) => ErrorResponse::conflict(msg.clone()),
            DomainError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::internal_error()
            }
            DomainError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
                ErrorResponse::internal_error()
            }
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = DomainError::not_found("Article", Uuid::nil());
        let response = err.to_error_response();
        assert_eq!(response.status, 404);
        assert!(response.detail.unwrap().contains("Article"));
    }

    #[test]
    fn invalid_argument_maps_to_400() {
        let response = DomainError::InvalidArgument("bad status".into()).to_error_response();
        assert_eq!(response.status, 400);
        assert_eq!(response.detail.as_deref(), Some("bad status"));
    }

    #[test]
    fn storage_errors_hide_details() {
        let err: DomainError = RepoError::Query("syntax error at or near".into()).into();
        let response = err.to_error_response();
        assert_eq!(response.status, 500);
        assert!(response.detail.is_none());
    }

    #[test]
    fn constraint_violation_maps_to_conflict() {
        let err: DomainError = RepoError::Constraint("Entity already exists".into()).into();
        assert_eq!(err.to_error_response().status, 409);
    }
}
