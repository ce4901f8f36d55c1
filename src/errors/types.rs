//! Error type definitions for the StreamVibe admin service
//!
//! The hierarchy mirrors the layers of the service: the backend client, the
//! auth collaborator, client-side form validation and the web surface.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Row-level backend errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Form validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Permission denied errors
    #[error("Permission denied: {action} on {resource}")]
    PermissionDenied { action: String, resource: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors returned by the row-level backend client
///
/// The admin panel does not distinguish between these variants when
/// reporting to the user; they exist for logging and for the HTTP layer.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Request rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Response body could not be decoded into the expected shape
    #[error("Decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single-row read matched zero rows
    #[error("No rows returned from {table}")]
    NoRows { table: String },

    /// Constraint violations (foreign key, not null)
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// The backend is unreachable or refused to serve (used by test doubles)
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors returned by the auth collaborator
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credentials were refused
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The access token is unknown, expired or revoked
    #[error("Invalid session: {message}")]
    InvalidSession { message: String },

    /// No session is active
    #[error("Not signed in")]
    NotSignedIn,

    /// The request never produced a response
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The auth service answered with a non-success status
    #[error("Auth request rejected: {status} - {message}")]
    Rejected { status: u16, message: String },
}

/// Client-side validation failures, raised before any backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
}

impl AppError {
    /// Create a permission denied error
    pub fn permission_denied<A: Into<String>, R: Into<String>>(action: A, resource: R) -> Self {
        Self::PermissionDenied {
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl BackendError {
    /// Create a rejection error from a status code and backend message
    pub fn rejected<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Create a no-rows error for a single-row read
    pub fn no_rows<T: Into<String>>(table: T) -> Self {
        Self::NoRows {
            table: table.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint_violation<C: Into<String>, M: Into<String>>(
        constraint: C,
        message: M,
    ) -> Self {
        Self::ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Create an unavailable error
    pub fn unavailable<M: Into<String>>(message: M) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl AuthError {
    /// Create an invalid session error
    pub fn invalid_session<M: Into<String>>(message: M) -> Self {
        Self::InvalidSession {
            message: message.into(),
        }
    }

    /// Create a rejection error from a status code and auth service message
    pub fn rejected<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

impl ValidationError {
    /// Create a missing fields error
    pub fn missing_fields(fields: Vec<&'static str>) -> Self {
        Self::MissingFields { fields }
    }

    /// Names of the fields that failed validation
    pub fn fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields { fields } => fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_every_field() {
        let error = ValidationError::missing_fields(vec!["name", "stream_url"]);
        assert_eq!(error.to_string(), "Missing required fields: name, stream_url");
        assert_eq!(error.fields(), &["name", "stream_url"]);
    }

    #[test]
    fn test_backend_error_converts_into_app_error() {
        let error: AppError = BackendError::rejected(409, "duplicate key").into();
        assert!(matches!(
            error,
            AppError::Backend(BackendError::Rejected { status: 409, .. })
        ));
    }
}
