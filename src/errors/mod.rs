//! Centralized error handling for the StreamVibe admin service
//!
//! This module unifies the error types used across the application layers.
//!
//! # Error Categories
//!
//! - **Backend Errors**: row-level backend queries (transport, rejection, decoding)
//! - **Auth Errors**: sign-in, session restore and sign-out failures
//! - **Validation Errors**: required form fields missing before submission
//! - **Configuration Errors**: invalid or unreadable configuration
//!
//! # Usage
//!
//! ```rust
//! use streamvibe::errors::{AppError, AppResult};
//!
//! async fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for backend query Results
pub type BackendResult<T> = Result<T, BackendError>;

/// Convenience type alias for auth Results
pub type AuthResult<T> = Result<T, AuthError>;
