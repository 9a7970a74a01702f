//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required signup/login field was empty.
    #[error("all fields are required")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] sanchi_core::EmailError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// No account exists for the email.
    #[error("user not found")]
    UserNotFound,

    /// Password mismatch for an existing account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with the email already exists.
    #[error("email already exists")]
    EmailTaken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
