//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] botanical_core::EmailError),

    /// The password field was left empty.
    #[error("password is required")]
    MissingPassword,

    /// Password too weak or invalid.
    #[error("{0}")]
    WeakPassword(String),

    /// Signup password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
}
