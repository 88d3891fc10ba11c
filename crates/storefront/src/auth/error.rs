//! Authentication error types.

use thiserror::Error;

/// A sign-up or login form failed client-side checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Sign-up requires a non-blank name.
    #[error("Name is required")]
    NameRequired,

    /// The email doesn't look like `name@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// The password is shorter than the minimum.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

/// Errors that can occur during demo authentication.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A user with this email is already registered.
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// No user matches both the email and the password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The form was rejected before reaching the gateway.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The email could not be parsed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shopshifter_core::EmailError),
}
