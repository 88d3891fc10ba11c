//! Mock authentication gateway.
//!
//! Checks credentials against the demo user list in the local cache.
//! Passwords are stored and compared as plain text: this exists so the
//! storefront has something to log in with, and protects nothing.

mod error;
pub mod forms;

pub use error::{AuthError, ValidationError};
pub use forms::{LoginForm, SignupForm};

use secrecy::ExposeSecret;

use shopshifter_core::{Email, UserRecord};

use crate::persistence::LocalCache;

/// Demo sign-up and login against the cached user list.
#[derive(Debug, Clone)]
pub struct MockAuthGateway {
    cache: LocalCache,
}

impl MockAuthGateway {
    #[must_use]
    pub const fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    /// Append a new demo user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if `email` doesn't parse and
    /// `AuthError::DuplicateEmail` if a user with exactly this email exists.
    pub fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Email, AuthError> {
        let email = Email::parse(email)?;
        // An unreadable list is never rewritten, since that would drop every
        // stored user. The new user is then simply not recorded.
        let users = self.cache.try_read_users();
        if users
            .iter()
            .flatten()
            .any(|user| user.email == email.as_str())
        {
            return Err(AuthError::DuplicateEmail);
        }

        if let Some(mut users) = users {
            users.push(UserRecord {
                name: name.to_owned(),
                email: email.as_str().to_owned(),
                password: password.to_owned(),
            });
            self.cache.write_users(&users);
        }
        tracing::info!(user = %email, "Demo user registered");
        Ok(email)
    }

    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` unless a stored user matches
    /// both exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Email, AuthError> {
        let found = self
            .cache
            .read_users()
            .iter()
            .any(|user| user.matches(email, password));
        if !found {
            tracing::debug!(user = %email, "Rejected demo login");
            return Err(AuthError::InvalidCredentials);
        }
        // A stored email that no longer parses can't be logged into.
        Email::parse(email).map_err(|_| AuthError::InvalidCredentials)
    }

    /// Validate a sign-up form, then register it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` without touching storage if the form
    /// is invalid, otherwise as [`Self::register_user`].
    pub fn sign_up(&self, form: &SignupForm) -> Result<Email, AuthError> {
        form.validate()?;
        self.register_user(
            form.name.trim(),
            &form.email,
            form.password.expose_secret(),
        )
    }

    /// Validate a login form, then authenticate it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` without touching storage if the form
    /// is invalid, otherwise as [`Self::authenticate`].
    pub fn log_in(&self, form: &LoginForm) -> Result<Email, AuthError> {
        form.validate()?;
        self.authenticate(&form.email, form.password.expose_secret())
    }

    /// Remove the demo user with `email`. Missing users are ignored.
    pub fn delete_user(&self, email: &Email) {
        self.cache.delete_user(email.as_str());
        tracing::info!(user = %email, "Demo user deleted");
    }

    /// Every registered demo user.
    #[must_use]
    pub fn users(&self) -> Vec<UserRecord> {
        self.cache.read_users()
    }
}
