//! Sign-up and login forms.
//!
//! These checks run before the gateway is ever called, the way the
//! storefront's auth page rejects a submission client-side.

use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use super::error::ValidationError;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Sign-up form data.
#[derive(Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Login form data.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl SignupForm {
    /// Check the form, reporting the first problem in field order.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl LoginForm {
    /// Check the form, reporting the first problem in field order.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

fn validate_password(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str) -> SignupForm {
        SignupForm {
            name: name.to_string(),
            email: email.to_string(),
            password: SecretString::from(password),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert_eq!(signup("Ann", "ann@example.com", "secret1").validate(), Ok(()));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            signup("   ", "ann@example.com", "secret1").validate(),
            Err(ValidationError::NameRequired)
        );
    }

    #[test]
    fn test_email_shape() {
        for bad in ["", "ann", "ann@example", "ann @example.com", "@example.com"] {
            assert_eq!(
                signup("Ann", bad, "secret1").validate(),
                Err(ValidationError::InvalidEmail),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_short_password() {
        let form = LoginForm {
            email: "ann@example.com".to_string(),
            password: SecretString::from("12345"),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::NameRequired.to_string(), "Name is required");
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
    }
}
