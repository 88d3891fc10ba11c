//! Unified error handling with Sentry integration.
//!
//! [`AppError`] is what the UI layer sees. Storage problems never show up
//! here: the persistence adapter swallows them. Server-side style failures
//! (catalog outages, bad configuration) are captured to Sentry; user
//! mistakes (wrong password, duplicate email) are not.

use thiserror::Error;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The action needs a logged-in user.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error should be reported to Sentry.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        match self {
            Self::Config(_) => true,
            Self::Catalog(err) => !matches!(err, CatalogError::NotFound(_)),
            Self::Auth(_) | Self::Unauthorized(_) | Self::BadRequest(_) => false,
        }
    }

    /// Message safe to show to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::NotFound(_) => "Product not found".to_string(),
                CatalogError::RateLimited(secs) => {
                    format!("The catalog is busy, try again in {secs} seconds")
                }
                _ => "Failed to load products. Please try again later.".to_string(),
            },
            // Auth messages are written for users already.
            Self::Auth(err) => err.to_string(),
            Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::Config(err) => err.to_string(),
        }
    }

    /// Capture to Sentry if reportable and log it. Returns the user message.
    pub fn report(&self) -> String {
        if self.is_reportable() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::debug!(error = %self, "Command rejected");
        }
        self.user_message()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after login to associate errors with the demo user.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
