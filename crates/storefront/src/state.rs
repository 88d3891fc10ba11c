//! Application state for one storefront run.
//!
//! [`Storefront`] owns the storage backend and every component built on it.
//! The UI layer drives it through the user-facing actions below, which add
//! the checks and Sentry context the components themselves don't carry.

use std::sync::Arc;

use tokio::runtime::Handle;

use shopshifter_core::{CartItem, Email, ProductId};

use crate::auth::{LoginForm, MockAuthGateway, SignupForm};
use crate::catalog::CatalogClient;
use crate::config::{StorageBackend, StorefrontConfig};
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::persistence::LocalCache;
use crate::session::SessionStore;
use crate::storage::{FileStorage, MemoryStorage, NullStorage, Storage};

/// Shown when a logged-out user tries to add to the cart.
pub const LOGIN_REQUIRED: &str = "Please log in to add items to your cart";

/// Everything a running storefront needs.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    session: SessionStore,
    auth: MockAuthGateway,
    catalog: CatalogClient,
}

impl Storefront {
    /// Build the storefront from configuration with an empty session.
    ///
    /// Debounce timers run on `runtime`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client can't be built.
    pub fn new(config: StorefrontConfig, runtime: Handle) -> Result<Self> {
        let storage = open_storage(&config);
        Self::with_storage(config, storage, runtime)
    }

    /// Build the storefront over an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client can't be built.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
        runtime: Handle,
    ) -> Result<Self> {
        let cache = LocalCache::new(storage);
        let session = SessionStore::new(cache.clone(), config.save_debounce, runtime);
        let auth = MockAuthGateway::new(cache);
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            config,
            session,
            auth,
            catalog,
        })
    }

    /// Rehydrate the session from storage. Call once at startup.
    pub fn start(&mut self) {
        if !self.session.load_session() {
            return;
        }
        if let Some(user) = self.session.user() {
            set_sentry_user(user.as_str());
            tracing::info!(user = %user, "Restored session");
        }
    }

    /// Flush any pending cart save. Call before the process exits.
    pub fn shutdown(&self) {
        self.session.shutdown();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    #[must_use]
    pub const fn auth(&self) -> &MockAuthGateway {
        &self.auth
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    // =========================================================================
    // Account actions
    // =========================================================================

    /// Register a new demo user and log them in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the form is invalid or the email is taken.
    pub fn sign_up(&mut self, form: &SignupForm) -> Result<Email> {
        let email = self.auth.sign_up(form)?;
        self.log_in_as(email.clone());
        Ok(email)
    }

    /// Log in with a form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the form is invalid or the credentials
    /// don't match.
    pub fn log_in(&mut self, form: &LoginForm) -> Result<Email> {
        let email = self.auth.log_in(form)?;
        self.log_in_as(email.clone());
        Ok(email)
    }

    /// Log out, saving the cart first. Returns the user who was logged in.
    pub fn log_out(&mut self) -> Option<Email> {
        let user = self.session.user().cloned();
        self.session.logout();
        clear_sentry_user();
        if let Some(user) = &user {
            add_breadcrumb("auth", "Logged out", Some(&[("user", user.as_str())]));
        }
        user
    }

    /// Delete the logged-in user's account, then log out.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if nobody is logged in.
    pub fn delete_profile(&mut self) -> Result<Email> {
        let user = self
            .session
            .user()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Please log in first".to_string()))?;
        self.auth.delete_user(&user);
        self.log_out();
        Ok(user)
    }

    fn log_in_as(&mut self, email: Email) {
        set_sentry_user(email.as_str());
        add_breadcrumb("auth", "Logged in", Some(&[("user", email.as_str())]));
        self.session.login(email);
    }

    // =========================================================================
    // Cart actions
    // =========================================================================

    /// Look up a product and add `quantity` of it to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when logged out, before the catalog
    /// is contacted, or an error if the product can't be fetched.
    pub async fn add_product_to_cart(
        &mut self,
        id: ProductId,
        quantity: u32,
    ) -> Result<CartItem> {
        if !self.session.is_logged_in() {
            return Err(AppError::Unauthorized(LOGIN_REQUIRED.to_string()));
        }
        if quantity == 0 {
            return Err(AppError::BadRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let product = self.catalog.product(id).await?;
        let item = CartItem::from_product(&product, quantity);
        let product_id = id.to_string();
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.session.add_to_cart(item.clone());
        Ok(item)
    }
}

/// Open the configured storage backend.
fn open_storage(config: &StorefrontConfig) -> Arc<dyn Storage> {
    match config.storage {
        StorageBackend::File => {
            let storage = FileStorage::new(&config.data_dir);
            tracing::debug!(path = %storage.path().display(), "Using file storage");
            Arc::new(storage)
        }
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::None => {
            tracing::warn!("Storage disabled; nothing will be persisted");
            Arc::new(NullStorage)
        }
    }
}
