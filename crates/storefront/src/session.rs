//! Session and cart state.
//!
//! [`SessionStore`] is the single source of truth for who is logged in and
//! what is in their cart. It is constructed explicitly and handed to
//! whatever drives the UI, rather than living in a global.
//!
//! Lifecycle:
//! 1. `SessionStore::new` on startup (empty session)
//! 2. [`SessionStore::load_session`] once to rehydrate from storage
//! 3. operations as the user acts; cart edits are saved through the
//!    debounced writer
//! 4. [`SessionStore::shutdown`] before exit to flush the last burst
//!
//! No operation fails: missing or malformed persisted data reads as an
//! empty cart.

use std::time::Duration;

use tokio::runtime::Handle;

use shopshifter_core::{Cart, CartItem, Email, Price, ProductId};

use crate::cache_writer::DebouncedWriter;
use crate::persistence::LocalCache;

/// Login state and active cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_logged_in: bool,
    pub user: Option<Email>,
    pub cart: Cart,
}

/// Owner of the one [`Session`] of a running storefront.
#[derive(Debug)]
pub struct SessionStore {
    session: Session,
    cache: LocalCache,
    writer: DebouncedWriter,
}

impl SessionStore {
    /// Create a store with an empty session. Cart saves are debounced by
    /// `save_delay`, with timers running on `runtime`.
    #[must_use]
    pub fn new(cache: LocalCache, save_delay: Duration, runtime: Handle) -> Self {
        let writer = DebouncedWriter::new(cache.clone(), save_delay, runtime);
        Self {
            session: Session::default(),
            cache,
            writer,
        }
    }

    // =========================================================================
    // Login state
    // =========================================================================

    /// Log `email` in and load their saved cart.
    pub fn login(&mut self, email: Email) {
        // Anything still pending belongs to the previous user.
        self.writer.flush();

        let cart = self.cache.read_cart(&email);
        tracing::info!(user = %email, lines = cart.len(), "User logged in");

        self.session = Session {
            is_logged_in: true,
            user: Some(email),
            cart,
        };
        self.schedule_save();
    }

    /// Save the cart immediately, then reset to an empty session and forget
    /// the logged-in user.
    pub fn logout(&mut self) {
        // The write below supersedes any pending save, and a pending save
        // firing later would restore the session pointer.
        self.writer.cancel();

        if let Some(user) = &self.session.user {
            self.cache.write_cart(user, &self.session.cart);
            tracing::info!(user = %user, "User logged out");
        }
        self.session = Session::default();
        self.cache.clear_session_user();
    }

    /// Restore the session of the last logged-in user, if one was saved.
    ///
    /// Safe to call repeatedly. Returns whether a session was restored.
    pub fn load_session(&mut self) -> bool {
        self.writer.flush();

        let Some(user) = self.cache.read_session_user() else {
            return false;
        };
        let cart = self.cache.read_cart(&user);
        tracing::debug!(user = %user, lines = cart.len(), "Session restored");

        self.session = Session {
            is_logged_in: true,
            user: Some(user),
            cart,
        };
        true
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a line, or grow the existing line for the same product.
    pub fn add_to_cart(&mut self, item: CartItem) {
        tracing::debug!(product_id = %item.id, quantity = item.quantity, "Add to cart");
        self.session.cart.add(item);
        self.schedule_save();
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.session.cart.remove(id);
        self.schedule_save();
    }

    /// Set a line's quantity. Zero removes the line; unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        self.session.cart.set_quantity(id, quantity);
        self.schedule_save();
    }

    pub fn clear_cart(&mut self) {
        self.session.cart.clear();
        self.schedule_save();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_logged_in
    }

    #[must_use]
    pub const fn user(&self) -> Option<&Email> {
        self.session.user.as_ref()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.session.cart
    }

    /// Units in the cart, for the navigation badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.session.cart.item_count()
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.session.cart.subtotal()
    }

    /// Whether a debounced save is waiting to be written.
    #[must_use]
    pub fn has_pending_save(&self) -> bool {
        self.writer.has_pending()
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Write any pending save now. Call before the process exits.
    pub fn shutdown(&self) {
        if self.writer.flush() {
            tracing::debug!("Flushed pending session save on shutdown");
        }
    }

    fn schedule_save(&self) {
        self.writer.schedule_save(&self.session);
    }
}
