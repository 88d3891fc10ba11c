//! Local persistence adapter.
//!
//! A typed façade over [`Storage`] for the three things the storefront
//! keeps between runs: the demo user list, the logged-in user pointer, and
//! one cart per user. Every operation is best-effort. Read and parse
//! failures come back as "nothing stored" and write failures are logged;
//! nothing here returns an error to its caller.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use shopshifter_core::{Cart, CartItem, Email, UserRecord};

use crate::storage::{Storage, StorageError};

/// Storage keys.
pub mod keys {
    /// Email of the logged-in user, stored as a raw string.
    pub const SESSION_USER: &str = "user";

    /// JSON array of every demo user record.
    pub const DEMO_USERS: &str = "demoUsers";

    /// Prefix of the per-user cart key, `cart_<email>`.
    pub const CART_PREFIX: &str = "cart_";

    /// Cart key for `email`.
    #[must_use]
    pub fn cart(email: &str) -> String {
        format!("{CART_PREFIX}{email}")
    }
}

/// Typed access to persisted storefront state.
#[derive(Clone)]
pub struct LocalCache {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for LocalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache").finish_non_exhaustive()
    }
}

impl LocalCache {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    // =========================================================================
    // Demo users
    // =========================================================================

    /// All stored demo users, in registration order.
    #[must_use]
    pub fn read_users(&self) -> Vec<UserRecord> {
        self.try_read_users().unwrap_or_default()
    }

    /// Like [`Self::read_users`], but `None` when the list exists and can't
    /// be read. Rewrite the list only after a successful read.
    #[must_use]
    pub fn try_read_users(&self) -> Option<Vec<UserRecord>> {
        match self.storage.get(keys::DEMO_USERS) {
            Ok(Some(raw)) => parse_json(keys::DEMO_USERS, &raw),
            Ok(None) => Some(Vec::new()),
            Err(e) => {
                log_read_failure(keys::DEMO_USERS, &e);
                None
            }
        }
    }

    /// Replace the stored demo user list.
    pub fn write_users(&self, users: &[UserRecord]) {
        self.write_json(keys::DEMO_USERS, &users);
    }

    /// Remove the user with `email` from the stored list.
    pub fn delete_user(&self, email: &str) {
        let Some(mut users) = self.try_read_users() else {
            tracing::warn!(user = email, "Demo users unreadable, not deleting");
            return;
        };
        users.retain(|user| user.email != email);
        self.write_users(&users);
    }

    // =========================================================================
    // Session pointer
    // =========================================================================

    /// Email of the user logged in at last save, if any.
    #[must_use]
    pub fn read_session_user(&self) -> Option<Email> {
        let raw = self.read_raw(keys::SESSION_USER)?;
        match Email::parse(&raw) {
            Ok(email) => Some(email),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed session user");
                None
            }
        }
    }

    pub fn write_session_user(&self, email: &Email) {
        self.write_raw(keys::SESSION_USER, email.as_str());
    }

    pub fn clear_session_user(&self) {
        if let Err(e) = self.storage.remove(keys::SESSION_USER) {
            log_write_failure(keys::SESSION_USER, &e);
        }
    }

    // =========================================================================
    // Carts
    // =========================================================================

    /// The cart saved for `email`; empty if absent or malformed.
    #[must_use]
    pub fn read_cart(&self, email: &Email) -> Cart {
        self.read_json::<Vec<CartItem>>(&keys::cart(email.as_str()))
            .map(Cart::from)
            .unwrap_or_default()
    }

    pub fn write_cart(&self, email: &Email, cart: &Cart) {
        self.write_json(&keys::cart(email.as_str()), cart);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn read_raw(&self, key: &str) -> Option<String> {
        self.storage
            .get(key)
            .unwrap_or_else(|e| {
                log_read_failure(key, &e);
                None
            })
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        parse_json(key, &self.read_raw(key)?)
    }

    fn write_raw(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            log_write_failure(key, &e);
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write_raw(key, &json),
            Err(e) => tracing::error!(key, error = %e, "Failed to serialize value for storage"),
        }
    }
}

fn parse_json<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed persisted data");
            None
        }
    }
}

fn log_read_failure(key: &str, error: &StorageError) {
    if !matches!(error, StorageError::Unavailable) {
        tracing::warn!(key, error = %error, "Failed to read from storage");
    }
}

fn log_write_failure(key: &str, error: &StorageError) {
    if matches!(error, StorageError::Unavailable) {
        tracing::debug!(key, "Storage unavailable, skipping write");
    } else {
        tracing::error!(key, error = %error, "Failed to write to storage");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};

    use shopshifter_core::{Price, ProductId};

    use super::*;
    use crate::storage::{MemoryStorage, NullStorage};

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    fn user(name: &str, email: &str) -> UserRecord {
        UserRecord {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    fn memory() -> (Arc<MemoryStorage>, LocalCache) {
        let storage = Arc::new(MemoryStorage::new());
        let cache = LocalCache::new(storage.clone());
        (storage, cache)
    }

    #[test]
    fn test_users_roundtrip_and_delete() {
        let (_, cache) = memory();
        assert!(cache.read_users().is_empty());

        cache.write_users(&[user("Ann", "ann@x.io"), user("Bob", "bob@x.io")]);
        cache.delete_user("ann@x.io");

        let users = cache.read_users();
        assert_eq!(users, vec![user("Bob", "bob@x.io")]);
    }

    /// Memory storage whose reads can be made to fail with an I/O error.
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_reads: AtomicBool,
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(io::Error::other("disk hiccup").into());
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_delete_user_keeps_list_when_read_fails() {
        let storage = Arc::new(FlakyStorage {
            inner: MemoryStorage::new(),
            fail_reads: AtomicBool::new(false),
        });
        let cache = LocalCache::new(storage.clone());
        cache.write_users(&[user("Ann", "ann@x.io"), user("Bob", "bob@x.io")]);

        storage.fail_reads.store(true, Ordering::SeqCst);
        assert_eq!(cache.try_read_users(), None);
        cache.delete_user("ann@x.io");
        storage.fail_reads.store(false, Ordering::SeqCst);

        assert_eq!(cache.read_users().len(), 2);
        assert_eq!(storage.inner.write_count(), 1);
    }

    #[test]
    fn test_session_user_is_stored_raw() {
        let (storage, cache) = memory();
        cache.write_session_user(&email("ann@x.io"));
        assert_eq!(
            storage.get(keys::SESSION_USER).unwrap().as_deref(),
            Some("ann@x.io")
        );
        assert_eq!(cache.read_session_user(), Some(email("ann@x.io")));

        cache.clear_session_user();
        assert_eq!(cache.read_session_user(), None);
    }

    #[test]
    fn test_malformed_session_user_is_ignored() {
        let (storage, cache) = memory();
        storage.set(keys::SESSION_USER, "not an email").unwrap();
        assert_eq!(cache.read_session_user(), None);
    }

    #[test]
    fn test_cart_is_keyed_per_user() {
        let (storage, cache) = memory();
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::from_cents(10995),
            image: "backpack.jpg".to_string(),
            quantity: 2,
        });

        cache.write_cart(&email("ann@x.io"), &cart);
        assert!(storage.get("cart_ann@x.io").unwrap().is_some());
        assert_eq!(cache.read_cart(&email("ann@x.io")), cart);
        assert!(cache.read_cart(&email("bob@x.io")).is_empty());
    }

    #[test]
    fn test_malformed_cart_reads_as_empty() {
        let (storage, cache) = memory();
        storage.set("cart_ann@x.io", "{oops").unwrap();
        assert!(cache.read_cart(&email("ann@x.io")).is_empty());

        storage.set(keys::DEMO_USERS, "[1, 2, 3]").unwrap();
        assert!(cache.read_users().is_empty());
    }

    #[test]
    fn test_unavailable_storage_is_silent() {
        let cache = LocalCache::new(Arc::new(NullStorage));
        cache.write_users(&[user("Ann", "ann@x.io")]);
        cache.write_session_user(&email("ann@x.io"));
        cache.write_cart(&email("ann@x.io"), &Cart::new());
        cache.delete_user("ann@x.io");
        cache.clear_session_user();

        assert!(cache.read_users().is_empty());
        assert_eq!(cache.read_session_user(), None);
        assert!(cache.read_cart(&email("ann@x.io")).is_empty());
    }
}
