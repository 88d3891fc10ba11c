//! Key/value storage capability.
//!
//! Everything the storefront persists goes through the synchronous
//! [`Storage`] trait: string keys mapped to string values, in the style of
//! browser local storage. The backend is picked once, at construction time:
//!
//! - [`FileStorage`] - a JSON object file on disk (the real backing store)
//! - [`MemoryStorage`] - process-local map, for tests and throwaway runs
//! - [`NullStorage`] - no backend at all; every call reports
//!   [`StorageError::Unavailable`]
//!
//! Callers above this layer (see [`crate::persistence`]) treat every error
//! as "no data", so none of these failures ever reach a user.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::{MemoryStorage, NullStorage};

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend is present.
    #[error("storage is unavailable")]
    Unavailable,

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file isn't a JSON object of strings.
    #[error("storage contents are malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A synchronous string key/value store.
///
/// Implementations must be shareable across threads: the debounced cache
/// writer persists from a background timer task.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or unreadable.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or the write fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
