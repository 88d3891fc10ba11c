//! Demo user records.
//!
//! These back the mock sign-up/login flow only. The password is stored and
//! compared in plain text; nothing here is a security boundary.

use serde::{Deserialize, Serialize};

/// A demo account as kept in the stored user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name given at sign-up.
    pub name: String,
    /// Account key. Unique within the stored list.
    pub email: String,
    /// Opaque password, compared by exact match.
    pub password: String,
}

impl UserRecord {
    /// Whether this record matches both credentials exactly.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
