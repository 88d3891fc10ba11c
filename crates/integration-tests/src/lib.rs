//! Integration tests for Shopshifter.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopshifter-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flow` - Session, cart, and auth over real file storage
//! - `storefront_state` - The assembled `Storefront` across restarts
//!
//! No network access is needed: nothing here calls the catalog API.
