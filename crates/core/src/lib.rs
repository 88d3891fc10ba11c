//! Shopshifter Core - Shared domain types.
//!
//! This crate provides the types used across all Shopshifter components:
//! - `storefront` - Session/cart store, mock auth, and catalog client
//! - `cli` - Command-line front end that drives the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart logic - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, and emails, plus the cart,
//!   product, and demo user records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
