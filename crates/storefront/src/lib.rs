//! Shopshifter storefront library.
//!
//! Session and cart state with debounced persistence, a mock auth gateway
//! over demo users, and a cached client for the product catalog API.
//! [`state::Storefront`] wires them together over one storage backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cache_writer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;
pub mod session;
pub mod state;
pub mod storage;
