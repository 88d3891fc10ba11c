//! Core types for Shopshifter.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{FeaturedProduct, Product, Rating};
pub use user::UserRecord;
