//! Command implementations. Each prints its result to stdout.

pub mod account;
pub mod cart;
pub mod catalog;
