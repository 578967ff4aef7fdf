//! Ramstuga Core - Shared types library.
//!
//! This crate provides the types shared by the Ramstuga components:
//! - `storefront` - Cart, pricing and checkout logic for the shop page
//! - `cli` - Command-line driver for the cart against a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types - no storage access, no rendering,
//! no environment lookups. This keeps it lightweight and allows it to be
//! used anywhere, including a `wasm32` build of the storefront.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, line keys, prices,
//!   languages and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
