//! Ramstuga storefront library.
//!
//! Cart, pricing and checkout logic for the shop page, written against small
//! seams ([`storage::KeyValueStore`], [`page::Page`], [`page::Dialogs`],
//! [`clock::Clock`], [`analytics::AnalyticsSink`]) so it runs the same in
//! tests, the CLI and the browser glue.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod consent;
pub mod error;
pub mod i18n;
pub mod page;
pub mod payment_ref;
pub mod pricing;
pub mod query;
pub mod storage;
pub mod ui;
pub mod views;

pub use cart::{AddOptions, CartController, CartLine, LandingOutcome};
pub use catalog::Catalog;
pub use config::{CheckoutSettings, ConfigError, ShopConfig};
pub use error::CartError;
