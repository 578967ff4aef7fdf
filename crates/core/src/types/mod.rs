//! Core types for Ramstuga.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod language;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use language::Language;
pub use price::{CurrencyCode, Price, round_money};
