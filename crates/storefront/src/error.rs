//! Errors surfaced by cart operations.
//!
//! Storage and parsing problems never reach callers; they are logged and the
//! cart carries on. What remains are choices the visitor has to fix.

use ramstuga_core::ProductId;
use thiserror::Error;

/// An add-to-cart request that was blocked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product requires a colour and none was given.
    #[error("Product {0} requires a colour")]
    MissingColor(ProductId),

    /// The requested size is not one the product offers.
    #[error("Product {product} is not available in size {size}")]
    UnknownSize { product: ProductId, size: String },

    /// No catalog or project entry has this id.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}
