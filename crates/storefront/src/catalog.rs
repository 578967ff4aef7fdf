//! Product catalog.
//!
//! One data-driven table keyed by product id, with per-language text
//! resolved at lookup time. The shop ships with an embedded catalog
//! (`catalog.yaml`); a replacement file can be loaded by path.
//!
//! The catalog has two sections: `products` are standard frames sold at a
//! fixed price, `projects` are custom-work entries that only produce a quote
//! line. Both can be added to the cart.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use ramstuga_core::{Language, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../catalog.yaml");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Whether an entry is sold at a price or only quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Physical product with a fixed price; triggers shipping.
    #[default]
    Product,
    /// Custom work, priced by quote after contact.
    Maatwerk,
}

/// Localized product copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductText {
    pub title: String,
    pub note: String,
}

/// A catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub kind: ItemKind,
    /// Default size label, e.g. `30×40 cm`.
    #[serde(default)]
    pub size: Option<String>,
    /// Unit price in EUR.
    pub price: Decimal,
    pub img: String,
    /// The buyer must name a colour before the frame can be added.
    #[serde(default)]
    pub custom_color: bool,
    /// The buyer may pick portrait or landscape orientation.
    #[serde(default)]
    pub orientation_option: bool,
    /// Selectable sizes. Empty means only `size` is offered.
    #[serde(default)]
    pub size_options: Vec<String>,
    text: HashMap<Language, ProductText>,
}

impl Product {
    /// Copy for `language`, falling back to Swedish.
    #[must_use]
    pub fn text(&self, language: Language) -> Option<&ProductText> {
        self.text
            .get(&language)
            .or_else(|| self.text.get(&Language::default()))
    }

    /// Title for `language`, or the id when no copy exists.
    #[must_use]
    pub fn title(&self, language: Language) -> &str {
        self.text(language)
            .map_or_else(|| self.id.as_str(), |t| t.title.as_str())
    }

    /// Note for `language`, empty when no copy exists.
    #[must_use]
    pub fn note(&self, language: Language) -> &str {
        self.text(language).map_or("", |t| t.note.as_str())
    }

    /// Whether `size` is one of the sizes this product is sold in.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.size.as_deref() == Some(size) || self.size_options.iter().any(|s| s == size)
    }

    /// Whether adding this product requires choosing variant options.
    #[must_use]
    pub const fn has_variants(&self) -> bool {
        self.custom_color || self.orientation_option || !self.size_options.is_empty()
    }
}

/// The full catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    projects: Vec<Product>,
}

impl Catalog {
    /// Parse the catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded YAML fails to parse or validate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml(EMBEDDED_CATALOG)
    }

    /// Load and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, parsed or validated.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parse and validate catalog YAML.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the YAML is malformed or fails validation.
    pub fn from_yaml(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(raw)?;
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(CatalogError::Invalid(errors));
        }
        tracing::debug!(
            products = catalog.products.len(),
            projects = catalog.projects.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Check the catalog for problems.
    ///
    /// Returns a list of human-readable problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for product in self.iter() {
            if !seen.insert(product.id.as_str()) {
                errors.push(format!("duplicate id '{}'", product.id));
            }
            if product.price.is_sign_negative() {
                errors.push(format!("'{}' has a negative price", product.id));
            }
            for language in Language::ALL {
                if !product.text.contains_key(&language) {
                    errors.push(format!("'{}' has no {language} text", product.id));
                }
            }
            if !product.size_options.is_empty() && product.size.is_none() {
                errors.push(format!(
                    "'{}' has size options but no default size",
                    product.id
                ));
            }
        }

        errors
    }

    /// Standard products, in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Custom-work entries.
    #[must_use]
    pub fn projects(&self) -> &[Product] {
        &self.projects
    }

    /// All entries, products first.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().chain(self.projects.iter())
    }

    /// Find a standard product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Find any entry, product or project, by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.iter().find(|p| &p.id == id)
    }
}
