//! Askama views for the product grid and the cart list.
//!
//! Views hold display-ready strings; all escaping is left to the templates.

use askama::Template;
use ramstuga_core::ProductId;

use crate::cart::CartLine;
use crate::catalog::{Catalog, ItemKind, Product};
use crate::i18n;
use crate::pricing::Pricing;

/// One product card in the grid.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    /// Default size label, empty when the product has none.
    pub size: String,
    pub note: String,
    pub img: String,
    /// Formatted display price, or the custom-quote label.
    pub price: String,
    pub add_label: &'static str,
    pub focused: bool,
    pub size_options: Vec<String>,
    pub custom_color: bool,
    pub color_label: &'static str,
    pub orientation_option: bool,
    pub portrait_label: &'static str,
    pub landscape_label: &'static str,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, pricing: &Pricing, focused: bool) -> Self {
        let language = pricing.language();
        let strings = i18n::strings(language);
        let price = match product.kind {
            ItemKind::Product => pricing.format(pricing.catalog_price(product.price)),
            ItemKind::Maatwerk => strings.custom_quote.to_string(),
        };

        Self {
            id: product.id.to_string(),
            title: product.title(language).to_owned(),
            size: product.size.clone().unwrap_or_default(),
            note: product.note(language).to_owned(),
            img: product.img.clone(),
            price,
            add_label: strings.add_to_cart,
            focused,
            size_options: product.size_options.clone(),
            custom_color: product.custom_color,
            color_label: strings.color_label,
            orientation_option: product.orientation_option,
            portrait_label: strings.portrait,
            landscape_label: strings.landscape,
        }
    }
}

/// Product grid (`#productGrid`) template.
#[derive(Template)]
#[template(path = "shop/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
}

impl ProductGridTemplate {
    /// Cards for the standard products, marking `focus` if it names one.
    #[must_use]
    pub fn new(catalog: &Catalog, pricing: &Pricing, focus: Option<&ProductId>) -> Self {
        let cards = catalog
            .products()
            .iter()
            .map(|p| ProductCardView::new(p, pricing, focus == Some(&p.id)))
            .collect();
        Self { cards }
    }
}

/// One row in the cart list.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub key: String,
    pub title: String,
    pub unit_label: String,
    pub qty: u32,
    pub qty_label: &'static str,
    pub line_total: String,
    pub remove_label: &'static str,
}

impl CartLineView {
    #[must_use]
    pub fn new(line: &CartLine, pricing: &Pricing) -> Self {
        let strings = i18n::strings(pricing.language());
        let title = if line.title.is_empty() {
            strings.item_fallback.to_string()
        } else {
            line.title.clone()
        };
        let unit_label = match line.kind {
            ItemKind::Maatwerk => strings.custom_quote.to_string(),
            ItemKind::Product => pricing.format(pricing.unit_price(line)),
        };

        Self {
            key: line.id.to_string(),
            title,
            unit_label,
            qty: line.qty,
            qty_label: strings.quantity,
            line_total: pricing.format(pricing.line_total(line)),
            remove_label: strings.remove,
        }
    }
}

/// Cart list (`#cartList`) template.
#[derive(Template)]
#[template(path = "shop/cart_list.html")]
pub struct CartListTemplate {
    pub lines: Vec<CartLineView>,
}

impl CartListTemplate {
    #[must_use]
    pub fn new(lines: &[CartLine], pricing: &Pricing) -> Self {
        Self {
            lines: lines.iter().map(|l| CartLineView::new(l, pricing)).collect(),
        }
    }
}
