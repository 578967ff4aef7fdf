//! Cart commands: add, change, remove, list and render.

use ramstuga_core::{LineKey, ProductId};
use ramstuga_storefront::AddOptions;
use ramstuga_storefront::cart::Orientation;
use ramstuga_storefront::catalog::ItemKind;
use ramstuga_storefront::page::ids;
use url::Url;

use super::{CliError, Controller, Session};

const SHOP_URL: &str = "https://ramstuga.se/shop.html";

/// List catalog products and projects with their display prices.
pub fn catalog(session: &Session) {
    let pricing = session.pricing();
    let quote = ramstuga_storefront::i18n::strings(session.language).custom_quote;

    for product in session.catalog.iter() {
        let price = match product.kind {
            ItemKind::Product => pricing.format(pricing.catalog_price(product.price)),
            ItemKind::Maatwerk => quote.to_string(),
        };
        println!(
            "{:<22} {:<28} {:<10} {}",
            product.id,
            product.title(session.language),
            product.size.as_deref().unwrap_or("-"),
            price
        );
        if !product.size_options.is_empty() {
            println!("{:<22} sizes: {}", "", product.size_options.join(", "));
        }
        if product.custom_color {
            println!("{:<22} colour required", "");
        }
    }

    let problems = session.catalog.validate();
    for problem in &problems {
        tracing::warn!("Catalog: {problem}");
    }
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the product is unknown or the options are rejected.
pub fn add(
    session: &Session,
    id: &str,
    size: Option<String>,
    color: Option<String>,
    orientation: Option<Orientation>,
) -> Result<(), CliError> {
    let mut cart = session.controller();
    let key = cart.add_to_cart(
        &ProductId::new(id),
        AddOptions {
            size,
            color,
            orientation,
        },
    )?;
    println!("Added {key}");
    print_summary(&cart);
    Ok(())
}

/// Set a line's quantity from raw input.
pub fn qty(session: &Session, key: &str, value: &str) {
    let mut cart = session.controller();
    cart.update_qty(&LineKey::new(key), value);
    print_summary(&cart);
}

/// Remove a line.
pub fn remove(session: &Session, key: &str) {
    let mut cart = session.controller();
    cart.remove_item(&LineKey::new(key));
    print_summary(&cart);
}

/// Empty the cart after confirmation.
pub fn clear(session: &Session) {
    let mut cart = session.controller();
    if cart.clear_cart() {
        println!("Cart cleared");
    }
}

/// Print the cart lines and totals.
pub fn show(session: &Session) {
    let mut cart = session.controller();
    cart.init();
    print_summary(&cart);
}

/// Render the shop page and print every element.
pub fn render(session: &Session, focus: Option<&str>) {
    let mut cart = session.controller();
    cart.init();
    if let Some(focus) = focus {
        if let Ok(mut url) = Url::parse(SHOP_URL) {
            url.query_pairs_mut().append_pair("focus", focus);
            cart.apply_landing(&url);
        }
    }

    let page = cart.page();
    for id in ids::SHOP_PAGE {
        let Some(element) = page.element(id) else {
            continue;
        };
        println!("#{id}{}", if element.visible { "" } else { " (hidden)" });
        if let Some(href) = &element.href {
            println!("  href: {href}");
        }
        if !element.text.is_empty() {
            println!("  {}", element.text);
        }
        if !element.html.trim().is_empty() {
            println!("{}", element.html.trim());
        }
    }
}

/// Apply `add` and `focus` from a shop URL, as the page does on load.
pub fn open(session: &Session, url: &Url) {
    let mut cart = session.controller();
    cart.init();
    let outcome = cart.apply_landing(url);

    if let Some(key) = &outcome.added {
        println!("Added {key}");
    }
    if let Some(focus) = &outcome.focus {
        println!("Focus {focus}");
    }
    if let Some(cleaned) = &outcome.cleaned_url {
        println!("Address {cleaned}");
    }
    print_summary(&cart);
}

pub(super) fn print_summary(cart: &Controller) {
    let pricing = cart.pricing();
    for line in cart.lines() {
        println!(
            "{:>3} × {:<50} {:>14}  [{}]",
            line.qty,
            line.title,
            pricing.format(pricing.line_total(line)),
            line.id
        );
    }
    let totals = cart.totals();
    println!("Subtotal {}", pricing.format(totals.subtotal));
    println!(
        "Shipping {} ({})",
        pricing.format(totals.shipping),
        cart.shipping_region().label(pricing.language())
    );
    println!("Total    {}", pricing.format(totals.total));
    println!("Items    {}", cart.badge_count());
}
