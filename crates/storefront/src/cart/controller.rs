//! Cart and checkout controller for one page load.

use core::fmt;

use askama::Template;
use ramstuga_core::{LineKey, ProductId, round_money};
use tracing::instrument;
use url::Url;

use super::{AddOptions, CartLine, CartStore, MAX_QTY, line_key, line_title, parse_qty};
use crate::analytics::{AnalyticsSink, CheckoutReporter};
use crate::catalog::{Catalog, ItemKind, Product};
use crate::checkout::{self, OrderMail};
use crate::clock::{Clock, SystemClock};
use crate::config::CheckoutSettings;
use crate::consent::Consent;
use crate::error::CartError;
use crate::i18n;
use crate::page::{Dialogs, Page, ids};
use crate::payment_ref::{self, PaymentReference};
use crate::pricing::{Pricing, ShippingRegion, Totals};
use crate::query::{self, LandingParams};
use crate::storage::{KeyValueStore, keys};
use crate::views::{CartListTemplate, ProductGridTemplate};

/// Payment type reported when the PayPal link is followed.
const PAYPAL: &str = "paypal";

/// Result of applying the landing query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingOutcome {
    /// Address to replace the current one with, when `add` was stripped.
    pub cleaned_url: Option<Url>,
    /// Product card to scroll to.
    pub focus: Option<ProductId>,
    /// Line that `add` put in the cart.
    pub added: Option<LineKey>,
}

/// Owns the cart for one page: applies mutations, persists them and keeps
/// the page in sync.
///
/// Every mutation re-renders the cart summary and the header badge.
pub struct CartController<S, P, D> {
    catalog: Catalog,
    pricing: Pricing,
    settings: CheckoutSettings,
    cart: CartStore<S>,
    lines: Vec<CartLine>,
    page: P,
    dialogs: D,
    clock: Box<dyn Clock>,
    reporter: CheckoutReporter,
    reference: Option<PaymentReference>,
    region: ShippingRegion,
}

impl<S, P, D> fmt::Debug for CartController<S, P, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartController")
            .field("lines", &self.lines)
            .field("region", &self.region)
            .field("reference", &self.reference)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

impl<S, P, D> CartController<S, P, D>
where
    S: KeyValueStore,
    P: Page,
    D: Dialogs,
{
    /// Create a controller over `store`, reading the persisted cart and
    /// shipping region. Nothing is rendered until [`Self::init`].
    pub fn new(
        store: S,
        page: P,
        dialogs: D,
        catalog: Catalog,
        pricing: Pricing,
        settings: CheckoutSettings,
    ) -> Self {
        let mut cart = CartStore::new(store);
        let lines = cart.load();
        let region = ShippingRegion::load(cart.backend());
        Self {
            catalog,
            pricing,
            settings,
            cart,
            lines,
            page,
            dialogs,
            clock: Box::new(SystemClock),
            reporter: CheckoutReporter::new(None, pricing),
            reference: None,
            region,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_analytics(mut self, sink: Box<dyn AnalyticsSink>) -> Self {
        self.reporter = CheckoutReporter::new(Some(sink), self.pricing);
        self
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub const fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current cart lines, in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of quantities, as shown in the header badge.
    pub fn badge_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.qty))
    }

    pub const fn shipping_region(&self) -> ShippingRegion {
        self.region
    }

    /// Totals over the whole cart in the display currency.
    pub fn totals(&self) -> Totals {
        self.pricing.totals(&self.lines, self.region)
    }

    /// Render the product grid and the cart, and report the cart view.
    #[instrument(skip(self))]
    pub fn init(&mut self) {
        self.render_products(None);
        self.render();
        self.reporter.view_cart(self.consent(), &self.lines);
    }

    /// Add one unit of a product with the chosen options.
    ///
    /// Options the product does not offer are ignored, and picking the
    /// default size counts as no size. Additions with the same resulting key
    /// merge into one line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when the product is unknown or the options are
    /// not acceptable. The visitor is alerted for the latter.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, id: &ProductId, options: AddOptions) -> Result<LineKey, CartError> {
        let Some(product) = self.catalog.find(id) else {
            tracing::warn!(product = %id, "Add requested for unknown product");
            return Err(CartError::UnknownProduct(id.clone()));
        };
        let strings = i18n::strings(self.pricing.language());

        let options = match accepted_options(product, options) {
            Ok(options) => options,
            Err(e) => {
                let prompt = match e {
                    CartError::MissingColor(_) => strings.color_required,
                    _ => strings.size_unavailable,
                };
                self.dialogs.alert(prompt);
                return Err(e);
            }
        };

        let key = line_key(product, &options);
        let line = if let Some(line) = self.lines.iter_mut().find(|l| l.id == key) {
            line.qty = line.qty.saturating_add(1).min(MAX_QTY);
            line.clone()
        } else {
            let line = CartLine {
                id: key.clone(),
                kind: product.kind,
                title: line_title(product, &options, self.pricing.language()),
                qty: 1,
                price: self.pricing.catalog_price(product.price),
                currency: self.pricing.display_currency(),
            };
            self.lines.push(line.clone());
            line
        };

        tracing::debug!(line = %key, qty = line.qty, "Added to cart");
        self.reporter.add_to_cart(self.consent(), &line);
        self.commit();
        Ok(key)
    }

    /// Set a line's quantity from raw input. Unknown keys are ignored.
    #[instrument(skip(self))]
    pub fn update_qty(&mut self, key: &LineKey, raw: &str) {
        let Some(line) = self.lines.iter_mut().find(|l| &l.id == key) else {
            return;
        };
        line.qty = parse_qty(raw);
        tracing::debug!(line = %key, qty = line.qty, "Updated quantity");
        self.commit();
    }

    /// Remove a line. Unknown keys leave the cart and storage untouched.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, key: &LineKey) {
        let Some(i) = self.lines.iter().position(|l| &l.id == key) else {
            return;
        };
        let line = self.lines.remove(i);
        if line.kind == ItemKind::Product {
            self.reporter.remove_from_cart(self.consent(), &line);
        }
        tracing::debug!(line = %key, "Removed from cart");
        self.commit();
    }

    /// Empty the cart after confirmation, and drop the payment reference
    /// so the next order gets a fresh one. Returns whether it was cleared.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> bool {
        let strings = i18n::strings(self.pricing.language());
        if !self.dialogs.confirm(strings.clear_confirm) {
            return false;
        }
        self.lines.clear();
        payment_ref::clear(self.cart.backend());
        self.reference = None;
        tracing::debug!("Cleared cart");
        self.commit();
        true
    }

    /// Persist and use a different shipping region.
    #[instrument(skip(self))]
    pub fn set_shipping_region(&mut self, region: ShippingRegion) {
        self.region = region;
        region.save(self.cart.backend());
        self.render();
    }

    /// Today's payment reference, issued on first use.
    pub fn payment_reference(&mut self) -> PaymentReference {
        if let Some(reference) = &self.reference {
            return reference.clone();
        }
        let reference = payment_ref::get_or_create(self.cart.backend(), self.clock.as_ref());
        self.reference = Some(reference.clone());
        reference
    }

    /// The PayPal link for the physical products in the cart.
    pub fn payment_link(&self) -> Url {
        let amount = self.pricing.product_totals(&self.lines, self.region).total;
        checkout::payment_link(&self.settings.paypal_url, round_money(amount))
    }

    /// Follow the payment link: report checkout intent and return where to
    /// navigate.
    #[instrument(skip(self))]
    pub fn click_payment_link(&mut self) -> Url {
        let consent = self.consent();
        self.reporter.begin_checkout(consent, &self.lines);
        self.reporter.add_payment_info(consent, &self.lines, PAYPAL);
        self.payment_link()
    }

    /// Copy the payment reference to the clipboard, confirming with an
    /// alert. When the clipboard is unavailable the alert shows the
    /// reference instead.
    pub fn copy_reference(&mut self) -> PaymentReference {
        let reference = self.payment_reference();
        let strings = i18n::strings(self.pricing.language());
        match self.dialogs.copy_to_clipboard(reference.as_str()) {
            Ok(()) => self
                .dialogs
                .alert(&format!("{}{reference}", strings.reference_copied)),
            Err(e) => {
                tracing::debug!(error = %e, "Clipboard write failed, showing reference");
                self.dialogs
                    .alert(&format!("{}{reference}", strings.reference_label));
            }
        }
        reference
    }

    /// The `mailto:` link confirming a paid order.
    ///
    /// Alerts and returns `None` when the cart has no physical products.
    #[instrument(skip(self))]
    pub fn paid_mail(&mut self) -> Option<String> {
        let reference = self.payment_reference();
        let mail = OrderMail {
            recipient: &self.settings.order_email,
            reference: &reference,
            lines: &self.lines,
            pricing: &self.pricing,
            region: self.region,
        }
        .mailto();

        if mail.is_none() {
            let strings = i18n::strings(self.pricing.language());
            self.dialogs.alert(strings.empty_product_cart);
            return None;
        }
        self.reporter.begin_checkout(self.consent(), &self.lines);
        mail
    }

    /// Another tab changed storage. `None` means storage was cleared.
    ///
    /// The cached payment reference is dropped with the cart, since the
    /// other tab may have cleared both.
    pub fn on_storage_change(&mut self, key: Option<&str>) {
        if !keys::is_cart_key(key) {
            return;
        }
        self.lines = self.cart.load();
        self.reference = None;
        tracing::debug!(lines = self.lines.len(), "Cart changed in another tab");
        self.render();
    }

    /// Apply `add` and `focus` from the page address.
    ///
    /// `add` puts one unit of a catalog product or project in the cart,
    /// with no options. `focus` highlights a product card.
    #[instrument(skip(self, url), fields(url = %url))]
    pub fn apply_landing(&mut self, url: &Url) -> LandingOutcome {
        let params = LandingParams::parse(url);

        let added = params
            .add
            .as_ref()
            .and_then(|id| self.add_to_cart(id, AddOptions::default()).ok());

        let focus = params
            .focus
            .filter(|id| self.catalog.product(id).is_some());
        if focus.is_some() {
            self.render_products(focus.as_ref());
        }

        LandingOutcome {
            cleaned_url: query::strip_add(url),
            focus,
            added,
        }
    }

    fn consent(&self) -> Consent {
        Consent::load(self.cart.backend())
    }

    /// Persist the lines and refresh the page.
    fn commit(&mut self) {
        self.cart.save(self.lines.clone());
        self.render();
    }

    fn render(&mut self) {
        self.render_cart();
        self.render_checkout();
        self.render_badge();
    }

    fn render_products(&mut self, focus: Option<&ProductId>) {
        if !self.page.has(ids::PRODUCT_GRID) {
            return;
        }
        match ProductGridTemplate::new(&self.catalog, &self.pricing, focus).render() {
            Ok(html) => {
                self.page.set_html(ids::PRODUCT_GRID, &html);
            }
            Err(e) => tracing::error!(error = %e, "Failed to render product grid"),
        }
    }

    fn render_cart(&mut self) {
        let required = [ids::CART_LIST, ids::CART_EMPTY, ids::CART_SUBTOTAL];
        if !required.iter().all(|id| self.page.has(id)) {
            return;
        }

        self.page.set_visible(ids::CART_EMPTY, self.lines.is_empty());
        match CartListTemplate::new(&self.lines, &self.pricing).render() {
            Ok(html) => {
                self.page.set_html(ids::CART_LIST, &html);
            }
            Err(e) => tracing::error!(error = %e, "Failed to render cart"),
        }

        let totals = self.totals();
        self.page
            .set_text(ids::CART_SUBTOTAL, &self.pricing.format(totals.subtotal));
        self.page
            .set_text(ids::CART_SHIPPING, &self.pricing.format(totals.shipping));
        self.page
            .set_text(ids::CART_TOTAL, &self.pricing.format(totals.total));
        self.page
            .set_text(ids::PAY_AMOUNT, &self.pricing.format(totals.total));
    }

    fn render_checkout(&mut self) {
        let strings = i18n::strings(self.pricing.language());
        if self.page.has(ids::PAYPAL_LINK) {
            let link = self.payment_link();
            self.page
                .set_link(ids::PAYPAL_LINK, link.as_str(), strings.pay_link);
        }
        if !self.page.has(ids::REFERENCE_HINT) {
            return;
        }
        // References are issued for orders, not for browsing.
        if self.lines.iter().any(|l| l.kind == ItemKind::Product) {
            let reference = self.payment_reference();
            self.page.set_text(
                ids::REFERENCE_HINT,
                &format!("{} {reference}", strings.reference_hint),
            );
        } else {
            self.page.set_text(ids::REFERENCE_HINT, "");
        }
    }

    fn render_badge(&mut self) {
        let count = self.badge_count();
        self.page.set_text(ids::CART_COUNT, &count.to_string());
    }
}

/// Validate and normalize the options for adding `product`.
fn accepted_options(product: &Product, options: AddOptions) -> Result<AddOptions, CartError> {
    let options = options.normalized();

    let color = if product.custom_color {
        match options.color {
            Some(color) => Some(color),
            None => return Err(CartError::MissingColor(product.id.clone())),
        }
    } else {
        None
    };

    let size = match options.size {
        Some(size) if product.size_options.is_empty() => {
            tracing::debug!(product = %product.id, size = %size, "Ignoring size for product without size choice");
            None
        }
        Some(size) if product.size.as_deref() == Some(size.as_str()) => None,
        Some(size) if product.offers_size(&size) => Some(size),
        Some(size) => {
            return Err(CartError::UnknownSize {
                product: product.id.clone(),
                size,
            });
        }
        None => None,
    };

    let orientation = options.orientation.filter(|_| product.orientation_option);

    Ok(AddOptions {
        size,
        color,
        orientation,
    })
}
