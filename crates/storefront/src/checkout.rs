//! Outbound checkout navigation.
//!
//! Payment happens off-site on a hosted PayPal page. Afterwards the buyer
//! sends a pre-filled order mail quoting the payment reference so the shop
//! can match the two.

use ramstuga_core::{Email, round_money};
use rust_decimal::Decimal;
use url::Url;

use crate::cart::CartLine;
use crate::catalog::ItemKind;
use crate::i18n;
use crate::payment_ref::PaymentReference;
use crate::pricing::{Pricing, ShippingRegion};

/// Whether `url` is a PayPal.me link, which accepts an amount path segment.
#[must_use]
pub fn is_paypal_me(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| host == "paypal.me" || host.ends_with(".paypal.me"))
}

/// Build the payment link for an order of `amount`.
///
/// PayPal.me links get `/<amount>` appended (two decimals) when the amount
/// is positive; hosted checkout links are used unchanged.
#[must_use]
pub fn payment_link(base: &Url, amount: Decimal) -> Url {
    let mut url = base.clone();
    if is_paypal_me(base) && amount > Decimal::ZERO {
        let amount = format!("{:.2}", round_money(amount));
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&amount);
        }
    }
    url
}

/// Everything needed to compose the order confirmation mail.
#[derive(Debug)]
pub struct OrderMail<'a> {
    pub recipient: &'a Email,
    pub reference: &'a PaymentReference,
    pub lines: &'a [CartLine],
    pub pricing: &'a Pricing,
    pub region: ShippingRegion,
}

impl OrderMail<'_> {
    /// The physical product lines the mail covers.
    fn product_lines(&self) -> Vec<CartLine> {
        self.lines
            .iter()
            .filter(|l| l.kind == ItemKind::Product)
            .cloned()
            .collect()
    }

    /// Mail subject, quoting the payment reference.
    #[must_use]
    pub fn subject(&self) -> String {
        let strings = i18n::strings(self.pricing.language());
        format!("{} ({})", strings.mail.subject, self.reference)
    }

    /// Plain-text mail body listing the paid products and blank fields for
    /// the buyer's details.
    #[must_use]
    pub fn body(&self) -> String {
        let strings = i18n::strings(self.pricing.language());
        let mail = &strings.mail;
        let products = self.product_lines();
        let totals = self.pricing.totals(&products, self.region);

        let mut out: Vec<String> = vec![
            mail.subject.to_string(),
            String::new(),
            mail.paid_via.to_string(),
            format!("{}{}", strings.reference_label, self.reference),
            String::new(),
        ];

        for (i, line) in products.iter().enumerate() {
            out.push(format!("{}. {}", i + 1, line.title));
            out.push(format!("   {}: {}", mail.quantity, line.qty));
            out.push(format!(
                "   {}: {}",
                mail.price,
                self.pricing.format(self.pricing.unit_price(line))
            ));
            out.push(String::new());
        }

        out.push(format!("{}: {}", mail.subtotal, self.pricing.format(totals.subtotal)));
        out.push(format!("{}: {}", mail.shipping, self.pricing.format(totals.shipping)));
        out.push(format!("{}: {}", mail.total, self.pricing.format(totals.total)));
        out.push(String::new());
        for field in [mail.name, mail.address, mail.phone, mail.notes] {
            out.push(format!("{field}:"));
        }

        out.join("\n")
    }

    /// The `mailto:` URL, or `None` when there are no products to confirm.
    #[must_use]
    pub fn mailto(&self) -> Option<String> {
        if !self.lines.iter().any(|l| l.kind == ItemKind::Product) {
            return None;
        }
        Some(format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject()),
            urlencoding::encode(&self.body())
        ))
    }
}
