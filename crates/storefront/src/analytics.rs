//! Checkout intent reporting.
//!
//! A thin adapter over an injected [`AnalyticsSink`]. Cart views and
//! checkout starts are reported at most once per page; additions, removals
//! and payment-link clicks are reported every time. Without a sink, or
//! without the visitor's consent, every call is a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use ramstuga_core::{CurrencyCode, round_money};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartLine;
use crate::catalog::ItemKind;
use crate::consent::Consent;
use crate::pricing::Pricing;

/// Reported event names, GA4 style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    ViewCart,
    BeginCheckout,
    AddToCart,
    RemoveFromCart,
    AddPaymentInfo,
}

impl EventName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewCart => "view_cart",
            Self::BeginCheckout => "begin_checkout",
            Self::AddToCart => "add_to_cart",
            Self::RemoveFromCart => "remove_from_cart",
            Self::AddPaymentInfo => "add_payment_info",
        }
    }
}

/// One line in an event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsItem {
    pub item_id: String,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// An analytics event with monetary values rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    #[serde(rename = "event")]
    pub name: EventName,
    pub currency: CurrencyCode,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub items: Vec<AnalyticsItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<&'static str>,
}

/// Destination for analytics events (e.g. a `gtag` bridge).
pub trait AnalyticsSink {
    fn track(&self, event: &AnalyticsEvent);
}

/// Sink that writes events to the `analytics` tracing target.
#[derive(Debug, Clone)]
pub struct TracingSink {
    measurement_id: String,
}

impl TracingSink {
    #[must_use]
    pub fn new(measurement_id: impl Into<String>) -> Self {
        Self {
            measurement_id: measurement_id.into(),
        }
    }
}

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &AnalyticsEvent) {
        let payload = serde_json::to_string(event).unwrap_or_default();
        tracing::info!(
            target: "analytics",
            measurement_id = %self.measurement_id,
            event = event.name.as_str(),
            %payload,
            "Analytics event"
        );
    }
}

/// Sink that keeps events in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<AnalyticsEvent>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.borrow().clone()
    }

    /// Names of events recorded so far, in order.
    #[must_use]
    pub fn names(&self) -> Vec<EventName> {
        self.events.borrow().iter().map(|e| e.name).collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn track(&self, event: &AnalyticsEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Reports cart and checkout events, remembering which once-per-page events
/// have already gone out.
pub struct CheckoutReporter {
    sink: Option<Box<dyn AnalyticsSink>>,
    pricing: Pricing,
    viewed_cart: bool,
    began_checkout: bool,
}

impl std::fmt::Debug for CheckoutReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutReporter")
            .field("sink", &self.sink.as_ref().map(|_| "[sink]"))
            .field("viewed_cart", &self.viewed_cart)
            .field("began_checkout", &self.began_checkout)
            .finish_non_exhaustive()
    }
}

impl CheckoutReporter {
    #[must_use]
    pub fn new(sink: Option<Box<dyn AnalyticsSink>>, pricing: Pricing) -> Self {
        Self {
            sink,
            pricing,
            viewed_cart: false,
            began_checkout: false,
        }
    }

    /// Report a cart view, once per page.
    pub fn view_cart(&mut self, consent: Consent, lines: &[CartLine]) {
        if self.viewed_cart || lines.is_empty() {
            return;
        }
        if self.send(consent, EventName::ViewCart, lines.iter(), None) {
            self.viewed_cart = true;
        }
    }

    /// Report the start of checkout, once per page. Only physical products
    /// are paid through checkout, so quote lines are left out.
    pub fn begin_checkout(&mut self, consent: Consent, lines: &[CartLine]) {
        if self.began_checkout {
            return;
        }
        let products = lines.iter().filter(|l| l.kind == ItemKind::Product);
        if self.send(consent, EventName::BeginCheckout, products, None) {
            self.began_checkout = true;
        }
    }

    /// Report a single-unit addition of `line`.
    pub fn add_to_cart(&self, consent: Consent, line: &CartLine) {
        let added = CartLine {
            qty: 1,
            ..line.clone()
        };
        self.send(consent, EventName::AddToCart, std::iter::once(&added), None);
    }

    /// Report removal of `line` with its full value.
    pub fn remove_from_cart(&self, consent: Consent, line: &CartLine) {
        self.send(consent, EventName::RemoveFromCart, std::iter::once(line), None);
    }

    /// Report interaction with a payment link.
    pub fn add_payment_info(&self, consent: Consent, lines: &[CartLine], payment_type: &'static str) {
        let products = lines.iter().filter(|l| l.kind == ItemKind::Product);
        self.send(consent, EventName::AddPaymentInfo, products, Some(payment_type));
    }

    /// Build and deliver an event. Returns whether it reached a sink.
    fn send<'a>(
        &self,
        consent: Consent,
        name: EventName,
        lines: impl Iterator<Item = &'a CartLine>,
        payment_type: Option<&'static str>,
    ) -> bool {
        let Some(sink) = self.sink.as_ref() else {
            return false;
        };
        if !consent.allows_analytics() {
            tracing::debug!(event = name.as_str(), "Analytics event dropped without consent");
            return false;
        }

        let items: Vec<AnalyticsItem> = lines
            .map(|line| AnalyticsItem {
                item_id: line.id.to_string(),
                item_name: line.title.clone(),
                price: round_money(self.pricing.unit_price(line)),
                quantity: line.qty,
            })
            .collect();
        let value = round_money(
            items
                .iter()
                .map(|item| item.price * Decimal::from(item.quantity))
                .sum(),
        );

        sink.track(&AnalyticsEvent {
            name,
            currency: self.pricing.display_currency(),
            value,
            items,
            payment_type,
        });
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing::{ExchangeRate, ShippingRates};
    use ramstuga_core::{Language, LineKey};

    fn reporter(sink: &RecordingSink) -> CheckoutReporter {
        let pricing = Pricing::new(Language::En, ExchangeRate::default(), ShippingRates::default());
        CheckoutReporter::new(Some(Box::new(sink.clone())), pricing)
    }

    fn line(kind: ItemKind, qty: u32) -> CartLine {
        CartLine {
            id: LineKey::new("std-30x40-licht"),
            kind,
            title: "Standard Frame Light (30×40 cm)".to_string(),
            qty,
            price: Decimal::new(49, 0),
            currency: CurrencyCode::EUR,
        }
    }

    #[test]
    fn test_view_and_begin_once() {
        let sink = RecordingSink::new();
        let mut reporter = reporter(&sink);
        let lines = vec![line(ItemKind::Product, 2)];

        reporter.view_cart(Consent::Granted, &lines);
        reporter.view_cart(Consent::Granted, &lines);
        reporter.begin_checkout(Consent::Granted, &lines);
        reporter.begin_checkout(Consent::Granted, &lines);

        assert_eq!(sink.names(), vec![EventName::ViewCart, EventName::BeginCheckout]);
        assert_eq!(sink.events()[0].value, Decimal::new(98, 0));
    }

    #[test]
    fn test_add_and_remove_every_time() {
        let sink = RecordingSink::new();
        let reporter = reporter(&sink);
        let l = line(ItemKind::Product, 3);

        reporter.add_to_cart(Consent::Granted, &l);
        reporter.add_to_cart(Consent::Granted, &l);
        reporter.remove_from_cart(Consent::Granted, &l);

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].value, Decimal::new(49, 0));
        assert_eq!(events[2].value, Decimal::new(147, 0));
        assert_eq!(events[2].items[0].quantity, 3);
    }

    #[test]
    fn test_no_consent_no_events_and_flag_stays_open() {
        let sink = RecordingSink::new();
        let mut reporter = reporter(&sink);
        let lines = vec![line(ItemKind::Product, 1)];

        reporter.view_cart(Consent::Unset, &lines);
        reporter.view_cart(Consent::Denied, &lines);
        assert!(sink.events().is_empty());

        reporter.view_cart(Consent::Granted, &lines);
        assert_eq!(sink.names(), vec![EventName::ViewCart]);
    }

    #[test]
    fn test_without_sink_is_noop() {
        let pricing = Pricing::new(Language::Sv, ExchangeRate::default(), ShippingRates::default());
        let mut reporter = CheckoutReporter::new(None, pricing);
        reporter.view_cart(Consent::Granted, &[line(ItemKind::Product, 1)]);
        reporter.add_to_cart(Consent::Granted, &line(ItemKind::Product, 1));
    }

    #[test]
    fn test_payload_shape() {
        let sink = RecordingSink::new();
        let reporter = reporter(&sink);
        reporter.add_payment_info(
            Consent::Granted,
            &[line(ItemKind::Product, 1), line(ItemKind::Maatwerk, 1)],
            "paypal",
        );
        let json = serde_json::to_value(&sink.events()[0]).unwrap();
        assert_eq!(json["event"], "add_payment_info");
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["payment_type"], "paypal");
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
    }
}
