//! Checkout intent reporting as seen over a visit.

use ramstuga_core::{Language, LineKey, ProductId};
use ramstuga_integration_tests::Shop;
use ramstuga_storefront::AddOptions;
use ramstuga_storefront::analytics::EventName;
use ramstuga_storefront::consent::ConsentBanner;
use rust_decimal::Decimal;

#[test]
fn test_nothing_reported_before_consent() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);
    assert!(ConsentBanner::pending(&shop.store, Language::En).is_some());

    tab.add_to_cart(&ProductId::new("std-30x40-licht"), AddOptions::default())
        .unwrap();
    tab.click_payment_link();
    assert!(shop.sink.events().is_empty());

    ConsentBanner::accept(&shop.store);
    assert!(ConsentBanner::pending(&shop.store, Language::En).is_none());
    tab.click_payment_link();
    assert_eq!(
        shop.sink.names(),
        vec![EventName::BeginCheckout, EventName::AddPaymentInfo]
    );
}

#[test]
fn test_declined_consent_stays_silent() {
    let shop = Shop::new();
    ConsentBanner::decline(&shop.store);
    let mut tab = shop.tab(Language::En);
    tab.add_to_cart(&ProductId::new("std-30x40-licht"), AddOptions::default())
        .unwrap();
    assert!(shop.sink.events().is_empty());
}

#[test]
fn test_visit_event_sequence() {
    let shop = Shop::new().with_consent();
    let mut tab = shop.tab(Language::En);
    tab.add_to_cart(&ProductId::new("std-30x40-licht"), AddOptions::default())
        .unwrap();
    tab.add_to_cart(&ProductId::new("std-30x40-licht"), AddOptions::default())
        .unwrap();

    // A reload views the non-empty cart once
    let mut reloaded = shop.tab(Language::En);
    reloaded.init();
    reloaded.click_payment_link();
    reloaded.paid_mail();
    reloaded.remove_item(&LineKey::new("std-30x40-licht"));

    assert_eq!(
        shop.sink.names(),
        vec![
            EventName::AddToCart,
            EventName::AddToCart,
            EventName::ViewCart,
            EventName::BeginCheckout,
            EventName::AddPaymentInfo,
            EventName::RemoveFromCart,
        ]
    );

    let events = shop.sink.events();
    assert_eq!(events[1].value, Decimal::new(49, 0));
    assert_eq!(events[2].value, Decimal::new(98, 0));
    assert_eq!(events[4].payment_type, Some("paypal"));
    assert_eq!(events[5].items[0].quantity, 2);
}
