//! Cart mutation and pricing scenarios across page loads.

use ramstuga_core::{CurrencyCode, Language, LineKey, ProductId};
use ramstuga_integration_tests::Shop;
use ramstuga_storefront::AddOptions;
use ramstuga_storefront::catalog::ItemKind;
use ramstuga_storefront::page::ids;
use ramstuga_storefront::pricing::ShippingRegion;
use rust_decimal::Decimal;
use url::Url;

fn product(id: &str) -> ProductId {
    ProductId::new(id)
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn test_adding_same_product_twice_merges() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);

    tab.add_to_cart(&product("std-30x40-licht"), AddOptions::default())
        .unwrap();
    tab.add_to_cart(&product("std-30x40-licht"), AddOptions::default())
        .unwrap();

    assert_eq!(tab.lines().len(), 1);
    assert_eq!(tab.lines()[0].qty, 2);

    // A reload sees the same single line
    let reloaded = shop.tab(Language::En);
    assert_eq!(reloaded.lines(), tab.lines());
    assert_eq!(reloaded.page().text(ids::CART_COUNT), Some("2"));
}

#[test]
fn test_quantity_input_is_clamped() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);
    let key = tab
        .add_to_cart(&product("std-40x50-naturel"), AddOptions::default())
        .unwrap();

    for (raw, expected) in [("4", 4), ("0", 1), ("-2", 1), ("two", 1), ("3.9", 3), ("", 1)] {
        tab.update_qty(&key, raw);
        assert_eq!(tab.lines()[0].qty, expected, "input {raw:?}");
    }
}

#[test]
fn test_removing_unknown_key_changes_nothing() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);
    tab.add_to_cart(&product("std-30x40-licht"), AddOptions::default())
        .unwrap();
    let lines = tab.lines().to_vec();

    tab.remove_item(&LineKey::new("std-30x40-licht|size=99 cm"));
    assert_eq!(tab.lines(), lines.as_slice());
    assert_eq!(shop.tab(Language::En).lines(), lines.as_slice());
}

#[test]
fn test_variants_are_separate_lines() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::Nl);
    let sage = AddOptions {
        color: Some("salie".to_string()),
        ..AddOptions::default()
    };
    let large = AddOptions {
        size: Some("50×70 cm".to_string()),
        ..sage.clone()
    };

    tab.add_to_cart(&product("kulor-ram"), sage.clone()).unwrap();
    tab.add_to_cart(&product("kulor-ram"), large).unwrap();
    tab.add_to_cart(&product("kulor-ram"), sage).unwrap();

    let keys: Vec<&str> = tab.lines().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(keys, vec!["kulor-ram|color=salie", "kulor-ram|size=50×70 cm|color=salie"]);
    assert_eq!(tab.badge_count(), 3);
    assert!(tab.lines()[1].title.contains("(50×70 cm) • Kleur: salie"));
}

// =============================================================================
// Pricing
// =============================================================================

#[test]
fn test_two_frames_with_shipping() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);
    tab.add_to_cart(&product("std-30x40-licht"), AddOptions::default())
        .unwrap();
    tab.add_to_cart(&product("std-30x40-licht"), AddOptions::default())
        .unwrap();

    let totals = tab.totals();
    assert_eq!(totals.subtotal, Decimal::new(98, 0));
    assert_eq!(totals.shipping, Decimal::new(9, 0));
    assert_eq!(totals.total, Decimal::new(107, 0));
    assert_eq!(tab.page().text(ids::CART_TOTAL), Some("€107.00"));

    tab.set_shipping_region(ShippingRegion::Europe);
    assert_eq!(tab.totals().total, Decimal::new(117, 0));
    assert_eq!(shop.tab(Language::En).shipping_region(), ShippingRegion::Europe);
}

#[test]
fn test_swedish_page_prices_in_kronor() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::Sv);
    tab.add_to_cart(&product("std-30x40-licht"), AddOptions::default())
        .unwrap();

    let line = &tab.lines()[0];
    assert_eq!(line.currency, CurrencyCode::SEK);
    assert_eq!(line.price, Decimal::new(56350, 2));
    assert_eq!(tab.totals().shipping, Decimal::new(10350, 2));
    assert_eq!(tab.page().text(ids::CART_SUBTOTAL), Some("563,50\u{a0}kr"));

    // The same line on an English page converts back to euros
    let english = shop.tab(Language::En);
    assert_eq!(english.pricing().unit_price(&english.lines()[0]), Decimal::new(49, 0));
}

#[test]
fn test_quote_only_cart_has_no_shipping_or_mail() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::Sv);
    tab.add_to_cart(&product("maatwerk-spiegel"), AddOptions::default())
        .unwrap();

    assert_eq!(tab.lines()[0].kind, ItemKind::Maatwerk);
    assert_eq!(tab.totals().total, Decimal::ZERO);
    assert!(tab.paid_mail().is_none());
    assert_eq!(shop.dialogs.alerts().len(), 1);
}

// =============================================================================
// Landing parameters
// =============================================================================

#[test]
fn test_add_parameter_applies_once() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);
    let url = Url::parse("https://ramstuga.se/en/shop.html?add=maatwerk-lijst").unwrap();

    let outcome = tab.apply_landing(&url);
    assert_eq!(outcome.added, Some(LineKey::new("maatwerk-lijst")));
    let cleaned = outcome.cleaned_url.unwrap();
    assert_eq!(cleaned.as_str(), "https://ramstuga.se/en/shop.html");

    // Reloading the cleaned address adds nothing
    let mut reloaded = shop.tab(Language::En);
    let outcome = reloaded.apply_landing(&cleaned);
    assert!(outcome.added.is_none());
    assert_eq!(reloaded.badge_count(), 1);
}

#[test]
fn test_add_parameter_for_colour_frame_prompts() {
    let shop = Shop::new();
    let mut tab = shop.tab(Language::En);
    let url = Url::parse("https://ramstuga.se/shop.html?add=kulor-ram").unwrap();

    let outcome = tab.apply_landing(&url);
    assert!(outcome.added.is_none());
    assert!(outcome.cleaned_url.is_some());
    assert_eq!(
        shop.dialogs.alerts(),
        vec!["Please choose a colour before adding this frame."]
    );
}
