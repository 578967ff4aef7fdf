//! UI strings and language preference.
//!
//! Product copy lives in the catalog; everything else the cart shows or
//! writes (buttons, prompts, the order mail) is looked up here.

use ramstuga_core::Language;

use crate::storage::{KeyValueStore, keys, soft_get, soft_set};

/// Localized UI strings for one language.
#[derive(Debug)]
pub struct Strings {
    pub add_to_cart: &'static str,
    pub remove: &'static str,
    pub quantity: &'static str,
    pub item_fallback: &'static str,
    pub custom_quote: &'static str,
    pub color_label: &'static str,
    pub orientation_label: &'static str,
    pub portrait: &'static str,
    pub landscape: &'static str,
    pub color_required: &'static str,
    pub size_unavailable: &'static str,
    pub pay_link: &'static str,
    pub reference_hint: &'static str,
    pub reference_label: &'static str,
    pub reference_copied: &'static str,
    pub empty_product_cart: &'static str,
    pub clear_confirm: &'static str,
    pub shipping_sweden: &'static str,
    pub shipping_europe: &'static str,
    pub consent_message: &'static str,
    pub consent_accept: &'static str,
    pub consent_decline: &'static str,
    pub contact_toggle: &'static str,
    pub contact_menu_label: &'static str,
    pub mail: MailStrings,
}

/// Labels used in the composed order mail.
#[derive(Debug)]
pub struct MailStrings {
    pub subject: &'static str,
    pub paid_via: &'static str,
    pub quantity: &'static str,
    pub price: &'static str,
    pub subtotal: &'static str,
    pub shipping: &'static str,
    pub total: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub notes: &'static str,
}

static SV: Strings = Strings {
    add_to_cart: "Lägg till",
    remove: "Ta bort",
    quantity: "Antal",
    item_fallback: "Artikel",
    custom_quote: "Måttbeställt (offert)",
    color_label: "Färg",
    orientation_label: "Riktning",
    portrait: "Stående",
    landscape: "Liggande",
    color_required: "Välj en färg innan du lägger ramen i varukorgen.",
    size_unavailable: "Den storleken finns inte för den här ramen.",
    pay_link: "Betala säkert (kort / PayPal)",
    reference_hint: "Ange din referens i betalningen:",
    reference_label: "Betalningsreferens: ",
    reference_copied: "Betalningsreferens kopierad: ",
    empty_product_cart: "Din varukorg är tom (standardprodukter).",
    clear_confirm: "Töm varukorgen?",
    shipping_sweden: "Sverige",
    shipping_europe: "Övriga Europa",
    consent_message: "Vi använder cookies för anonym statistik. Godkänner du det?",
    consent_accept: "Godkänn",
    consent_decline: "Avböj",
    contact_toggle: "Kontakt",
    contact_menu_label: "Kontaktmeny",
    mail: MailStrings {
        subject: "Beställning – RAMSTUGA",
        paid_via: "Betalt via: PayPal (kort eller PayPal)",
        quantity: "Antal",
        price: "Pris",
        subtotal: "Delsumma",
        shipping: "Frakt",
        total: "Totalt",
        name: "Namn",
        address: "Adress",
        phone: "Telefon (valfritt)",
        notes: "Meddelande",
    },
};

static EN: Strings = Strings {
    add_to_cart: "Add to cart",
    remove: "Remove",
    quantity: "Quantity",
    item_fallback: "Item",
    custom_quote: "Custom work (quote)",
    color_label: "Colour",
    orientation_label: "Orientation",
    portrait: "Portrait",
    landscape: "Landscape",
    color_required: "Please choose a colour before adding this frame.",
    size_unavailable: "That size is not available for this frame.",
    pay_link: "Pay securely (card / PayPal)",
    reference_hint: "Add your reference to the payment:",
    reference_label: "Payment reference: ",
    reference_copied: "Payment reference copied: ",
    empty_product_cart: "Your cart is empty (standard products).",
    clear_confirm: "Empty the cart?",
    shipping_sweden: "Sweden",
    shipping_europe: "Rest of Europe",
    consent_message: "We use cookies for anonymous statistics. Do you accept?",
    consent_accept: "Accept",
    consent_decline: "Decline",
    contact_toggle: "Contact",
    contact_menu_label: "Contact menu",
    mail: MailStrings {
        subject: "Order – RAMSTUGA",
        paid_via: "Paid via: PayPal (card or PayPal)",
        quantity: "Quantity",
        price: "Price",
        subtotal: "Subtotal",
        shipping: "Shipping",
        total: "Total",
        name: "Name",
        address: "Address",
        phone: "Phone (optional)",
        notes: "Notes",
    },
};

static NL: Strings = Strings {
    add_to_cart: "Voeg toe",
    remove: "Verwijder",
    quantity: "Aantal",
    item_fallback: "Artikel",
    custom_quote: "Maatwerk (offerte)",
    color_label: "Kleur",
    orientation_label: "Oriëntatie",
    portrait: "Staand",
    landscape: "Liggend",
    color_required: "Kies eerst een kleur voor deze lijst.",
    size_unavailable: "Die maat is niet beschikbaar voor deze lijst.",
    pay_link: "Betaal veilig (kaart / PayPal)",
    reference_hint: "Vermeld je referentie bij de betaling:",
    reference_label: "Bestelreferentie: ",
    reference_copied: "Bestelreferentie gekopieerd: ",
    empty_product_cart: "Je winkelwagen is leeg (standaardproducten).",
    clear_confirm: "Winkelwagen leegmaken?",
    shipping_sweden: "Zweden",
    shipping_europe: "Overig Europa",
    consent_message: "We gebruiken cookies voor anonieme statistieken. Akkoord?",
    consent_accept: "Akkoord",
    consent_decline: "Weigeren",
    contact_toggle: "Contact",
    contact_menu_label: "Contactmenu",
    mail: MailStrings {
        subject: "Bestelling – RAMSTUGA",
        paid_via: "Betaald via: PayPal (kaart of PayPal)",
        quantity: "Aantal",
        price: "Prijs",
        subtotal: "Subtotaal",
        shipping: "Verzending",
        total: "Totaal",
        name: "Naam",
        address: "Adres",
        phone: "Telefoon (optioneel)",
        notes: "Opmerkingen",
    },
};

/// UI strings for `language`.
#[must_use]
pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::Sv => &SV,
        Language::En => &EN,
        Language::Nl => &NL,
    }
}

/// Decide the active language for a page.
///
/// The page's own `lang` attribute wins; pages without one fall back to the
/// stored preference and finally to Swedish.
pub fn resolve_language(page_lang: Option<&str>, store: &impl KeyValueStore) -> Language {
    page_lang
        .and_then(Language::from_code)
        .or_else(|| soft_get(store, keys::LANGUAGE).and_then(|code| Language::from_code(&code)))
        .unwrap_or_default()
}

/// Persist the language a visitor picked from the language switcher.
pub fn remember_language(store: &impl KeyValueStore, language: Language) {
    soft_set(store, keys::LANGUAGE, language.code());
}

/// The stored language preference, if any.
pub fn stored_language(store: &impl KeyValueStore) -> Option<Language> {
    soft_get(store, keys::LANGUAGE).and_then(|code| Language::from_code(&code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_page_lang_wins_over_preference() {
        let store = MemoryStore::with_entries([(keys::LANGUAGE, "nl")]);
        assert_eq!(resolve_language(Some("en-GB"), &store), Language::En);
        assert_eq!(resolve_language(None, &store), Language::Nl);
        assert_eq!(resolve_language(Some(""), &store), Language::Nl);
    }

    #[test]
    fn test_default_is_swedish() {
        let store = MemoryStore::new();
        assert_eq!(resolve_language(None, &store), Language::Sv);
        store.set_unavailable(true);
        assert_eq!(resolve_language(Some("xx"), &store), Language::Sv);
    }

    #[test]
    fn test_remember_language() {
        let store = MemoryStore::new();
        remember_language(&store, Language::En);
        assert_eq!(stored_language(&store), Some(Language::En));
    }

    #[test]
    fn test_every_language_has_mail_labels() {
        for language in Language::ALL {
            let mail = &strings(language).mail;
            assert!(mail.subject.contains("RAMSTUGA"));
            assert!(!mail.total.is_empty());
        }
    }
}
