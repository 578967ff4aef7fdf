//! Landing query parameters.
//!
//! Links from project pages and campaigns open the shop with `?add=<id>` to
//! put a product straight into the cart, or `?focus=<id>` to highlight one
//! card. `add` is one-shot: it is stripped from the address so a reload
//! does not add the product again.

use ramstuga_core::ProductId;
use url::Url;

const ADD: &str = "add";
const FOCUS: &str = "focus";

/// Parameters read from the shop URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingParams {
    pub add: Option<ProductId>,
    pub focus: Option<ProductId>,
}

impl LandingParams {
    /// Read `add` and `focus` from `url`. Blank values are ignored; the first
    /// occurrence of each wins.
    #[must_use]
    pub fn parse(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match &*key {
                ADD if params.add.is_none() => params.add = Some(ProductId::new(value)),
                FOCUS if params.focus.is_none() => params.focus = Some(ProductId::new(value)),
                _ => {}
            }
        }
        params
    }
}

/// `url` with every `add` parameter removed, or `None` if it had none.
///
/// Other parameters keep their order; an emptied query is dropped entirely.
#[must_use]
pub fn strip_add(url: &Url) -> Option<Url> {
    if !url.query_pairs().any(|(key, _)| key == ADD) {
        return None;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| *key != ADD)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(kept);
    }
    Some(cleaned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let url = Url::parse("https://ramstuga.se/shop.html?add=maatwerk-lijst&focus=std-40x40-grijs&add=other").unwrap();
        let params = LandingParams::parse(&url);
        assert_eq!(params.add, Some(ProductId::new("maatwerk-lijst")));
        assert_eq!(params.focus, Some(ProductId::new("std-40x40-grijs")));

        let url = Url::parse("https://ramstuga.se/shop.html?add=&focus=%20").unwrap();
        assert_eq!(LandingParams::parse(&url), LandingParams::default());
    }

    #[test]
    fn test_strip_add_keeps_other_params() {
        let url = Url::parse("https://ramstuga.se/en/shop.html?add=x&focus=y#cart").unwrap();
        let cleaned = strip_add(&url).unwrap();
        assert_eq!(cleaned.as_str(), "https://ramstuga.se/en/shop.html?focus=y#cart");
    }

    #[test]
    fn test_strip_add_drops_empty_query() {
        let url = Url::parse("https://ramstuga.se/shop.html?add=x").unwrap();
        assert_eq!(strip_add(&url).unwrap().as_str(), "https://ramstuga.se/shop.html");
        assert!(strip_add(&Url::parse("https://ramstuga.se/shop.html?focus=y").unwrap()).is_none());
    }
}
