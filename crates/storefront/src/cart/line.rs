//! Cart lines and variant options.

use core::fmt;
use core::str::FromStr;

use ramstuga_core::{CurrencyCode, Language, LineKey};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{ItemKind, Product};
use crate::i18n;

/// Largest quantity a single line can hold.
pub const MAX_QTY: u32 = 9999;

/// Largest unit price read back from storage. Anything above is treated as 0.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Picture orientation for frames that offer it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Orientation name in `language`.
    #[must_use]
    pub fn label(self, language: Language) -> &'static str {
        let strings = i18n::strings(language);
        match self {
            Self::Portrait => strings.portrait,
            Self::Landscape => strings.landscape,
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" | "staand" | "stående" => Ok(Self::Portrait),
            "landscape" | "liggend" | "liggande" => Ok(Self::Landscape),
            other => Err(format!("unknown orientation '{other}'")),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Variant choices made when adding a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    pub size: Option<String>,
    pub color: Option<String>,
    pub orientation: Option<Orientation>,
}

impl AddOptions {
    /// Options with blank strings treated as "not selected".
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        }
        Self {
            size: clean(self.size),
            color: clean(self.color),
            orientation: self.orientation,
        }
    }
}

/// Build the composite key that decides whether two additions merge.
///
/// Without selected options the key is the bare product id, which keeps
/// lines written before variants existed addressable.
#[must_use]
pub fn line_key(product: &Product, options: &AddOptions) -> LineKey {
    let mut key = product.id.as_str().to_owned();
    if let Some(size) = &options.size {
        key.push_str("|size=");
        key.push_str(size);
    }
    if let Some(color) = &options.color {
        key.push_str("|color=");
        key.push_str(color);
    }
    if let Some(orientation) = options.orientation {
        key.push_str("|orientation=");
        key.push_str(orientation.code());
    }
    LineKey::new(key)
}

/// Display title: base title, parenthesized size, then ` • Label: value`
/// for each chosen colour or orientation.
#[must_use]
pub fn line_title(product: &Product, options: &AddOptions, language: Language) -> String {
    let strings = i18n::strings(language);
    let mut title = product.title(language).to_owned();

    if let Some(size) = options.size.as_deref().or(product.size.as_deref()) {
        title.push_str(&format!(" ({size})"));
    }
    if let Some(color) = &options.color {
        title.push_str(&format!(" • {}: {color}", strings.color_label));
    }
    if let Some(orientation) = options.orientation {
        title.push_str(&format!(
            " • {}: {}",
            strings.orientation_label,
            orientation.label(language)
        ));
    }
    title
}

/// One persisted cart entry.
///
/// Serializes to the same JSON shape the shop page has always written, so
/// carts survive the upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub id: LineKey,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    pub qty: u32,
    /// Unit price in `currency`, as converted when the line was added.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: CurrencyCode,
}

impl CartLine {
    /// Leniently read a line from persisted JSON.
    ///
    /// Entries without a string `id` are rejected. A missing or invalid
    /// `qty` becomes 1, a missing `currency` means EUR, a missing `type`
    /// means a physical product.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id")?.as_str().filter(|s| !s.is_empty())?;

        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .map_or(ItemKind::Product, |t| {
                if t == "maatwerk" {
                    ItemKind::Maatwerk
                } else {
                    ItemKind::Product
                }
            });

        let title = obj
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let price = obj.get("price").and_then(decimal_from_json).unwrap_or_default();

        let currency = obj
            .get("currency")
            .and_then(Value::as_str)
            .and_then(CurrencyCode::from_code)
            .unwrap_or_default();

        Some(Self {
            id: LineKey::new(id),
            kind,
            title,
            qty: obj.get("qty").map_or(1, coerce_qty),
            price,
            currency,
        })
    }
}

fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|d| !d.is_sign_negative()).map(|d| {
        if d > MAX_UNIT_PRICE {
            tracing::warn!(price = %d, "Persisted unit price out of range, using 0");
            Decimal::ZERO
        } else {
            d
        }
    })
}

/// Coerce a stored quantity to an integer of at least 1.
fn coerce_qty(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parse_qty_f64(parsed)
}

/// Parse a quantity typed by the user. Non-numeric input and values below
/// 1 become 1; fractions are truncated and values above [`MAX_QTY`] are
/// capped.
#[must_use]
pub fn parse_qty(raw: &str) -> u32 {
    parse_qty_f64(raw.trim().parse::<f64>().ok())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_qty_f64(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v >= 1.0 => v.min(f64::from(MAX_QTY)).trunc() as u32,
        _ => 1,
    }
}
