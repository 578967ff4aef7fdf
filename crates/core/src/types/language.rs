//! Site languages.
//!
//! The shop is published in Swedish (default), English and Dutch. The page
//! language decides both the UI strings and the display currency.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CurrencyCode;

/// A language the storefront is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sv,
    En,
    Nl,
}

impl Language {
    /// All supported languages, default first.
    pub const ALL: [Self; 3] = [Self::Sv, Self::En, Self::Nl];

    /// Resolve a language from an `html lang` attribute or a stored code.
    ///
    /// Matching is by prefix, so `en-GB` and `nl-BE` resolve to English and
    /// Dutch. Unknown or empty codes return `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        if code.starts_with("en") {
            Some(Self::En)
        } else if code.starts_with("nl") {
            Some(Self::Nl)
        } else if code.starts_with("sv") {
            Some(Self::Sv)
        } else {
            None
        }
    }

    /// Two-letter code used in storage and URLs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sv => "sv",
            Self::En => "en",
            Self::Nl => "nl",
        }
    }

    /// BCP 47 locale tag used for number formatting.
    #[must_use]
    pub const fn locale(self) -> &'static str {
        match self {
            Self::Sv => "sv-SE",
            Self::En => "en-GB",
            Self::Nl => "nl-NL",
        }
    }

    /// Currency prices are displayed in on pages of this language.
    #[must_use]
    pub const fn display_currency(self) -> CurrencyCode {
        match self {
            Self::Sv => CurrencyCode::SEK,
            Self::En | Self::Nl => CurrencyCode::EUR,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
