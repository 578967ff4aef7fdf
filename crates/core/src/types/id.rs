//! Newtype IDs for type-safe catalog and cart references.
//!
//! Use the `define_id!` macro to create string-backed ID wrappers that
//! prevent accidentally mixing a product id with a cart line key.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use ramstuga_core::define_id;
/// define_id!(FrameId);
/// define_id!(SlotKey);
///
/// let frame = FrameId::new("std-30x40-licht");
/// let slot = SlotKey::new("std-30x40-licht");
///
/// // These are different types, so this won't compile:
/// // let _: FrameId = slot;
/// assert_eq!(frame.as_str(), slot.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Catalog entry identifier, unique within the catalog.
define_id!(ProductId);

// Composite cart line key: product id plus selected variant attributes.
define_id!(LineKey);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        let id = ProductId::new("std-40x40-grijs");
        assert_eq!(id.to_string(), "std-40x40-grijs");
    }

    #[test]
    fn test_serde_is_transparent() {
        let key = LineKey::from("std-30x40-licht|color=Svart");
        let json = serde_json::to_string(&key).unwrap_or_default();
        assert_eq!(json, "\"std-30x40-licht|color=Svart\"");
    }
}
