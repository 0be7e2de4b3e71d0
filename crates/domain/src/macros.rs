//! Macro for implementing Display and FromStr for label enums
//!
//! Several domain enums (encodings, storage backends, session states, error
//! kinds) travel through config files, env vars and log fields as short
//! lowercase labels. This macro provides both conversions from one table.
//!
//! # Example
//!
//! ```rust
//! use paylink_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Upi,
//!     Card,
//! }
//!
//! impl_domain_label_conversions!(Channel {
//!     Upi => "upi",
//!     Card => "card",
//! });
//! ```

/// Implements Display and FromStr traits for label enums
///
/// This macro generates:
/// - Display trait: writes the variant's label
/// - FromStr trait: parses case-insensitive labels to enum variants
///
/// Labels must be written in lowercase.
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable lowercase label for this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
