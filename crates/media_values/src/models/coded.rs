//! Closed enumerations bound to stable 64-bit codes.
//!
//! Every enumerated property in a media metadata model is a small fixed
//! vocabulary whose persisted form is an integer code. [`CodedEnumeration`]
//! captures that shape once, and [`coded_enumeration!`](crate::coded_enumeration)
//! declares a concrete vocabulary:
//!
//! ```
//! use media_values::coded_enumeration;
//! use media_values::models::CodedEnumeration;
//!
//! coded_enumeration! {
//!     /// Which eye a stereoscopic view belongs to.
//!     pub enum EyeType {
//!         Left = 0,
//!         Right = 1,
//!     }
//! }
//!
//! assert_eq!(EyeType::from_code(1).unwrap(), EyeType::Right);
//! assert_eq!(EyeType::Left.symbol(), "Left");
//! ```
//!
//! The macro emits a `#[repr(i64)]` enum with the codes as explicit
//! discriminants, so duplicate codes or duplicate symbols are compile errors.

use std::fmt;

use crate::error::{ValueError, ValueResult};

/// A member of a closed vocabulary with a fixed symbol and wire code.
pub trait CodedEnumeration: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Name of the vocabulary, used in error messages.
    const TYPE_NAME: &'static str;

    /// All members in declaration order.
    fn members() -> &'static [Self];

    /// The persisted integer code of this member.
    fn value(&self) -> i64;

    /// The declared name of this member, case preserved.
    fn symbol(&self) -> &'static str;

    /// Look up the member carrying `code`.
    fn from_code(code: i64) -> ValueResult<Self> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.value() == code)
            .ok_or_else(|| {
                tracing::debug!(type_name = Self::TYPE_NAME, code, "Unknown enumeration code");
                ValueError::UnknownCode {
                    type_name: Self::TYPE_NAME,
                    code,
                }
            })
    }

    /// Look up the member named exactly `symbol`.
    fn from_symbol(symbol: &str) -> ValueResult<Self> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.symbol() == symbol)
            .ok_or_else(|| {
                tracing::debug!(type_name = Self::TYPE_NAME, symbol, "Unknown enumeration symbol");
                ValueError::UnknownSymbol {
                    type_name: Self::TYPE_NAME,
                    symbol: symbol.to_string(),
                }
            })
    }
}

/// Declare a [`CodedEnumeration`] vocabulary.
///
/// Each variant is written `Symbol = code`. Besides the trait, the generated
/// type implements `Display` and `FromStr` over the symbol, `TryFrom<i64>`
/// and `From<Self> for i64` over the code, and serde by symbol. Ordering
/// follows the codes.
#[macro_export]
macro_rules! coded_enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(i64)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $code,
            )+
        }

        impl $crate::models::CodedEnumeration for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn value(&self) -> i64 {
                *self as i64
            }

            fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $crate::models::CodedEnumeration>::symbol(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ValueError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::models::CodedEnumeration>::from_symbol(s)
            }
        }

        impl ::std::convert::TryFrom<i64> for $name {
            type Error = $crate::ValueError;

            fn try_from(code: i64) -> ::std::result::Result<Self, Self::Error> {
                <Self as $crate::models::CodedEnumeration>::from_code(code)
            }
        }

        impl ::std::convert::From<$name> for i64 {
            fn from(member: $name) -> i64 {
                <$name as $crate::models::CodedEnumeration>::value(&member)
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(<Self as $crate::models::CodedEnumeration>::symbol(self))
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let text =
                    <::std::string::String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::models::CodedEnumeration>::from_symbol(&text)
                    .map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::coded_enumeration! {
        /// Sparse, negative, and out-of-order codes.
        enum Sparse {
            Low = -5,
            High = 1000,
            Middle = 7,
        }
    }

    #[test]
    fn members_keep_declaration_order() {
        assert_eq!(Sparse::members(), &[Sparse::Low, Sparse::High, Sparse::Middle]);
        assert_eq!(Sparse::TYPE_NAME, "Sparse");
    }

    #[test]
    fn codes_need_not_be_contiguous() {
        assert_eq!(Sparse::from_code(-5).unwrap(), Sparse::Low);
        assert_eq!(Sparse::from_code(1000).unwrap(), Sparse::High);
        assert_eq!(Sparse::Middle.value(), 7);
        assert_eq!(
            Sparse::from_code(0).unwrap_err(),
            ValueError::UnknownCode {
                type_name: "Sparse",
                code: 0
            }
        );
    }

    #[test]
    fn ordering_follows_codes() {
        assert!(Sparse::Low < Sparse::Middle);
        assert!(Sparse::Middle < Sparse::High);
    }

    #[test]
    fn symbol_lookup_is_exact() {
        assert_eq!(Sparse::from_symbol("Middle").unwrap(), Sparse::Middle);
        assert!(Sparse::from_symbol("middle").is_err());
        assert!(Sparse::from_symbol(" Middle").is_err());
        assert!(Sparse::from_symbol("").is_err());
    }

    #[test]
    fn std_conversions_delegate_to_trait() {
        assert_eq!(Sparse::try_from(7).unwrap(), Sparse::Middle);
        assert_eq!(i64::from(Sparse::High), 1000);
        assert_eq!("Low".parse::<Sparse>().unwrap(), Sparse::Low);
        assert_eq!(Sparse::High.to_string(), "High");
    }
}
