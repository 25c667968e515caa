//!
//! # Enum-String Mapping Module
//!
//! Defines the [enumstr] macro and paired [EnumStr] trait.
//! Technology data is full of enumerations with canonical printable names:
//! layer functions, arc functions, node functions, polygon styles.
//! Those names are what users type, what tools print, and what technology files store.
//!
//! ```rs
//! use tech21utils::{enumstr, EnumStr};
//!
//! enumstr!(
//! /// # Wire Kinds
//! WireKind {
//!     Metal: "metal",
//!     Poly: "polysilicon",
//!  }
//! );
//! ```
//!

///
/// # String-Enumeration Trait
///
/// * `to_str(&self) -> &'static str` converts the enum to its string value.
/// * `from_str(&str) -> Option<Self>` does the opposite.
///
pub trait EnumStr: std::marker::Sized {
    fn to_str(&self) -> &'static str;
    fn from_str(txt: &str) -> Option<Self>;
}

///
/// # Enum-String Pairing Macro
///
/// Creates a fieldless `enum` which:
/// * Implements [EnumStr] with the paired string values
/// * Implements [std::fmt::Display] writing those values
/// * (De)serializes *as* those values, via `serde(rename)`
/// * Lists every variant in declaration order, in `VARIANTS`
///
/// Callers must have `serde::{Deserialize, Serialize}` and [EnumStr] in scope.
///
#[macro_export]
macro_rules! enumstr {
    (   $(#[$meta: meta])*
        $enum_name: ident {
        $( $variant: ident : $strval: literal ),* $(,)?
    }) => {
        $(#[$meta])*
        #[allow(dead_code)]
        #[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $( #[doc=$strval]
               #[serde(rename = $strval)]
                $variant ),*
        }
        impl $enum_name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const VARIANTS: &'static [Self] = &[ $( Self::$variant ),* ];
        }
        impl EnumStr for $enum_name {
            /// Convert a [$enum_name] variant to its paired (static) string value.
            #[allow(dead_code)]
            fn to_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $strval),*,
                }
            }
            /// Create a [$enum_name] from one of its string-values.
            /// Matching is case *sensitive*; re-case outside `from_str` if needed.
            fn from_str(txt: &str) -> Option<Self> {
                match txt {
                    $( $strval => Some(Self::$variant)),*,
                    _ => None,
                }
            }
        }
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self.to_str())
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    enumstr!(
        /// # Wire Kinds
        WireKind {
            Metal: "metal",
            Poly: "polysilicon",
            Diff: "p-diffusion",
        }
    );

    #[test]
    fn test_enumstr() {
        assert_eq!(WireKind::Metal.to_str(), "metal");
        assert_eq!(WireKind::Diff.to_string(), "p-diffusion");
        assert_eq!(WireKind::from_str("polysilicon"), Some(WireKind::Poly));
        assert_eq!(WireKind::from_str("Polysilicon"), None);
        assert_eq!(
            WireKind::VARIANTS,
            &[WireKind::Metal, WireKind::Poly, WireKind::Diff]
        );
    }
    #[test]
    fn test_enumstr_serde() {
        // Serialized forms are the string values, not the variant names
        let s = serde_json::to_string(&WireKind::Diff).unwrap();
        assert_eq!(s, "\"p-diffusion\"");
        let w: WireKind = serde_json::from_str("\"metal\"").unwrap();
        assert_eq!(w, WireKind::Metal);
    }
}
