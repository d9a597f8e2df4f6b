//! Closed wire enumerations.
//!
//! Every enumerated field on the wire is a small integer with a fixed set of
//! named values. `wire_enum!` declares the Rust enum together with the raw
//! mapping in both directions, so an out-of-range value can never become an
//! enum instance: decoding goes through `from_raw` (returns `None`) or
//! `decode` (returns `WireError::OutOfRangeField`).

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($repr:ty) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Map a raw wire value to a variant, `None` if it has no meaning.
            pub fn from_raw(raw: $repr) -> Option<Self> {
                match raw {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Raw wire value of this variant.
            pub fn as_raw(self) -> $repr {
                match self {
                    $( Self::$variant => $value, )+
                }
            }

            #[allow(dead_code)]
            pub(crate) fn decode(raw: $repr, field: &'static str) -> crate::error::Result<Self> {
                Self::from_raw(raw)
                    .ok_or_else(|| crate::error::WireError::out_of_range(field, i64::from(raw)))
            }
        }
    };
}
