//! Enumerated control modes carried by capture requests.
//!
//! Requests store these as raw integers; decoding an unknown discriminant yields
//! `None` so callers can tell "unrecognized" apart from "unset".

use crate::metadata::{MetadataType, MetadataValue};

macro_rules! raw_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $raw:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Decode a raw discriminant.
            pub fn from_raw(raw: i32) -> Option<Self> {
                match raw {
                    $( $raw => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Raw discriminant as stored in request metadata.
            pub fn raw(self) -> i32 {
                match self {
                    $( $name::$variant => $raw, )+
                }
            }
        }

        impl MetadataType for $name {
            fn from_value(value: &MetadataValue) -> Option<Self> {
                match value {
                    MetadataValue::Int(raw) => $name::from_raw(*raw),
                    _ => None,
                }
            }

            fn into_value(self) -> MetadataValue {
                MetadataValue::Int(self.raw())
            }
        }
    };
}

raw_enum! {
    /// Auto-exposure routine mode.
    ///
    /// # Example
    /// ```rust
    /// use camshim_core::prelude::AeMode;
    ///
    /// assert_eq!(AeMode::from_raw(2), Some(AeMode::OnAutoFlash));
    /// assert_eq!(AeMode::from_raw(42), None);
    /// ```
    pub enum AeMode {
        Off = 0,
        On = 1,
        OnAutoFlash = 2,
        OnAlwaysFlash = 3,
        OnAutoFlashRedeye = 4,
    }
}

raw_enum! {
    /// Requested flash unit behaviour.
    pub enum FlashMode {
        Off = 0,
        /// Fire once for this capture.
        Single = 1,
        /// Continuous illumination.
        Torch = 2,
    }
}

raw_enum! {
    /// Illumination flicker compensation.
    pub enum AeAntibandingMode {
        Off = 0,
        Hz50 = 1,
        Hz60 = 2,
        Auto = 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_discriminants_round_trip() {
        for mode in AeMode::ALL {
            assert_eq!(AeMode::from_raw(mode.raw()), Some(*mode));
        }
        assert_eq!(FlashMode::Torch.raw(), 2);
        assert_eq!(AeAntibandingMode::from_raw(3), Some(AeAntibandingMode::Auto));
    }

    #[test]
    fn non_integer_payload_is_not_a_mode() {
        assert_eq!(FlashMode::from_value(&MetadataValue::Bool(true)), None);
        assert_eq!(FlashMode::from_value(&MetadataValue::Int(9)), None);
    }
}
