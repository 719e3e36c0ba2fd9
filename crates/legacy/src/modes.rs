use std::{fmt, str::FromStr};

use crate::ParameterError;

macro_rules! legacy_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $( $(#[$vmeta])* #[cfg_attr(feature = "serde", serde(rename = $text))] $variant ),+
        }

        impl $name {
            /// Wire string used by the legacy parameter protocol.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParameterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(ParameterError::UnknownValue {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

legacy_enum! {
    /// Legacy `flash-mode` values.
    ///
    /// # Example
    /// ```rust
    /// use camshim_legacy::prelude::LegacyFlashMode;
    ///
    /// assert_eq!(LegacyFlashMode::RedEye.as_str(), "red-eye");
    /// assert_eq!("torch".parse::<LegacyFlashMode>().unwrap(), LegacyFlashMode::Torch);
    /// ```
    pub enum LegacyFlashMode {
        Off => "off",
        Auto => "auto",
        On => "on",
        RedEye => "red-eye",
        Torch => "torch",
    }
}

legacy_enum! {
    /// Legacy `antibanding` values.
    pub enum LegacyAntibanding {
        Auto => "auto",
        Hz50 => "50hz",
        Hz60 => "60hz",
        Off => "off",
    }
}
