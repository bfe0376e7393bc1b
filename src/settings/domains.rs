//! Enumerated value domains for the categorical settings fields.
//!
//! Each domain is a closed enum encoded as its string token on the wire.
//! Decoding goes through `FromStr`, so a token outside the domain is
//! rejected rather than mapped to a fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SettingsError;

macro_rules! settings_domain {
    (
        $(#[$meta:meta])*
        $name:ident ($domain:literal), default = $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member of the domain, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// String tokens of the domain, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($token),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SettingsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    other => Err(SettingsError::unknown_variant($domain, other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = SettingsError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

settings_domain! {
    /// Exposure profile.
    Exposure("exposure"), default = Normal {
        Normal => "normal",
        Short => "short",
        Long => "long",
        Custom => "custom",
    }
}

settings_domain! {
    /// White balance preset. `Custom` pairs with the explicit AWB gains.
    WhiteBalance("whiteBalance"), default = Auto {
        Auto => "auto",
        Incandescent => "incandescent",
        Tungsten => "tungsten",
        Fluorescent => "fluorescent",
        Indoor => "indoor",
        Daylight => "daylight",
        Cloudy => "cloudy",
        Custom => "custom",
    }
}

settings_domain! {
    /// Denoise mode; the `cdn_*` variants select colour denoise only.
    Denoise("denoise"), default = Off {
        Off => "off",
        CdnOff => "cdn_off",
        CdnFast => "cdn_fast",
        CdnHq => "cdn_hq",
    }
}

settings_domain! {
    /// Metering mode. `Custom` meters over the settings' ROI.
    Metering("metering"), default = Centre {
        Centre => "centre",
        Spot => "spot",
        Matrix => "matrix",
        Custom => "custom",
    }
}

settings_domain! {
    FocusMode("focusMode"), default = Continuous {
        Auto => "auto",
        Manual => "manual",
        Continuous => "continuous",
    }
}

settings_domain! {
    AfRange("afRange"), default = Full {
        Normal => "normal",
        Macro => "macro",
        Full => "full",
    }
}

settings_domain! {
    AfSpeed("afSpeed"), default = Fast {
        Normal => "normal",
        Fast => "fast",
    }
}

settings_domain! {
    /// H.264 encoder selection.
    Codec("codec"), default = Auto {
        Auto => "auto",
        HardwareH264 => "hardwareH264",
        SoftwareH264 => "softwareH264",
    }
}
