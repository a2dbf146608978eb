//! Closed option sets accepted by the ZoKrates CLI.
//!
//! Each set is a fixed `const` table shared read-only by every adapter.
//! See <https://zokrates.github.io/toolbox/proving_schemes.html>.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a member of a closed option set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {option}: {value} (supported: {supported})")]
pub struct UnknownOption {
    /// Human-readable name of the option (e.g. `"curve"`).
    pub option: &'static str,
    pub value: String,
    /// Comma-separated list of accepted values.
    pub supported: String,
}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, default = $default:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[allow(non_camel_case_types)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in the order the CLI documents them.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name used in error messages.
            pub const LABEL: &'static str = $label;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            /// Comma-separated list of accepted values.
            pub fn supported() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownOption {
                        option: $label,
                        value: s.to_string(),
                        supported: Self::supported(),
                    })
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

closed_set! {
    /// Elliptic curve used for compilation and verifier export.
    Curve, "curve", default = Bn128 {
        Bn128 => "bn128",
        Bls12_381 => "bls12_381",
        Bls12_377 => "bls12_377",
        Bw6_761 => "bw6_761",
    }
}

closed_set! {
    /// Proving scheme used by setup, proof generation and verifier export.
    ProvingScheme, "proving scheme", default = G16 {
        G16 => "g16",
        Pghr13 => "pghr13",
        Gm17 => "gm17",
    }
}

closed_set! {
    /// Proving backend.
    Backend, "backend", default = Bellman {
        Bellman => "bellman",
        Libsnark => "libsnark",
        Ark => "ark",
    }
}

closed_set! {
    /// ABI encoder version of the exported Solidity verifier.
    SolidityAbi, "solidity ABI", default = V1 {
        V1 => "v1",
        V2 => "v2",
    }
}
