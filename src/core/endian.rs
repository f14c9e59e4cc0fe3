//! Byte order derivation for `WORDS_BIGENDIAN`.
//!
//! Resolution is two-tier:
//! 1. Universal (multi-architecture) builds defer to the compiler's
//!    `__BIG_ENDIAN__` indicator, evaluated once per architecture slice.
//! 2. Single-target builds define-if-absent: an external override wins,
//!    otherwise the probed byte order is the default.

use serde::{Deserialize, Serialize};

pub const MACRO: &str = "WORDS_BIGENDIAN";
pub const UNIVERSAL_MACRO: &str = "AC_APPLE_UNIVERSAL_BUILD";
pub const COMPILER_INDICATOR: &str = "__BIG_ENDIAN__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    pub fn is_big(&self) -> bool {
        matches!(self, ByteOrder::Big)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            _ => Err(format!("invalid byte order '{}', valid values: little, big", s)),
        }
    }
}

/// Resolved state of `WORDS_BIGENDIAN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "order", rename_all = "lowercase")]
pub enum WordsBigEndian {
    /// Universal build: left to the per-architecture compiler indicator
    Deferred,
    /// Supplied externally; the registry default was suppressed
    Overridden(ByteOrder),
    /// Registry default from the probed byte order
    Detected(ByteOrder),
}

impl WordsBigEndian {
    /// Apply the two-tier rule.
    pub fn resolve(universal: bool, external: Option<ByteOrder>, detected: ByteOrder) -> Self {
        if universal {
            return WordsBigEndian::Deferred;
        }
        match external {
            Some(order) => WordsBigEndian::Overridden(order),
            None => WordsBigEndian::Detected(detected),
        }
    }

    /// Statically known byte order, `None` when deferred.
    pub fn fixed(&self) -> Option<ByteOrder> {
        match self {
            WordsBigEndian::Deferred => None,
            WordsBigEndian::Overridden(order) | WordsBigEndian::Detected(order) => Some(*order),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, WordsBigEndian::Deferred)
    }

    /// Whether the flag is statically defined.
    pub fn is_present(&self) -> bool {
        self.fixed().is_some_and(|o| o.is_big())
    }

    /// Final answer for one architecture slice of the build.
    pub fn evaluate(&self, slice_is_big: bool) -> bool {
        match self.fixed() {
            Some(order) => order.is_big(),
            None => slice_is_big,
        }
    }
}
