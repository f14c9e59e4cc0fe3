//! Keyword portability shims: `inline`, `const`, `restrict`, `size_t`.
//!
//! Each shim fills a gap in the compiler's native support. When native
//! support is adequate the shim does nothing.

use serde::{Deserialize, Serialize};

/// Attribute bound to the inline alias when always-inline is available.
pub const ALWAYS_INLINE_ATTRIBUTE: &str = "__attribute__ ((__always_inline__))";

/// Resolution of the `inline` alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "token", rename_all = "kebab-case")]
pub enum InlineHint {
    /// `inline` is already a keyword here; never redefine it
    Native,
    /// Inlining disabled project-wide; alias to nothing
    Suppressed,
    /// Strong always-inline attribute
    AlwaysInline,
    /// Alternate spelling, e.g. `__inline__`
    Keyword(String),
    /// No inline support under any name; alias to nothing
    Unsupported,
}

impl InlineHint {
    /// Pick the best available token.
    ///
    /// Priority: native keyword, project-wide disable, always-inline
    /// attribute, alternate spelling, nothing.
    pub fn resolve(
        native_keyword: bool,
        disabled: bool,
        always_inline: bool,
        spelling: Option<&str>,
    ) -> Self {
        if native_keyword {
            InlineHint::Native
        } else if disabled {
            InlineHint::Suppressed
        } else if always_inline {
            InlineHint::AlwaysInline
        } else if let Some(spelling) = spelling.filter(|s| !s.is_empty()) {
            InlineHint::Keyword(spelling.to_string())
        } else {
            InlineHint::Unsupported
        }
    }

    /// Replacement token for the alias, `None` when the alias is left alone.
    pub fn token(&self) -> Option<&str> {
        match self {
            InlineHint::Native => None,
            InlineHint::Suppressed | InlineHint::Unsupported => Some(""),
            InlineHint::AlwaysInline => Some(ALWAYS_INLINE_ATTRIBUTE),
            InlineHint::Keyword(k) => Some(k),
        }
    }

    /// True when the alias expands to nothing.
    pub fn is_noop(&self) -> bool {
        self.token() == Some("")
    }
}

/// Compatibility shim for a keyword or type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "token", rename_all = "lowercase")]
pub enum KeywordShim {
    /// Native support is adequate, do nothing
    #[default]
    Native,
    /// Neutralize by defining to this token (possibly empty)
    Replace(String),
}

impl KeywordShim {
    /// Shim from an optional replacement.
    pub fn from_replacement(replacement: Option<&str>) -> Self {
        match replacement {
            Some(token) => KeywordShim::Replace(token.trim().to_string()),
            None => KeywordShim::Native,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            KeywordShim::Native => None,
            KeywordShim::Replace(t) => Some(t),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, KeywordShim::Replace(_))
    }
}
