//! Capability flags - the unit the registry is made of.
//!
//! A flag is a name, a kind and a resolved state. Presence flags carry a real
//! boolean here; the "absent means false" encoding only exists in the
//! persisted header, where a false flag becomes a commented-out `#undef`.

use serde::{Deserialize, Serialize};

use super::catalog::cfg_name;

/// How a flag gets its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// On or off, no value semantics
    Presence,
    /// Bound to a concrete value
    Valued,
    /// Computed from other facts by a merge rule
    Derived,
}

/// A concrete flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FlagValue {
    /// Integer, rendered bare: `64`
    Int(u64),
    /// String literal, rendered quoted: `"a52dec"`
    Str(String),
    /// Bare token, rendered verbatim: `void`, `__restrict`, or nothing
    Token(String),
}

impl FlagValue {
    /// Render as it appears on the right-hand side of a `#define`.
    pub fn to_c(&self) -> String {
        match self {
            FlagValue::Int(n) => n.to_string(),
            FlagValue::Str(s) => format!("\"{}\"", escape_c(s)),
            FlagValue::Token(t) => t.clone(),
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            FlagValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Str(s) | FlagValue::Token(s) => Some(s),
            FlagValue::Int(_) => None,
        }
    }
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagValue::Int(n) => write!(f, "{}", n),
            FlagValue::Str(s) => write!(f, "{:?}", s),
            FlagValue::Token(t) if t.is_empty() => write!(f, "(empty)"),
            FlagValue::Token(t) => write!(f, "{}", t),
        }
    }
}

/// Escape a string for use inside a C string literal.
pub fn escape_c(s: &str) -> String {
    escape_control(&s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Replace control characters with C-style escapes, so the text always fits
/// on one line of generated output.
pub fn escape_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("\\{:03o}", byte));
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// True when `token` can be written verbatim on one line.
pub fn is_single_line_token(token: &str) -> bool {
    !token.chars().any(char::is_control)
}

/// Resolved state of a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum FlagState {
    Presence(bool),
    /// `None` when nothing was detected for this valued flag
    Value(Option<FlagValue>),
    /// Left to the compiler, per architecture slice
    Deferred,
}

impl FlagState {
    /// True when a consumer testing "is this defined" would see it.
    ///
    /// Deferred flags are not statically present.
    pub fn is_present(&self) -> bool {
        match self {
            FlagState::Presence(on) => *on,
            FlagState::Value(v) => v.is_some(),
            FlagState::Deferred => false,
        }
    }

    pub fn value(&self) -> Option<&FlagValue> {
        match self {
            FlagState::Value(v) => v.as_ref(),
            _ => None,
        }
    }
}

/// One entry of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEntry {
    /// Macro name as written to the header
    pub name: String,
    pub kind: FlagKind,
    pub state: FlagState,
    /// Description comment emitted above the entry
    pub description: String,
}

impl FlagEntry {
    /// Create a presence flag.
    pub fn presence(name: impl Into<String>, on: bool, description: impl Into<String>) -> Self {
        FlagEntry {
            name: name.into(),
            kind: FlagKind::Presence,
            state: FlagState::Presence(on),
            description: description.into(),
        }
    }

    /// Create a valued flag.
    pub fn valued(
        name: impl Into<String>,
        value: Option<FlagValue>,
        description: impl Into<String>,
    ) -> Self {
        FlagEntry {
            name: name.into(),
            kind: FlagKind::Valued,
            state: FlagState::Value(value),
            description: description.into(),
        }
    }

    /// Create a derived flag.
    pub fn derived(name: impl Into<String>, state: FlagState, description: impl Into<String>) -> Self {
        FlagEntry {
            name: name.into(),
            kind: FlagKind::Derived,
            state,
            description: description.into(),
        }
    }

    /// cfg spelling of the name.
    pub fn cfg_name(&self) -> String {
        cfg_name(&self.name)
    }

    /// Does `name` refer to this entry (macro or cfg spelling)?
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.cfg_name() == name
    }

    pub fn is_present(&self) -> bool {
        self.state.is_present()
    }
}
