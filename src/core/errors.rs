//! Registry error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error raised while resolving a probe snapshot into a registry.
///
/// The registry enforces mutual exclusion and that replacement tokens fit on
/// one line; every other inconsistency surfaces as a compile failure in
/// consumers.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum RegistryError {
    #[error("`{first}` and `{second}` are mutually exclusive ({group})")]
    #[diagnostic(
        code(a52conf::registry::mutually_exclusive),
        help("Select at most one member of the group")
    )]
    MutuallyExclusive {
        group: &'static str,
        first: String,
        second: String,
    },

    #[error("replacement for `{name}` spans more than one line: {value:?}")]
    #[diagnostic(
        code(a52conf::registry::invalid_token),
        help("Replacement tokens are written verbatim and must be a single line")
    )]
    InvalidToken { name: String, value: String },
}

impl RegistryError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            RegistryError::MutuallyExclusive {
                group,
                first,
                second,
            } => Diagnostic::error(format!(
                "`{}` and `{}` cannot both be selected",
                first, second
            ))
            .with_context(format!("they belong to the {} group", group))
            .with_context("at most one member of the group may be present per build")
            .with_suggestion(format!("Drop `{}` to keep `{}`", second, first))
            .with_suggestion(format!("Drop `{}` to keep `{}`", first, second))
            .with_suggestion("Select neither to fall back to the group default"),
            RegistryError::InvalidToken { name, value } => Diagnostic::error(format!(
                "replacement for `{}` contains a line break or control character",
                name
            ))
            .with_context(format!("found {:?}", value))
            .with_context("tokens are copied verbatim into `#define` lines and cargo directives")
            .with_suggestion(format!(
                "Fix the `{}` replacement in the snapshot or `.a52conf/config.toml`",
                name
            )),
        }
    }
}
