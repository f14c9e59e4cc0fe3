//! User-friendly diagnostic messages.
//!
//! Every error shown to the user should name the root cause, the facts that
//! led to it, and what to do next.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the generated header is missing.
    pub const NO_HEADER: &str = "help: Run `a52conf configure` to generate it";

    /// Suggestion when the generated header no longer matches the probe.
    pub const STALE_HEADER: &str =
        "help: Run `a52conf configure` again and rebuild every consumer";

    /// Suggestion when a snapshot cannot be loaded.
    pub const BAD_SNAPSHOT: &str =
        "help: Run `a52conf probe > snapshot.toml` to start from a valid snapshot";

    /// Suggestion when no audio output backend is enabled.
    pub const NO_AUDIO: &str =
        "help: List backends under `[options] audio` in `.a52conf/config.toml`";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// A generated header that no longer matches the probe.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("`{path}` is stale")]
#[diagnostic(
    code(a52conf::check::stale),
    help("Run `a52conf configure` again and rebuild every consumer")
)]
pub struct StaleRegistryError {
    pub path: String,
    pub expected: String,
    pub found: Option<String>,
}

impl StaleRegistryError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let found = self.found.as_deref().unwrap_or("(no fingerprint)");
        Diagnostic::error(format!("`{}` was generated from a different probe", self.path))
            .with_location(&self.path)
            .with_context(format!("expected fingerprint {}", self.expected))
            .with_context(format!("found fingerprint    {}", found))
            .with_suggestion(suggestions::STALE_HEADER)
    }
}

/// A snapshot file that does not parse.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("failed to parse snapshot: {path}")]
#[diagnostic(
    code(a52conf::probe::bad_snapshot),
    help("Run `a52conf probe > snapshot.toml` to start from a valid snapshot")
)]
pub struct SnapshotError {
    pub path: String,
    pub reason: String,
}

impl SnapshotError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(format!("`{}` is not a valid probe snapshot", self.path))
            .with_location(&self.path)
            .with_context(self.reason.trim_end().to_string())
            .with_suggestion(suggestions::BAD_SNAPSHOT)
    }
}

/// Warning for a registry without any audio output backend.
pub fn no_audio_backend() -> Diagnostic {
    Diagnostic::warning("no audio backend selected")
        .with_context("a52dec will only be able to decode to files or stdout")
        .with_suggestion(suggestions::NO_AUDIO)
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
