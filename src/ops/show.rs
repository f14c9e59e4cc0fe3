//! Human-readable views of a registry.

use std::fmt::Write;

use crate::core::flag::{FlagEntry, FlagKind, FlagState};
use crate::core::{Registry, WordsBigEndian};

/// Which entries to list.
#[derive(Debug, Clone, Default)]
pub struct ShowFilter {
    /// Only entries whose macro or cfg name contains this
    pub pattern: Option<String>,
    /// Hide presence flags that are off
    pub present_only: bool,
}

impl ShowFilter {
    fn accepts(&self, entry: &FlagEntry) -> bool {
        if self.present_only && entry.state == FlagState::Presence(false) {
            return false;
        }
        match &self.pattern {
            Some(pattern) => {
                let pattern = pattern.to_ascii_lowercase();
                entry.name.to_ascii_lowercase().contains(&pattern)
                    || entry.cfg_name().contains(&pattern)
            }
            None => true,
        }
    }
}

/// Short rendering of an entry's state.
pub fn format_state(state: &FlagState) -> String {
    match state {
        FlagState::Presence(true) => "yes".to_string(),
        FlagState::Presence(false) => "no".to_string(),
        FlagState::Value(Some(value)) if value.to_c().is_empty() => "(empty)".to_string(),
        FlagState::Value(Some(value)) => value.to_c(),
        FlagState::Value(None) => "-".to_string(),
        FlagState::Deferred => "per-arch".to_string(),
    }
}

fn kind_str(kind: FlagKind) -> &'static str {
    match kind {
        FlagKind::Presence => "presence",
        FlagKind::Valued => "valued",
        FlagKind::Derived => "derived",
    }
}

/// Format the summary block.
pub fn format_summary(registry: &Registry) -> String {
    let mut output = String::new();

    let endian = match registry.words_bigendian() {
        WordsBigEndian::Deferred => "per architecture (universal build)".to_string(),
        WordsBigEndian::Overridden(order) => format!("{} (override)", order),
        WordsBigEndian::Detected(order) => format!("{} (detected)", order),
    };

    let audio: Vec<&str> = registry
        .audio_backends()
        .iter()
        .map(|b| b.key())
        .collect();

    writeln!(output, "Package:     {}", registry.package().full_name()).unwrap();
    writeln!(
        output,
        "Arithmetic:  {} ({})",
        registry.arithmetic_mode(),
        registry.arithmetic_mode().sample_type()
    )
    .unwrap();
    writeln!(output, "Byte order:  {}", endian).unwrap();
    writeln!(
        output,
        "Inline:      {}",
        match registry.inline_hint().token() {
            None => "native".to_string(),
            Some("") => "(disabled)".to_string(),
            Some(token) => token.to_string(),
        }
    )
    .unwrap();
    writeln!(
        output,
        "Audio:       {}",
        if audio.is_empty() {
            "none".to_string()
        } else {
            audio.join(", ")
        }
    )
    .unwrap();
    writeln!(output, "djbfft:      {}", if registry.djbfft() { "yes" } else { "no" }).unwrap();
    writeln!(output, "Fingerprint: {}", &registry.fingerprint()[..16]).unwrap();

    output
}

/// Format the flag table.
pub fn format_flags(registry: &Registry, filter: &ShowFilter) -> String {
    let rows: Vec<(&str, &str, String)> = registry
        .entries()
        .iter()
        .filter(|e| filter.accepts(e))
        .map(|e| (e.name.as_str(), kind_str(e.kind), format_state(&e.state)))
        .collect();

    let width = rows.iter().map(|(name, _, _)| name.len()).max().unwrap_or(4).max(4);

    let mut output = String::new();
    writeln!(output, "{:<width$}  {:<8}  VALUE", "FLAG", "KIND", width = width).unwrap();
    for (name, kind, state) in &rows {
        writeln!(output, "{:<width$}  {:<8}  {}", name, kind, state, width = width).unwrap();
    }

    if rows.is_empty() {
        writeln!(output, "(no matching flags)").unwrap();
    }

    output
}

/// Summary followed by the flag table.
pub fn format_report(registry: &Registry, filter: &ShowFilter) -> String {
    format!("{}\n{}", format_summary(registry), format_flags(registry, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flag::FlagValue;
    use crate::test_support::a52dec_registry;

    #[test]
    fn test_format_state() {
        assert_eq!(format_state(&FlagState::Presence(true)), "yes");
        assert_eq!(format_state(&FlagState::Value(None)), "-");
        assert_eq!(
            format_state(&FlagState::Value(Some(FlagValue::Token(String::new())))),
            "(empty)"
        );
        assert_eq!(
            format_state(&FlagState::Value(Some(FlagValue::Str("a52dec".into())))),
            "\"a52dec\""
        );
        assert_eq!(format_state(&FlagState::Deferred), "per-arch");
    }

    #[test]
    fn test_summary() {
        let summary = format_summary(&a52dec_registry());
        assert!(summary.contains("Package:     a52dec 0.8.0"));
        assert!(summary.contains("Arithmetic:  single"));
        assert!(summary.contains("Byte order:  little (detected)"));
        assert!(summary.contains("__always_inline__"));
        assert!(summary.contains("Audio:       none"));
    }

    #[test]
    fn test_flag_table_filter() {
        let registry = a52dec_registry();
        let filter = ShowFilter {
            pattern: Some("have_sys".to_string()),
            present_only: false,
        };

        let table = format_flags(&registry, &filter);
        assert!(table.starts_with("FLAG"));
        assert!(table.contains("HAVE_SYS_TIME_H"));
        assert!(!table.contains("HAVE_DLFCN_H"));
    }

    #[test]
    fn test_present_only_hides_absent() {
        let registry = a52dec_registry();
        let filter = ShowFilter {
            pattern: None,
            present_only: true,
        };

        let table = format_flags(&registry, &filter);
        assert!(table.contains("HAVE_DLFCN_H"));
        assert!(!table.contains("HAVE_IO_H"));
        assert!(!table.contains("LIBA52_FIXED"));
    }

    #[test]
    fn test_no_matches() {
        let filter = ShowFilter {
            pattern: Some("nothing_like_this".to_string()),
            present_only: false,
        };
        assert!(format_flags(&a52dec_registry(), &filter).contains("(no matching flags)"));
    }
}
