//! Stale-registry detection.
//!
//! A header and the code compiled against it must come from the same
//! resolution. `check` re-resolves from the current probe and compares the
//! result with the fingerprint embedded in the existing header.

use std::path::PathBuf;

use anyhow::Result;

use super::configure::{output_dir, ResolveInputs};
use crate::core::Registry;
use crate::emit;
use crate::util::diagnostic::{suggestions, Diagnostic, StaleRegistryError};
use crate::util::fs::read_to_string;

/// Options for the check operation.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub inputs: ResolveInputs,
    /// Header to check; defaults to `config.h` in the configured output dir
    pub header: Option<PathBuf>,
}

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckReport {
    /// The header matches a fresh resolution
    UpToDate { path: PathBuf, fingerprint: String },
    /// The header was generated from different facts
    Stale {
        path: PathBuf,
        expected: String,
        found: Option<String>,
    },
    /// No header at the expected path
    Missing { path: PathBuf },
}

impl CheckReport {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, CheckReport::UpToDate { .. })
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            CheckReport::UpToDate { path, .. }
            | CheckReport::Stale { path, .. }
            | CheckReport::Missing { path } => path,
        }
    }

    /// A diagnostic for the failing cases.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            CheckReport::UpToDate { .. } => None,
            CheckReport::Stale {
                path,
                expected,
                found,
            } => Some(
                StaleRegistryError {
                    path: path.display().to_string(),
                    expected: expected.clone(),
                    found: found.clone(),
                }
                .to_diagnostic(),
            ),
            CheckReport::Missing { path } => Some(
                Diagnostic::error(format!("`{}` does not exist", path.display()))
                    .with_suggestion(suggestions::NO_HEADER),
            ),
        }
    }
}

/// Compare an existing header against a fresh resolution.
pub fn check(opts: &CheckOptions) -> Result<CheckReport> {
    let config = opts.inputs.config();
    let snapshot = opts.inputs.snapshot(&config)?;
    let registry = Registry::resolve(&snapshot)?;

    let path = match &opts.header {
        Some(path) => path.clone(),
        None => output_dir(&opts.inputs.project_root, None, &config).join(emit::HEADER_FILE),
    };

    if !path.exists() {
        tracing::debug!("no header at {}", path.display());
        return Ok(CheckReport::Missing { path });
    }

    let found = emit::fingerprint_of(&read_to_string(&path)?);
    let expected = registry.fingerprint();

    if found.as_deref() == Some(expected.as_str()) {
        Ok(CheckReport::UpToDate {
            path,
            fingerprint: expected,
        })
    } else {
        tracing::warn!("{} is stale", path.display());
        Ok(CheckReport::Stale {
            path,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::configure::{configure, ConfigureOptions, ProbeSource};
    use crate::test_support::{a52dec_snapshot, ProjectFixture};
    use tempfile::TempDir;

    fn setup() -> (TempDir, ResolveInputs) {
        let tmp = TempDir::new().unwrap();
        let snapshot = ProjectFixture::new()
            .with_snapshot(a52dec_snapshot())
            .write_to(tmp.path())
            .unwrap()
            .unwrap();

        let inputs = ResolveInputs {
            project_root: tmp.path().to_path_buf(),
            source: ProbeSource::Snapshot(snapshot),
            use_global_config: false,
        };
        (tmp, inputs)
    }

    #[test]
    fn test_missing_header() {
        let (_tmp, inputs) = setup();
        let report = check(&CheckOptions {
            inputs,
            header: None,
        })
        .unwrap();

        assert!(matches!(report, CheckReport::Missing { .. }));
        let output = report.to_diagnostic().unwrap().format(false);
        assert!(output.contains("a52conf configure"));
    }

    #[test]
    fn test_up_to_date_after_configure() {
        let (_tmp, inputs) = setup();
        configure(&ConfigureOptions::new(inputs.clone())).unwrap();

        let report = check(&CheckOptions {
            inputs,
            header: None,
        })
        .unwrap();
        assert!(report.is_up_to_date());
        assert!(report.to_diagnostic().is_none());
    }

    #[test]
    fn test_stale_after_option_change() {
        let (tmp, inputs) = setup();
        configure(&ConfigureOptions::new(inputs.clone())).unwrap();

        let config_dir = tmp.path().join(".a52conf");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[options]\narithmetic = \"double\"\n",
        )
        .unwrap();

        let report = check(&CheckOptions {
            inputs,
            header: None,
        })
        .unwrap();

        match report {
            CheckReport::Stale { found, expected, .. } => {
                assert!(found.is_some());
                assert_ne!(found.unwrap(), expected);
            }
            other => panic!("expected stale, got {:?}", other),
        }
    }

    #[test]
    fn test_hand_written_header_is_stale() {
        let (tmp, inputs) = setup();
        let header = tmp.path().join("config.h");
        std::fs::write(&header, "#define HAVE_DLFCN_H 1\n").unwrap();

        let report = check(&CheckOptions {
            inputs,
            header: Some(header),
        })
        .unwrap();

        assert!(matches!(report, CheckReport::Stale { found: None, .. }));
        let output = report.to_diagnostic().unwrap().format(false);
        assert!(output.contains("(no fingerprint)"));
    }
}
