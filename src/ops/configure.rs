//! Probe, resolve and write the registry's persisted forms.
//!
//! ```bash
//! a52conf configure                        # host platform tables
//! a52conf configure --snapshot probe.toml  # facts from a file
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{Probe, ProbeSnapshot, Registry, SnapshotFile, TargetProbe, TargetTriple};
use crate::emit;
use crate::util::config::{load_config, load_project_config, project_config_path};
use crate::util::fs::write_if_changed;
use crate::util::Config;

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "include";

/// Where the probe facts come from.
#[derive(Debug, Clone, Default)]
pub enum ProbeSource {
    /// Platform tables for the host
    #[default]
    Host,
    /// Platform tables for a target triple
    Target(TargetTriple),
    /// A snapshot file
    Snapshot(PathBuf),
}

impl ProbeSource {
    /// The probe behind this source.
    pub fn probe(&self) -> Box<dyn Probe> {
        match self {
            ProbeSource::Host => Box::new(TargetProbe::host()),
            ProbeSource::Target(target) => Box::new(TargetProbe::new(target.clone())),
            ProbeSource::Snapshot(path) => Box::new(SnapshotFile::new(path.clone())),
        }
    }
}

/// Inputs shared by every operation that needs a fresh registry.
#[derive(Debug, Clone)]
pub struct ResolveInputs {
    /// Project root, where `.a52conf/config.toml` is looked up
    pub project_root: PathBuf,
    /// Probe facts
    pub source: ProbeSource,
    /// Also read `~/.a52conf/config.toml`
    pub use_global_config: bool,
}

impl ResolveInputs {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        ResolveInputs {
            project_root: project_root.into(),
            source: ProbeSource::Host,
            use_global_config: true,
        }
    }

    pub fn with_source(mut self, source: ProbeSource) -> Self {
        self.source = source;
        self
    }

    /// Merged configuration for these inputs.
    pub fn config(&self) -> Config {
        if self.use_global_config {
            load_project_config(&self.project_root)
        } else {
            load_config(Path::new(""), &project_config_path(&self.project_root))
        }
    }

    /// Probe and apply configuration overrides.
    pub fn snapshot(&self, config: &Config) -> Result<ProbeSnapshot> {
        let probe = self.source.probe();
        tracing::debug!("probing with {}", probe.describe());

        let mut snapshot = probe.probe()?;
        config.apply(&mut snapshot)?;
        Ok(snapshot)
    }

    /// Probe, apply configuration and resolve.
    pub fn resolve(&self) -> Result<Registry> {
        let config = self.config();
        let snapshot = self.snapshot(&config)?;
        Ok(Registry::resolve(&snapshot)?)
    }
}

/// Options for the configure operation.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    pub inputs: ResolveInputs,

    /// Output directory; overrides `[output] dir`. Relative paths are taken
    /// from the project root.
    pub output_dir: Option<PathBuf>,

    /// Write `a52conf.json` next to the header; overrides `[output] json`
    pub json: Option<bool>,
}

impl ConfigureOptions {
    pub fn new(inputs: ResolveInputs) -> Self {
        ConfigureOptions {
            inputs,
            output_dir: None,
            json: None,
        }
    }
}

/// Result of a configure run.
#[derive(Debug, Clone)]
pub struct ConfigureResult {
    pub registry: Registry,
    pub header_path: PathBuf,
    pub json_path: Option<PathBuf>,
    /// Whether the header was rewritten
    pub header_changed: bool,
}

/// Resolve the output directory for the given options and config.
pub fn output_dir(project_root: &Path, explicit: Option<&Path>, config: &Config) -> PathBuf {
    let dir = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    if dir.is_absolute() {
        dir
    } else {
        project_root.join(dir)
    }
}

/// Run the probe, resolve and write the outputs.
pub fn configure(opts: &ConfigureOptions) -> Result<ConfigureResult> {
    let config = opts.inputs.config();
    let snapshot = opts.inputs.snapshot(&config)?;
    let registry = Registry::resolve(&snapshot)?;

    let dir = output_dir(&opts.inputs.project_root, opts.output_dir.as_deref(), &config);
    let header_path = dir.join(emit::HEADER_FILE);

    let header_changed = write_if_changed(&header_path, &emit::header::render(&registry))
        .with_context(|| format!("failed to write {}", header_path.display()))?;

    let json_path = if opts.json.or(config.output.json).unwrap_or(true) {
        let path = dir.join(emit::JSON_FILE);
        write_if_changed(&path, &emit::json::render(&registry)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Some(path)
    } else {
        None
    };

    tracing::info!(
        "configured {} ({} flags, {} arithmetic)",
        registry.package().full_name(),
        registry.entries().len(),
        registry.arithmetic_mode()
    );

    Ok(ConfigureResult {
        registry,
        header_path,
        json_path,
        header_changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArithmeticMode, RegistryError};
    use crate::test_support::{a52dec_snapshot, configs, ProjectFixture};
    use tempfile::TempDir;

    fn inputs(root: &Path, snapshot: PathBuf) -> ResolveInputs {
        ResolveInputs {
            project_root: root.to_path_buf(),
            source: ProbeSource::Snapshot(snapshot),
            use_global_config: false,
        }
    }

    #[test]
    fn test_configure_writes_outputs() {
        let tmp = TempDir::new().unwrap();
        let snapshot = ProjectFixture::new()
            .with_snapshot(a52dec_snapshot())
            .write_to(tmp.path())
            .unwrap()
            .unwrap();

        let result = configure(&ConfigureOptions::new(inputs(tmp.path(), snapshot))).unwrap();

        assert_eq!(result.header_path, tmp.path().join("include/config.h"));
        assert!(result.header_changed);

        let header = std::fs::read_to_string(&result.header_path).unwrap();
        assert!(header.contains("#define HAVE_DLFCN_H 1"));
        assert_eq!(
            emit::fingerprint_of(&header),
            Some(result.registry.fingerprint())
        );
        assert!(result.json_path.unwrap().exists());
    }

    #[test]
    fn test_configure_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let snapshot = ProjectFixture::new()
            .with_snapshot(a52dec_snapshot())
            .write_to(tmp.path())
            .unwrap()
            .unwrap();

        let opts = ConfigureOptions::new(inputs(tmp.path(), snapshot));
        let first = configure(&opts).unwrap();
        let before = std::fs::read_to_string(&first.header_path).unwrap();

        let second = configure(&opts).unwrap();
        assert!(!second.header_changed);
        assert_eq!(std::fs::read_to_string(&second.header_path).unwrap(), before);
    }

    #[test]
    fn test_project_config_applies() {
        let tmp = TempDir::new().unwrap();
        let snapshot = ProjectFixture::new()
            .with_config(configs::fixed_oss())
            .with_snapshot(a52dec_snapshot())
            .write_to(tmp.path())
            .unwrap()
            .unwrap();

        let mut opts = ConfigureOptions::new(inputs(tmp.path(), snapshot));
        opts.json = Some(false);
        let result = configure(&opts).unwrap();

        assert_eq!(result.registry.arithmetic_mode(), ArithmeticMode::Fixed);
        assert!(result.registry.is_present("LIBAO_OSS"));
        assert!(result.json_path.is_none());
        assert!(!tmp.path().join("include/a52conf.json").exists());
    }

    #[test]
    fn test_exclusive_snapshot_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut both = a52dec_snapshot();
        both.options.fixed = true;
        both.options.double = true;
        let snapshot = ProjectFixture::new()
            .with_snapshot(both)
            .write_to(tmp.path())
            .unwrap()
            .unwrap();

        let err = configure(&ConfigureOptions::new(inputs(tmp.path(), snapshot))).unwrap_err();
        assert!(err.downcast_ref::<RegistryError>().is_some());
        assert!(!tmp.path().join("include/config.h").exists());
    }

    #[test]
    fn test_output_dir_resolution() {
        let root = Path::new("/project");
        let mut config = Config::default();

        assert_eq!(output_dir(root, None, &config), root.join("include"));

        config.output.dir = Some(PathBuf::from("build"));
        assert_eq!(output_dir(root, None, &config), root.join("build"));

        assert_eq!(
            output_dir(root, Some(Path::new("out")), &config),
            root.join("out")
        );
    }

    #[test]
    fn test_target_source() {
        let target = TargetTriple::parse("powerpc-unknown-linux-gnu").unwrap();
        let inputs = ResolveInputs {
            project_root: PathBuf::from("/nonexistent"),
            source: ProbeSource::Target(target),
            use_global_config: false,
        };

        let registry = inputs.resolve().unwrap();
        assert!(registry.is_present("WORDS_BIGENDIAN"));
    }
}
