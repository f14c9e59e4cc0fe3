//! Configuration file support for a52conf.
//!
//! a52conf supports two configuration file locations:
//! - Global: `~/.a52conf/config.toml` - User-wide defaults
//! - Project: `.a52conf/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Every setting is
//! optional; a set value replaces whatever the probe reported.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::arith::ArithmeticMode;
use crate::core::catalog::AudioBackend;
use crate::core::endian::ByteOrder;
use crate::core::probe::ProbeSnapshot;

/// a52conf configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build option overrides
    pub options: OptionsConfig,

    /// Package metadata overrides
    pub package: PackageConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Build option overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Arithmetic precision (fixed, double, single)
    pub arithmetic: Option<String>,

    /// Use the djbfft transform backend
    pub djbfft: Option<bool>,

    /// Enable debug code paths
    pub debug: Option<bool>,

    /// Profiling build
    pub gprof: Option<bool>,

    /// Audio output backends (replaces the probed set)
    pub audio: Option<Vec<String>>,

    /// Maximum data alignment
    pub alignment_max: Option<u32>,

    /// Disable inlining project-wide
    pub disable_inline: Option<bool>,

    /// Force the byte order (little, big)
    pub byte_order: Option<String>,
}

/// Package metadata overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub tarname: Option<String>,
    pub bugreport: Option<String>,
    pub url: Option<String>,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory generated files are written to
    pub dir: Option<PathBuf>,

    /// Also write `a52conf.json`
    pub json: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let o = other.options;
        merge_opt(&mut self.options.arithmetic, o.arithmetic);
        merge_opt(&mut self.options.djbfft, o.djbfft);
        merge_opt(&mut self.options.debug, o.debug);
        merge_opt(&mut self.options.gprof, o.gprof);
        merge_opt(&mut self.options.audio, o.audio);
        merge_opt(&mut self.options.alignment_max, o.alignment_max);
        merge_opt(&mut self.options.disable_inline, o.disable_inline);
        merge_opt(&mut self.options.byte_order, o.byte_order);

        let p = other.package;
        merge_opt(&mut self.package.name, p.name);
        merge_opt(&mut self.package.version, p.version);
        merge_opt(&mut self.package.tarname, p.tarname);
        merge_opt(&mut self.package.bugreport, p.bugreport);
        merge_opt(&mut self.package.url, p.url);

        merge_opt(&mut self.output.dir, other.output.dir);
        merge_opt(&mut self.output.json, other.output.json);
    }

    /// Parse the arithmetic mode from its config string.
    pub fn arithmetic(&self) -> Result<Option<ArithmeticMode>> {
        self.options
            .arithmetic
            .as_deref()
            .map(|s| s.parse::<ArithmeticMode>().map_err(anyhow::Error::msg))
            .transpose()
    }

    /// Parse the byte order override from its config string.
    pub fn byte_order(&self) -> Result<Option<ByteOrder>> {
        self.options
            .byte_order
            .as_deref()
            .map(|s| s.parse::<ByteOrder>().map_err(anyhow::Error::msg))
            .transpose()
    }

    /// Parse the audio backend list.
    pub fn audio(&self) -> Result<Option<Vec<AudioBackend>>> {
        self.options
            .audio
            .as_ref()
            .map(|list| {
                list.iter()
                    .map(|s| s.parse::<AudioBackend>().map_err(anyhow::Error::from))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()
    }

    /// Apply the overrides to a probe snapshot.
    pub fn apply(&self, snapshot: &mut ProbeSnapshot) -> Result<()> {
        let options = &mut snapshot.options;

        if let Some(mode) = self.arithmetic().context("invalid `options.arithmetic`")? {
            options.fixed = mode.is_fixed();
            options.double = mode.is_double();
        }
        if let Some(djbfft) = self.options.djbfft {
            options.djbfft = djbfft;
        }
        if let Some(debug) = self.options.debug {
            options.debug = debug;
        }
        if let Some(gprof) = self.options.gprof {
            options.gprof = gprof;
        }
        if let Some(audio) = self.audio().context("invalid `options.audio`")? {
            options.audio = audio.into_iter().collect();
        }
        if let Some(alignment) = self.options.alignment_max {
            options.alignment_max = alignment;
        }
        if let Some(disable) = self.options.disable_inline {
            options.inline_disabled = disable;
        }
        if let Some(order) = self.byte_order().context("invalid `options.byte_order`")? {
            options.words_bigendian_override = Some(order);
        }

        let package = &mut snapshot.package;
        if let Some(ref name) = self.package.name {
            package.name = name.clone();
        }
        if let Some(ref version) = self.package.version {
            package.version = version.clone();
        }
        if let Some(ref tarname) = self.package.tarname {
            package.tarname = tarname.clone();
        }
        if let Some(ref bugreport) = self.package.bugreport {
            package.bugreport = bugreport.clone();
        }
        if let Some(ref url) = self.package.url {
            package.url = url.clone();
        }

        Ok(())
    }
}

fn merge_opt<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.a52conf/config.toml)
/// 2. Global config (~/.a52conf/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global a52conf config directory (~/.a52conf).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".a52conf"))
}

/// Get the global config path (~/.a52conf/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.a52conf/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".a52conf").join("config.toml")
}

/// Load the merged configuration for a project root.
pub fn load_project_config(project_root: &Path) -> Config {
    let project_path = project_config_path(project_root);
    match global_config_path() {
        Some(global) => load_config(&global, &project_path),
        None => load_config(&PathBuf::new(), &project_path),
    }
}
