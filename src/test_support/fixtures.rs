//! Test fixtures for common test scenarios.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::catalog::{Function, Header};
use crate::core::probe::{CompilerFacts, ProbeSnapshot, TypeSizes};

/// The facts behind a52dec's shipped `config.h` on a GNU/Linux host.
pub fn a52dec_snapshot() -> ProbeSnapshot {
    let headers: BTreeSet<Header> = Header::ALL
        .into_iter()
        .filter(|h| *h != Header::Io)
        .collect();

    ProbeSnapshot {
        headers,
        functions: [Function::Ftime, Function::Gettimeofday].into_iter().collect(),
        struct_timeval: true,
        stdc_headers: true,
        time_with_sys_time: true,
        compiler: CompilerFacts {
            inline_native: false,
            always_inline: true,
            inline_spelling: Some("__inline__".to_string()),
            const_replacement: None,
            restrict_replacement: None,
            size_t_replacement: None,
        },
        type_sizes: TypeSizes {
            char: Some(1),
            int: Some(4),
            long: Some(8),
            short: Some(2),
            voidp: Some(8),
        },
        ..ProbeSnapshot::default()
    }
}

/// A snapshot with nothing detected.
pub fn minimal_snapshot() -> ProbeSnapshot {
    ProbeSnapshot::default()
}

/// Fixture for a project directory with optional config and snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProjectFixture {
    /// `.a52conf/config.toml` content.
    pub config: Option<String>,
    /// Snapshot written to `snapshot.toml`.
    pub snapshot: Option<ProbeSnapshot>,
}

impl ProjectFixture {
    pub fn new() -> Self {
        ProjectFixture::default()
    }

    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_snapshot(mut self, snapshot: ProbeSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Write the fixture under `root`. Returns the snapshot path, if any.
    pub fn write_to(&self, root: &Path) -> std::io::Result<Option<PathBuf>> {
        if let Some(config) = &self.config {
            let dir = root.join(".a52conf");
            std::fs::create_dir_all(&dir)?;
            std::fs::write(dir.join("config.toml"), config)?;
        }

        match &self.snapshot {
            Some(snapshot) => {
                let path = root.join("snapshot.toml");
                let contents = snapshot
                    .to_toml()
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                std::fs::write(&path, contents)?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}

/// Config file contents.
pub mod configs {
    /// Fixed-point build with the OSS backend.
    pub fn fixed_oss() -> &'static str {
        r#"[options]
arithmetic = "fixed"
audio = ["oss"]
"#
    }
}
