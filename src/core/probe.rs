//! Capability probe - the facts handed to the registry.
//!
//! The registry never inspects the host itself. A [`Probe`] produces a
//! [`ProbeSnapshot`] and the registry resolves exactly that snapshot. Two
//! probes ship with the crate:
//! - [`SnapshotFile`] loads a snapshot written by an external prober
//! - [`TargetProbe`] derives one from a target triple using platform tables

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::catalog::{AudioBackend, CType, Function, Header, SignalReturn};
use super::endian::ByteOrder;
use super::target::TargetTriple;
use crate::util::diagnostic::SnapshotError;

/// Default `ATTRIBUTE_ALIGNED_MAX`.
pub const DEFAULT_ALIGNMENT_MAX: u32 = 64;

/// Default libtool object directory.
pub const DEFAULT_LIB_OBJDIR: &str = ".libs/";

/// Everything the registry needs, captured once per configure run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSnapshot {
    /// Headers that exist
    pub headers: BTreeSet<Header>,

    /// Functions that link
    pub functions: BTreeSet<Function>,

    /// `struct timeval` is available
    pub struct_timeval: bool,

    /// All C90 standard headers exist
    pub stdc_headers: bool,

    /// `<sys/time.h>` and `<time.h>` can be included together
    pub time_with_sys_time: bool,

    /// Byte order the probe detected for the target
    pub byte_order: ByteOrder,

    /// Building one artifact for several architectures
    pub universal_build: bool,

    pub signal_return: SignalReturn,

    /// `_FILE_OFFSET_BITS`, on hosts where it is settable
    pub file_offset_bits: Option<u32>,

    /// `_LARGE_FILES`, on AIX-style hosts
    pub large_files: bool,

    /// Where libtool stages uninstalled libraries
    pub lib_objdir: String,

    /// Compiler keyword support
    pub compiler: CompilerFacts,

    /// Probed type sizes
    pub type_sizes: TypeSizes,

    /// Package metadata, passed through untouched
    pub package: PackageInfo,

    /// User-selected build options
    pub options: BuildOptions,
}

impl Default for ProbeSnapshot {
    fn default() -> Self {
        ProbeSnapshot {
            headers: BTreeSet::new(),
            functions: BTreeSet::new(),
            struct_timeval: false,
            stdc_headers: false,
            time_with_sys_time: false,
            type_sizes: TypeSizes::default(),
            byte_order: ByteOrder::Little,
            universal_build: false,
            signal_return: SignalReturn::Void,
            file_offset_bits: None,
            large_files: false,
            compiler: CompilerFacts::default(),
            lib_objdir: DEFAULT_LIB_OBJDIR.to_string(),
            package: PackageInfo::default(),
            options: BuildOptions::default(),
        }
    }
}

impl ProbeSnapshot {
    /// Parse a snapshot from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse probe snapshot")
    }

    /// Serialize the snapshot as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize probe snapshot")
    }
}

/// Sizes of the C types, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSizes {
    pub char: Option<u32>,
    pub int: Option<u32>,
    pub long: Option<u32>,
    pub short: Option<u32>,
    pub voidp: Option<u32>,
}

impl TypeSizes {
    pub fn get(&self, ty: CType) -> Option<u32> {
        match ty {
            CType::Char => self.char,
            CType::Int => self.int,
            CType::Long => self.long,
            CType::Short => self.short,
            CType::VoidP => self.voidp,
        }
    }
}

/// What the C compiler supports natively.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerFacts {
    /// `inline` is already a keyword (C++ or C99 compilers)
    pub inline_native: bool,

    /// `__attribute__ ((__always_inline__))` is accepted
    pub always_inline: bool,

    /// Alternate spelling of `inline`, e.g. `__inline__`
    pub inline_spelling: Option<String>,

    /// Replacement for a nonconforming `const` (usually empty)
    pub const_replacement: Option<String>,

    /// Replacement for `restrict` (e.g. `__restrict`, or empty)
    pub restrict_replacement: Option<String>,

    /// Replacement for a missing `size_t` (e.g. `unsigned int`)
    pub size_t_replacement: Option<String>,
}

/// Package metadata. Opaque to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub tarname: String,
    pub bugreport: String,
    pub url: String,
}

impl Default for PackageInfo {
    fn default() -> Self {
        PackageInfo {
            name: "a52dec".to_string(),
            version: "0.8.0".to_string(),
            tarname: "a52dec".to_string(),
            bugreport: String::new(),
            url: String::new(),
        }
    }
}

impl PackageInfo {
    /// Name and version, e.g. `a52dec 0.8.0`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

/// Options chosen by whoever runs the configure step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Use fixed-point arithmetic
    pub fixed: bool,

    /// Use double-precision samples
    pub double: bool,

    /// Use the djbfft transform backend
    pub djbfft: bool,

    /// Enable debug code paths
    pub debug: bool,

    /// Profiling build
    pub gprof: bool,

    /// Audio output backends to compile in
    pub audio: BTreeSet<AudioBackend>,

    /// Maximum data alignment the build must support
    pub alignment_max: u32,

    /// Disable inlining project-wide
    pub inline_disabled: bool,

    /// Externally supplied byte order; wins over the probed one
    pub words_bigendian_override: Option<ByteOrder>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            fixed: false,
            double: false,
            djbfft: false,
            debug: false,
            gprof: false,
            audio: BTreeSet::new(),
            alignment_max: DEFAULT_ALIGNMENT_MAX,
            inline_disabled: false,
            words_bigendian_override: None,
        }
    }
}

/// Something that can produce a probe snapshot.
pub trait Probe {
    /// Short description for logs.
    fn describe(&self) -> String;

    /// Run the probe.
    fn probe(&self) -> Result<ProbeSnapshot>;
}

/// Probe that loads a snapshot file (`.toml` or `.json`).
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Probe for SnapshotFile {
    fn describe(&self) -> String {
        format!("snapshot file {}", self.path.display())
    }

    fn probe(&self) -> Result<ProbeSnapshot> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read snapshot: {}", self.path.display()))?;

        let is_json = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&contents).map_err(|e| e.to_string())
        } else {
            toml::from_str(&contents).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| {
            anyhow::Error::new(SnapshotError {
                path: self.path.display().to_string(),
                reason,
            })
        })
    }
}

/// Probe that answers from platform tables for a target triple.
///
/// No compiler is invoked. The tables cover the platforms the decoder is
/// known to build on; anything unusual should come from a snapshot file.
#[derive(Debug, Clone)]
pub struct TargetProbe {
    target: TargetTriple,
}

impl TargetProbe {
    pub fn new(target: TargetTriple) -> Self {
        TargetProbe { target }
    }

    /// Probe for the host.
    pub fn host() -> Self {
        TargetProbe::new(TargetTriple::host())
    }

    pub fn target(&self) -> &TargetTriple {
        &self.target
    }

    fn headers(&self) -> BTreeSet<Header> {
        let t = &self.target;
        let mut headers: BTreeSet<Header> = [
            Header::Inttypes,
            Header::Stdint,
            Header::Stdio,
            Header::Stdlib,
            Header::String,
            Header::SysStat,
            Header::SysTimeb,
            Header::SysTypes,
            Header::Time,
        ]
        .into_iter()
        .collect();

        if t.is_windows() {
            headers.insert(Header::Io);
            if !t.is_msvc() {
                // MinGW ships a POSIX layer
                headers.extend([Header::Strings, Header::SysTime, Header::Unistd]);
            }
        } else {
            headers.extend([Header::Dlfcn, Header::Strings, Header::SysTime, Header::Unistd]);
        }

        headers
    }

    fn functions(&self) -> BTreeSet<Function> {
        let t = &self.target;
        let mut functions = BTreeSet::new();
        functions.insert(Function::Ftime);

        if !t.is_msvc() {
            functions.insert(Function::Gettimeofday);
            functions.insert(Function::BuiltinExpect);
        }
        if matches!(t.os.as_str(), "linux" | "android") {
            functions.insert(Function::Memalign);
        }

        functions
    }

    fn compiler(&self) -> CompilerFacts {
        if self.target.is_msvc() {
            CompilerFacts {
                inline_native: false,
                always_inline: false,
                inline_spelling: Some("__inline".to_string()),
                const_replacement: None,
                restrict_replacement: Some("__restrict".to_string()),
                size_t_replacement: None,
            }
        } else {
            CompilerFacts {
                inline_native: false,
                always_inline: true,
                inline_spelling: Some("__inline__".to_string()),
                const_replacement: None,
                restrict_replacement: None,
                size_t_replacement: None,
            }
        }
    }

    fn type_sizes(&self) -> TypeSizes {
        let width = self.target.pointer_width();
        let long = if width == 64 && !self.target.is_windows() {
            8
        } else {
            4
        };

        TypeSizes {
            char: Some(1),
            int: Some(4),
            long: Some(long),
            short: Some(2),
            voidp: Some(width / 8),
        }
    }

    fn audio(&self) -> BTreeSet<AudioBackend> {
        let backend = match self.target.os.as_str() {
            "linux" | "android" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" => {
                Some(AudioBackend::Oss)
            }
            "solaris" | "illumos" => Some(AudioBackend::Solaris),
            "windows" => Some(AudioBackend::Win),
            "irix" => Some(AudioBackend::Al),
            _ => None,
        };
        backend.into_iter().collect()
    }
}

impl Probe for TargetProbe {
    fn describe(&self) -> String {
        format!("platform tables for {}", self.target)
    }

    fn probe(&self) -> Result<ProbeSnapshot> {
        let headers = self.headers();
        let unix_time = headers.contains(&Header::SysTime);

        let snapshot = ProbeSnapshot {
            time_with_sys_time: unix_time && headers.contains(&Header::Time),
            struct_timeval: unix_time,
            headers,
            functions: self.functions(),
            stdc_headers: true,
            type_sizes: self.type_sizes(),
            byte_order: if self.target.is_big_endian() {
                ByteOrder::Big
            } else {
                ByteOrder::Little
            },
            universal_build: false,
            signal_return: SignalReturn::Void,
            file_offset_bits: None,
            large_files: self.target.os == "aix",
            compiler: self.compiler(),
            lib_objdir: DEFAULT_LIB_OBJDIR.to_string(),
            package: PackageInfo::default(),
            options: BuildOptions {
                audio: self.audio(),
                ..BuildOptions::default()
            },
        };

        tracing::debug!(
            "probed {}: {} headers, {} functions, {} byte order",
            self.target,
            snapshot.headers.len(),
            snapshot.functions.len(),
            snapshot.byte_order
        );

        Ok(snapshot)
    }
}
