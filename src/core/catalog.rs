//! Catalog of the named facts the registry knows about.
//!
//! Every fact has three spellings:
//! - a key (`sys/time`, `builtin-expect`) used in snapshot files and on the CLI
//! - a macro name (`HAVE_SYS_TIME_H`) used in the generated C header
//! - a cfg name (`have_sys_time_h`) used for Rust consumers

use serde::{Deserialize, Serialize};

/// Convert a macro name into its cfg spelling.
pub fn cfg_name(macro_name: &str) -> String {
    macro_name.trim_start_matches('_').to_ascii_lowercase()
}

/// Error returned when parsing an unknown catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogParseError {
    /// What was being parsed ("header", "function", ...)
    pub what: &'static str,
    /// The rejected input
    pub input: String,
    /// Accepted keys
    pub valid: Vec<&'static str>,
}

impl std::fmt::Display for CatalogParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} '{}', valid values: {}",
            self.what,
            self.input,
            self.valid.join(", ")
        )
    }
}

impl std::error::Error for CatalogParseError {}

/// Platform headers whose availability is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Header {
    #[serde(rename = "dlfcn")]
    Dlfcn,
    #[serde(rename = "inttypes")]
    Inttypes,
    #[serde(rename = "io")]
    Io,
    #[serde(rename = "stdint")]
    Stdint,
    #[serde(rename = "stdio")]
    Stdio,
    #[serde(rename = "stdlib")]
    Stdlib,
    #[serde(rename = "strings")]
    Strings,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "sys/stat")]
    SysStat,
    #[serde(rename = "sys/timeb")]
    SysTimeb,
    #[serde(rename = "sys/time")]
    SysTime,
    #[serde(rename = "sys/types")]
    SysTypes,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "unistd")]
    Unistd,
}

impl Header {
    /// All headers, in header order.
    pub const ALL: [Header; 14] = [
        Header::Dlfcn,
        Header::Inttypes,
        Header::Io,
        Header::Stdint,
        Header::Stdio,
        Header::Stdlib,
        Header::Strings,
        Header::String,
        Header::SysStat,
        Header::SysTimeb,
        Header::SysTime,
        Header::SysTypes,
        Header::Time,
        Header::Unistd,
    ];

    /// Snapshot key, e.g. `sys/time`.
    pub fn key(&self) -> &'static str {
        match self {
            Header::Dlfcn => "dlfcn",
            Header::Inttypes => "inttypes",
            Header::Io => "io",
            Header::Stdint => "stdint",
            Header::Stdio => "stdio",
            Header::Stdlib => "stdlib",
            Header::Strings => "strings",
            Header::String => "string",
            Header::SysStat => "sys/stat",
            Header::SysTimeb => "sys/timeb",
            Header::SysTime => "sys/time",
            Header::SysTypes => "sys/types",
            Header::Time => "time",
            Header::Unistd => "unistd",
        }
    }

    /// File name as it appears in an `#include`.
    pub fn file_name(&self) -> String {
        format!("{}.h", self.key())
    }

    /// Macro name, e.g. `HAVE_SYS_TIME_H`.
    pub fn macro_name(&self) -> String {
        format!("HAVE_{}_H", self.key().replace('/', "_").to_ascii_uppercase())
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Header {
    type Err = CatalogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_end_matches(".h").to_ascii_lowercase();
        Header::ALL
            .into_iter()
            .find(|h| h.key() == key)
            .ok_or_else(|| CatalogParseError {
                what: "header",
                input: s.to_string(),
                valid: Header::ALL.iter().map(|h| h.key()).collect(),
            })
    }
}

/// Platform functions whose availability is probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Function {
    BuiltinExpect,
    Ftime,
    Gettimeofday,
    Memalign,
}

impl Function {
    /// All functions, in header order.
    pub const ALL: [Function; 4] = [
        Function::BuiltinExpect,
        Function::Ftime,
        Function::Gettimeofday,
        Function::Memalign,
    ];

    /// Snapshot key, e.g. `builtin-expect`.
    pub fn key(&self) -> &'static str {
        match self {
            Function::BuiltinExpect => "builtin-expect",
            Function::Ftime => "ftime",
            Function::Gettimeofday => "gettimeofday",
            Function::Memalign => "memalign",
        }
    }

    /// Symbol name as the compiler sees it.
    pub fn symbol(&self) -> &'static str {
        match self {
            Function::BuiltinExpect => "__builtin_expect",
            Function::Ftime => "ftime",
            Function::Gettimeofday => "gettimeofday",
            Function::Memalign => "memalign",
        }
    }

    /// Macro name, e.g. `HAVE_BUILTIN_EXPECT`.
    pub fn macro_name(&self) -> String {
        format!("HAVE_{}", self.key().replace('-', "_").to_ascii_uppercase())
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Function {
    type Err = CatalogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let key = key.trim_start_matches('-');
        Function::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| CatalogParseError {
                what: "function",
                input: s.to_string(),
                valid: Function::ALL.iter().map(|f| f.key()).collect(),
            })
    }
}

/// Audio output backends the player can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// SGI audio library
    Al,
    /// Open Sound System
    Oss,
    /// Solaris /dev/audio
    Solaris,
    /// Windows waveOut
    Win,
}

impl AudioBackend {
    pub const ALL: [AudioBackend; 4] = [
        AudioBackend::Al,
        AudioBackend::Oss,
        AudioBackend::Solaris,
        AudioBackend::Win,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AudioBackend::Al => "al",
            AudioBackend::Oss => "oss",
            AudioBackend::Solaris => "solaris",
            AudioBackend::Win => "win",
        }
    }

    /// Macro name, e.g. `LIBAO_OSS`.
    pub fn macro_name(&self) -> String {
        format!("LIBAO_{}", self.key().to_ascii_uppercase())
    }

    /// Human-readable description used in the header comment.
    pub fn description(&self) -> &'static str {
        match self {
            AudioBackend::Al => "libao al support",
            AudioBackend::Oss => "libao OSS support",
            AudioBackend::Solaris => "libao solaris support",
            AudioBackend::Win => "libao win support",
        }
    }
}

impl std::fmt::Display for AudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for AudioBackend {
    type Err = CatalogParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        AudioBackend::ALL
            .into_iter()
            .find(|b| b.key() == key)
            .ok_or_else(|| CatalogParseError {
                what: "audio backend",
                input: s.to_string(),
                valid: AudioBackend::ALL.iter().map(|b| b.key()).collect(),
            })
    }
}

/// C types whose sizes may be probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CType {
    Char,
    Int,
    Long,
    Short,
    #[serde(rename = "void*")]
    VoidP,
}

impl CType {
    pub const ALL: [CType; 5] = [CType::Char, CType::Int, CType::Long, CType::Short, CType::VoidP];

    pub fn key(&self) -> &'static str {
        match self {
            CType::Char => "char",
            CType::Int => "int",
            CType::Long => "long",
            CType::Short => "short",
            CType::VoidP => "void*",
        }
    }

    /// Macro name, e.g. `SIZEOF_VOIDP`.
    pub fn macro_name(&self) -> String {
        match self {
            CType::VoidP => "SIZEOF_VOIDP".to_string(),
            other => format!("SIZEOF_{}", other.key().to_ascii_uppercase()),
        }
    }
}

impl std::fmt::Display for CType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Return type signal handlers must be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalReturn {
    #[default]
    Void,
    Int,
}

impl SignalReturn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalReturn::Void => "void",
            SignalReturn::Int => "int",
        }
    }
}

impl std::fmt::Display for SignalReturn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
