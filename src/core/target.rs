//! Target triples.

/// Target triple components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTriple {
    /// CPU architecture (x86_64, aarch64, powerpc, etc.)
    pub arch: String,
    /// Vendor (unknown, apple, pc, etc.)
    pub vendor: String,
    /// Operating system (linux, darwin, windows, etc.)
    pub os: String,
    /// Environment/ABI (gnu, musl, msvc, etc.)
    pub env: Option<String>,
}

/// Architectures that store the most significant byte first.
const BIG_ENDIAN_ARCHES: &[&str] = &[
    "aarch64_be",
    "armeb",
    "m68k",
    "mips",
    "mips64",
    "powerpc",
    "powerpc64",
    "s390x",
    "sparc",
    "sparc64",
    "sparcv9",
];

impl TargetTriple {
    /// Create a new target triple.
    pub fn new(arch: &str, vendor: &str, os: &str, env: Option<&str>) -> Self {
        TargetTriple {
            arch: arch.to_string(),
            vendor: vendor.to_string(),
            os: os.to_string(),
            env: env.map(|s| s.to_string()),
        }
    }

    /// Detect the host target triple.
    pub fn host() -> Self {
        let arch = std::env::consts::ARCH;
        let os = std::env::consts::OS;

        let (vendor, env) = match os {
            "linux" => ("unknown", Some("gnu")),
            "macos" => ("apple", None),
            "windows" => ("pc", Some("msvc")),
            _ => ("unknown", None),
        };

        TargetTriple::new(arch, vendor, os, env)
    }

    /// Parse a target triple string.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        Some(TargetTriple {
            arch: parts[0].to_string(),
            vendor: parts[1].to_string(),
            os: parts[2].to_string(),
            env: parts.get(3).map(|s| s.to_string()),
        })
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    pub fn is_msvc(&self) -> bool {
        self.env.as_deref() == Some("msvc")
    }

    pub fn is_apple(&self) -> bool {
        self.vendor == "apple" || matches!(self.os.as_str(), "macos" | "darwin" | "ios")
    }

    pub fn is_big_endian(&self) -> bool {
        BIG_ENDIAN_ARCHES.contains(&self.arch.as_str())
    }

    pub fn pointer_width(&self) -> u32 {
        let arch = self.arch.as_str();
        if arch.contains("64") || arch == "s390x" || arch == "sparcv9" {
            64
        } else {
            32
        }
    }
}

impl std::fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.env {
            Some(env) => write!(f, "{}-{}-{}-{}", self.arch, self.vendor, self.os, env),
            None => write!(f, "{}-{}-{}", self.arch, self.vendor, self.os),
        }
    }
}
