//! The capability registry.
//!
//! A [`Registry`] is resolved once from a [`ProbeSnapshot`] and is immutable
//! afterwards. It is the explicit build descriptor every consumer reads:
//! emitters turn it into a C header, JSON or Cargo cfgs, and Rust code can
//! query it directly.
//!
//! Entries are kept sorted by macro name (byte order), which is also the
//! order of the persisted header. Resolving the same snapshot twice yields
//! identical entries and an identical fingerprint.

use serde::Serialize;

use super::arith::{self, ArithmeticMode};
use super::catalog::{AudioBackend, CType, Function, Header};
use super::endian::{self, WordsBigEndian};
use super::errors::RegistryError;
use super::flag::{is_single_line_token, FlagEntry, FlagState, FlagValue};
use super::probe::{PackageInfo, ProbeSnapshot};
use super::shim::{InlineHint, KeywordShim};
use crate::util::hash::Fingerprint;

/// Immutable set of resolved capability flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registry {
    entries: Vec<FlagEntry>,
    #[serde(skip)]
    snapshot: ProbeSnapshot,
    arithmetic: ArithmeticMode,
    words_bigendian: WordsBigEndian,
    inline_hint: InlineHint,
    const_shim: KeywordShim,
    restrict_shim: KeywordShim,
    size_t_shim: KeywordShim,
}

impl Registry {
    /// Resolve a probe snapshot.
    ///
    /// Fails when a mutual-exclusion group has more than one member selected,
    /// or when a replacement token would not fit on one line.
    pub fn resolve(snapshot: &ProbeSnapshot) -> Result<Self, RegistryError> {
        let options = &snapshot.options;
        let compiler = &snapshot.compiler;

        let arithmetic = ArithmeticMode::from_flags(options.fixed, options.double)?;

        let words_bigendian = WordsBigEndian::resolve(
            snapshot.universal_build,
            options.words_bigendian_override,
            snapshot.byte_order,
        );

        let inline_hint = InlineHint::resolve(
            compiler.inline_native,
            options.inline_disabled,
            compiler.always_inline,
            compiler.inline_spelling.as_deref(),
        );

        let const_shim = KeywordShim::from_replacement(compiler.const_replacement.as_deref());
        let restrict_shim =
            KeywordShim::from_replacement(compiler.restrict_replacement.as_deref());
        let size_t_shim = KeywordShim::from_replacement(compiler.size_t_replacement.as_deref());

        check_token("inline", inline_hint.token())?;
        check_token("const", const_shim.token())?;
        check_token("restrict", restrict_shim.token())?;
        check_token("size_t", size_t_shim.token())?;

        let mut entries = Vec::new();

        entries.push(FlagEntry::presence(
            "A52DEC_GPROF",
            options.gprof,
            "a52dec profiling",
        ));
        entries.push(FlagEntry::presence(
            endian::UNIVERSAL_MACRO,
            snapshot.universal_build,
            "Define if building universal (internal helper macro)",
        ));
        entries.push(FlagEntry::valued(
            "ATTRIBUTE_ALIGNED_MAX",
            Some(FlagValue::Int(u64::from(options.alignment_max))),
            "maximum supported data alignment",
        ));
        entries.push(FlagEntry::presence(
            "DEBUG",
            options.debug,
            "debug mode configuration",
        ));

        for header in Header::ALL {
            entries.push(FlagEntry::presence(
                header.macro_name(),
                snapshot.headers.contains(&header),
                format!(
                    "Define to 1 if you have the <{}> header file.",
                    header.file_name()
                ),
            ));
        }

        for function in Function::ALL {
            entries.push(FlagEntry::presence(
                function.macro_name(),
                snapshot.functions.contains(&function),
                format!("Define if you have the `{}' function.", function.symbol()),
            ));
        }

        entries.push(FlagEntry::presence(
            "HAVE_STRUCT_TIMEVAL",
            snapshot.struct_timeval,
            "Define to 1 if the system has the type `struct timeval'.",
        ));

        entries.push(FlagEntry::presence(
            "LIBA52_DJBFFT",
            options.djbfft,
            "liba52 djbfft support",
        ));
        entries.push(FlagEntry::presence(
            arith::DOUBLE_MACRO,
            arithmetic.is_double(),
            "a52 sample precision",
        ));
        entries.push(FlagEntry::presence(
            arith::FIXED_MACRO,
            arithmetic.is_fixed(),
            "use fixed-point arithmetic",
        ));

        for backend in AudioBackend::ALL {
            entries.push(FlagEntry::presence(
                backend.macro_name(),
                options.audio.contains(&backend),
                backend.description(),
            ));
        }

        entries.push(FlagEntry::valued(
            "LT_OBJDIR",
            Some(FlagValue::Str(snapshot.lib_objdir.clone())),
            "Define to the sub-directory where libtool stores uninstalled libraries.",
        ));

        entries.extend(package_entries(&snapshot.package));

        entries.push(FlagEntry::valued(
            "RETSIGTYPE",
            Some(FlagValue::Token(snapshot.signal_return.as_str().to_string())),
            "Define as the return type of signal handlers (`int' or `void').",
        ));

        for ty in CType::ALL {
            entries.push(FlagEntry::valued(
                ty.macro_name(),
                snapshot.type_sizes.get(ty).map(|n| FlagValue::Int(u64::from(n))),
                format!("The size of `{}', as computed by sizeof.", ty.key()),
            ));
        }

        entries.push(FlagEntry::presence(
            "STDC_HEADERS",
            snapshot.stdc_headers,
            "Define to 1 if all of the C90 standard headers exist.",
        ));
        entries.push(FlagEntry::presence(
            "TIME_WITH_SYS_TIME",
            snapshot.time_with_sys_time,
            "Define to 1 if you can safely include both <sys/time.h> and <time.h>.",
        ));

        let words_state = match words_bigendian.fixed() {
            Some(order) => FlagState::Presence(order.is_big()),
            None => FlagState::Deferred,
        };
        entries.push(FlagEntry::derived(
            endian::MACRO,
            words_state,
            "Define WORDS_BIGENDIAN to 1 if your processor stores words with the most significant byte first.",
        ));

        entries.push(FlagEntry::valued(
            "_FILE_OFFSET_BITS",
            snapshot.file_offset_bits.map(|n| FlagValue::Int(u64::from(n))),
            "Number of bits in a file offset, on hosts where this is settable.",
        ));
        entries.push(FlagEntry::presence(
            "_LARGE_FILES",
            snapshot.large_files,
            "Define for large files, on AIX-style hosts.",
        ));

        entries.push(shim_entry(
            "const",
            &const_shim,
            "Define to empty if `const' does not conform to ANSI C.",
        ));
        entries.push(FlagEntry::derived(
            "inline",
            FlagState::Value(inline_hint.token().map(|t| FlagValue::Token(t.to_string()))),
            "Define to `__inline__' or `__inline' if that's what the C compiler calls it, or to nothing if 'inline' is not supported under any name.",
        ));
        entries.push(shim_entry(
            "restrict",
            &restrict_shim,
            "Define as `__restrict' if that's what the C compiler calls it, or to nothing if it is not supported.",
        ));
        entries.push(shim_entry(
            "size_t",
            &size_t_shim,
            "Define to `unsigned int' if <sys/types.h> does not define.",
        ));

        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

        tracing::debug!(
            "resolved {} flags ({} present), arithmetic = {}, words_bigendian = {:?}",
            entries.len(),
            entries.iter().filter(|e| e.is_present()).count(),
            arithmetic,
            words_bigendian
        );

        Ok(Registry {
            entries,
            snapshot: snapshot.clone(),
            arithmetic,
            words_bigendian,
            inline_hint,
            const_shim,
            restrict_shim,
            size_t_shim,
        })
    }

    /// All entries, in persisted order.
    pub fn entries(&self) -> &[FlagEntry] {
        &self.entries
    }

    /// Look up an entry by macro name or cfg name.
    pub fn get(&self, name: &str) -> Option<&FlagEntry> {
        self.entries.iter().find(|e| e.matches(name))
    }

    /// Whether a flag is statically present. Unknown names are absent.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.is_present())
    }

    /// Value of a valued or derived flag.
    pub fn value(&self, name: &str) -> Option<&FlagValue> {
        self.get(name).and_then(|e| e.state.value())
    }

    pub fn has_header(&self, header: Header) -> bool {
        self.snapshot.headers.contains(&header)
    }

    pub fn has_function(&self, function: Function) -> bool {
        self.snapshot.functions.contains(&function)
    }

    pub fn has_audio_backend(&self, backend: AudioBackend) -> bool {
        self.snapshot.options.audio.contains(&backend)
    }

    /// Enabled audio backends, in catalog order.
    pub fn audio_backends(&self) -> Vec<AudioBackend> {
        self.snapshot.options.audio.iter().copied().collect()
    }

    pub fn arithmetic_mode(&self) -> ArithmeticMode {
        self.arithmetic
    }

    pub fn words_bigendian(&self) -> WordsBigEndian {
        self.words_bigendian
    }

    pub fn inline_hint(&self) -> &InlineHint {
        &self.inline_hint
    }

    pub fn const_shim(&self) -> &KeywordShim {
        &self.const_shim
    }

    pub fn restrict_shim(&self) -> &KeywordShim {
        &self.restrict_shim
    }

    pub fn size_t_shim(&self) -> &KeywordShim {
        &self.size_t_shim
    }

    pub fn alignment_max(&self) -> u32 {
        self.snapshot.options.alignment_max
    }

    pub fn debug(&self) -> bool {
        self.snapshot.options.debug
    }

    pub fn djbfft(&self) -> bool {
        self.snapshot.options.djbfft
    }

    pub fn universal_build(&self) -> bool {
        self.snapshot.universal_build
    }

    pub fn type_size(&self, ty: CType) -> Option<u32> {
        self.snapshot.type_sizes.get(ty)
    }

    pub fn package(&self) -> &PackageInfo {
        &self.snapshot.package
    }

    pub fn lib_objdir(&self) -> &str {
        &self.snapshot.lib_objdir
    }

    /// The snapshot this registry was resolved from.
    pub fn snapshot(&self) -> &ProbeSnapshot {
        &self.snapshot
    }

    /// SHA-256 over the ordered entries.
    ///
    /// Two registries with the same fingerprint expose the same flag set, so
    /// a consumer compiled against one can be paired with the other.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        for entry in &self.entries {
            fp.update_str(&entry.name);
            fp.update_str(&state_key(&entry.state));
        }
        fp.finish()
    }
}

fn package_entries(package: &PackageInfo) -> Vec<FlagEntry> {
    let string = |name: &str, value: &str, description: &str| {
        FlagEntry::valued(name, Some(FlagValue::Str(value.to_string())), description)
    };

    vec![
        string("PACKAGE", &package.tarname, "Name of package"),
        string(
            "PACKAGE_BUGREPORT",
            &package.bugreport,
            "Define to the address where bug reports for this package should be sent.",
        ),
        string(
            "PACKAGE_NAME",
            &package.name,
            "Define to the full name of this package.",
        ),
        string(
            "PACKAGE_STRING",
            &package.full_name(),
            "Define to the full name and version of this package.",
        ),
        string(
            "PACKAGE_TARNAME",
            &package.tarname,
            "Define to the one symbol short name of this package.",
        ),
        string(
            "PACKAGE_URL",
            &package.url,
            "Define to the home page for this package.",
        ),
        string(
            "PACKAGE_VERSION",
            &package.version,
            "Define to the version of this package.",
        ),
        string("VERSION", &package.version, "Version number of package"),
    ]
}

fn shim_entry(name: &str, shim: &KeywordShim, description: &str) -> FlagEntry {
    FlagEntry::derived(
        name,
        FlagState::Value(shim.token().map(|t| FlagValue::Token(t.to_string()))),
        description,
    )
}

fn check_token(name: &str, token: Option<&str>) -> Result<(), RegistryError> {
    match token {
        Some(value) if !is_single_line_token(value) => Err(RegistryError::InvalidToken {
            name: name.to_string(),
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

fn state_key(state: &FlagState) -> String {
    match state {
        FlagState::Presence(true) => "on".to_string(),
        FlagState::Presence(false) => "off".to_string(),
        FlagState::Value(Some(value)) => format!("value:{}", value.to_c()),
        FlagState::Value(None) => "none".to_string(),
        FlagState::Deferred => "deferred".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::endian::ByteOrder;
    use crate::core::flag::FlagKind;
    use crate::test_support::{a52dec_snapshot, minimal_snapshot};

    #[test]
    fn test_example_scenario() {
        let mut snapshot = ProbeSnapshot::default();
        snapshot.headers.insert(Header::Dlfcn);
        snapshot.headers.insert(Header::Stdint);

        let registry = Registry::resolve(&snapshot).unwrap();

        assert!(registry.is_present("HAVE_DLFCN_H"));
        assert!(registry.is_present("HAVE_STDINT_H"));
        assert!(registry.has_header(Header::Dlfcn));
        assert!(!registry.is_present("HAVE_IO_H"));
        assert_eq!(registry.arithmetic_mode(), ArithmeticMode::Single);
        assert!(!registry.is_present("LIBA52_FIXED"));
        assert!(!registry.is_present("LIBA52_DOUBLE"));
        assert!(!registry.is_present("WORDS_BIGENDIAN"));
        assert_eq!(
            registry.words_bigendian(),
            WordsBigEndian::Detected(ByteOrder::Little)
        );
    }

    #[test]
    fn test_entries_sorted_like_header() {
        let registry = Registry::resolve(&a52dec_snapshot()).unwrap();
        let names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names.first(), Some(&"A52DEC_GPROF"));
        assert_eq!(names.last(), Some(&"size_t"));

        let strings = names.iter().position(|n| *n == "HAVE_STRINGS_H").unwrap();
        let string = names.iter().position(|n| *n == "HAVE_STRING_H").unwrap();
        assert!(strings < string);

        let words = names.iter().position(|n| *n == "WORDS_BIGENDIAN").unwrap();
        let offset = names.iter().position(|n| *n == "_FILE_OFFSET_BITS").unwrap();
        assert!(words < offset);
    }

    #[test]
    fn test_names_are_unique() {
        let registry = Registry::resolve(&a52dec_snapshot()).unwrap();
        let mut names: Vec<&str> = registry.entries().iter().map(|e| e.name.as_str()).collect();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_presence_flags_are_booleans() {
        let registry = Registry::resolve(&a52dec_snapshot()).unwrap();
        for entry in registry.entries() {
            if entry.kind == FlagKind::Presence {
                assert!(
                    matches!(entry.state, FlagState::Presence(_)),
                    "{} is not a boolean",
                    entry.name
                );
            }
        }
    }

    #[test]
    fn test_both_arithmetic_modes_rejected() {
        let mut snapshot = minimal_snapshot();
        snapshot.options.fixed = true;
        snapshot.options.double = true;

        let err = Registry::resolve(&snapshot).unwrap_err();
        assert!(matches!(err, RegistryError::MutuallyExclusive { .. }));
    }

    #[test]
    fn test_fixed_mode() {
        let mut snapshot = minimal_snapshot();
        snapshot.options.fixed = true;

        let registry = Registry::resolve(&snapshot).unwrap();
        assert_eq!(registry.arithmetic_mode(), ArithmeticMode::Fixed);
        assert!(registry.is_present("LIBA52_FIXED"));
        assert!(registry.is_present("liba52_fixed"));
        assert!(!registry.is_present("LIBA52_DOUBLE"));
    }

    #[test]
    fn test_override_suppresses_default() {
        let mut snapshot = minimal_snapshot();
        snapshot.byte_order = ByteOrder::Little;
        snapshot.options.words_bigendian_override = Some(ByteOrder::Big);

        let registry = Registry::resolve(&snapshot).unwrap();
        assert!(registry.is_present("WORDS_BIGENDIAN"));
        assert_eq!(
            registry.words_bigendian(),
            WordsBigEndian::Overridden(ByteOrder::Big)
        );
    }

    #[test]
    fn test_detected_default_applies() {
        let mut snapshot = minimal_snapshot();
        snapshot.byte_order = ByteOrder::Big;

        let registry = Registry::resolve(&snapshot).unwrap();
        assert!(registry.is_present("WORDS_BIGENDIAN"));
        assert_eq!(
            registry.get("WORDS_BIGENDIAN").unwrap().state,
            FlagState::Presence(true)
        );
    }

    #[test]
    fn test_universal_build_defers_endianness() {
        let mut snapshot = minimal_snapshot();
        snapshot.universal_build = true;
        snapshot.byte_order = ByteOrder::Big;

        let registry = Registry::resolve(&snapshot).unwrap();
        assert!(registry.universal_build());
        assert!(registry.is_present("AC_APPLE_UNIVERSAL_BUILD"));
        assert!(!registry.is_present("WORDS_BIGENDIAN"));
        assert_eq!(
            registry.get("WORDS_BIGENDIAN").unwrap().state,
            FlagState::Deferred
        );
    }

    #[test]
    fn test_inline_alias_suppressed() {
        let mut snapshot = a52dec_snapshot();
        snapshot.options.inline_disabled = true;

        let registry = Registry::resolve(&snapshot).unwrap();
        assert_eq!(registry.inline_hint(), &InlineHint::Suppressed);
        assert_eq!(
            registry.value("inline"),
            Some(&FlagValue::Token(String::new()))
        );
    }

    #[test]
    fn test_package_metadata_passthrough() {
        let registry = Registry::resolve(&a52dec_snapshot()).unwrap();
        assert_eq!(
            registry.value("PACKAGE_STRING"),
            Some(&FlagValue::Str("a52dec 0.8.0".into()))
        );
        assert_eq!(
            registry.value("VERSION"),
            Some(&FlagValue::Str("0.8.0".into()))
        );
        assert_eq!(
            registry.value("ATTRIBUTE_ALIGNED_MAX").and_then(|v| v.as_int()),
            Some(64)
        );
        assert_eq!(registry.lib_objdir(), ".libs/");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let snapshot = a52dec_snapshot();
        let a = Registry::resolve(&snapshot).unwrap();
        let b = Registry::resolve(&snapshot).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_flags() {
        let a = Registry::resolve(&a52dec_snapshot()).unwrap();

        let mut changed = a52dec_snapshot();
        changed.options.djbfft = true;
        let b = Registry::resolve(&changed).unwrap();

        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_function_and_backend_accessors() {
        let mut snapshot = a52dec_snapshot();
        snapshot.options.audio.insert(AudioBackend::Oss);

        let registry = Registry::resolve(&snapshot).unwrap();
        assert!(registry.has_function(Function::Gettimeofday));
        assert!(!registry.has_function(Function::Memalign));
        assert!(registry.has_audio_backend(AudioBackend::Oss));
        assert!(!registry.has_audio_backend(AudioBackend::Win));
        assert!(!registry.universal_build());
    }

    #[test]
    fn test_multi_line_replacement_rejected() {
        let mut snapshot = minimal_snapshot();
        snapshot.compiler.restrict_replacement = Some("__restrict\n#define DEBUG 1".to_string());

        let err = Registry::resolve(&snapshot).unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidToken {
                name: "restrict".into(),
                value: "__restrict\n#define DEBUG 1".into(),
            }
        );
    }

    #[test]
    fn test_multi_line_inline_spelling_rejected() {
        let mut snapshot = minimal_snapshot();
        snapshot.compiler.inline_spelling = Some("__inline\r\n#define LIBA52_FIXED 1".to_string());

        let err = Registry::resolve(&snapshot).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidToken { ref name, .. } if name == "inline"));
    }

    #[test]
    fn test_unknown_flag_is_absent() {
        let registry = Registry::resolve(&minimal_snapshot()).unwrap();
        assert!(registry.get("HAVE_WINDOWS_H").is_none());
        assert!(!registry.is_present("HAVE_WINDOWS_H"));
        assert!(registry.value("HAVE_WINDOWS_H").is_none());
    }
}
