//! Cargo build-script directives.
//!
//! Lets a `build.rs` forward the registry to Rust code: presence flags that
//! are on become `--cfg`s, valued flags become `A52CONF_*` environment
//! variables readable with `env!`. Every cfg the registry knows about is
//! declared with `rustc-check-cfg`, whether it is set or not.

use std::fmt::Write;

use crate::core::flag::{escape_control, FlagEntry, FlagKind, FlagState, FlagValue};
use crate::core::Registry;

/// Prefix of the environment variables carrying valued flags.
pub const ENV_PREFIX: &str = "A52CONF_";

/// Names of every cfg the registry can set, in registry order.
pub fn check_cfg_names(registry: &Registry) -> Vec<String> {
    registry
        .entries()
        .iter()
        .filter(|e| is_cfg_flag(e))
        .map(|e| e.cfg_name())
        .collect()
}

/// Names of the cfgs that are set.
pub fn active_cfgs(registry: &Registry) -> Vec<String> {
    registry
        .entries()
        .iter()
        .filter(|e| is_cfg_flag(e) && e.is_present())
        .map(|e| e.cfg_name())
        .collect()
}

/// Environment variable name for a valued flag.
pub fn env_name(macro_name: &str) -> String {
    format!(
        "{}{}",
        ENV_PREFIX,
        macro_name.trim_start_matches('_').to_ascii_uppercase()
    )
}

/// Render the directives, one per line.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();

    for name in check_cfg_names(registry) {
        writeln!(out, "cargo:rustc-check-cfg=cfg({})", name).unwrap();
    }

    for name in active_cfgs(registry) {
        writeln!(out, "cargo:rustc-cfg={}", name).unwrap();
    }

    for entry in registry.entries() {
        if entry.kind != FlagKind::Valued {
            continue;
        }
        if let Some(value) = entry.state.value() {
            writeln!(
                out,
                "cargo:rustc-env={}={}",
                env_name(&entry.name),
                env_value(value)
            )
            .unwrap();
        }
    }

    out
}

// Presence flags, plus derived flags that resolve to a boolean or are
// deferred to the compiler.
fn is_cfg_flag(entry: &FlagEntry) -> bool {
    match entry.kind {
        FlagKind::Presence => true,
        FlagKind::Derived => matches!(entry.state, FlagState::Presence(_) | FlagState::Deferred),
        FlagKind::Valued => false,
    }
}

// One directive per line; a line break would start a directive of its own.
fn env_value(value: &FlagValue) -> String {
    match value {
        FlagValue::Int(n) => n.to_string(),
        FlagValue::Str(s) | FlagValue::Token(s) => escape_control(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::endian::ByteOrder;
    use crate::core::AudioBackend;
    use crate::test_support::{a52dec_snapshot, minimal_snapshot};

    #[test]
    fn test_check_cfg_covers_all_presence_flags() {
        let registry = Registry::resolve(&minimal_snapshot()).unwrap();
        let names = check_cfg_names(&registry);

        assert!(names.contains(&"liba52_fixed".to_string()));
        assert!(names.contains(&"liba52_double".to_string()));
        assert!(names.contains(&"words_bigendian".to_string()));
        assert!(names.contains(&"large_files".to_string()));
        assert!(!names.contains(&"package_name".to_string()));
        assert!(!names.contains(&"inline".to_string()));
    }

    #[test]
    fn test_active_cfgs() {
        let mut snapshot = a52dec_snapshot();
        snapshot.options.fixed = true;
        snapshot.options.audio.insert(AudioBackend::Oss);

        let registry = Registry::resolve(&snapshot).unwrap();
        let cfgs = active_cfgs(&registry);

        assert!(cfgs.contains(&"liba52_fixed".to_string()));
        assert!(cfgs.contains(&"libao_oss".to_string()));
        assert!(cfgs.contains(&"have_dlfcn_h".to_string()));
        assert!(!cfgs.contains(&"liba52_double".to_string()));
        assert!(!cfgs.contains(&"words_bigendian".to_string()));
    }

    #[test]
    fn test_big_endian_cfg() {
        let mut snapshot = minimal_snapshot();
        snapshot.byte_order = ByteOrder::Big;

        let registry = Registry::resolve(&snapshot).unwrap();
        assert!(render(&registry).contains("cargo:rustc-cfg=words_bigendian\n"));
    }

    #[test]
    fn test_universal_build_leaves_endianness_to_target() {
        let mut snapshot = minimal_snapshot();
        snapshot.universal_build = true;
        snapshot.byte_order = ByteOrder::Big;

        let registry = Registry::resolve(&snapshot).unwrap();
        let out = render(&registry);
        assert!(out.contains("cargo:rustc-check-cfg=cfg(words_bigendian)\n"));
        assert!(!out.contains("cargo:rustc-cfg=words_bigendian\n"));
        assert!(out.contains("cargo:rustc-cfg=ac_apple_universal_build\n"));
    }

    #[test]
    fn test_env_values() {
        let registry = Registry::resolve(&a52dec_snapshot()).unwrap();
        let out = render(&registry);

        assert!(out.contains("cargo:rustc-env=A52CONF_ATTRIBUTE_ALIGNED_MAX=64\n"));
        assert!(out.contains("cargo:rustc-env=A52CONF_PACKAGE_STRING=a52dec 0.8.0\n"));
        assert!(out.contains("cargo:rustc-env=A52CONF_SIZEOF_INT=4\n"));
        assert!(!out.contains("A52CONF_FILE_OFFSET_BITS"));
    }

    #[test]
    fn test_env_value_stays_on_one_line() {
        let mut snapshot = a52dec_snapshot();
        snapshot.package.bugreport = "a\ncargo:rustc-cfg=liba52_fixed".to_string();

        let registry = Registry::resolve(&snapshot).unwrap();
        let out = render(&registry);

        assert!(out.contains(
            "cargo:rustc-env=A52CONF_PACKAGE_BUGREPORT=a\\ncargo:rustc-cfg=liba52_fixed\n"
        ));
        assert!(!out.lines().any(|l| l == "cargo:rustc-cfg=liba52_fixed"));
        assert!(out.lines().all(|l| l.starts_with("cargo:")));
    }

    #[test]
    fn test_env_name() {
        assert_eq!(env_name("_FILE_OFFSET_BITS"), "A52CONF_FILE_OFFSET_BITS");
        assert_eq!(env_name("LT_OBJDIR"), "A52CONF_LT_OBJDIR");
    }
}
