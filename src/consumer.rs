//! Consumer side of the registry for Rust code.
//!
//! A `build.rs` forwards a resolved registry as cfgs (see
//! [`emit::cargo`](crate::emit::cargo)); this module turns those cfgs into
//! constants. Backends are meant to be selected per module:
//!
//! ```rust,ignore
//! #[cfg(libao_oss)]
//! mod oss;
//! ```
//!
//! Selecting both arithmetic modes is rejected at compile time.

use crate::core::{ArithmeticMode, AudioBackend};

#[cfg(all(liba52_fixed, liba52_double))]
compile_error!("LIBA52_FIXED and LIBA52_DOUBLE are mutually exclusive");

/// Cfgs this module reads.
pub const CFG_NAMES: &[&str] = &[
    "liba52_fixed",
    "liba52_double",
    "liba52_djbfft",
    "libao_al",
    "libao_oss",
    "libao_solaris",
    "libao_win",
    "words_bigendian",
    "ac_apple_universal_build",
];

/// Fold the two arithmetic flags into a mode.
///
/// Panics when both are set, which fails const evaluation.
pub const fn select_arithmetic(fixed: bool, double: bool) -> ArithmeticMode {
    match (fixed, double) {
        (true, true) => panic!("LIBA52_FIXED and LIBA52_DOUBLE are mutually exclusive"),
        (true, false) => ArithmeticMode::Fixed,
        (false, true) => ArithmeticMode::Double,
        (false, false) => ArithmeticMode::Single,
    }
}

pub const ARITHMETIC_MODE: ArithmeticMode =
    select_arithmetic(cfg!(liba52_fixed), cfg!(liba52_double));

pub const DJBFFT: bool = cfg!(liba52_djbfft);

/// Enabled audio backends, in catalog order.
pub const AUDIO_BACKENDS: &[AudioBackend] = &[
    #[cfg(libao_al)]
    AudioBackend::Al,
    #[cfg(libao_oss)]
    AudioBackend::Oss,
    #[cfg(libao_solaris)]
    AudioBackend::Solaris,
    #[cfg(libao_win)]
    AudioBackend::Win,
];

/// Whether words are stored most significant byte first.
///
/// Universal builds compile once per architecture, so the answer comes from
/// the target rather than the registry.
pub const WORDS_BIGENDIAN: bool = if cfg!(ac_apple_universal_build) {
    cfg!(target_endian = "big")
} else {
    cfg!(words_bigendian)
};

pub const fn audio_backend_enabled(backend: AudioBackend) -> bool {
    let mut i = 0;
    while i < AUDIO_BACKENDS.len() {
        if AUDIO_BACKENDS[i] as u8 == backend as u8 {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_arithmetic() {
        assert_eq!(select_arithmetic(false, false), ArithmeticMode::Single);
        assert_eq!(select_arithmetic(true, false), ArithmeticMode::Fixed);
        assert_eq!(select_arithmetic(false, true), ArithmeticMode::Double);
    }

    #[test]
    #[should_panic(expected = "mutually exclusive")]
    fn test_select_arithmetic_rejects_both() {
        let fixed = std::hint::black_box(true);
        let double = std::hint::black_box(true);
        select_arithmetic(fixed, double);
    }

    #[test]
    fn test_const_evaluation() {
        const MODE: ArithmeticMode = select_arithmetic(true, false);
        assert!(MODE.is_fixed());
    }

    #[test]
    fn test_defaults_without_cfgs() {
        // The crate itself is built without registry cfgs
        assert_eq!(ARITHMETIC_MODE, ArithmeticMode::Single);
        assert!(!DJBFFT);
        assert!(AUDIO_BACKENDS.is_empty());
        assert!(!audio_backend_enabled(AudioBackend::Oss));
        assert!(!WORDS_BIGENDIAN);
    }

    #[test]
    fn test_cfg_names_match_registry() {
        let registry = crate::test_support::a52dec_registry();
        let declared = crate::emit::cargo::check_cfg_names(&registry);
        for name in CFG_NAMES {
            assert!(declared.iter().any(|d| d == name), "{} not declared", name);
        }
    }
}
