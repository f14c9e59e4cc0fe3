//! Renderers for a resolved [`Registry`](crate::core::Registry).
//!
//! Every renderer is a pure function of the registry: the same registry
//! always renders to byte-identical output.

pub mod cargo;
pub mod header;
pub mod json;

/// Marker in front of the fingerprint inside a rendered header.
pub const FINGERPRINT_PREFIX: &str = "a52conf fingerprint: ";

/// Default file name of the rendered C header.
pub const HEADER_FILE: &str = "config.h";

/// Default file name of the rendered JSON descriptor.
pub const JSON_FILE: &str = "a52conf.json";

/// Extract the fingerprint from a rendered header, if it carries one.
pub fn fingerprint_of(header: &str) -> Option<String> {
    header.lines().find_map(|line| {
        line.trim()
            .strip_prefix("/* ")?
            .strip_prefix(FINGERPRINT_PREFIX)?
            .strip_suffix(" */")
            .map(|fp| fp.trim().to_string())
    })
}
