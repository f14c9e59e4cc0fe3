//! C header (`config.h`) rendering.
//!
//! The header is a flat list of entries in registry order, each under its
//! description comment. Presence flags that are off and valued flags without
//! a value are written as commented-out `#undef`s, never as `0`.

use std::fmt::Write;

use crate::core::arith::{DOUBLE_MACRO, FIXED_MACRO};
use crate::core::endian::{self, WordsBigEndian};
use crate::core::flag::{FlagEntry, FlagState};
use crate::core::Registry;

use super::FINGERPRINT_PREFIX;

const COMMENT_WIDTH: usize = 76;

/// Render the registry as a C header.
pub fn render(registry: &Registry) -> String {
    let mut out = String::new();

    writeln!(out, "/* config.h.  Generated by a52conf from a probe snapshot.  */").unwrap();
    writeln!(
        out,
        "/* {}{} */",
        FINGERPRINT_PREFIX,
        registry.fingerprint()
    )
    .unwrap();

    for entry in registry.entries() {
        out.push('\n');
        out.push_str(&comment(&entry.description));

        match entry.name.as_str() {
            endian::MACRO => render_words_bigendian(&mut out, registry.words_bigendian()),
            "inline" => render_inline(&mut out, entry),
            _ => render_entry(&mut out, entry),
        }
    }

    out.push('\n');
    out.push_str(&comment("liba52 arithmetic modes are mutually exclusive"));
    writeln!(
        out,
        "#if defined {} && defined {}",
        FIXED_MACRO, DOUBLE_MACRO
    )
    .unwrap();
    writeln!(
        out,
        "# error \"{} and {} are mutually exclusive\"",
        FIXED_MACRO, DOUBLE_MACRO
    )
    .unwrap();
    writeln!(out, "#endif").unwrap();

    out
}

fn render_entry(out: &mut String, entry: &FlagEntry) {
    match &entry.state {
        FlagState::Presence(true) => writeln!(out, "#define {} 1", entry.name).unwrap(),
        FlagState::Value(Some(value)) => define(out, &entry.name, &value.to_c()),
        FlagState::Presence(false) | FlagState::Value(None) | FlagState::Deferred => {
            writeln!(out, "/* #undef {} */", entry.name).unwrap()
        }
    }
}

fn render_words_bigendian(out: &mut String, resolved: WordsBigEndian) {
    writeln!(out, "#if defined {}", endian::UNIVERSAL_MACRO).unwrap();
    writeln!(out, "# if defined {}", endian::COMPILER_INDICATOR).unwrap();
    writeln!(out, "#  define {} 1", endian::MACRO).unwrap();
    writeln!(out, "# endif").unwrap();
    writeln!(out, "#else").unwrap();
    writeln!(out, "# ifndef {}", endian::MACRO).unwrap();
    if resolved.is_present() {
        writeln!(out, "#  define {} 1", endian::MACRO).unwrap();
    } else {
        writeln!(out, "/* #  undef {} */", endian::MACRO).unwrap();
    }
    writeln!(out, "# endif").unwrap();
    writeln!(out, "#endif").unwrap();
}

fn render_inline(out: &mut String, entry: &FlagEntry) {
    match entry.state.value() {
        Some(value) => {
            writeln!(out, "#ifndef __cplusplus").unwrap();
            define(out, &entry.name, &value.to_c());
            writeln!(out, "#endif").unwrap();
        }
        None => writeln!(out, "/* #undef {} */", entry.name).unwrap(),
    }
}

// An empty value neutralizes the name; no trailing space.
fn define(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        writeln!(out, "#define {}", name).unwrap();
    } else {
        writeln!(out, "#define {} {}", name, value).unwrap();
    }
}

/// Wrap a description into a C comment.
fn comment(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > COMMENT_WIDTH {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let prefix = if i == 0 { "/* " } else { "   " };
        out.push_str(prefix);
        out.push_str(line);
        if i + 1 == lines.len() {
            out.push_str(" */");
        }
        out.push('\n');
    }
    out
}
