//! a52conf - build-time capability registry for the a52 decoder
//!
//! This crate resolves probe facts (headers, functions, compiler keywords,
//! byte order, build options) into an immutable [`Registry`] and renders it
//! as a C `config.h`, a JSON descriptor or Cargo cfgs.

pub mod consumer;
pub mod core;
pub mod emit;
pub mod ops;
pub mod util;

/// Test utilities and fixtures for a52conf unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    catalog::{AudioBackend, Header},
    probe::{Probe, ProbeSnapshot},
    registry::Registry,
    ArithmeticMode, RegistryError, WordsBigEndian,
};
