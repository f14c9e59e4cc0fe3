//! Core data structures for a52conf.
//!
//! This module contains the foundational types:
//! - The flag catalog (headers, functions, audio backends, C types)
//! - Flag entries and their states
//! - The resolved registry and the rules it enforces
//! - Probes that produce snapshots

pub mod arith;
pub mod catalog;
pub mod endian;
pub mod errors;
pub mod flag;
pub mod probe;
pub mod registry;
pub mod shim;
pub mod target;

pub use arith::ArithmeticMode;
pub use catalog::{AudioBackend, CType, Function, Header, SignalReturn};
pub use endian::{ByteOrder, WordsBigEndian};
pub use errors::RegistryError;
pub use flag::{FlagEntry, FlagKind, FlagState, FlagValue};
pub use probe::{Probe, ProbeSnapshot, SnapshotFile, TargetProbe};
pub use registry::Registry;
pub use shim::{InlineHint, KeywordShim};
pub use target::TargetTriple;
