//! High-level operations.
//!
//! This module contains the implementation of a52conf commands.

pub mod check;
pub mod configure;
pub mod show;

pub use check::{check, CheckOptions, CheckReport};
pub use configure::{
    configure, output_dir, ConfigureOptions, ConfigureResult, ProbeSource, ResolveInputs,
};
pub use show::{format_flags, format_report, format_summary, ShowFilter};
