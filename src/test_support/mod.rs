//! Test utilities for a52conf unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use a52conf::test_support::{a52dec_snapshot, ProjectFixture};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let snapshot = ProjectFixture::new()
//!         .with_snapshot(a52dec_snapshot())
//!         .write_to(tmp.path())
//!         .unwrap();
//! }
//! ```

pub mod fixtures;

use crate::core::Registry;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Resolve the a52dec snapshot.
pub fn a52dec_registry() -> Registry {
    Registry::resolve(&a52dec_snapshot()).expect("a52dec snapshot resolves")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_fixture_writes_files() {
        let tmp = TempDir::new().unwrap();
        let snapshot = ProjectFixture::new()
            .with_config(configs::fixed_oss())
            .with_snapshot(a52dec_snapshot())
            .write_to(tmp.path())
            .unwrap()
            .unwrap();

        assert!(snapshot.exists());
        assert!(tmp.path().join(".a52conf/config.toml").exists());
    }

    #[test]
    fn test_a52dec_registry() {
        let registry = a52dec_registry();
        assert!(registry.is_present("HAVE_DLFCN_H"));
        assert!(!registry.is_present("HAVE_IO_H"));
    }
}
