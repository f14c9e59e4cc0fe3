//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
///
/// The file is staged under a unique name next to its destination and
/// renamed into place, so readers see either the old contents or the new
/// ones, and concurrent writers never share a staging file.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            ensure_dir(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let mut staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create staging file in {}", parent.display()))?;
    staging
        .write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", staging.path().display()))?;

    // Staging files are created 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staging
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .with_context(|| format!("failed to set permissions on {}", staging.path().display()))?;
    }

    staging
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

/// Write only when the contents differ, so unchanged outputs keep their
/// timestamps and don't trigger rebuilds. Returns whether the file changed.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() && read_to_string(path)? == contents {
        tracing::debug!("{} is up to date", path.display());
        return Ok(false);
    }
    write_string(path, contents)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("include").join("config.h");

        write_string(&path, "#define X 1\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "#define X 1\n");
        let leftovers: Vec<_> = fs::read_dir(tmp.path().join("include"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("config.h")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");
        write_string(&path, "").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_concurrent_writers_do_not_collide() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || write_string(&path, &format!("#define N {}\n", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("#define N "));
        assert_eq!(contents.lines().count(), 1);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_if_changed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.h");

        assert!(write_if_changed(&path, "a").unwrap());
        assert!(!write_if_changed(&path, "a").unwrap());
        assert!(write_if_changed(&path, "b").unwrap());
        assert_eq!(read_to_string(&path).unwrap(), "b");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_to_string(Path::new("/nonexistent/config.h")).unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
