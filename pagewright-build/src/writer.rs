//! Output writer.
//!
//! ## `write_output` protocol
//!
//! 1. Ensure the destination directory exists.
//! 2. Write the rendered text verbatim to `<path>.pagewright.tmp`.
//! 3. Rename onto the final path (atomic on POSIX).
//!
//! A failure at any step leaves a previous output file untouched and removes
//! the temporary file.

use std::path::{Path, PathBuf};

use crate::error::{io_err, BuildError};

/// Write `content` to `path`, replacing any existing file.
pub fn write_output(path: &Path, content: &str) -> Result<(), BuildError> {
    let tmp = PathBuf::from(format!("{}.pagewright.tmp", path.display()));
    write_output_with_tmp(path, content, &tmp)
}

fn write_output_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    if let Err(e) = std::fs::write(tmp, content) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(tmp, e));
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_content_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        write_output(&path, "line1\r\nline2\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line1\r\nline2\n");
    }

    #[test]
    fn overwrites_existing_output() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, "old").unwrap();
        write_output(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.html");
        write_output(&path, "data").unwrap();
        let tmp_path = PathBuf::from(format!("{}.pagewright.tmp", path.display()));
        assert!(!tmp_path.exists(), ".pagewright.tmp must be cleaned up");
    }

    #[test]
    fn creates_build_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build").join("nested").join("page.html");
        write_output(&path, "content").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn destination_under_a_file_fails() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("build");
        fs::write(&blocker, "not a directory").unwrap();
        let err = write_output(&blocker.join("page.html"), "content").unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }), "got: {err}");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("page.html");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("page.html.pagewright.tmp");

        let result = write_output_with_tmp(&path, "new content", &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename failed.
        if result.is_err() {
            let current = fs::read_to_string(&path).unwrap();
            assert_eq!(current, "original", "original file should be intact");
            assert!(!tmp_path.exists(), ".pagewright.tmp should be cleaned up");
        }
    }
}
