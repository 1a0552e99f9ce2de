//! Writing the rendered report to disk

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Refuse to replace an existing file unless `overwrite` is set
pub fn check_overwrite(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        anyhow::bail!(
            "output file already exists: {} (use --overwrite to replace it)",
            path.display()
        );
    }
    Ok(())
}

/// Write HTML to `path`, creating parent directories. The content goes to a
/// sibling temp file first and is renamed into place.
pub fn write_html_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("html.tmp");
    fs::write(&temp_path, html)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e)
            .with_context(|| format!("Failed to rename temporary file to: {}", path.display()));
    }

    log::debug!("wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/nested/out.html");
        write_html_report(&path, "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        assert!(!path.with_extension("html.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target makes the rename fail
        let path = dir.path().join("out.html");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_html_report(&path, "<html></html>").unwrap_err();
        assert!(err.to_string().contains("Failed to rename"));
        assert!(!path.with_extension("html.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_overwrite_guard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        assert!(check_overwrite(&path, false).is_ok());

        fs::write(&path, "old").unwrap();
        let err = check_overwrite(&path, false).unwrap_err();
        assert!(err.to_string().contains("--overwrite"));
        assert!(check_overwrite(&path, true).is_ok());

        write_html_report(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
