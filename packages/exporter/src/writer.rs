//! Atomic file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Write `content` to `path` through a temp file in the same directory.
///
/// Readers never observe a half-written page: the temp file is synced and
/// then renamed over the destination. On failure the temp file is removed
/// again.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    if let Err(err) = write_and_replace(&temp_file, path, content) {
        // The write error is reported; a failed cleanup is not.
        let _ = fs::remove_file(&temp_file);
        return Err(err.into());
    }

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

fn write_and_replace(temp_file: &Path, path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(temp_file)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(temp_file, path)
}
