use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read a file to a string
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Replace a file's content.
///
/// The new content is written to a temporary file next to the target and
/// then renamed over it, so an interrupted write leaves the old file intact.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    if let Ok(metadata) = fs::metadata(path) {
        // Keep the target's permissions rather than the temp file's 0600
        if let Err(err) = fs::set_permissions(temp.path(), metadata.permissions()) {
            tracing::warn!(
                file = %path.display(),
                error = %err,
                "Could not carry file permissions over to the rewritten file"
            );
        }
    }

    temp.persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}
