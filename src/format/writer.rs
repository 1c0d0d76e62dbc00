//! Atomic file replacement

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Replace the content of `path` with `bytes`
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old or the new content.
/// The original file's permissions are carried over. When `path` is a
/// symbolic link, the file it points to is replaced and the link is kept.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or
/// renamed. `path` is unchanged in that case.
pub fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // Replace the link target, not a symlink pointing at it
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = resolved.as_path();

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
