//! Atomic output writes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder as TempFileBuilder;

/// What [`write_atomic`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Existing file already had these exact contents; left untouched so
    /// its mtime does not trigger a firmware rebuild.
    Unchanged,
}

/// Write `contents` to `path` via a temp file in the same directory and a
/// rename. Readers see either the old file or the complete new one, and a
/// failed write leaves no partial file behind.
///
/// A replaced file keeps its permissions. A new file gets the mode a plain
/// create would give it (`0o666` less the umask on unix).
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<WriteOutcome> {
    if fs::read(path).is_ok_and(|existing| existing == contents) {
        return Ok(WriteOutcome::Unchanged);
    }
    let existing_permissions = fs::metadata(path).ok().map(|meta| meta.permissions());

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut builder = TempFileBuilder::new();
    builder.prefix(".webui-embed-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    // Dropped (and deleted) on any error below
    let mut temp_file = builder.tempfile_in(dir)?;
    if let Some(permissions) = existing_permissions {
        temp_file.as_file().set_permissions(permissions)?;
    }
    temp_file.write_all(contents)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(WriteOutcome::Written)
}
