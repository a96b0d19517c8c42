//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't leave a half-written key or
//! envelope behind on failure or interruption.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all. The temp
/// file gets a unique name in the target directory, so no other file is
/// touched and concurrent writers never collide. Files are owner-readable
/// only on Unix.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> io::Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Temp file must live in the same directory for rename to be atomic
    let mut temp = NamedTempFile::new_in(parent)?;
    restrict_permissions(temp.as_file())?;

    temp.write_all(data)?;
    temp.flush()?;
    temp.as_file().sync_all()?;

    // Dropping a failed persist removes the temp file
    temp.persist(path).map_err(|e| e.error)?;

    sync_parent(parent);
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

// Best effort: persist the rename itself
#[cfg(unix)]
fn sync_parent(parent: &Path) {
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_parent: &Path) {}
