//! Common file system operations with unified error handling

use std::fs;
use std::path::Path;

use crate::error::{self, Result};

/// Permission bits for directories the installer creates
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Fail unless `path` is absent or an empty directory.
///
/// Both acquirers call this before touching the network so that a second
/// run against an installed tree stops without side effects.
pub fn ensure_target_free(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(error::fs::open_failed(path, e)),
        Ok(meta) if !meta.is_dir() => Err(error::fs::target_exists(path)),
        Ok(_) => {
            let mut entries = fs::read_dir(path).map_err(|e| error::fs::open_failed(path, e))?;
            if entries.next().is_some() {
                Err(error::fs::target_exists(path))
            } else {
                Ok(())
            }
        }
    }
}

/// Create `path` and any missing parents (mode 0755 on Unix)
pub fn create_dir_all(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|e| error::fs::dir_create_failed(path, e))
}

/// Rename `from` to `to`; `to` may be an existing empty directory
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| error::fs::rename_failed(from, to, e))
}
