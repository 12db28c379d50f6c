//! Release archive extraction (gzip-compressed tar)
//!
//! Entries are validated before anything is written: absolute paths,
//! `..` components, writes through an existing symlink, and link targets
//! that resolve outside the destination all abort the extraction with
//! [`InstallerError::UnsafeArchivePath`](crate::error::InstallerError).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::EntryType;

use crate::error::{self, Result};

/// Lexically normalize a path without touching the file system
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for c in path.components() {
        match c {
            Component::Prefix(p) => {
                out.clear();
                out.push(p.as_os_str());
                has_root = true;
            }
            Component::RootDir => {
                out.push(Component::RootDir.as_os_str());
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out
                    .components()
                    .next_back()
                    .is_some_and(|last| matches!(last, Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !has_root {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }

    out
}

fn is_unsafe_entry_path(path: &Path) -> bool {
    path.is_absolute()
        || path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        })
}

fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|md| md.file_type().is_symlink())
        .unwrap_or(false)
}

/// Reject writes through a symlink that already exists under `dest`
fn ensure_no_symlink_components(dest: &Path, rel: &Path) -> Result<()> {
    let mut cur = dest.to_path_buf();
    for comp in rel.components() {
        cur.push(comp);
        if is_symlink(&cur) {
            return Err(error::archive::unsafe_path(rel));
        }
    }
    Ok(())
}

fn ensure_link_target_within_dest(dest: &Path, entry_path: &Path, target: &Path) -> Result<()> {
    if target.is_absolute()
        || target
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return Err(error::archive::unsafe_path(entry_path));
    }

    let link_parent = dest.join(entry_path);
    let link_parent = link_parent.parent().unwrap_or(dest);
    let candidate = normalize_lexical(&link_parent.join(target));
    if candidate.strip_prefix(normalize_lexical(dest)).is_err() {
        return Err(error::archive::unsafe_path(entry_path));
    }

    // The lexical check above assumes every component is a real directory.
    // Once the target passes through a symlink already on disk, a later `..`
    // climbs from wherever that link points, so refuse it.
    let mut cur = link_parent.to_path_buf();
    let mut through_symlink = false;
    for comp in target.components() {
        match comp {
            Component::ParentDir if through_symlink => {
                return Err(error::archive::unsafe_path(entry_path));
            }
            Component::ParentDir => {
                cur.pop();
            }
            Component::Normal(seg) => {
                cur.push(seg);
                through_symlink |= is_symlink(&cur);
            }
            _ => {}
        }
    }
    Ok(())
}

fn ensure_hard_link_within_dest(entry_path: &Path, target: &Path) -> Result<()> {
    // Hard link targets are relative to the archive root, not the entry
    if is_unsafe_entry_path(target) {
        return Err(error::archive::unsafe_path(entry_path));
    }
    Ok(())
}

fn unpack<R: Read>(reader: R, archive_path: &Path, dest: &Path) -> Result<usize> {
    let fail = |e: std::io::Error| error::archive::extract_failed(archive_path, e);

    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.set_overwrite(false);

    let mut unpacked = 0;
    for entry in archive.entries().map_err(fail)? {
        let mut entry = entry.map_err(fail)?;
        let entry_type = entry.header().entry_type();

        match entry_type {
            EntryType::XGlobalHeader
            | EntryType::XHeader
            | EntryType::GNULongName
            | EntryType::GNULongLink
            | EntryType::Char
            | EntryType::Block
            | EntryType::Fifo => continue,
            _ => {}
        }

        let path = entry.path().map_err(fail)?.into_owned();
        if is_unsafe_entry_path(&path) {
            return Err(error::archive::unsafe_path(&path));
        }
        if path.as_os_str().is_empty() || path == Path::new(".") {
            continue;
        }

        ensure_no_symlink_components(dest, &path)?;

        if matches!(entry_type, EntryType::Symlink | EntryType::Link) {
            let Some(target) = entry.link_name().map_err(fail)? else {
                return Err(error::archive::extract_failed(
                    archive_path,
                    format!("link without target: {}", path.display()),
                ));
            };
            if entry_type == EntryType::Symlink {
                ensure_link_target_within_dest(dest, &path, &target)?;
            } else {
                ensure_hard_link_within_dest(&path, &target)?;
            }
        }

        // unpack_in re-checks containment and declines anything it will not write
        if !entry.unpack_in(dest).map_err(fail)? {
            return Err(error::archive::unsafe_path(&path));
        }
        unpacked += 1;
    }

    Ok(unpacked)
}

/// Extract a `.tar.gz` archive into `dest`, returning the number of entries
/// written. `dest` must already exist.
pub fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<usize> {
    let dest = dest
        .canonicalize()
        .map_err(|e| error::fs::open_failed(dest, e))?;
    let file = File::open(archive_path).map_err(|e| error::fs::open_failed(archive_path, e))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    unpack(decoder, archive_path, &dest)
}
