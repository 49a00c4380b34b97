//! Archive expansion
//!
//! Downloaded payloads ending in `.zip` are expanded next to themselves, the
//! way `unzip -o -q` run from the payload's directory would: existing files
//! are overwritten without prompting and nothing is printed per entry.
//! Symbolic links are recreated as links, as long as they resolve inside the
//! destination.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path};

use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{Result, archive, fs as fs_error};

/// The one archive format bundles are delivered in
pub const ARCHIVE_EXTENSION: &str = "zip";

/// File type bits of a unix mode
const S_IFMT: u32 = 0o170_000;
/// File type of a symbolic link
const S_IFLNK: u32 = 0o120_000;

/// Whether a payload file name denotes an archive that should be expanded
pub fn is_archive(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

/// Expand `archive_path` into its own parent directory.
///
/// Returns the number of files written. Entries that would land outside the
/// parent directory are skipped. The archive itself is left in place; the
/// caller deletes it.
pub fn expand(archive_path: &Path) -> Result<usize> {
    let dest = archive_path
        .parent()
        .ok_or_else(|| archive::expand_failed(archive_path, "archive has no parent directory"))?;

    let file = File::open(archive_path).map_err(|e| archive::expand_failed(archive_path, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| archive::expand_failed(archive_path, e))?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| archive::expand_failed(archive_path, e))?;

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping unsafe archive entry '{}'", entry.name());
            continue;
        };
        let out_path = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| fs_error::create_dir_failed(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| fs_error::create_dir_failed(parent, e))?;
        }

        if entry.unix_mode().is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            let mut target = String::new();
            entry
                .read_to_string(&mut target)
                .map_err(|e| archive::expand_failed(archive_path, e))?;
            if !link_stays_inside(&relative, Path::new(&target)) {
                warn!(
                    "Skipping symlink '{}' pointing outside the archive: {}",
                    entry.name(),
                    target
                );
                continue;
            }
            write_symlink(&out_path, &target).map_err(|e| fs_error::write_failed(&out_path, e))?;
            written += 1;
            continue;
        }

        let mut out = File::create(&out_path).map_err(|e| fs_error::write_failed(&out_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| fs_error::write_failed(&out_path, e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|e| fs_error::write_failed(&out_path, e))?;
        }

        written += 1;
    }

    debug!("Expanded {} files from {}", written, archive_path.display());
    Ok(written)
}

/// Whether a link stored at `link` (relative to the destination) with
/// `target` resolves to a path inside the destination.
fn link_stays_inside(link: &Path, target: &Path) -> bool {
    let mut depth = link.components().count().saturating_sub(1);
    for component in target.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

/// Replace whatever is at `path` with a symlink to `target`.
#[cfg(unix)]
fn write_symlink(path: &Path, target: &str) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        Err(_) => {}
    }
    std::os::unix::fs::symlink(target, path)
}

/// Without unix links the target is stored as the file's contents, as `unzip` does.
#[cfg(not(unix))]
fn write_symlink(path: &Path, target: &str) -> io::Result<()> {
    fs::write(path, target)
}
