//! Common file system operations

use std::fs;
use std::path::Path;

/// Copy a directory recursively, hidden entries included. Symlinks are
/// recreated rather than followed.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            copy_symlink(&entry_path, &dst_path)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Copy a file or a whole directory to `dst`
pub fn copy_item<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let file_type = fs::symlink_metadata(src_ref)?.file_type();
    if file_type.is_symlink() {
        copy_symlink(src_ref, dst.as_ref())
    } else if file_type.is_dir() {
        copy_dir_recursive(src_ref, dst)
    } else {
        fs::copy(src_ref, dst).map(|_| ())
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        copy_dir_recursive(src, dst)
    } else {
        fs::copy(src, dst).map(|_| ())
    }
}
