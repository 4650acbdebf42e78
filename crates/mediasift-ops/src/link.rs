//! Hard links with directory creation and symlink fallback.

use std::fs;
use std::io;
use std::path::Path;

use mediasift_core::OpsError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::create::{make_dir_ex, DEFAULT_DIR_MODE};

/// How [`link_file`] ended up linking the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkMethod {
    HardLink,
    /// Hard linking failed (e.g. across filesystems) and a symlink was made.
    Symlink,
}

/// Link primitives used by [`link_file_with`].
pub trait Linker {
    fn hard_link(&self, src: &Path, dst: &Path) -> io::Result<()>;
    fn symlink(&self, src: &Path, dst: &Path) -> io::Result<()>;
}

/// [`Linker`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinker;

impl Linker for SystemLinker {
    fn hard_link(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::hard_link(src, dst)
    }

    fn symlink(&self, src: &Path, dst: &Path) -> io::Result<()> {
        make_symlink(src, dst)
    }
}

#[cfg(unix)]
fn make_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn make_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

#[cfg(not(any(unix, windows)))]
fn make_symlink(_src: &Path, _dst: &Path) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

/// Link `dst` to `src` on the real filesystem.
///
/// See [`link_file_with`] for the fallback order.
pub fn link_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<LinkMethod, OpsError> {
    link_file_with(&SystemLinker, src, dst)
}

/// Link `dst` to `src`, trying progressively weaker strategies.
///
/// 1. Hard link.
/// 2. If that failed with "not found", create `dst`'s parents and retry.
/// 3. Symbolic link, as long as `src` exists. A relative `src` is made
///    absolute first so the link does not dangle.
///
/// An error is returned only when every strategy failed.
pub fn link_file_with(
    linker: &impl Linker,
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
) -> Result<LinkMethod, OpsError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());

    let mut last_err = match linker.hard_link(src, dst) {
        Ok(()) => return Ok(LinkMethod::HardLink),
        Err(err) => err,
    };

    if last_err.kind() == io::ErrorKind::NotFound && make_dir_ex(dst, DEFAULT_DIR_MODE).is_ok() {
        match linker.hard_link(src, dst) {
            Ok(()) => return Ok(LinkMethod::HardLink),
            Err(err) => last_err = err,
        }
    }

    // A relative target would be resolved from dst's directory, not ours
    match std::path::absolute(src) {
        Ok(target) if fs::symlink_metadata(&target).is_ok() => {
            debug!(
                src = %target.display(),
                dst = %dst.display(),
                error = %last_err,
                "Hard link failed, trying a symbolic link"
            );
            match linker.symlink(&target, dst) {
                Ok(()) => return Ok(LinkMethod::Symlink),
                Err(err) => last_err = err,
            }
        }
        _ => {}
    }

    info!(
        src = %src.display(),
        dst = %dst.display(),
        error = %last_err,
        "Linking failed"
    );
    Err(OpsError::LinkFailed {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        cause: last_err,
    })
}
