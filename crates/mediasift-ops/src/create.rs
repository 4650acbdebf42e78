//! Recursive, idempotent directory creation.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use mediasift_core::OpsError;
use tracing::warn;

/// `rwxr-xr-x`, used for directories created on the way to a destination file.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Create `path` and every missing ancestor, one component at a time.
///
/// Components that already exist as directories (or symlinks to
/// directories) are accepted, so calling this twice is harmless. Any other
/// failure is logged and returned; directories created before the failing
/// component are left in place. `mode` is ignored on non-unix targets.
pub fn make_dir(path: impl AsRef<Path>, mode: u32) -> Result<(), OpsError> {
    let path = path.as_ref();
    let mut current = PathBuf::new();

    for component in path.components() {
        current.push(component);
        if matches!(
            component,
            Component::Prefix(_) | Component::RootDir | Component::CurDir
        ) {
            continue;
        }
        create_one(&current, mode)?;
    }

    Ok(())
}

/// Create the directories that will contain `full_path`, but not `full_path` itself.
pub fn make_dir_ex(full_path: impl AsRef<Path>, mode: u32) -> Result<(), OpsError> {
    match full_path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => make_dir(parent, mode),
        _ => Ok(()),
    }
}

fn create_one(path: &Path, mode: u32) -> Result<(), OpsError> {
    match dir_builder(mode).create(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Cannot create directory");
            if err.kind() == io::ErrorKind::AlreadyExists {
                Err(OpsError::NotADirectory {
                    path: path.to_path_buf(),
                })
            } else {
                Err(OpsError::io(path, err))
            }
        }
    }
}

#[cfg(unix)]
fn dir_builder(mode: u32) -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;

    let mut builder = fs::DirBuilder::new();
    builder.mode(mode);
    builder
}

#[cfg(not(unix))]
fn dir_builder(_mode: u32) -> fs::DirBuilder {
    fs::DirBuilder::new()
}
