//! Error types for filesystem operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by directory creation, copying and linking.
///
/// Classification never produces these; an unreadable entry is simply
/// [`FileType::Unknown`](crate::FileType::Unknown).
#[derive(Debug, Error)]
pub enum OpsError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// A path component exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Fewer bytes reached the destination than were read from the source.
    #[error("Short write to {path}: read {read} bytes, wrote {written}")]
    ShortWrite {
        path: PathBuf,
        read: u64,
        written: u64,
    },

    /// Hard link and symlink fallback both failed.
    #[error("Linking {src} to {dst} failed: {cause}")]
    LinkFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OpsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error is about (the destination for link failures).
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PermissionDenied { path }
            | Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::ShortWrite { path, .. }
            | Self::Io { path, .. } => path,
            Self::LinkFailed { dst, .. } => dst,
        }
    }
}
