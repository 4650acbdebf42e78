//! Filesystem-aware classification of directory entries.

use std::fs;
use std::path::Path;

use mediasift_core::{EntryHint, FileType, MediaTypes, PathEntry};
use tracing::debug;

use crate::classifier::ExtensionClassifier;

/// Decides whether a path is a directory, a wanted media file, or neither.
///
/// Holds only a shared reference to the classifier, so one resolver can be
/// used from many scanning threads at once.
#[derive(Debug, Clone, Copy)]
pub struct PathTypeResolver<'a> {
    classifier: &'a ExtensionClassifier,
}

impl<'a> PathTypeResolver<'a> {
    /// Create a resolver over a caller-owned classifier.
    pub fn new(classifier: &'a ExtensionClassifier) -> Self {
        Self { classifier }
    }

    /// Classify a path, trusting a directory-listing hint when it is conclusive.
    ///
    /// A directory hint resolves to [`FileType::Dir`] without touching the
    /// filesystem. A regular-file hint also skips the `stat`, but the name
    /// still has to pass the `mask`. Any other hint falls back to
    /// [`resolve_unknown_type`](Self::resolve_unknown_type).
    pub fn resolve_file_type(
        &self,
        hint: Option<EntryHint>,
        path: &Path,
        mask: MediaTypes,
    ) -> FileType {
        match hint {
            Some(EntryHint::Directory) => FileType::Dir,
            Some(EntryHint::RegularFile) => self.classify_regular(path, mask),
            Some(EntryHint::Symlink | EntryHint::Other | EntryHint::Unknown) | None => {
                self.resolve_unknown_type(path, mask)
            }
        }
    }

    /// Classify a caller-supplied entry.
    pub fn resolve_entry(&self, entry: &PathEntry<'_>, mask: MediaTypes) -> FileType {
        self.resolve_file_type(entry.hint, entry.path, mask)
    }

    /// Classify a path by probing the filesystem.
    ///
    /// Symlinks are followed one level, except a link whose target is a
    /// prefix of the link's own path. That catches a link pointing at one of
    /// its ancestor directories but not longer cycles. Unreadable, dangling
    /// and special entries are [`FileType::Unknown`]; this never fails.
    pub fn resolve_unknown_type(&self, path: &Path, mask: MediaTypes) -> FileType {
        let mut metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Cannot stat entry, skipping");
                return FileType::Unknown;
            }
        };

        if metadata.file_type().is_symlink() {
            if let Ok(target) = fs::read_link(path) {
                if is_ancestor_link(path, &target) {
                    debug!(
                        path = %path.display(),
                        target = %target.display(),
                        "Ignoring recursive symbolic link"
                    );
                    return FileType::Unknown;
                }
            }

            metadata = match fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "Dangling symbolic link, skipping");
                    return FileType::Unknown;
                }
            };
        }

        let file_type = metadata.file_type();
        if file_type.is_dir() {
            FileType::Dir
        } else if file_type.is_file() {
            self.classify_regular(path, mask)
        } else {
            FileType::Unknown
        }
    }

    fn classify_regular(&self, path: &Path, mask: MediaTypes) -> FileType {
        if self.classifier.accepts(path, mask) {
            FileType::File
        } else {
            FileType::Unknown
        }
    }
}

/// Single-hop loop heuristic: the link's own path starts with its target.
fn is_ancestor_link(path: &Path, target: &Path) -> bool {
    let target = target.as_os_str().as_encoded_bytes();
    !target.is_empty() && path.as_os_str().as_encoded_bytes().starts_with(target)
}
