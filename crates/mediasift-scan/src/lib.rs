//! Media classification engine for mediasift.
//!
//! This crate decides what a directory entry is from a media server's point
//! of view, and maps between file extensions and MIME types.
//!
//! # Overview
//!
//! - [`ExtensionClassifier`] - case-insensitive suffix predicates per media category
//! - [`MimeTable`] - extension to MIME lookup and MIME to canonical extension
//! - [`AlbumArtMatcher`] - cover-art file name patterns
//! - [`PathTypeResolver`] - combines a `stat` probe, symlink handling and the
//!   classifier into a [`FileType`]
//!
//! All of these are built once from a [`ClassifierConfig`] and then only read,
//! so they can be shared between scanning threads by reference.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use mediasift_scan::{ExtensionClassifier, MediaTypes, MimeTable, PathTypeResolver};
//!
//! let classifier = ExtensionClassifier::default();
//! let resolver = PathTypeResolver::new(&classifier);
//! let path = Path::new("/srv/media/Movies/movie.mkv");
//!
//! let kind = resolver.resolve_unknown_type(path, MediaTypes::VIDEO);
//! println!("{}: {kind}", path.display());
//!
//! let mime = MimeTable::default().ext_to_mime("track.flac");
//! assert_eq!(mime.map(|m| m.mime), Some("audio/flac"));
//! ```

mod album_art;
mod classifier;
mod mime;
mod resolver;

pub use album_art::AlbumArtMatcher;
pub use classifier::ExtensionClassifier;
pub use mime::{MimeTable, FALLBACK_EXTENSION};
pub use resolver::PathTypeResolver;

// Re-export core types for convenience
pub use mediasift_core::{
    AlbumArtPattern, ClassifierConfig, EntryHint, FileType, MediaKind, MediaTypes, MimeInfo,
    OptionalFormats, PathEntry,
};
