//! Core types and utilities for mediasift.
//!
//! This crate provides the data model shared by the classifier and the file
//! operations crates (file types, media masks, MIME pairs, album-art
//! patterns), the classifier configuration, error types, and the string
//! helpers in [`text`].

mod config;
mod error;
pub mod text;
mod types;

pub use config::{ClassifierConfig, ClassifierConfigBuilder, DEFAULT_ALBUM_ART_NAMES};
pub use error::OpsError;
pub use types::{
    AlbumArtPattern, EntryHint, FileType, MediaKind, MediaTypes, MimeInfo, OptionalFormats,
    PathEntry,
};
