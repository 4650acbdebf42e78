//! Album-art file name matching.

use std::path::Path;

use indexmap::IndexSet;
use mediasift_core::{AlbumArtPattern, ClassifierConfig, DEFAULT_ALBUM_ART_NAMES};

/// Ordered set of album-art name patterns.
///
/// Patterns are checked in insertion order and the first match wins.
/// Duplicate patterns collapse into the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumArtMatcher {
    patterns: IndexSet<AlbumArtPattern>,
}

impl AlbumArtMatcher {
    /// Create a matcher from patterns, keeping their order.
    pub fn new(patterns: impl IntoIterator<Item = AlbumArtPattern>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// Parse a slash-separated list such as `Cover.jpg/folder.jpg/Thumb*`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split('/').filter_map(AlbumArtPattern::parse))
    }

    /// Matcher for the stock cover names.
    pub fn with_defaults() -> Self {
        Self::parse(DEFAULT_ALBUM_ART_NAMES)
    }

    /// Build the matcher from shared configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.album_art_patterns())
    }

    /// Check a bare file name against the configured patterns.
    pub fn is_album_art(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(name))
    }

    /// Check the final component of a path.
    ///
    /// Names that are not valid UTF-8 never match.
    pub fn is_album_art_path(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.is_album_art(name))
    }

    /// Iterate patterns in match order.
    pub fn patterns(&self) -> impl Iterator<Item = &AlbumArtPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
