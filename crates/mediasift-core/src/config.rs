//! Classifier configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::types::{AlbumArtPattern, OptionalFormats};

/// Album-art names checked when no other list is configured.
pub const DEFAULT_ALBUM_ART_NAMES: &str = "Cover.jpg/cover.jpg/AlbumArtSmall.jpg/albumartsmall.jpg/\
    AlbumArt.jpg/albumart.jpg/Album.jpg/album.jpg/Folder.jpg/folder.jpg/Thumb.jpg/thumb.jpg";

/// Configuration shared by the classifier, MIME table and album-art matcher.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ClassifierConfig {
    /// Optional formats recognized in addition to the fixed sets.
    #[builder(default)]
    #[serde(default)]
    pub formats: OptionalFormats,

    /// Slash-separated album-art names; a trailing `*` makes a prefix pattern.
    #[builder(default = "DEFAULT_ALBUM_ART_NAMES.to_string()")]
    #[serde(default = "default_album_art_names")]
    pub album_art_names: String,
}

fn default_album_art_names() -> String {
    DEFAULT_ALBUM_ART_NAMES.to_string()
}

impl ClassifierConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref names) = self.album_art_names {
            if names.split('/').any(|word| word == "*") {
                return Err("A bare '*' album art pattern would match every file".to_string());
            }
        }
        Ok(())
    }
}

impl ClassifierConfig {
    /// Create a new config builder.
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }

    /// Parse `album_art_names` into patterns, in configured order.
    pub fn album_art_patterns(&self) -> impl Iterator<Item = AlbumArtPattern> + '_ {
        self.album_art_names.split('/').filter_map(AlbumArtPattern::parse)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            formats: OptionalFormats::default(),
            album_art_names: default_album_art_names(),
        }
    }
}
