//! Extension-based media category predicates.

use std::path::Path;

use mediasift_core::text::ends_with;
use mediasift_core::{ClassifierConfig, MediaTypes, OptionalFormats};

const VIDEO_EXTENSIONS: &[&str] = &[
    ".mpg", ".mpeg", ".avi", ".divx", ".asf", ".wmv", ".mp4", ".m4v", ".mts", ".m2ts", ".m2t",
    ".mkv", ".vob", ".ts", ".flv", ".xvid", ".mov", ".3gp",
];
const TIVO_EXTENSION: &str = ".TiVo";

const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".flac", ".wma", ".asf", ".fla", ".flc", ".m4a", ".aac", ".mp4", ".m4p", ".wav",
    ".ogg", ".pcm", ".3gp",
];
const WAVPACK_EXTENSION: &str = ".wv";

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];
const PLAYLIST_EXTENSIONS: &[&str] = &[".m3u", ".pls"];
const CAPTION_EXTENSIONS: &[&str] = &[".srt", ".smi"];
const METADATA_EXTENSIONS: &[&str] = &[".nfo"];

/// Suffix predicates partitioning file names into media categories.
///
/// Matching is ASCII case-insensitive and runs on the raw path bytes, so
/// non-UTF-8 names are classified like any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionClassifier {
    formats: OptionalFormats,
}

impl ExtensionClassifier {
    /// Create a classifier recognizing the given optional formats.
    pub fn new(formats: OptionalFormats) -> Self {
        Self { formats }
    }

    /// Create a classifier from shared configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.formats)
    }

    /// Optional formats this classifier recognizes.
    pub fn formats(&self) -> OptionalFormats {
        self.formats
    }

    pub fn is_video(&self, path: impl AsRef<Path>) -> bool {
        let name = path_bytes(path.as_ref());
        has_suffix(name, VIDEO_EXTENSIONS) || (self.formats.tivo && ends_with(name, TIVO_EXTENSION))
    }

    pub fn is_audio(&self, path: impl AsRef<Path>) -> bool {
        let name = path_bytes(path.as_ref());
        has_suffix(name, AUDIO_EXTENSIONS)
            || (self.formats.wavpack && ends_with(name, WAVPACK_EXTENSION))
    }

    pub fn is_image(&self, path: impl AsRef<Path>) -> bool {
        has_suffix(path_bytes(path.as_ref()), IMAGE_EXTENSIONS)
    }

    pub fn is_playlist(&self, path: impl AsRef<Path>) -> bool {
        has_suffix(path_bytes(path.as_ref()), PLAYLIST_EXTENSIONS)
    }

    /// Subtitle files (`.srt`, `.smi`).
    pub fn is_caption(&self, path: impl AsRef<Path>) -> bool {
        has_suffix(path_bytes(path.as_ref()), CAPTION_EXTENSIONS)
    }

    /// Sidecar metadata (`.nfo`).
    pub fn is_metadata(&self, path: impl AsRef<Path>) -> bool {
        has_suffix(path_bytes(path.as_ref()), METADATA_EXTENSIONS)
    }

    /// Check whether a regular file's name is wanted under `mask`.
    ///
    /// Categories are tested in a fixed order: audio (including playlists),
    /// video, images, then the rescan extras (captions, metadata, images).
    pub fn accepts(&self, path: impl AsRef<Path>, mask: MediaTypes) -> bool {
        let path = path.as_ref();
        (mask.contains(MediaTypes::AUDIO) && (self.is_audio(path) || self.is_playlist(path)))
            || (mask.contains(MediaTypes::VIDEO) && self.is_video(path))
            || (mask.contains(MediaTypes::IMAGES) && self.is_image(path))
            || (mask.contains(MediaTypes::RESCAN)
                && (self.is_caption(path) || self.is_metadata(path) || self.is_image(path)))
    }
}

fn path_bytes(path: &Path) -> &[u8] {
    path.as_os_str().as_encoded_bytes()
}

fn has_suffix(name: &[u8], extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| ends_with(name, ext))
}
