//! Classification data model.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::Path;
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Final classification of a filesystem entry.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Not a directory and not a media file the caller asked for.
    #[default]
    Unknown,
    /// A directory, possibly reached through a symlink.
    Dir,
    /// A regular file accepted by the media mask.
    File,
}

impl FileType {
    /// Check if this is a directory.
    pub fn is_dir(self) -> bool {
        self == FileType::Dir
    }

    /// Check if this is an accepted media file.
    pub fn is_file(self) -> bool {
        self == FileType::File
    }
}

/// A single media category, as named on the command line or in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaKind {
    #[strum(to_string = "audio", serialize = "a")]
    Audio,
    #[strum(to_string = "video", serialize = "v")]
    Video,
    #[strum(to_string = "images", serialize = "image", serialize = "p")]
    Images,
    Rescan,
}

impl MediaKind {
    /// The mask bit for this kind.
    pub fn bits(self) -> MediaTypes {
        match self {
            MediaKind::Audio => MediaTypes::AUDIO,
            MediaKind::Video => MediaTypes::VIDEO,
            MediaKind::Images => MediaTypes::IMAGES,
            MediaKind::Rescan => MediaTypes::RESCAN,
        }
    }
}

/// Bitmask of media categories a classification call accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaTypes(u8);

impl MediaTypes {
    pub const NONE: Self = Self(0);
    pub const AUDIO: Self = Self(1 << 0);
    pub const VIDEO: Self = Self(1 << 1);
    pub const IMAGES: Self = Self(1 << 2);
    pub const RESCAN: Self = Self(1 << 3);
    /// Every primary media category, without rescan extras.
    pub const ALL_MEDIA: Self = Self(Self::AUDIO.0 | Self::VIDEO.0 | Self::IMAGES.0);

    /// Build a mask from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MediaTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MediaTypes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<MediaKind> for MediaTypes {
    fn from(kind: MediaKind) -> Self {
        kind.bits()
    }
}

impl FromIterator<MediaKind> for MediaTypes {
    fn from_iter<I: IntoIterator<Item = MediaKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MediaTypes::NONE, |mask, kind| mask | kind.bits())
    }
}

/// Parses `audio,video`, `A,V,P` or `all`.
impl FromStr for MediaTypes {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MediaTypes::ALL_MEDIA);
        }
        s.split(',')
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(MediaKind::from_str)
            .collect()
    }
}

impl fmt::Display for MediaTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use strum::IntoEnumIterator;

        let mut first = true;
        for kind in MediaKind::iter().filter(|kind| self.contains(kind.bits())) {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{kind}")?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

/// Directory-entry type reported by whoever listed the directory.
///
/// Listing APIs usually know the entry type without an extra `stat`; passing it
/// along lets the resolver skip the probe for plain directories and files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryHint {
    Directory,
    RegularFile,
    Symlink,
    /// Device, socket or FIFO.
    Other,
    /// The listing could not tell.
    Unknown,
}

impl From<std::fs::FileType> for EntryHint {
    fn from(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryHint::Symlink
        } else if file_type.is_dir() {
            EntryHint::Directory
        } else if file_type.is_file() {
            EntryHint::RegularFile
        } else {
            EntryHint::Other
        }
    }
}

/// A path to classify together with whatever its directory listing knew.
///
/// Borrowed from the caller for the duration of one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry<'a> {
    pub path: &'a Path,
    pub hint: Option<EntryHint>,
}

impl<'a> PathEntry<'a> {
    /// An entry with no type hint; the resolver will probe the filesystem.
    pub fn new(path: &'a Path) -> Self {
        Self { path, hint: None }
    }

    /// Attach a directory-listing hint.
    pub fn with_hint(mut self, hint: impl Into<EntryHint>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// A canonical extension and the MIME type served for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MimeInfo {
    pub extension: &'static str,
    pub mime: &'static str,
}

impl MimeInfo {
    pub const fn new(extension: &'static str, mime: &'static str) -> Self {
        Self { extension, mime }
    }
}

impl fmt::Display for MimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime)
    }
}

/// One album-art file name pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumArtPattern {
    /// Exact name, or the prefix when `wildcard` is set.
    pub name: CompactString,
    /// Match any name starting with `name`.
    pub wildcard: bool,
}

impl AlbumArtPattern {
    /// Create an exact-match pattern.
    pub fn exact(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            wildcard: false,
        }
    }

    /// Create a prefix pattern.
    pub fn prefix(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            wildcard: true,
        }
    }

    /// Parse one configured word; a trailing `*` marks a prefix pattern.
    ///
    /// Returns `None` for an empty word or a bare `*`, which would match
    /// every name.
    pub fn parse(word: &str) -> Option<Self> {
        match word.strip_suffix('*') {
            Some("") => None,
            Some(prefix) => Some(Self::prefix(prefix)),
            None if word.is_empty() => None,
            None => Some(Self::exact(word)),
        }
    }

    /// Check a bare file name against this pattern.
    pub fn matches(&self, name: &str) -> bool {
        if self.wildcard {
            name.starts_with(self.name.as_str())
        } else {
            name == self.name.as_str()
        }
    }
}

/// Formats whose support is switched on at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalFormats {
    /// WavPack audio (`.wv`, `audio/x-wavpack`).
    #[serde(default)]
    pub wavpack: bool,
    /// TiVo recordings (`.TiVo`, `video/x-tivo-mpeg*`).
    #[serde(default)]
    pub tivo: bool,
}

impl OptionalFormats {
    /// Every optional format enabled.
    pub fn all() -> Self {
        Self {
            wavpack: true,
            tivo: true,
        }
    }
}
