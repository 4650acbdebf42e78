//! Extension to MIME type mapping, in both directions.

use std::path::{is_separator, Path};

use mediasift_core::{ClassifierConfig, MimeInfo, OptionalFormats};

const MI_MPEG: MimeInfo = MimeInfo::new("mp3", "audio/mpeg");
const MI_MP4: MimeInfo = MimeInfo::new("aac", "audio/mp4");
const MI_3GPP_AUDIO: MimeInfo = MimeInfo::new("aac", "audio/3gpp");
const MI_MS_WMA: MimeInfo = MimeInfo::new("asf", "audio/x-ms-wma");
const MI_FLAC: MimeInfo = MimeInfo::new("flc", "audio/flac");
const MI_WAV: MimeInfo = MimeInfo::new("wav", "audio/x-wav");
const MI_OGG_AUDIO: MimeInfo = MimeInfo::new("ogg", "audio/ogg");
const MI_L16: MimeInfo = MimeInfo::new("pcm", "audio/L16");
const MI_WAVPACK: MimeInfo = MimeInfo::new("wv", "audio/x-wavpack");

const AUDIO_TABLE: &[(&str, MimeInfo)] = &[
    ("mp3", MI_MPEG),
    ("m4a", MI_MP4),
    ("mp4", MI_MP4),
    ("aac", MI_MP4),
    ("m4p", MI_MP4),
    ("3gp", MI_3GPP_AUDIO),
    ("wma", MI_MS_WMA),
    ("asf", MI_MS_WMA),
    ("flac", MI_FLAC),
    ("fla", MI_FLAC),
    ("flc", MI_FLAC),
    ("wav", MI_WAV),
    ("ogg", MI_OGG_AUDIO),
    ("oga", MI_OGG_AUDIO),
    ("pcm", MI_L16),
];

/// Extension returned by [`MimeTable::mime_to_ext`] for anything unrecognized.
pub const FALLBACK_EXTENSION: &str = "dat";

/// Immutable extension/MIME lookup table.
///
/// Built once from [`OptionalFormats`] and then only read, so a single table
/// can be shared by reference between any number of scanning threads.
#[derive(Debug, Clone)]
pub struct MimeTable {
    entries: Vec<(&'static str, MimeInfo)>,
    formats: OptionalFormats,
}

impl MimeTable {
    /// Build the table, adding optional formats that are switched on.
    pub fn new(formats: OptionalFormats) -> Self {
        let mut entries = AUDIO_TABLE.to_vec();
        if formats.wavpack {
            entries.push(("wv", MI_WAVPACK));
        }
        Self { entries, formats }
    }

    /// Build the table from shared configuration.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.formats)
    }

    /// Number of extensions the table recognizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the MIME type for a path's extension.
    ///
    /// Only a dot inside the final path component starts an extension, so
    /// `/a.b/c` has none.
    pub fn ext_to_mime(&self, path: impl AsRef<Path>) -> Option<MimeInfo> {
        let ext = extension_bytes(path.as_ref())?;
        self.entries
            .iter()
            .find(|(key, _)| key.as_bytes().eq_ignore_ascii_case(ext))
            .map(|(_, info)| *info)
    }

    /// Map a MIME type to one representative file extension.
    ///
    /// Several MIME types share an extension and the result need not be the
    /// extension the file originally had. Unknown types map to `"dat"`.
    pub fn mime_to_ext(&self, mime: &str) -> &'static str {
        // Subtype after the six-byte "audio/", "video/" or "image/" prefix.
        let subtype = mime.get(6..).unwrap_or_default();

        match mime.as_bytes().first() {
            Some(b'a') => match subtype {
                "mpeg" => "mp3",
                "mp4" => "m4a",
                "x-ms-wma" => "wma",
                "x-flac" | "flac" => "flac",
                "x-wav" => "wav",
                s if s.starts_with("L16") => "pcm",
                "3gpp" => "3gp",
                "ogg" => "ogg",
                _ if mime == "application/ogg" => "ogg",
                "x-wavpack" if self.formats.wavpack => "wv",
                _ => FALLBACK_EXTENSION,
            },
            Some(b'v') => match subtype {
                "avi" | "divx" | "x-msvideo" => "avi",
                "mpeg" => "mpg",
                "mp4" => "mp4",
                "x-ms-wmv" => "wmv",
                "x-matroska" | "x-mkv" => "mkv",
                "x-flv" => "flv",
                "vnd.dlna.mpeg-tts" => "mpg",
                "quicktime" => "mov",
                "3gpp" => "3gp",
                s if self.formats.tivo && s.starts_with("x-tivo-mpeg") => "TiVo",
                _ => FALLBACK_EXTENSION,
            },
            Some(b'i') => match subtype {
                "jpeg" => "jpg",
                "png" => "png",
                _ => FALLBACK_EXTENSION,
            },
            _ => FALLBACK_EXTENSION,
        }
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new(OptionalFormats::default())
    }
}

/// Bytes after the last `.` of the final path component.
fn extension_bytes(path: &Path) -> Option<&[u8]> {
    let bytes = path.as_os_str().as_encoded_bytes();
    let dot = bytes.iter().rposition(|&b| b == b'.')?;
    if bytes[dot..].iter().any(|&b| is_separator(b as char)) {
        return None;
    }
    Some(&bytes[dot + 1..])
}
