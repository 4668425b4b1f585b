//! Media kinds and the extension tables that define them.
//!
//! Every supported extension belongs to exactly one of the image, audio and
//! video tables. Lookups take the normalized lowercase extension without a
//! leading dot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "jpe", "jfif", "png", "gif", "tif", "tiff", "bmp", "ico",
];

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "ogg", "flac", "wav", "aac", "wma", "caf"];

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mkv", "mov", "avi", "wmv", "mpeg", "mpg", "flv", "asf",
];

/// The coarse classification of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

impl MediaKind {
    /// All kinds, in table order.
    pub const ALL: [MediaKind; 3] = [MediaKind::Image, MediaKind::Audio, MediaKind::Video];

    /// Look up the kind of a normalized (lowercase, dot-less) extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use nullmedia_common::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_extension("png"), Some(MediaKind::Image));
    /// assert_eq!(MediaKind::from_extension("flac"), Some(MediaKind::Audio));
    /// assert_eq!(MediaKind::from_extension("PNG"), None);
    /// assert_eq!(MediaKind::from_extension("txt"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext))
    }

    /// The extension table for this kind.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => IMAGE_EXTENSIONS,
            MediaKind::Audio => AUDIO_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        })
    }
}

/// Check whether a normalized extension is a supported image.
pub fn is_image(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

/// Check whether a normalized extension is a supported audio format.
pub fn is_audio(ext: &str) -> bool {
    AUDIO_EXTENSIONS.contains(&ext)
}

/// Check whether a normalized extension is a supported video format.
pub fn is_video(ext: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&ext)
}

/// Extract the lowercase extension of a path, if it has a non-empty one.
///
/// ```
/// use nullmedia_common::kind::path_extension;
/// use std::path::Path;
///
/// assert_eq!(path_extension(Path::new("/tmp/Clip.MP4")).as_deref(), Some("mp4"));
/// assert_eq!(path_extension(Path::new("/tmp/clip")), None);
/// ```
pub fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        for ext in ["jpg", "jpeg", "jpe", "jfif", "png", "gif", "tif", "tiff", "bmp", "ico"] {
            assert_eq!(MediaKind::from_extension(ext), Some(MediaKind::Image), "{ext}");
        }
        for ext in ["mp3", "m4a", "ogg", "flac", "wav", "aac", "wma", "caf"] {
            assert_eq!(MediaKind::from_extension(ext), Some(MediaKind::Audio), "{ext}");
        }
        for ext in ["mp4", "m4v", "mkv", "mov", "avi", "wmv", "mpeg", "mpg", "flv", "asf"] {
            assert_eq!(MediaKind::from_extension(ext), Some(MediaKind::Video), "{ext}");
        }

        assert_eq!(MediaKind::from_extension(""), None);
        assert_eq!(MediaKind::from_extension("webm"), None);
        assert_eq!(MediaKind::from_extension("Mp4"), None);
    }

    #[test]
    fn test_tables_are_disjoint() {
        for kind in MediaKind::ALL {
            for ext in kind.extensions() {
                let hits = [is_image(ext), is_audio(ext), is_video(ext)]
                    .iter()
                    .filter(|hit| **hit)
                    .count();
                assert_eq!(hits, 1, "{ext} appears in {hits} tables");
            }
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(MediaKind::Image.extensions().len(), 10);
        assert_eq!(MediaKind::Audio.extensions().len(), 8);
        assert_eq!(MediaKind::Video.extensions().len(), 10);
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(path_extension(Path::new("movie.MKV")).as_deref(), Some("mkv"));
        assert_eq!(path_extension(Path::new("a/b/photo.1080p.Jpeg")).as_deref(), Some("jpeg"));
        assert_eq!(path_extension(Path::new(".hidden")), None);
        assert_eq!(path_extension(Path::new("trailing.")), None);
        assert_eq!(path_extension(Path::new("")), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(MediaKind::Image.to_string(), "image");
        assert_eq!(MediaKind::Audio.to_string(), "audio");
        assert_eq!(MediaKind::Video.to_string(), "video");
    }
}
