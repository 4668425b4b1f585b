//! Media classification by extension, with magic-byte sniffing as fallback.

use crate::pool::HeaderReaderPool;
use nullmedia_common::kind::path_extension;
use nullmedia_common::MediaKind;
use std::path::Path;

/// A header predicate for one extension.
pub type Matcher = fn(&[u8]) -> bool;

/// Image matchers, tried first. Aliases share a matcher, so the earliest
/// entry is the one sniffing reports.
const IMAGE_MATCHERS: &[(&str, Matcher)] = &[
    ("jpg", is_jpeg),
    ("jpeg", is_jpeg),
    ("jpe", is_jpeg),
    ("jfif", is_jpeg),
    ("png", is_png),
    ("gif", is_gif),
    ("tif", is_tiff),
    ("tiff", is_tiff),
    ("bmp", is_bmp),
    ("ico", is_ico),
];

/// Video matchers, tried after images.
const VIDEO_MATCHERS: &[(&str, Matcher)] = &[
    ("mp4", is_mp4),
    ("m4v", is_m4v),
    ("mkv", is_mkv),
    ("mov", is_mov),
    ("avi", is_avi),
    ("wmv", is_asf),
    ("mpeg", is_mpeg),
    ("mpg", is_mpeg),
    ("flv", is_flv),
    ("asf", is_asf),
];

/// Audio matchers, tried last.
const AUDIO_MATCHERS: &[(&str, Matcher)] = &[
    ("mp3", is_mp3),
    ("m4a", is_m4a),
    ("ogg", is_ogg),
    ("flac", is_flac),
    ("wav", is_wav),
    ("aac", is_aac),
    ("wma", is_asf),
    ("caf", is_caf),
];

/// Header of every ASF container (WMV, WMA, ASF).
const ASF_GUID: [u8; 16] = [
    0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

/// MP4 major brands accepted as generic `mp4`.
const MP4_BRANDS: &[&[u8; 4]] = &[
    b"avc1", b"dash", b"iso2", b"iso3", b"iso4", b"iso5", b"iso6", b"isom", b"mmp4", b"mp41",
    b"mp42", b"mp4v", b"mp71", b"MSNV", b"NDAS", b"NDSC", b"NDSH", b"NDSM", b"NDSP", b"NDSS",
    b"NDXC", b"NDXH", b"NDXM", b"NDXP", b"NDXS", b"F4V ", b"F4P ",
];

/// Result of classifying a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: MediaKind,
    /// Normalized extension, from the path or from sniffing.
    pub ext: String,
}

/// Classify `path` by its extension, sniffing the header when the extension
/// is missing or unknown and `sniff` is set.
///
/// Returns `None` when no kind can be determined; callers treat that as a
/// final answer.
pub fn classify(path: &Path, sniff: bool, pool: &HeaderReaderPool) -> Option<Classification> {
    if let Some(ext) = path_extension(path) {
        if let Some(kind) = MediaKind::from_extension(&ext) {
            return Some(Classification { kind, ext });
        }
    }

    if !sniff {
        return None;
    }

    let ext = guess_extension(path, pool)?;
    let kind = MediaKind::from_extension(ext)?;
    Some(Classification {
        kind,
        ext: ext.to_string(),
    })
}

/// Sniff the header of `path` and return the extension it looks like.
///
/// Unreadable files sniff as nothing.
pub fn guess_extension(path: &Path, pool: &HeaderReaderPool) -> Option<&'static str> {
    let header = match pool.peek_file(path) {
        Ok(header) => header,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %path.display(), error = %_e, "cannot sniff header");
            return None;
        }
    };
    sniff_header(&header)
}

/// Match a header against the image, video and audio matchers, in that
/// order. The first hit wins.
///
/// ```
/// use nullmedia_av::sniff::sniff_header;
///
/// assert_eq!(sniff_header(b"\x89PNG\r\n\x1a\n"), Some("png"));
/// assert_eq!(sniff_header(b"\xFF\xD8\xFF\xE0"), Some("jpg"));
/// assert_eq!(sniff_header(b"plain text"), None);
/// ```
pub fn sniff_header(header: &[u8]) -> Option<&'static str> {
    IMAGE_MATCHERS
        .iter()
        .chain(VIDEO_MATCHERS)
        .chain(AUDIO_MATCHERS)
        .find(|(_, matcher)| matcher(header))
        .map(|(ext, _)| canonical_extension(*ext))
}

/// Fold JPEG aliases into `jpg`.
pub fn canonical_extension(ext: &str) -> &str {
    match ext {
        "jpe" | "jpeg" => "jpg",
        other => other,
    }
}

/// The matcher table for a kind, in sniffing order within the kind.
pub fn matchers(kind: MediaKind) -> &'static [(&'static str, Matcher)] {
    match kind {
        MediaKind::Image => IMAGE_MATCHERS,
        MediaKind::Audio => AUDIO_MATCHERS,
        MediaKind::Video => VIDEO_MATCHERS,
    }
}

fn is_jpeg(buf: &[u8]) -> bool {
    buf.starts_with(&[0xFF, 0xD8, 0xFF])
}

pub(crate) fn is_png(buf: &[u8]) -> bool {
    buf.starts_with(&[0x89, 0x50, 0x4E, 0x47])
}

fn is_gif(buf: &[u8]) -> bool {
    buf.starts_with(b"GIF")
}

fn is_tiff(buf: &[u8]) -> bool {
    buf.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || buf.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
}

fn is_bmp(buf: &[u8]) -> bool {
    buf.starts_with(b"BM")
}

fn is_ico(buf: &[u8]) -> bool {
    buf.starts_with(&[0x00, 0x00, 0x01, 0x00])
}

/// ISO base media `ftyp` box major brand, if present.
fn ftyp_brand(buf: &[u8]) -> Option<&[u8]> {
    (buf.len() >= 12 && &buf[4..8] == b"ftyp").then(|| &buf[8..12])
}

fn is_mp4(buf: &[u8]) -> bool {
    ftyp_brand(buf).is_some_and(|brand| MP4_BRANDS.iter().any(|b| &b[..] == brand))
}

fn is_m4v(buf: &[u8]) -> bool {
    ftyp_brand(buf).is_some_and(|brand| brand.starts_with(b"M4V"))
}

fn is_m4a(buf: &[u8]) -> bool {
    ftyp_brand(buf).is_some_and(|brand| brand.starts_with(b"M4A"))
}

fn is_mov(buf: &[u8]) -> bool {
    if ftyp_brand(buf) == Some(&b"qt  "[..]) {
        return true;
    }
    buf.len() >= 8 && matches!(&buf[4..8], b"moov" | b"mdat" | b"wide" | b"free" | b"skip")
}

fn is_mkv(buf: &[u8]) -> bool {
    buf.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) && buf.windows(8).any(|w| w == b"matroska")
}

fn is_avi(buf: &[u8]) -> bool {
    buf.len() >= 12 && buf.starts_with(b"RIFF") && &buf[8..12] == b"AVI "
}

fn is_asf(buf: &[u8]) -> bool {
    buf.starts_with(&ASF_GUID)
}

fn is_mpeg(buf: &[u8]) -> bool {
    buf.len() >= 4 && buf.starts_with(&[0x00, 0x00, 0x01]) && (0xB0..=0xBF).contains(&buf[3])
}

fn is_flv(buf: &[u8]) -> bool {
    buf.starts_with(&[0x46, 0x4C, 0x56, 0x01])
}

fn is_mp3(buf: &[u8]) -> bool {
    buf.starts_with(b"ID3")
        || (buf.len() >= 2 && buf[0] == 0xFF && matches!(buf[1], 0xFB | 0xF3 | 0xF2))
}

fn is_ogg(buf: &[u8]) -> bool {
    buf.starts_with(b"OggS")
}

fn is_flac(buf: &[u8]) -> bool {
    buf.starts_with(b"fLaC")
}

fn is_wav(buf: &[u8]) -> bool {
    buf.len() >= 12 && buf.starts_with(b"RIFF") && &buf[8..12] == b"WAVE"
}

fn is_aac(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0] == 0xFF && matches!(buf[1], 0xF1 | 0xF9)
}

fn is_caf(buf: &[u8]) -> bool {
    buf.starts_with(&[b'c', b'a', b'f', b'f', 0x00, 0x01])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PNG_HEAD: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
        b'R', 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x08,
    ];

    fn with_ftyp(brand: &[u8; 4]) -> Vec<u8> {
        let mut buf = vec![0x00, 0x00, 0x00, 0x18];
        buf.extend_from_slice(b"ftyp");
        buf.extend_from_slice(brand);
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf
    }

    #[test]
    fn test_sniff_images() {
        assert_eq!(sniff_header(PNG_HEAD), Some("png"));
        assert_eq!(sniff_header(&[0xFF, 0xD8, 0xFF, 0xDB]), Some("jpg"));
        assert_eq!(sniff_header(b"GIF89a"), Some("gif"));
        assert_eq!(sniff_header(&[0x49, 0x49, 0x2A, 0x00]), Some("tif"));
        assert_eq!(sniff_header(&[0x4D, 0x4D, 0x00, 0x2A]), Some("tif"));
        assert_eq!(sniff_header(b"BM\x36\x00"), Some("bmp"));
        assert_eq!(sniff_header(&[0x00, 0x00, 0x01, 0x00, 0x01]), Some("ico"));
    }

    #[test]
    fn test_sniff_video() {
        assert_eq!(sniff_header(&with_ftyp(b"isom")), Some("mp4"));
        assert_eq!(sniff_header(&with_ftyp(b"M4V ")), Some("m4v"));
        assert_eq!(sniff_header(&with_ftyp(b"qt  ")), Some("mov"));

        let mut mkv = vec![0x1A, 0x45, 0xDF, 0xA3, 0x93, 0x42, 0x82, 0x88];
        mkv.extend_from_slice(b"matroska");
        assert_eq!(sniff_header(&mkv), Some("mkv"));

        assert_eq!(sniff_header(b"RIFF\x00\x00\x00\x00AVI LIST"), Some("avi"));
        assert_eq!(sniff_header(&ASF_GUID), Some("wmv"));
        assert_eq!(sniff_header(&[0x00, 0x00, 0x01, 0xBA, 0x44]), Some("mpeg"));
        assert_eq!(sniff_header(b"FLV\x01\x05"), Some("flv"));
    }

    #[test]
    fn test_sniff_audio() {
        assert_eq!(sniff_header(b"ID3\x04\x00"), Some("mp3"));
        assert_eq!(sniff_header(&[0xFF, 0xFB, 0x90, 0x00]), Some("mp3"));
        assert_eq!(sniff_header(&with_ftyp(b"M4A ")), Some("m4a"));
        assert_eq!(sniff_header(b"OggS\x00\x02"), Some("ogg"));
        assert_eq!(sniff_header(b"fLaC\x00\x00"), Some("flac"));
        assert_eq!(sniff_header(b"RIFF\x24\x00\x00\x00WAVEfmt "), Some("wav"));
        assert_eq!(sniff_header(&[0xFF, 0xF1, 0x50, 0x80]), Some("aac"));
        assert_eq!(sniff_header(b"caff\x00\x01\x00\x00"), Some("caf"));
    }

    #[test]
    fn test_sniff_unknown() {
        assert_eq!(sniff_header(b""), None);
        assert_eq!(sniff_header(b"hello world"), None);
        assert_eq!(sniff_header(&with_ftyp(b"heic")), None);
        assert_eq!(sniff_header(b"RIFF\x00\x00\x00\x00WEBP"), None);
    }

    #[test]
    fn test_sniffed_extensions_are_known() {
        for kind in MediaKind::ALL {
            for (ext, _) in matchers(kind) {
                assert_eq!(MediaKind::from_extension(ext), Some(kind), "{ext}");
            }
        }
    }

    #[test]
    fn test_canonical_extension() {
        assert_eq!(canonical_extension("jpe"), "jpg");
        assert_eq!(canonical_extension("jpeg"), "jpg");
        assert_eq!(canonical_extension("jfif"), "jfif");
        assert_eq!(canonical_extension("png"), "png");
    }

    #[test]
    fn test_classify_by_extension() {
        let pool = HeaderReaderPool::new();
        let c = classify(Path::new("/nonexistent/holiday.JPEG"), false, &pool).unwrap();
        assert_eq!(c.kind, MediaKind::Image);
        assert_eq!(c.ext, "jpeg");

        let c = classify(Path::new("/nonexistent/song.flac"), true, &pool).unwrap();
        assert_eq!(c.kind, MediaKind::Audio);
    }

    #[test]
    fn test_classify_sniffs_missing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noext");
        fs::write(&path, PNG_HEAD).unwrap();

        let pool = HeaderReaderPool::new();
        let c = classify(&path, true, &pool).unwrap();
        assert_eq!(c.kind, MediaKind::Image);
        assert_eq!(c.ext, "png");

        assert_eq!(classify(&path, false, &pool), None);
    }

    #[test]
    fn test_classify_sniffs_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.bin");
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();

        let pool = HeaderReaderPool::new();
        let c = classify(&path, true, &pool).unwrap();
        assert_eq!(c.ext, "jpg");
        assert_eq!(classify(&path, false, &pool), None);
    }

    #[test]
    fn test_classify_unreadable_or_unrecognized() {
        let pool = HeaderReaderPool::new();
        assert_eq!(classify(Path::new("/nonexistent/blob"), true, &pool), None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes");
        fs::write(&path, b"just some text").unwrap();
        assert_eq!(classify(&path, true, &pool), None);
    }
}
