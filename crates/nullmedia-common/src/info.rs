//! The media metadata record and its canonical string form.
//!
//! A [`MediaInfo`] serializes as `<width>x<height>x<duration>x<signature>.<ext>`,
//! e.g. `1920x1080x61500x9e107d.mp4`. Callers use that string as a filename
//! suffix or sidecar value and later decode it to synthesize a null copy.

use crate::kind::MediaKind;
use crate::signature::validate_signature;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Dimensions, duration and identity of a media file.
///
/// Values are immutable once built; see [`MediaInfo::new`] and the
/// [`FromStr`] impl.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MediaInfo {
    width: u32,
    height: u32,
    /// Playback duration in milliseconds.
    duration: u32,
    signature: String,
    ext: String,
}

impl MediaInfo {
    /// Build a record, validating the signature and lowercasing `ext`.
    ///
    /// Longer signatures are cut to their first six characters. An empty
    /// extension is a [`Error::MalformedString`].
    pub fn new(
        width: u32,
        height: u32,
        duration: u32,
        signature: &str,
        ext: &str,
    ) -> Result<Self> {
        let signature = validate_signature(signature)?;
        if ext.is_empty() {
            return Err(Error::malformed(format!(
                "{width}x{height}x{duration}x{signature}.: empty extension"
            )));
        }

        Ok(Self {
            width,
            height,
            duration,
            signature,
            ext: ext.to_lowercase(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Duration in milliseconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// Kind of this record according to its extension.
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_extension(&self.ext)
    }
}

impl fmt::Display for MediaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}x{}.{}",
            self.width, self.height, self.duration, self.signature, self.ext
        )
    }
}

impl FromStr for MediaInfo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bounds = field_bounds(s).ok_or_else(|| Error::malformed(s))?;

        let width = parse_field(s, &s[..bounds[0]])?;
        let height = parse_field(s, &s[bounds[0] + 1..bounds[1]])?;
        let duration = parse_field(s, &s[bounds[1] + 1..bounds[2]])?;
        let signature = validate_signature(&s[bounds[2] + 1..bounds[3]])
            .map_err(|_| Error::malformed(format!("{s}: bad signature field")))?;

        Ok(Self {
            width,
            height,
            duration,
            signature,
            ext: s[bounds[3] + 1..].to_lowercase(),
        })
    }
}

/// Locate the three `x` separators and the `.` that follows the third one.
///
/// Returns `None` unless every field between separators is non-empty and
/// something follows the final `.`.
fn field_bounds(s: &str) -> Option<[usize; 4]> {
    let height = s.find('x')?;
    let duration = height + 1 + s[height + 1..].find('x')?;
    let signature = duration + 1 + s[duration + 1..].find('x')?;
    let ext = signature + 1 + s[signature + 1..].find('.')?;

    let ordered = height > 0
        && duration > height + 1
        && signature > duration + 1
        && ext > signature + 1
        && s.len() > ext + 1;
    ordered.then_some([height, duration, signature, ext])
}

fn parse_field(s: &str, field: &str) -> Result<u32> {
    field
        .parse()
        .map_err(|e| Error::malformed(format!("{s}: field {field:?}: {e}")))
}
