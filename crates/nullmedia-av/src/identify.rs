//! Identification: turn a real media file into a [`MediaInfo`].
//!
//! The file is classified, given a signature, and routed to an extractor:
//!
//! - **PNG**: dimensions straight from the header, no subprocess
//! - **Other images**: `identify`
//! - **Video**: `ffprobe` for dimensions, then for duration
//! - **Audio**: `ffprobe` for duration
//!
//! The extracted values must then satisfy the invariants of their kind or the
//! file is reported as [`Error::UnknownMediaType`].

use crate::command::ToolRunner;
use crate::png::png_dimensions;
use crate::pool::HeaderReaderPool;
use crate::probe::{image_dimensions, media_duration, video_dimensions};
use crate::sniff::{classify, Classification};
use crate::{Error, Result};
use nullmedia_common::{file_signature, validate_signature, MediaInfo, MediaKind};
use std::path::Path;
use std::sync::Arc;

/// Identifies media files.
///
/// Cheap to share across threads; the only mutable state is the header
/// buffer pool, which is internally synchronized.
pub struct Identifier {
    runner: Arc<dyn ToolRunner>,
    pool: HeaderReaderPool,
    sniff: bool,
}

impl Identifier {
    /// Create an identifier that sniffs headers of files with missing or
    /// unknown extensions.
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            runner,
            pool: HeaderReaderPool::new(),
            sniff: true,
        }
    }

    /// Enable or disable header sniffing.
    pub fn with_sniffing(mut self, sniff: bool) -> Self {
        self.sniff = sniff;
        self
    }

    pub fn sniffing(&self) -> bool {
        self.sniff
    }

    pub fn pool(&self) -> &HeaderReaderPool {
        &self.pool
    }

    /// Classify `path` using this identifier's sniff setting.
    pub fn classify(&self, path: &Path) -> Option<Classification> {
        classify(path, self.sniff, &self.pool)
    }

    /// Identify `path`.
    ///
    /// When `signature` is `None` it is derived from the MD5 digest of the
    /// file content. A supplied signature must pass the six-hex-digit rule.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownMediaType`] if the file cannot be classified or its
    ///   extracted values violate its kind's invariants.
    /// - [`Error::Media`] for an invalid signature or a hashing failure.
    /// - Tool, parse and header errors from the extractors, unchanged.
    pub fn identify(&self, path: &Path, signature: Option<&str>) -> Result<MediaInfo> {
        let Classification { kind, ext } = self
            .classify(path)
            .ok_or_else(|| Error::unknown_media_type(path))?;

        let signature = match signature {
            Some(raw) => validate_signature(raw)?,
            None => validate_signature(&file_signature(path)?)?,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), %kind, ext = %ext, "identifying");

        let raw = match kind {
            MediaKind::Image => {
                let (width, height) = self.image_dimensions(path, &ext)?;
                Extracted {
                    width,
                    height,
                    duration: 0,
                }
            }
            MediaKind::Video => {
                let (width, height) = video_dimensions(self.runner.as_ref(), path)?;
                let duration = media_duration(self.runner.as_ref(), path)?;
                Extracted {
                    width,
                    height,
                    duration: i64::from(duration),
                }
            }
            MediaKind::Audio => Extracted {
                width: 0,
                height: 0,
                duration: i64::from(media_duration(self.runner.as_ref(), path)?),
            },
        };

        let (width, height, duration) = raw.validate(kind).ok_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %path.display(), ?raw, "extracted values rejected");
            Error::unknown_media_type(path)
        })?;

        Ok(MediaInfo::new(width, height, duration, &signature, &ext)?)
    }

    fn image_dimensions(&self, path: &Path, ext: &str) -> Result<(i64, i64)> {
        if ext == "png" {
            if let Some((width, height)) = png_dimensions(path, &self.pool)? {
                return Ok((i64::from(width), i64::from(height)));
            }
            // Named .png but not one; let identify figure it out.
        }
        image_dimensions(self.runner.as_ref(), path)
    }
}

/// Values as reported by the extractors, before any range checks.
#[derive(Debug, Clone, Copy)]
struct Extracted {
    width: i64,
    height: i64,
    duration: i64,
}

impl Extracted {
    /// Apply the per-kind invariants, returning `(width, height, duration)`.
    fn validate(self, kind: MediaKind) -> Option<(u32, u32, u32)> {
        match kind {
            MediaKind::Image => Some((positive(self.width)?, positive(self.height)?, 0)),
            MediaKind::Audio => Some((0, 0, positive(self.duration)?)),
            MediaKind::Video => Some((
                positive(self.width)?,
                positive(self.height)?,
                positive(self.duration)?,
            )),
        }
    }
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|&v| v > 0)
}
