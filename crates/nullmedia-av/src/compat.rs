//! End-to-end self-check of the installed tools.
//!
//! For every known extension a sample placeholder is synthesized, sniffed and
//! identified again, so that a missing codec or a tool that rounds durations
//! differently shows up before real files are replaced.

use crate::identify::Identifier;
use crate::sniff::guess_extension;
use crate::synth::Synthesizer;
use crate::Result;
use nullmedia_common::{MediaInfo, MediaKind};
use std::fs;
use std::path::Path;

/// Signature used for every sample.
pub const SAMPLE_SIGNATURE: &str = "123456";

/// Outcome of a single extension's round trip.
#[derive(Debug)]
pub struct CompatEntry {
    pub ext: &'static str,
    pub kind: MediaKind,
    pub outcome: Result<CompatOutcome>,
}

/// What came back from a successful round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatOutcome {
    /// Extension guessed from the synthesized file's header.
    pub sniffed: Option<&'static str>,
    pub identified: MediaInfo,
    /// Measured minus requested duration, in milliseconds.
    pub margin_ms: i64,
}

/// The sample record synthesized for `ext`.
pub fn sample_info(kind: MediaKind, ext: &str) -> Result<MediaInfo> {
    let (width, height, duration) = match kind {
        MediaKind::Image => (32, 32, 0),
        MediaKind::Audio => (0, 0, 5000),
        MediaKind::Video => (128, 128, 5000),
    };
    Ok(MediaInfo::new(width, height, duration, SAMPLE_SIGNATURE, ext)?)
}

/// Round-trip every known extension through `export_dir`.
///
/// Failures are recorded per extension; `report` sees each entry as soon as
/// it is done.
pub fn check_compatibility(
    identifier: &Identifier,
    synthesizer: &Synthesizer,
    export_dir: &Path,
    mut report: impl FnMut(&CompatEntry),
) -> Vec<CompatEntry> {
    let mut entries = Vec::new();
    for kind in MediaKind::ALL {
        for &ext in kind.extensions() {
            let entry = CompatEntry {
                ext,
                kind,
                outcome: round_trip(identifier, synthesizer, export_dir, kind, ext),
            };

            #[cfg(feature = "tracing")]
            {
                if let Err(e) = &entry.outcome {
                    tracing::warn!(ext, error = %e, "compatibility check failed");
                }
            }

            report(&entry);
            entries.push(entry);
        }
    }
    entries
}

fn round_trip(
    identifier: &Identifier,
    synthesizer: &Synthesizer,
    export_dir: &Path,
    kind: MediaKind,
    ext: &str,
) -> Result<CompatOutcome> {
    let sample = sample_info(kind, ext)?;
    let path = export_dir.join(format!("sample.{ext}"));

    let result = synthesizer.synthesize(&sample, &path).and_then(|()| {
        let sniffed = guess_extension(&path, identifier.pool());
        let identified = identifier.identify(&path, Some(sample.signature()))?;
        Ok(CompatOutcome {
            sniffed,
            margin_ms: i64::from(identified.duration()) - i64::from(sample.duration()),
            identified,
        })
    });

    if path.exists() {
        fs::remove_file(&path)?;
    }
    result
}
