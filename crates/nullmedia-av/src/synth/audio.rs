//! Silent audio tracks via `ffmpeg`'s `anullsrc` source.

use crate::command::ToolCommand;
use crate::tools::Tool;
use nullmedia_common::MediaInfo;
use std::path::Path;

/// Sample rate of every generated silent track.
pub(super) const SILENCE: &str = "anullsrc=sample_rate=128000";

/// Fixed offset the encoder adds to stream timestamps, in seconds.
pub(super) const TIMESTAMP_OFFSET: f32 = 0.011;

/// Seconds to request for an audio stream so that the measured duration
/// comes out at `duration_ms`.
///
/// ```
/// use nullmedia_av::synth::audio_duration_arg;
///
/// assert_eq!(audio_duration_arg(5000), "4.989");
/// assert_eq!(audio_duration_arg(61500), "61.489");
/// ```
pub fn audio_duration_arg(duration_ms: u32) -> String {
    format!("{:.3}", duration_ms as f32 / 1000.0 - TIMESTAMP_OFFSET)
}

pub(super) fn command(info: &MediaInfo, out: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(Tool::Ffmpeg);
    cmd.args_from(["-loglevel", "fatal", "-y", "-f", "lavfi", "-i", SILENCE])
        .arg("-t")
        .arg(audio_duration_arg(info.duration()))
        .arg("-metadata")
        .arg(format!("title={}", info.signature()))
        .arg(out);
    cmd
}
