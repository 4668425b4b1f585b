//! Single-color clips with a silent audio stream via `ffmpeg`.

use super::audio::{audio_duration_arg, SILENCE, TIMESTAMP_OFFSET};
use crate::command::ToolCommand;
use crate::tools::Tool;
use nullmedia_common::MediaInfo;
use std::path::Path;

/// Seconds to request for the color source of a video.
///
/// Truncated to centiseconds before the offset is applied, so it can differ
/// slightly from the paired audio stream.
///
/// ```
/// use nullmedia_av::synth::video_duration_arg;
///
/// assert_eq!(video_duration_arg(5000), "4.99");
/// assert_eq!(video_duration_arg(1234), "1.22");
/// ```
pub fn video_duration_arg(duration_ms: u32) -> String {
    format!("{:.2}", (duration_ms / 10) as f32 / 100.0 - TIMESTAMP_OFFSET)
}

pub(super) fn command(info: &MediaInfo, out: &Path) -> ToolCommand {
    let color = format!(
        "color=#{}:s={}x{}:d={}",
        info.signature(),
        info.width(),
        info.height(),
        video_duration_arg(info.duration())
    );

    let mut cmd = ToolCommand::new(Tool::Ffmpeg);
    cmd.args_from(["-loglevel", "panic", "-y", "-f", "lavfi", "-i"])
        .arg(color)
        .args_from(["-f", "lavfi", "-i", SILENCE])
        .arg("-t")
        .arg(audio_duration_arg(info.duration()))
        .arg(out);
    cmd
}
