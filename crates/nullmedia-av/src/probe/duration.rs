//! Playback duration via `ffprobe`.

use crate::command::{ToolCommand, ToolRunner};
use crate::tools::Tool;
use crate::{Error, Result};
use std::path::Path;

/// Read the container duration of an audio or video file, in milliseconds.
pub fn media_duration(runner: &dyn ToolRunner, path: &Path) -> Result<u32> {
    let mut cmd = ToolCommand::new(Tool::Ffprobe);
    cmd.args_from([
        "-v",
        "quiet",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ])
    .arg(path);

    let output = runner.run(&cmd)?;
    parse_duration(&output)
        .map_err(|message| Error::parse_error(Tool::Ffprobe.name(), message, &output))
}

/// Parse a `"<seconds>\n"` line into whole milliseconds, truncating.
///
/// Seconds are read at single precision, matching what the synthesizer
/// writes.
///
/// ```
/// use nullmedia_av::probe::parse_duration;
///
/// assert_eq!(parse_duration(b"5.000000\n"), Ok(5000));
/// assert_eq!(parse_duration(b"0.0015\n"), Ok(1));
/// assert!(parse_duration(b"5.000000").is_err());
/// ```
pub fn parse_duration(output: &[u8]) -> std::result::Result<u32, String> {
    let end = output
        .iter()
        .position(|&b| b == b'\n')
        .ok_or("missing newline after duration")?;

    let text = std::str::from_utf8(&output[..end]).map_err(|e| e.to_string())?;
    let secs: f32 = text
        .trim()
        .parse()
        .map_err(|e| format!("{text:?} is not a number of seconds: {e}"))?;

    if !secs.is_finite() {
        return Err(format!("{text:?} is not a finite duration"));
    }

    Ok((f64::from(secs) * 1000.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(b"61.500000\n"), Ok(61500));
        assert_eq!(parse_duration(b"12\n"), Ok(12000));
        assert_eq!(parse_duration(b"3.2\r\nignored\n"), Ok(3200));
    }

    #[test]
    fn test_parse_duration_truncates() {
        assert_eq!(parse_duration(b"0.0009\n"), Ok(0));
        assert_eq!(parse_duration(b"1.9999\n"), Ok(1999));
    }

    #[test]
    fn test_parse_duration_failures() {
        for output in [
            &b""[..],
            b"5.0",
            b"\n",
            b"N/A\n",
            b"five\n",
            b"inf\n",
        ] {
            assert!(parse_duration(output).is_err(), "{output:?}");
        }
    }

    #[test]
    fn test_media_duration_invokes_ffprobe() {
        let runner = ScriptedRunner::new().respond("5.000000\n");
        let ms = media_duration(&runner, Path::new("/media/song.flac")).unwrap();
        assert_eq!(ms, 5000);
        assert_eq!(runner.calls()[0].tool(), Tool::Ffprobe);
        assert_eq!(
            runner.call_args(0),
            [
                "-v",
                "quiet",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
                "/media/song.flac",
            ]
        );
    }

    #[test]
    fn test_media_duration_parse_failure() {
        let runner = ScriptedRunner::new().respond("N/A\n");
        let err = media_duration(&runner, Path::new("a.wav")).unwrap_err();
        assert!(matches!(err, Error::ParseError { ref output, .. } if output == "N/A\n"));
    }
}
