//! Width/height extraction via `identify` (images) and `ffprobe` (video).

use crate::command::{ToolCommand, ToolRunner};
use crate::tools::Tool;
use crate::{Error, Result};
use std::path::Path;

/// Read image dimensions with ImageMagick `identify`.
///
/// The tool prints `<width>\n<height>\n`.
pub fn image_dimensions(runner: &dyn ToolRunner, path: &Path) -> Result<(i64, i64)> {
    let mut cmd = ToolCommand::new(Tool::Identify);
    cmd.arg("-format").arg("%[fx:w]\n%[fx:h]\n").arg(path);

    let output = runner.run(&cmd)?;
    parse_dimensions(&output)
        .map_err(|message| Error::parse_error(Tool::Identify.name(), message, &output))
}

/// Read video dimensions with `ffprobe`.
///
/// Only the first two lines matter: width and height of the first stream
/// that reports them.
pub fn video_dimensions(runner: &dyn ToolRunner, path: &Path) -> Result<(i64, i64)> {
    let mut cmd = ToolCommand::new(Tool::Ffprobe);
    cmd.args_from([
        "-v",
        "quiet",
        "-show_entries",
        "stream=width,height",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ])
    .arg(path);

    let output = runner.run(&cmd)?;
    parse_dimensions(&output)
        .map_err(|message| Error::parse_error(Tool::Ffprobe.name(), message, &output))
}

/// Parse `"<width>\n<height>\n..."`.
///
/// Values are returned signed and unchecked; rejecting zero or negative sizes
/// is up to the caller.
///
/// ```
/// use nullmedia_av::probe::parse_dimensions;
///
/// assert_eq!(parse_dimensions(b"1024\n768\n"), Ok((1024, 768)));
/// assert!(parse_dimensions(b"1024\n768").is_err());
/// ```
pub fn parse_dimensions(output: &[u8]) -> std::result::Result<(i64, i64), String> {
    let width_end = output
        .iter()
        .position(|&b| b == b'\n')
        .filter(|&i| i > 0)
        .ok_or("missing width line")?;

    let rest = &output[width_end + 1..];
    let height_end = rest
        .iter()
        .position(|&b| b == b'\n')
        .filter(|&i| i > 0)
        .ok_or("missing height line")?;

    let width = parse_int(&output[..width_end])?;
    let height = parse_int(&rest[..height_end])?;
    Ok((width, height))
}

fn parse_int(field: &[u8]) -> std::result::Result<i64, String> {
    let text = std::str::from_utf8(field).map_err(|e| e.to_string())?;
    text.trim_end_matches('\r')
        .parse()
        .map_err(|e| format!("{text:?} is not an integer: {e}"))
}
