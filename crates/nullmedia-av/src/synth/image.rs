//! Blank canvases via ImageMagick `convert`.

use crate::command::ToolCommand;
use crate::tools::Tool;
use nullmedia_common::MediaInfo;
use std::path::Path;

/// `convert -size WxH xc:#<signature> <out>`
pub(super) fn command(info: &MediaInfo, out: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(Tool::Convert);
    cmd.arg("-size")
        .arg(format!("{}x{}", info.width(), info.height()))
        .arg(format!("xc:#{}", info.signature()))
        .arg(out);
    cmd
}
