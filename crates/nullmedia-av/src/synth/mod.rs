//! Null-media synthesis.
//!
//! A [`Synthesizer`] takes a decoded [`MediaInfo`] and writes a placeholder
//! with the same kind, dimensions and duration. The signature doubles as the
//! fill color (images, video) or the title tag (audio), so a placeholder can
//! be traced back to its original.

mod audio;
mod image;
mod video;

pub use audio::audio_duration_arg;
pub use video::video_duration_arg;

use crate::command::{ToolCommand, ToolRunner};
use crate::{Error, Result};
use nullmedia_common::{MediaInfo, MediaKind};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes null media through external generation tools.
pub struct Synthesizer {
    runner: Arc<dyn ToolRunner>,
}

impl Synthesizer {
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self { runner }
    }

    /// Build the generation command for `info`, writing to `out`.
    ///
    /// Returns `None` for extensions with no generation rule.
    pub fn command(info: &MediaInfo, out: &Path) -> Option<ToolCommand> {
        let cmd = match info.kind()? {
            MediaKind::Image => image::command(info, out),
            MediaKind::Audio => audio::command(info, out),
            MediaKind::Video => video::command(info, out),
        };
        Some(cmd)
    }

    /// Synthesize `info` into `output`, replacing anything already there.
    ///
    /// The tool writes to `<output>.<ext>` so that it picks the container
    /// from the extension; the result is then renamed onto `output`.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsupported`] if `info` has no generation rule or the tool
    ///   exited cleanly without producing a file.
    /// - [`Error::ToolFailed`] / [`Error::ToolNotFound`] from the runner.
    /// - [`Error::Io`] if the staged file cannot be moved into place.
    pub fn synthesize(&self, info: &MediaInfo, output: &Path) -> Result<()> {
        let staged = staged_path(output, info.ext());
        let cmd =
            Self::command(info, &staged).ok_or_else(|| Error::Unsupported(info.to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%info, output = %output.display(), "synthesizing null media");

        if let Err(e) = self.runner.run(&cmd) {
            let _ = fs::remove_file(&staged);
            return Err(e);
        }

        if !staged.is_file() {
            #[cfg(feature = "tracing")]
            tracing::warn!(%info, staged = %staged.display(), "generation produced no file");
            return Err(Error::Unsupported(info.to_string()));
        }

        fs::rename(&staged, output)?;
        Ok(())
    }
}

/// `output` with `.<ext>` appended, keeping any existing extension.
fn staged_path(output: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
