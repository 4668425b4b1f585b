//! # nullmedia-av
//!
//! Media identification and null-media synthesis.
//!
//! This crate provides functionality for:
//! - Classifying files as image, audio or video by extension or magic bytes
//! - Reading PNG dimensions directly from the file header
//! - Extracting dimensions and durations with `identify` and `ffprobe`
//! - Writing placeholder files of the same shape with `convert` and `ffmpeg`
//!
//! External programs are reached only through the [`ToolRunner`] trait;
//! [`SystemRunner`] spawns the real tools.
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use nullmedia_av::{identify, shrink};
//!
//! let info = identify("/path/to/holiday.mp4")?;
//! println!("{info}"); // e.g. 1920x1080x61500x9e107d.mp4
//! shrink(&info, "/tmp/holiday.mp4")?;
//! # Ok::<(), nullmedia_av::Error>(())
//! ```

pub mod command;
pub mod compat;
mod error;
pub mod identify;
pub mod png;
pub mod pool;
pub mod probe;
pub mod sniff;
pub mod synth;
pub mod tools;

// Re-exports
pub use command::{SystemRunner, ToolCommand, ToolRunner};
pub use compat::{check_compatibility, CompatEntry, CompatOutcome};
pub use error::{Error, Result};
pub use identify::Identifier;
pub use nullmedia_common::{MediaInfo, MediaKind};
pub use pool::{HeaderReader, HeaderReaderPool, HEADER_WINDOW};
pub use sniff::{classify, Classification};
pub use synth::Synthesizer;
pub use tools::{check_tool, check_tools, require_tool, Tool, ToolInfo, ToolPaths};

use std::path::Path;
use std::sync::Arc;

/// Identify a file with the tools found on `PATH`, deriving its signature
/// from the file content.
pub fn identify<P: AsRef<Path>>(path: P) -> Result<MediaInfo> {
    Identifier::new(Arc::new(SystemRunner::default())).identify(path.as_ref(), None)
}

/// Synthesize the null counterpart of `info` at `output` with the tools found
/// on `PATH`.
pub fn shrink<P: AsRef<Path>>(info: &MediaInfo, output: P) -> Result<()> {
    Synthesizer::new(Arc::new(SystemRunner::default())).synthesize(info, output.as_ref())
}
