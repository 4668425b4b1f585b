//! External tool detection and management.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The external programs nullmedia drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// ffmpeg, used to generate silent audio and video.
    Ffmpeg,
    /// ffprobe, used to read video dimensions and durations.
    Ffprobe,
    /// ImageMagick `identify`, used to read image dimensions.
    Identify,
    /// ImageMagick `convert`, used to draw blank canvases.
    Convert,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Ffmpeg, Tool::Ffprobe, Tool::Identify, Tool::Convert];

    /// Executable name looked up on `PATH`.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Ffmpeg => "ffmpeg",
            Tool::Ffprobe => "ffprobe",
            Tool::Identify => "identify",
            Tool::Convert => "convert",
        }
    }

    fn version_arg(self) -> &'static str {
        match self {
            Tool::Ffmpeg | Tool::Ffprobe => "-version",
            Tool::Identify | Tool::Convert => "--version",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional per-tool executable overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub identify: Option<PathBuf>,
    pub convert: Option<PathBuf>,
}

impl ToolPaths {
    /// The configured override for `tool`, if any.
    pub fn get(&self, tool: Tool) -> Option<&Path> {
        match tool {
            Tool::Ffmpeg => self.ffmpeg.as_deref(),
            Tool::Ffprobe => self.ffprobe.as_deref(),
            Tool::Identify => self.identify.as_deref(),
            Tool::Convert => self.convert.as_deref(),
        }
    }

    /// Resolve the program to spawn for `tool`.
    ///
    /// An existing configured path wins, then a `PATH` lookup. When neither
    /// finds anything the bare name is returned so that spawning reports
    /// [`Error::ToolNotFound`].
    pub fn program(&self, tool: Tool) -> PathBuf {
        get_tool_path(tool.name(), self.get(tool)).unwrap_or_else(|_| PathBuf::from(tool.name()))
    }
}

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// # Example
///
/// ```no_run
/// use nullmedia_av::check_tool;
///
/// let info = check_tool("ffprobe");
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    check_tool_with_arg(name, "--version")
}

/// Check if a tool is available using a custom version argument.
pub fn check_tool_with_arg(name: &str, version_arg: &str) -> ToolInfo {
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: which::which(name).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check every tool nullmedia uses, honoring configured overrides.
pub fn check_tools(paths: &ToolPaths) -> Vec<ToolInfo> {
    Tool::ALL
        .iter()
        .map(|&tool| {
            let program = paths.program(tool);
            let mut info = check_tool_with_arg(&program.to_string_lossy(), tool.version_arg());
            info.name = tool.name().to_string();
            if info.available && info.path.is_none() {
                info.path = Some(program);
            }
            info
        })
        .collect()
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    require_tool(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool("nonexistent_tool_12345");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_require_missing_tool() {
        let err = require_tool("nonexistent_tool_12345").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool } if tool == "nonexistent_tool_12345"));
    }

    #[test]
    fn test_configured_path_wins_when_present() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let paths = ToolPaths {
            ffprobe: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(paths.program(Tool::Ffprobe), file.path());
    }

    #[test]
    fn test_missing_configured_path_falls_back_to_name() {
        let paths = ToolPaths {
            convert: Some(PathBuf::from("/nonexistent/nullmedia/convert")),
            ..Default::default()
        };
        let program = paths.program(Tool::Convert);
        assert_ne!(program, PathBuf::from("/nonexistent/nullmedia/convert"));
        assert!(program.ends_with("convert"));
    }

    #[test]
    fn test_check_tools_lists_every_tool() {
        let infos = check_tools(&ToolPaths::default());
        let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["ffmpeg", "ffprobe", "identify", "convert"]);
    }
}
