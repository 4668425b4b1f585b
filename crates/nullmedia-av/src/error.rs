//! Error types for nullmedia-av.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while identifying or synthesizing media.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool exited unsuccessfully. `output` is its combined output.
    #[error("tool execution failed: {tool}: {message}; output: {output}")]
    ToolFailed {
        tool: String,
        message: String,
        output: String,
    },

    /// An external tool succeeded but printed something we could not parse.
    #[error("failed to parse {tool} output {output:?}: {message}")]
    ParseError {
        tool: String,
        message: String,
        output: String,
    },

    /// The binary header carried the right magic but not enough data.
    #[error("malformed header in {}: {message}", path.display())]
    MalformedHeader { path: PathBuf, message: String },

    /// The file could not be classified as image, audio or video.
    #[error("unknown media type: {}", path.display())]
    UnknownMediaType { path: PathBuf },

    /// No generation rule exists for the requested format.
    #[error("unsupported media format: {0}")]
    Unsupported(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata, signature or hashing failure.
    #[error(transparent)]
    Media(#[from] nullmedia_common::Error),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(
        tool: impl Into<String>,
        message: impl Into<String>,
        output: &[u8],
    ) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
            output: String::from_utf8_lossy(output).into_owned(),
        }
    }

    /// Create a parse error carrying the raw tool output.
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>, output: &[u8]) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
            output: String::from_utf8_lossy(output).into_owned(),
        }
    }

    /// Create a malformed header error.
    pub fn malformed_header(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unknown media type error.
    pub fn unknown_media_type(path: impl Into<PathBuf>) -> Self {
        Self::UnknownMediaType { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failed_keeps_output() {
        let err = Error::tool_failed("ffmpeg", "exit status: 1", b"Invalid argument\n");
        match err {
            Error::ToolFailed { tool, output, .. } => {
                assert_eq!(tool, "ffmpeg");
                assert_eq!(output, "Invalid argument\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_media_error_is_transparent() {
        let err = Error::from(nullmedia_common::Error::malformed("1x2"));
        assert_eq!(err.to_string(), "malformed media info string: 1x2");
    }
}
