//! External process invocation.
//!
//! Extractors and synthesizers never spawn processes themselves. They build a
//! [`ToolCommand`] and hand it to a [`ToolRunner`]; [`SystemRunner`] is the
//! real implementation, tests substitute scripted runners.

use crate::tools::{Tool, ToolPaths};
use crate::{Error, Result};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// A single external tool invocation.
///
/// # Example
///
/// ```
/// use nullmedia_av::{Tool, ToolCommand};
///
/// let mut cmd = ToolCommand::new(Tool::Ffprobe);
/// cmd.arg("-v").arg("quiet").arg("/path/to/video.mkv");
/// assert_eq!(cmd.args().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    tool: Tool,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given tool.
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args_from(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

/// Runs external tools and captures their combined output.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait ToolRunner: Send + Sync {
    /// Run `cmd` to completion and return stdout followed by stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program cannot be spawned because it
    ///   does not exist.
    /// - [`Error::ToolFailed`] if the process exits unsuccessfully; the error
    ///   carries the combined output.
    fn run(&self, cmd: &ToolCommand) -> Result<Vec<u8>>;
}

/// Runs tools as child processes of the current one.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    programs: HashMap<Tool, PathBuf>,
}

impl SystemRunner {
    /// Resolve every tool once, honoring configured overrides.
    pub fn new(paths: &ToolPaths) -> Self {
        let programs = Tool::ALL
            .iter()
            .map(|&tool| (tool, paths.program(tool)))
            .collect();
        Self { programs }
    }

    /// The program spawned for `tool`.
    pub fn program(&self, tool: Tool) -> PathBuf {
        self.programs
            .get(&tool)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(tool.name()))
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(&ToolPaths::default())
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<Vec<u8>> {
        let tool = cmd.tool();

        #[cfg(feature = "tracing")]
        tracing::debug!(tool = tool.name(), args = ?cmd.args(), "running external tool");

        let output = Command::new(self.program(tool))
            .args(cmd.args())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(tool.name())
                } else {
                    Error::tool_failed(tool.name(), format!("failed to spawn: {e}"), &[])
                }
            })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(tool = tool.name(), status = %output.status, "external tool failed");

            return Err(Error::tool_failed(
                tool.name(),
                format!("exited with {}", output.status),
                &combined,
            ));
        }

        Ok(combined)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted runner for exercising extractors without real tools.

    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays queued responses in order and records every command.
    #[derive(Default)]
    pub struct ScriptedRunner {
        responses: Mutex<VecDeque<Result<Vec<u8>>>>,
        calls: Mutex<Vec<ToolCommand>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, output: &str) -> Self {
            self.responses
                .lock()
                .push_back(Ok(output.as_bytes().to_vec()));
            self
        }

        pub fn fail(self, tool: Tool, output: &str) -> Self {
            self.responses.lock().push_back(Err(Error::tool_failed(
                tool.name(),
                "exited with exit status: 1",
                output.as_bytes(),
            )));
            self
        }

        pub fn calls(&self) -> Vec<ToolCommand> {
            self.calls.lock().clone()
        }

        /// Arguments of the `n`th call, lossily converted for assertions.
        pub fn call_args(&self, n: usize) -> Vec<String> {
            self.calls.lock()[n]
                .args()
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect()
        }
    }

    impl ToolRunner for ScriptedRunner {
        fn run(&self, cmd: &ToolCommand) -> Result<Vec<u8>> {
            self.calls.lock().push(cmd.clone());
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::tool_not_found(cmd.tool().name())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_args() {
        let mut cmd = ToolCommand::new(Tool::Convert);
        cmd.arg("-size")
            .arg("2x2")
            .args_from(["xc:#000000", "out.png"]);
        assert_eq!(cmd.tool(), Tool::Convert);
        assert_eq!(cmd.args(), ["-size", "2x2", "xc:#000000", "out.png"]);
    }

    #[test]
    fn test_missing_program_is_tool_not_found() {
        let mut runner = SystemRunner::default();
        runner
            .programs
            .insert(Tool::Ffprobe, PathBuf::from("nonexistent_tool_xyz_12345"));

        let err = runner.run(&ToolCommand::new(Tool::Ffprobe)).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool } if tool == "ffprobe"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_output() {
        let mut runner = SystemRunner::default();
        runner.programs.insert(Tool::Identify, PathBuf::from("sh"));

        let mut cmd = ToolCommand::new(Tool::Identify);
        cmd.arg("-c").arg("echo partial; echo broken >&2; exit 3");

        match runner.run(&cmd) {
            Err(Error::ToolFailed { tool, output, .. }) => {
                assert_eq!(tool, "identify");
                assert_eq!(output, "partial\nbroken\n");
            }
            // `sh` is missing on some minimal environments.
            Err(Error::ToolNotFound { .. }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_success_returns_stdout_then_stderr() {
        let mut runner = SystemRunner::default();
        runner.programs.insert(Tool::Ffprobe, PathBuf::from("sh"));

        let mut cmd = ToolCommand::new(Tool::Ffprobe);
        cmd.arg("-c").arg("echo 5.000000; echo note >&2");

        if let Ok(output) = runner.run(&cmd) {
            assert_eq!(output, b"5.000000\nnote\n");
        }
    }
}
