//! Subprocess implementation of the engine build tool.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::traits::{BuildTool, ToolError, ToolInvocation};

/// Where the engine build tool lives and where it writes its output.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    /// Interpreter used to run the tool script
    pub interpreter: String,

    /// Tool script, relative to the engine root
    pub script: PathBuf,

    /// Output directory the tool writes web builds to, relative to the engine root
    pub output_dir: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            script: PathBuf::from("tools/supernova.py"),
            output_dir: PathBuf::from("tools/build/web"),
        }
    }
}

/// The engine's command line build tool, run as a child process.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    interpreter: String,
    script: PathBuf,
}

impl ExternalTool {
    /// Create a tool runner for the engine checked out at `engine_root`.
    pub fn new(config: &ToolConfig, engine_root: &Path) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            script: engine_root.join(&config.script),
        }
    }

    fn command(&self, invocation: &ToolInvocation) -> Command {
        let mut command = Command::new(&self.interpreter);
        command.arg(&self.script).args(invocation.args());
        command
    }
}

impl BuildTool for ExternalTool {
    fn name(&self) -> &str {
        &self.interpreter
    }

    fn invoke(&self, invocation: &ToolInvocation) -> Result<(), ToolError> {
        let mut command = self.command(invocation);

        tracing::debug!(
            "Running {} {} {:?}",
            self.interpreter,
            self.script.display(),
            invocation.args()
        );

        // Output is inherited so compiler diagnostics reach the terminal.
        let status = command.status().map_err(|source| ToolError::Spawn {
            program: self.interpreter.clone(),
            source,
        })?;

        if !status.success() {
            return Err(ToolError::Failed {
                app_name: invocation.app_name.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> ToolInvocation {
        ToolInvocation {
            platform: "web".to_string(),
            project: PathBuf::from("/work/samples/cube"),
            engine_root: PathBuf::from("/work/supernova"),
            app_name: "cube".to_string(),
            shell_file: PathBuf::from("/work/sample_shell.html"),
            suppress_flag: "--no-lua-init".to_string(),
        }
    }

    #[test]
    fn resolves_script_against_engine_root() {
        let tool = ExternalTool::new(&ToolConfig::default(), Path::new("/work/supernova"));
        let command = tool.command(&invocation());

        assert_eq!(command.get_program(), "python3");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args[0], "/work/supernova/tools/supernova.py");
        assert_eq!(args[1], "--platform");
        assert_eq!(args.last().copied(), Some(std::ffi::OsStr::new("--build")));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_an_error() {
        let config = ToolConfig {
            interpreter: "false".to_string(),
            ..Default::default()
        };
        let tool = ExternalTool::new(&config, Path::new("/nonexistent"));

        let result = tool.invoke(&invocation());

        assert!(matches!(
            result,
            Err(ToolError::Failed { code: Some(1), .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_succeeds() {
        let config = ToolConfig {
            interpreter: "true".to_string(),
            ..Default::default()
        };
        let tool = ExternalTool::new(&config, Path::new("/nonexistent"));

        assert!(tool.invoke(&invocation()).is_ok());
    }

    #[test]
    fn missing_interpreter_fails_to_spawn() {
        let config = ToolConfig {
            interpreter: "showcase-no-such-interpreter".to_string(),
            ..Default::default()
        };
        let tool = ExternalTool::new(&config, Path::new("/nonexistent"));

        assert!(matches!(
            tool.invoke(&invocation()),
            Err(ToolError::Spawn { .. })
        ));
    }
}
