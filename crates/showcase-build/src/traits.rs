//! Trait definitions for the engine build tool.

use std::ffi::OsString;
use std::path::PathBuf;

/// Arguments for one build tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    /// Target platform, always "web" for the showcase
    pub platform: String,

    /// Absolute path of the sample project
    pub project: PathBuf,

    /// Absolute path of the engine checkout
    pub engine_root: PathBuf,

    /// Application name (also the stem of the produced entry page)
    pub app_name: String,

    /// Absolute path of the rendered shell file
    pub shell_file: PathBuf,

    /// Flag disabling the other language's initialization
    pub suppress_flag: String,
}

impl ToolInvocation {
    /// Command line arguments, in the order the tool expects them.
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "--platform".into(),
            self.platform.clone().into(),
            "--project".into(),
            self.project.clone().into(),
            "--supernova".into(),
            self.engine_root.clone().into(),
            "--appname".into(),
            self.app_name.clone().into(),
            "--em-shell-file".into(),
            self.shell_file.clone().into(),
            self.suppress_flag.clone().into(),
            "--build".into(),
        ]
    }
}

/// Errors that can occur when running the build tool.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Failed to launch build tool {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build tool failed for {app_name}: {}", exit_description(.code))]
    Failed { app_name: String, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// An engine build tool.
///
/// Every invocation writes its artifacts into the same output directory, so
/// callers must hold an [`OutputLease`](crate::OutputLease) for that
/// directory from the call until the artifacts are moved away.
pub trait BuildTool: Send + Sync {
    /// Tool identifier used in log output
    fn name(&self) -> &str;

    /// Run one build. Any non-zero exit is an error.
    fn invoke(&self, invocation: &ToolInvocation) -> Result<(), ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_argument_list() {
        let invocation = ToolInvocation {
            platform: "web".to_string(),
            project: PathBuf::from("/work/samples/cube"),
            engine_root: PathBuf::from("/work/supernova"),
            app_name: "cube".to_string(),
            shell_file: PathBuf::from("/work/sample_shell.html"),
            suppress_flag: "--no-lua-init".to_string(),
        };

        let args: Vec<String> = invocation
            .args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "--platform",
                "web",
                "--project",
                "/work/samples/cube",
                "--supernova",
                "/work/supernova",
                "--appname",
                "cube",
                "--em-shell-file",
                "/work/sample_shell.html",
                "--no-lua-init",
                "--build",
            ]
        );
    }

    #[test]
    fn describes_exit_code() {
        let err = ToolError::Failed {
            app_name: "cube".to_string(),
            code: Some(1),
        };
        assert!(err.to_string().contains("exit code 1"));
    }
}
