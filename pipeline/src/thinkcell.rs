use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::ToolError;

#[cfg(windows)]
pub const DEFAULT_EXECUTABLE: &str = "C:\\Program Files (x86)\\think-cell\\ppttc.exe";
#[cfg(not(windows))]
pub const DEFAULT_EXECUTABLE: &str = "ppttc";

/// The think-cell command line tool which renders a `.ppttc` file into a presentation.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    executable: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Succeeded {
        stdout: String,
        stderr: String,
    },
    Failed {
        /// `None` when the tool was terminated by a signal.
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

impl ExternalTool {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into() }
    }

    pub fn executable(&self) -> &Path {
        self.executable.as_path()
    }

    /// `<executable> <ppttc> -o <output>`
    pub fn command(&self, ppttc: impl AsRef<Path>, output: impl AsRef<Path>) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg(ppttc.as_ref())
            .arg("-o")
            .arg(output.as_ref());
        command
    }

    /// Runs the tool to completion, capturing its output streams.
    pub fn run(&self,
               ppttc: impl AsRef<Path>,
               output: impl AsRef<Path>) -> Result<ToolOutcome, ToolError> {
        log::info!(
            "Running {} on {} (output: {})",
            self.executable().display(),
            ppttc.as_ref().display(),
            output.as_ref().display()
        );
        let result = self.command(ppttc, output)
            .output()
            .map_err(|e| ToolError::ExternalToolMissing {
                executable: self.executable().display().to_string(),
                reason: e.to_string(),
            })?;
        let stdout = String::from_utf8_lossy(&result.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
        if result.status.success() {
            Ok(ToolOutcome::Succeeded { stdout, stderr })
        } else {
            Ok(ToolOutcome::Failed { code: result.status.code(), stdout, stderr })
        }
    }
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Succeeded { .. })
    }

    pub fn stdout(&self) -> &str {
        match self {
            ToolOutcome::Succeeded { stdout, .. } | ToolOutcome::Failed { stdout, .. } => stdout,
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            ToolOutcome::Succeeded { stderr, .. } | ToolOutcome::Failed { stderr, .. } => stderr,
        }
    }

    pub fn into_result(self) -> Result<(), ToolError> {
        if !self.stdout().is_empty() {
            log::debug!("Standard Output: {}", self.stdout());
        }
        if !self.stderr().is_empty() {
            log::debug!("Standard Error: {}", self.stderr());
        }
        match self {
            ToolOutcome::Succeeded { .. } => {
                log::info!("think-cell processing successful.");
                Ok(())
            }
            ToolOutcome::Failed { code, stdout, stderr } => {
                let status = match code {
                    Some(c) => format!("exit code {}", c),
                    None => "terminated by signal".to_string(),
                };
                Err(ToolError::ExternalToolFailure { status, stdout, stderr })
            }
        }
    }
}
