use super::record::BindingSiteReport;
use crate::engine::config::ExternalToolConfig;
use std::io;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Exit status a bridge script uses to signal that its chemistry backend is not installed.
pub const EXIT_UNAVAILABLE: i32 = 127;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("'{program}' is not available: {reason}")]
    Unavailable { program: String, reason: String },
    #[error("'{program}' exited with status {status}: {stderr}")]
    Failed {
        program: String,
        status: i32,
        stderr: String,
    },
    #[error("Could not read tool output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A black-box binding-site analyzer.
///
/// Implementations receive the path of a PDB file and report every binding site they
/// found, keyed by `RESNAME:CHAIN:SEQNUM`.
pub trait InteractionTool: Send + Sync {
    fn analyze(&self, structure_path: &Path) -> Result<BindingSiteReport, ToolError>;
}

/// Runs an external program and reads a JSON binding-site report from its stdout.
///
/// The program is invoked as `program [args..] <structure_path>`.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    program: String,
    args: Vec<String>,
}

impl ProcessTool {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &ExternalToolConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ProcessTool {
    fn default() -> Self {
        Self::from_config(&ExternalToolConfig::default())
    }
}

impl InteractionTool for ProcessTool {
    fn analyze(&self, structure_path: &Path) -> Result<BindingSiteReport, ToolError> {
        debug!(program = %self.program, path = %structure_path.display(), "Launching interaction tool");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(structure_path)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    ToolError::Unavailable {
                        program: self.program.clone(),
                        reason: e.to_string(),
                    }
                }
                _ => ToolError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(match output.status.code() {
                Some(EXIT_UNAVAILABLE) => ToolError::Unavailable {
                    program: self.program.clone(),
                    reason: stderr,
                },
                code => ToolError::Failed {
                    program: self.program.clone(),
                    status: code.unwrap_or(-1),
                    stderr,
                },
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
