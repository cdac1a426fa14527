//! Editor extension installation.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::ExtensionConfig;
use crate::error::ActionError;

/// Host side of the extension registry.
#[async_trait]
pub trait ExtensionHost: Send + Sync {
    /// Whether an extension with this identifier is registered.
    async fn is_installed(&self, id: &str) -> Result<bool, ActionError>;

    /// Ask the host to install the extension. The host's own result is the
    /// action result.
    async fn install(&self, id: &str) -> Result<(), ActionError>;
}

/// Drives the editor's command line (`code --install-extension`).
#[derive(Debug, Clone)]
pub struct EditorCli {
    program: String,
}

impl EditorCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &ExtensionConfig) -> Self {
        Self::new(&config.program)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl ExtensionHost for EditorCli {
    async fn is_installed(&self, id: &str) -> Result<bool, ActionError> {
        let output = Command::new(&self.program)
            .arg("--list-extensions")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ActionError::HostAction(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(ActionError::HostAction(format!(
                "{} --list-extensions exited with {}",
                self.program, output.status
            )));
        }

        Ok(list_contains(&String::from_utf8_lossy(&output.stdout), id))
    }

    async fn install(&self, id: &str) -> Result<(), ActionError> {
        tracing::debug!(program = %self.program, extension = id, "requesting extension install");

        let output = Command::new(&self.program)
            .args(["--install-extension", id])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ActionError::HostAction(format!("{}: {e}", self.program)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stderr
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} exited with {}", self.program, output.status));
        Err(ActionError::HostAction(reason))
    }
}

/// Extension identifiers are case-insensitive (`MS-Python.python`).
fn list_contains(listing: &str, id: &str) -> bool {
    listing
        .lines()
        .map(|line| line.trim())
        .map(|line| line.split_once('@').map_or(line, |(name, _)| name))
        .any(|name| name.eq_ignore_ascii_case(id))
}
