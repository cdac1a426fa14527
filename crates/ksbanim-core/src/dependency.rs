//! Package manager integration for the Python toolkit install.

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;

use crate::action::PackageSpec;
use crate::config::DependencyConfig;
use crate::error::ActionError;

/// External package manager.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Whether the distribution is already installed.
    async fn is_installed(&self, package: &PackageSpec) -> Result<bool, ActionError>;

    /// Run the install to completion. Only the exit status matters.
    async fn install(&self, package: &PackageSpec) -> Result<(), ActionError>;
}

/// Argument vector and program for one package-manager invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// `pip` driven through `tokio::process`.
#[derive(Debug, Clone)]
pub struct PipPackageManager {
    program: String,
    program_args: Vec<String>,
    install_args: Vec<String>,
}

impl PipPackageManager {
    pub fn new(program: impl Into<String>, install_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            program_args: Vec::new(),
            install_args,
        }
    }

    /// Arguments placed before the pip subcommand (`python -m pip`).
    pub fn with_program_args(mut self, program_args: Vec<String>) -> Self {
        self.program_args = program_args;
        self
    }

    pub fn from_config(config: &DependencyConfig) -> Self {
        Self::new(&config.program, config.install_args.clone())
            .with_program_args(config.program_args.clone())
    }

    /// `pip install <requirement> <install_args...>`
    pub fn install_command(&self, package: &PackageSpec) -> InstallCommand {
        let mut args = self.program_args.clone();
        args.push("install".to_string());
        args.push(package.requirement());
        args.extend(self.install_args.iter().cloned());
        InstallCommand {
            program: self.program.clone(),
            args,
        }
    }

    /// `pip show <distribution>`
    pub fn show_command(&self, package: &PackageSpec) -> InstallCommand {
        let mut args = self.program_args.clone();
        args.extend([
            "show".to_string(),
            "--quiet".to_string(),
            package.distribution().to_string(),
        ]);
        InstallCommand {
            program: self.program.clone(),
            args,
        }
    }
}

#[async_trait]
impl PackageManager for PipPackageManager {
    async fn is_installed(&self, package: &PackageSpec) -> Result<bool, ActionError> {
        let cmd = self.show_command(package);
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ActionError::Spawn(format!("{}: {e}", cmd.program)))?;
        Ok(status.success())
    }

    async fn install(&self, package: &PackageSpec) -> Result<(), ActionError> {
        let cmd = self.install_command(package);
        tracing::debug!(program = %cmd.program, args = ?cmd.args, "spawning installer");

        let output = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ActionError::Spawn(format!("{}: {e}", cmd.program)))?;

        if !output.status.success() {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "installer failed"
            );
        }
        exit_result(output.status)
    }
}

pub(crate) fn exit_result(status: ExitStatus) -> Result<(), ActionError> {
    if status.success() {
        Ok(())
    } else {
        Err(ActionError::ProcessExit(status.code()))
    }
}
