//! Failure taxonomy for guarded actions.

use std::path::PathBuf;

/// Terminal failure of a single action invocation.
///
/// Every variant carries owned data so outcomes can be cloned into
/// notifications and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// No workspace folder is available to receive a download.
    #[error("No workspace folder is open.")]
    NoWorkspace,

    /// The remote server answered with a non-success status.
    #[error("Failed to download file: HTTP {0}")]
    HttpStatus(u16),

    /// DNS, connection, TLS or body-stream failure.
    #[error("Error downloading file: {0}")]
    Transport(String),

    /// The destination file could not be created or written.
    #[error("Failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    /// The installer subprocess exited unsuccessfully. `None` means it was
    /// terminated by a signal.
    #[error("{}", exit_message(.0))]
    ProcessExit(Option<i32>),

    /// The installer subprocess could not be started.
    #[error("Failed to start installer: {0}")]
    Spawn(String),

    /// The host rejected an extension install request.
    #[error("Extension install failed: {0}")]
    HostAction(String),
}

fn exit_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("Installer exited with code {code}"),
        None => "Installer was terminated by a signal".to_string(),
    }
}

/// Returned by the command dispatcher for identifiers it does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);
