//! Host capabilities consumed by the runner.
//!
//! The host is whatever embeds the runner (terminal CLI, TUI, tests). It
//! knows the workspace, owns the user-facing notification channel and opens
//! progress notifications.

mod progress;

use std::path::PathBuf;

pub use progress::{ProgressHandle, ProgressReporter, ProgressSink, Ticker};

/// User-facing message severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Environment the runner executes in.
pub trait Host: Send + Sync {
    /// Workspace roots in host order; the first one receives downloads.
    fn workspace_roots(&self) -> Vec<PathBuf>;

    /// Surface a message to the user.
    fn notify(&self, notice: Notice);

    /// Open a non-cancellable progress notification titled `title`.
    fn begin_progress(&self, title: &str) -> ProgressHandle;

    fn first_workspace_root(&self) -> Option<PathBuf> {
        self.workspace_roots().into_iter().next()
    }
}
