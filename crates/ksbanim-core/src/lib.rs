//! ksbanim Core Library
//!
//! Runs the three workspace setup actions (download `ksbanim.py`, install
//! the Python GUI toolkit, install the Python editor extension) behind a
//! uniform presence check, progress scope and single outcome.

pub mod action;
pub mod commands;
pub mod config;
pub mod context;
pub mod dependency;
pub mod error;
pub mod extension;
pub mod fetch;
pub mod host;
pub mod log;
pub mod runner;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::action::{Action, ActionKind, ActionOutcome, PackageSpec, Target};
    pub use crate::commands::{CommandRegistry, ListEntry};
    pub use crate::config::{ConfigStore, KsbConfig};
    pub use crate::context::AppContext;
    pub use crate::dependency::{PackageManager, PipPackageManager};
    pub use crate::error::{ActionError, UnknownCommand};
    pub use crate::extension::{EditorCli, ExtensionHost};
    pub use crate::fetch::FileFetcher;
    pub use crate::host::{Host, Notice, ProgressHandle, ProgressReporter, ProgressSink};
    pub use crate::log::{Logger, TracingLogger};
    pub use crate::runner::ActionRunner;
}
