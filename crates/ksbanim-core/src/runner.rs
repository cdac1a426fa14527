//! Guarded action runner.
//!
//! Every action goes through the same envelope:
//!
//! 1. presence check (dependency and extension actions only); an installed
//!    target short-circuits to success without opening a progress scope
//! 2. progress scope opened with the action title and closed on every path
//! 3. dispatch to the fetcher, package manager or extension host
//! 4. one info or error notice, and the matching [`ActionOutcome`]
//!
//! Nothing is retried. A failed action must be triggered again by the caller.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::action::{Action, ActionOutcome, PackageSpec, Target};
use crate::dependency::PackageManager;
use crate::error::ActionError;
use crate::extension::ExtensionHost;
use crate::fetch::FileFetcher;
use crate::host::{Host, Notice, ProgressHandle, Ticker};
use crate::log::Logger;

/// Status text posted while the installer runs.
pub const INSTALL_TICK_MESSAGE: &str = "Downloading...";

/// Default interval between installer status updates.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Executes [`Action`]s against a [`Host`].
pub struct ActionRunner {
    host: Arc<dyn Host>,
    logger: Arc<dyn Logger>,
    fetcher: FileFetcher,
    packages: Arc<dyn PackageManager>,
    extensions: Arc<dyn ExtensionHost>,
    tick_interval: Duration,
}

impl ActionRunner {
    pub fn new(
        host: Arc<dyn Host>,
        logger: Arc<dyn Logger>,
        fetcher: FileFetcher,
        packages: Arc<dyn PackageManager>,
        extensions: Arc<dyn ExtensionHost>,
    ) -> Self {
        Self {
            host,
            logger,
            fetcher,
            packages,
            extensions,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Run one action to its single terminal outcome.
    pub async fn run(&self, action: &Action) -> ActionOutcome {
        self.logger.log(&format!("running {} ({})", action.id, action.kind()));

        if let Some(notice) = self.already_satisfied(&action.target).await {
            self.logger.log(&notice);
            self.host.notify(Notice::Info(notice));
            return ActionOutcome::Success;
        }

        let result = {
            let progress = self.host.begin_progress(&action.title);
            self.dispatch(&action.target, &progress).await
        };

        match result {
            Ok(message) => {
                self.logger.log(&message);
                self.host.notify(Notice::Info(message));
                ActionOutcome::Success
            }
            Err(err) => {
                self.logger.log(&format!("{} failed: {err}", action.id));
                self.host.notify(Notice::Error(err.to_string()));
                ActionOutcome::Failure(err)
            }
        }
    }

    /// Presence check. `Some(notice)` means nothing needs to be done.
    async fn already_satisfied(&self, target: &Target) -> Option<String> {
        let (present, what) = match target {
            Target::Remote { .. } => return None,
            Target::Package(package) => (
                self.packages.is_installed(package).await,
                package.name.as_str(),
            ),
            Target::Extension { id } => (self.extensions.is_installed(id).await, id.as_str()),
        };

        match present {
            Ok(true) => Some(format!("{what} is already installed.")),
            Ok(false) => None,
            Err(err) => {
                tracing::warn!(item = what, error = %err, "presence check failed, installing anyway");
                None
            }
        }
    }

    async fn dispatch(
        &self,
        target: &Target,
        progress: &ProgressHandle,
    ) -> Result<String, ActionError> {
        match target {
            Target::Remote { url, file_name } => self.fetch_file(url, file_name).await,
            Target::Package(package) => self.install_dependency(package, progress).await,
            Target::Extension { id } => {
                self.extensions.install(id).await?;
                Ok(format!("{id} installed successfully."))
            }
        }
    }

    async fn fetch_file(&self, url: &Url, file_name: &str) -> Result<String, ActionError> {
        let root = self.host.first_workspace_root();
        let destination = FileFetcher::destination(root.as_deref(), file_name)?;
        self.fetcher.fetch_to(url, &destination).await?;
        Ok(format!("{file_name} downloaded successfully!"))
    }

    async fn install_dependency(
        &self,
        package: &PackageSpec,
        progress: &ProgressHandle,
    ) -> Result<String, ActionError> {
        let result = {
            let _ticker = Ticker::start(
                progress.reporter(),
                self.tick_interval,
                INSTALL_TICK_MESSAGE,
            );
            self.packages.install(package).await
        };
        result?;
        Ok(format!(
            "{} downloaded and installed successfully.",
            package.name
        ))
    }
}

impl std::fmt::Debug for ActionRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRunner")
            .field("fetcher", &self.fetcher)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}
