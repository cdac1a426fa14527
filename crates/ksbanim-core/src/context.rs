//! Application context for unified dependency injection.

use std::path::Path;
use std::sync::Arc;

use crate::commands::CommandRegistry;
use crate::config::{ConfigStore, KsbConfig};
use crate::dependency::{PackageManager, PipPackageManager};
use crate::error::ActionError;
use crate::extension::{EditorCli, ExtensionHost};
use crate::fetch::FileFetcher;
use crate::host::Host;
use crate::log::{Logger, TracingLogger};
use crate::runner::ActionRunner;

/// Configuration plus the real collaborators derived from it.
///
/// Frontends (CLI/TUI) create this once, then build a runner for their own
/// [`Host`].
#[derive(Clone)]
pub struct AppContext {
    config: KsbConfig,
    logger: Arc<dyn Logger>,
    packages: Arc<dyn PackageManager>,
    extensions: Arc<dyn ExtensionHost>,
}

impl AppContext {
    pub fn new(config: KsbConfig) -> Self {
        let packages = Arc::new(PipPackageManager::from_config(&config.dependency));
        let extensions = Arc::new(EditorCli::from_config(&config.extension));
        Self {
            config,
            logger: Arc::new(TracingLogger),
            packages,
            extensions,
        }
    }

    /// Load `path` if given, otherwise use the built-in defaults.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => ConfigStore::new(path).load()?,
            None => KsbConfig::default(),
        };
        let ctx = Self::new(config);
        ctx.logger.log("activating ksbanim extension");
        Ok(ctx)
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_package_manager(mut self, packages: Arc<dyn PackageManager>) -> Self {
        self.packages = packages;
        self
    }

    pub fn with_extension_host(mut self, extensions: Arc<dyn ExtensionHost>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn config(&self) -> &KsbConfig {
        &self.config
    }

    pub fn command_registry(&self) -> CommandRegistry {
        CommandRegistry::from_config(&self.config)
    }

    /// Build a runner bound to `host`.
    pub fn runner(&self, host: Arc<dyn Host>) -> Result<ActionRunner, ActionError> {
        Ok(ActionRunner::new(
            host,
            Arc::clone(&self.logger),
            FileFetcher::new()?,
            Arc::clone(&self.packages),
            Arc::clone(&self.extensions),
        )
        .with_tick_interval(self.config.dependency.tick_interval()))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
