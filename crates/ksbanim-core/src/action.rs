//! Action and outcome types.
//!
//! An [`Action`] is a plain record: the command identifier the host invokes,
//! the progress title and list label shown to the user, and the resource it
//! targets. Actions are built from [`KsbConfig`](crate::config::KsbConfig) so
//! the fixed defaults can be overridden for testing.

use std::fmt;

use url::Url;

use crate::config::KsbConfig;
use crate::error::ActionError;

/// Command identifier for the script download.
pub const DOWNLOAD_FILE_COMMAND: &str = "ksbanim.downloadFile";
/// Command identifier for the Python toolkit install.
pub const INSTALL_DEPENDENCY_COMMAND: &str = "ksbanim.downloadQt";
/// Command identifier for the Python extension install.
pub const INSTALL_EXTENSION_COMMAND: &str = "ksbanim.installPythonExtension";

/// Icon shown next to every list entry.
pub const DEFAULT_ICON: &str = "cloud-download";

/// The three kinds of guarded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    FetchFile,
    InstallDependency,
    InstallExtension,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::FetchFile => "fetch-file",
            ActionKind::InstallDependency => "install-dependency",
            ActionKind::InstallExtension => "install-extension",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Python distribution to install, optionally pinned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Distribution name, possibly with extras (`kivy[base]`).
    pub name: String,
    /// Version requirement appended verbatim (`==2.3.0`).
    pub version: Option<String>,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Requirement string passed to the installer.
    pub fn requirement(&self) -> String {
        match &self.version {
            Some(version) => format!("{}{}", self.name, version),
            None => self.name.clone(),
        }
    }

    /// Bare distribution name used for presence checks (extras stripped).
    pub fn distribution(&self) -> &str {
        self.name
            .split_once('[')
            .map(|(base, _)| base)
            .unwrap_or(&self.name)
            .trim()
    }
}

/// Resource an action operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Remote file downloaded into the first workspace root.
    Remote { url: Url, file_name: String },
    /// Package installed through the package manager.
    Package(PackageSpec),
    /// Editor extension installed through the host.
    Extension { id: String },
}

/// A named, user-invocable action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Command identifier (`ksbanim.downloadFile`).
    pub id: String,
    /// Progress notification title.
    pub title: String,
    /// Label shown in list surfaces.
    pub label: String,
    /// Icon name shown in list surfaces.
    pub icon: String,
    pub target: Target,
}

impl Action {
    pub fn fetch_file(config: &KsbConfig) -> Self {
        let file_name = config.fetch.file_name.clone();
        Self {
            id: DOWNLOAD_FILE_COMMAND.to_string(),
            title: format!("Downloading {file_name}"),
            label: file_name.clone(),
            icon: DEFAULT_ICON.to_string(),
            target: Target::Remote {
                url: config.fetch.url.clone(),
                file_name,
            },
        }
    }

    pub fn install_dependency(config: &KsbConfig) -> Self {
        let mut package = PackageSpec::new(&config.dependency.package);
        if let Some(version) = &config.dependency.version {
            package = package.with_version(version);
        }
        Self {
            id: INSTALL_DEPENDENCY_COMMAND.to_string(),
            title: format!("Downloading {}. Please wait.", package.name),
            label: package.name.clone(),
            icon: DEFAULT_ICON.to_string(),
            target: Target::Package(package),
        }
    }

    pub fn install_extension(config: &KsbConfig) -> Self {
        let id = config.extension.id.clone();
        Self {
            id: INSTALL_EXTENSION_COMMAND.to_string(),
            title: format!("Installing extension {id}"),
            label: config.extension.label.clone(),
            icon: DEFAULT_ICON.to_string(),
            target: Target::Extension { id },
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self.target {
            Target::Remote { .. } => ActionKind::FetchFile,
            Target::Package(_) => ActionKind::InstallDependency,
            Target::Extension { .. } => ActionKind::InstallExtension,
        }
    }
}

/// Terminal result of one [`ActionRunner::run`](crate::runner::ActionRunner::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    Failure(ActionError),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success)
    }

    /// Failure reason, if any.
    pub fn reason(&self) -> Option<String> {
        match self {
            ActionOutcome::Success => None,
            ActionOutcome::Failure(err) => Some(err.to_string()),
        }
    }
}
