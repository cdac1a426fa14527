//! Configuration schema for ksbanim.toml
//!
//! Every field defaults to the built-in behaviour, so an empty file (or no
//! file at all) downloads `ksbanim.py`, installs `PyQt5` with pip and
//! installs the `ms-python.python` extension.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Raw-content location of the ksbanim script.
pub const DEFAULT_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/tunnelrind/ksbanim/main/ksbanim.py";

/// Root configuration structure for ksbanim.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct KsbConfig {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub dependency: DependencyConfig,

    #[serde(default)]
    pub extension: ExtensionConfig,
}

impl KsbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate field combinations serde cannot express.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fetch.file_name.trim().is_empty() {
            anyhow::bail!("fetch.file_name must not be empty");
        }
        if self.fetch.file_name.contains(['/', '\\']) {
            anyhow::bail!(
                "fetch.file_name must be a plain file name, got '{}'",
                self.fetch.file_name
            );
        }
        if self.dependency.program.trim().is_empty() {
            anyhow::bail!("dependency.program must not be empty");
        }
        if self.dependency.package.trim().is_empty() {
            anyhow::bail!("dependency.package must not be empty");
        }
        if self.dependency.tick_interval_ms == 0 {
            anyhow::bail!("dependency.tick_interval_ms must be greater than zero");
        }
        if self.extension.id.trim().is_empty() {
            anyhow::bail!("extension.id must not be empty");
        }
        Ok(())
    }
}

/// `[fetch]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchConfig {
    /// Remote file to download
    #[serde(default = "default_script_url")]
    pub url: Url,

    /// File name written into the workspace root
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: default_script_url(),
            file_name: default_file_name(),
        }
    }
}

fn default_script_url() -> Url {
    Url::parse(DEFAULT_SCRIPT_URL).expect("default script URL is valid")
}

fn default_file_name() -> String {
    "ksbanim.py".to_string()
}

/// `[dependency]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DependencyConfig {
    /// Package manager executable
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the pip subcommand (`["-m", "pip"]` with
    /// `program = "python"`)
    #[serde(default)]
    pub program_args: Vec<String>,

    /// Distribution to install, extras allowed (`kivy[base]`)
    #[serde(default = "default_package")]
    pub package: String,

    /// Version requirement appended to the package (`==2.3.0`)
    #[serde(default)]
    pub version: Option<String>,

    /// Flags passed after `install <requirement>`
    #[serde(default = "default_install_args")]
    pub install_args: Vec<String>,

    /// Interval between "still working" progress updates
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl DependencyConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            program_args: Vec::new(),
            package: default_package(),
            version: None,
            install_args: default_install_args(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_program() -> String {
    "pip".to_string()
}

fn default_package() -> String {
    "PyQt5".to_string()
}

fn default_install_args() -> Vec<String> {
    vec![
        "--quiet".to_string(),
        "--disable-pip-version-check".to_string(),
    ]
}

fn default_tick_interval_ms() -> u64 {
    1000
}

/// `[extension]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtensionConfig {
    /// Marketplace identifier of the extension to install
    #[serde(default = "default_extension_id")]
    pub id: String,

    /// Label shown in list surfaces
    #[serde(default = "default_extension_label")]
    pub label: String,

    /// Editor CLI used to query and install extensions
    #[serde(default = "default_editor_program")]
    pub program: String,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            id: default_extension_id(),
            label: default_extension_label(),
            program: default_editor_program(),
        }
    }
}

fn default_extension_id() -> String {
    "ms-python.python".to_string()
}

fn default_extension_label() -> String {
    "Python extension".to_string()
}

fn default_editor_program() -> String {
    "code".to_string()
}
