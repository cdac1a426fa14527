//! Optional configuration.
//!
//! Nothing is read implicitly: frontends load a file only when the user
//! points at one, otherwise [`KsbConfig::default`] is used.

pub mod parser;
pub mod schema;
pub mod store;

pub use parser::{parse_ksb_toml, parse_ksb_toml_str};
pub use schema::{DEFAULT_SCRIPT_URL, DependencyConfig, ExtensionConfig, FetchConfig, KsbConfig};
pub use store::ConfigStore;
