//! Config module.
//! Provides configuration types, the default config path, XML loading, and setup validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel, Mode};
pub use xml::{XmlConfig, load_config_from_xml, load_config_from_xml_path};

pub const SOURCE_DEFAULT: &str = ".";
pub const DEST_DEFAULT: &str = "./organized";
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILE_ORGANIZER_CONFIG";
