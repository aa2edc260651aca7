// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for the tiergen scaffolder.
//!
//! Configuration lives in an optional `tiergen.toml` at the project root.
//! Every section and key is optional; anything left out falls back to
//! [`Config::default`], which is also what a project without the file uses.

mod config;
mod error;
mod file;
mod validate;

use std::path::Path;

pub use config::{Config, GenerationConfig, PathsConfig};
pub use error::{Error, Result};
pub use file::{CONFIG_FILE_NAME, ConfigFile, DEFAULT_CONFIG_TOML};

/// Parse a tiergen.toml file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Config> {
    ConfigFile::open(path).map(ConfigFile::into_config)
}

/// Parse a tiergen.toml from a string (uses "tiergen.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Config> {
    parse_str_with_filename(content, CONFIG_FILE_NAME)
}

/// Parse a tiergen.toml from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;

    validate::validate_config(&config, content, filename)?;
    Ok(config)
}
