use std::path::{Path, PathBuf};

use crate::{Config, Error, Result};

/// Conventional configuration file name at the project root.
pub const CONFIG_FILE_NAME: &str = "tiergen.toml";

/// Commented configuration written by `tiergen init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"version = "1"

# Output directories, relative to the project root.
[paths]
domain = "internal/domain"
repository = "internal/repository"
usecase = "internal/usecase"
mocks = "internal/mocks"

[generation]
# Emit repository interfaces next to the entities.
separate_interfaces = true
add_comments = true
# postgres | mysql | sqlite
default_database = "postgres"
"#;

/// A parsed tiergen.toml and where it was read from.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    config: Config,
}

impl ConfigFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let config = crate::parse_str_with_filename(&content, &filename)?;

        Ok(Self { path, config })
    }

    /// Like [`open`](Self::open), but a missing file is `None` rather than an error.
    pub fn open_if_exists(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Write [`DEFAULT_CONFIG_TOML`] to `path`, refusing to replace a file.
    pub fn write_default(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            return Err(Box::new(Error::AlreadyExists {
                path: path.to_path_buf(),
            }));
        }
        std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(|e| {
            Box::new(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
