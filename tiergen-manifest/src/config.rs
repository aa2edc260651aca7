//! Configuration types for tiergen.toml.

use serde::Deserialize;
use tiergen_ir::DatabaseType;

/// Root of tiergen.toml.
///
/// Built once at startup and passed down by reference; nothing reads
/// configuration from global state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Configuration format version.
    pub version: String,
    /// Output directories for each layer.
    pub paths: PathsConfig,
    /// Generation switches.
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            paths: PathsConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Output directories, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Entities and repository interfaces.
    pub domain: String,
    /// Repository implementations and their tests.
    pub repository: String,
    /// Use-cases and their tests.
    pub usecase: String,
    /// Repository mocks.
    pub mocks: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            domain: "internal/domain".to_string(),
            repository: "internal/repository".to_string(),
            usecase: "internal/usecase".to_string(),
            mocks: "internal/mocks".to_string(),
        }
    }
}

impl PathsConfig {
    /// Every configured directory with its key, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("domain", &self.domain),
            ("repository", &self.repository),
            ("usecase", &self.usecase),
            ("mocks", &self.mocks),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Emit repository interfaces into the domain directory.
    pub separate_interfaces: bool,
    /// Emit doc comments in generated code.
    pub add_comments: bool,
    /// Database used by repositories that do not name one.
    pub default_database: DatabaseType,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            separate_interfaces: true,
            add_comments: true,
            default_database: DatabaseType::Postgres,
        }
    }
}
