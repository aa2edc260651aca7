//! Core type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a component in a plan.
///
/// A component is identified by its `(kind, name)` pair; names are unique
/// per kind within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Entity,
    Repository,
    UseCase,
    Handler,
    Mock,
    Test,
}

impl ComponentKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Entity => "entity",
            ComponentKind::Repository => "repository",
            ComponentKind::UseCase => "usecase",
            ComponentKind::Handler => "handler",
            ComponentKind::Mock => "mock",
            ComponentKind::Test => "test",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database backing a generated repository implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
}

impl DatabaseType {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Postgres => "postgres",
            DatabaseType::Mysql => "mysql",
            DatabaseType::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
