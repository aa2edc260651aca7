//! The generation plan.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ComponentKind, EntityConfig, RepositoryConfig, UseCaseConfig};

/// Everything to generate in one run.
///
/// A plan is mutable during resolution: the resolver may append
/// repositories to it. Components are kept in insertion order, which is also
/// the order they are generated in within a phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,
    #[serde(default, rename = "usecases")]
    pub use_cases: Vec<UseCaseConfig>,
    #[serde(default)]
    pub with_tests: bool,
    #[serde(default)]
    pub with_mocks: bool,
    /// Go module path used in generated imports.
    #[serde(default)]
    pub module_path: String,
    /// Root directory generated files are written under.
    #[serde(default)]
    pub project_root: PathBuf,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entity by name.
    pub fn entity(&self, name: &str) -> Option<&EntityConfig> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Look up a repository by name (without the `Repository` suffix).
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|r| r.name == name)
    }

    /// Look up a use-case by name (without the `UseCase` suffix).
    pub fn use_case(&self, name: &str) -> Option<&UseCaseConfig> {
        self.use_cases.iter().find(|u| u.name == name)
    }

    pub fn has_entity(&self, name: &str) -> bool {
        self.entity(name).is_some()
    }

    pub fn has_repository(&self, name: &str) -> bool {
        self.repository(name).is_some()
    }

    /// Whether a component of the given kind and name is part of the plan.
    ///
    /// Repository and use-case names are accepted with or without their
    /// conventional suffix.
    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        match kind {
            ComponentKind::Entity => self.has_entity(name),
            ComponentKind::Repository => {
                self.has_repository(name.strip_suffix("Repository").unwrap_or(name))
            }
            ComponentKind::UseCase => self
                .use_case(name.strip_suffix("UseCase").unwrap_or(name))
                .is_some(),
            ComponentKind::Handler | ComponentKind::Mock | ComponentKind::Test => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.repositories.is_empty() && self.use_cases.is_empty()
    }

    /// Number of requested components (mocks and tests excluded).
    pub fn component_count(&self) -> usize {
        self.entities.len() + self.repositories.len() + self.use_cases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> Plan {
        Plan {
            entities: vec![EntityConfig::new("Order", "orders")],
            repositories: vec![RepositoryConfig::new("Order", "orders")],
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Default::default()
        }
    }

    #[test]
    fn test_lookups() {
        let plan = sample_plan();
        assert!(plan.has_entity("Order"));
        assert!(plan.has_repository("Order"));
        assert!(!plan.has_repository("OrderRepository"));
        assert_eq!(plan.use_case("CreateOrder").map(|u| u.name.as_str()), Some("CreateOrder"));
    }

    #[test]
    fn test_contains_accepts_suffixed_names() {
        let plan = sample_plan();
        assert!(plan.contains(ComponentKind::Repository, "OrderRepository"));
        assert!(plan.contains(ComponentKind::Repository, "Order"));
        assert!(plan.contains(ComponentKind::UseCase, "CreateOrderUseCase"));
        assert!(!plan.contains(ComponentKind::Handler, "Order"));
    }

    #[test]
    fn test_empty_and_count() {
        assert!(Plan::new().is_empty());
        let plan = sample_plan();
        assert!(!plan.is_empty());
        assert_eq!(plan.component_count(), 3);
    }

    #[test]
    fn test_json_uses_usecases_key() {
        let json = serde_json::to_value(sample_plan()).unwrap();
        assert!(json.get("usecases").is_some());
        assert!(json.get("use_cases").is_none());
    }
}
