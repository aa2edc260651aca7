use std::fmt::Write as _;

use indexmap::IndexMap;
use thiserror::Error;
use tiergen_ir::{ComponentKind, DatabaseType, Plan, RepositoryConfig};

use super::{DependencyDetector, REPOSITORY_SUFFIX};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(
        "cannot resolve dependency '{dependency}' for use case '{use_case}': \
         entity '{entity}' not found, cannot create repository"
    )]
    MissingEntity {
        dependency: String,
        use_case: String,
        entity: String,
    },

    #[error("unresolved dependencies:{}", format_missing(.missing))]
    Unresolved {
        missing: IndexMap<String, Vec<String>>,
    },
}

fn format_missing(missing: &IndexMap<String, Vec<String>>) -> String {
    let mut out = String::new();
    for (use_case, deps) in missing {
        let _ = write!(out, "\n  use case '{}': missing {}", use_case, deps.join(", "));
    }
    out
}

/// What [`DependencyResolver::resolve`] changed in the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Names of repositories appended to the plan, in creation order.
    pub created_repositories: Vec<String>,
}

/// Makes every use-case dependency explicit and, where possible, satisfied.
///
/// The only thing the resolver ever creates is a repository for an entity
/// that is already in the plan.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    detector: DependencyDetector,
    default_database: DatabaseType,
}

impl DependencyResolver {
    pub fn new(detector: DependencyDetector) -> Self {
        Self {
            detector,
            default_database: DatabaseType::default(),
        }
    }

    /// Database kind given to auto-created repositories.
    pub fn with_default_database(mut self, database: DatabaseType) -> Self {
        self.default_database = database;
        self
    }

    /// Resolve every use-case in plan order, mutating the plan in place.
    ///
    /// Each use-case's dependency list is replaced by the detected one, then
    /// missing repositories are created. A failure leaves earlier use-cases
    /// resolved; nothing in the plan is undone.
    pub fn resolve(&self, plan: &mut Plan) -> Result<Resolution, ResolveError> {
        let mut resolution = Resolution::default();

        for i in 0..plan.use_cases.len() {
            let detected = self.detector.detect(&plan.use_cases[i], plan);
            plan.use_cases[i].dependencies = detected;

            for j in 0..plan.use_cases[i].dependencies.len() {
                let dep = &plan.use_cases[i].dependencies[j];
                if dep.found || dep.kind != ComponentKind::Repository {
                    continue;
                }

                let dep_name = dep.name.clone();
                if let Some(created) = self.auto_create_repository(&dep_name, plan).map_err(
                    |entity| ResolveError::MissingEntity {
                        dependency: dep_name.clone(),
                        use_case: plan.use_cases[i].name.clone(),
                        entity,
                    },
                )? {
                    resolution.created_repositories.push(created);
                }
                plan.use_cases[i].dependencies[j].found = true;
            }
        }

        Ok(resolution)
    }

    /// Append a default repository for the entity behind `repository_name`.
    ///
    /// Returns the created repository's name, `None` if the plan already had
    /// it, or the missing entity's name as the error.
    fn auto_create_repository(
        &self,
        repository_name: &str,
        plan: &mut Plan,
    ) -> Result<Option<String>, String> {
        let entity_name = repository_name
            .strip_suffix(REPOSITORY_SUFFIX)
            .unwrap_or(repository_name);

        if plan.has_repository(entity_name) {
            return Ok(None);
        }

        let Some(entity) = plan.entity(entity_name) else {
            return Err(entity_name.to_string());
        };

        let repository = RepositoryConfig {
            db_type: self.default_database,
            add_comments: true,
            fields: entity.fields.clone(),
            custom_methods: Vec::new(),
            ..RepositoryConfig::new(entity_name, entity.table_name.clone())
        };

        tracing::info!(
            repository = %repository.qualified_name(),
            entity = entity_name,
            "auto-created repository"
        );
        plan.repositories.push(repository);

        Ok(Some(entity_name.to_string()))
    }

    /// Final gate: fail with every use-case that still has missing dependencies.
    pub fn validate_plan(&self, plan: &Plan) -> Result<(), ResolveError> {
        let missing = self.detector.detect_missing_dependencies(plan);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ResolveError::Unresolved { missing })
        }
    }
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new(DependencyDetector::new())
    }
}

#[cfg(test)]
mod tests {
    use tiergen_ir::{Dependency, EntityConfig, Field, UseCaseConfig};

    use super::*;

    fn order_entity() -> EntityConfig {
        EntityConfig::new("Order", "orders").with_fields(vec![
            Field::new("ID", "string"),
            Field::new("Total", "float64"),
        ])
    }

    #[test]
    fn test_resolve_creates_repository_from_entity() {
        let mut plan = Plan {
            entities: vec![order_entity()],
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Plan::new()
        };

        let resolution = DependencyResolver::default().resolve(&mut plan).unwrap();

        assert_eq!(resolution.created_repositories, vec!["Order"]);
        assert_eq!(plan.repositories.len(), 1);
        let repo = &plan.repositories[0];
        assert_eq!(repo.name, "Order");
        assert_eq!(repo.entity, "Order");
        assert_eq!(repo.table_name, "orders");
        assert_eq!(repo.fields, plan.entities[0].fields);
        assert!(repo.custom_methods.is_empty());
        assert_eq!(repo.db_type, DatabaseType::Postgres);

        assert_eq!(
            plan.use_cases[0].dependencies,
            vec![Dependency::repository("Order", true)]
        );
    }

    #[test]
    fn test_resolve_uses_configured_database() {
        let mut plan = Plan {
            entities: vec![order_entity()],
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Plan::new()
        };

        DependencyResolver::default()
            .with_default_database(DatabaseType::Sqlite)
            .resolve(&mut plan)
            .unwrap();

        assert_eq!(plan.repositories[0].db_type, DatabaseType::Sqlite);
    }

    #[test]
    fn test_resolve_creates_each_repository_once() {
        let mut plan = Plan {
            entities: vec![order_entity()],
            use_cases: vec![
                UseCaseConfig::new("CreateOrder"),
                UseCaseConfig::new("GetOrder"),
                UseCaseConfig::new("DeleteOrder"),
            ],
            ..Plan::new()
        };

        let resolution = DependencyResolver::default().resolve(&mut plan).unwrap();

        assert_eq!(resolution.created_repositories.len(), 1);
        assert_eq!(plan.repositories.len(), 1);
        assert!(
            plan.use_cases
                .iter()
                .all(|uc| uc.dependencies.iter().all(|d| d.found))
        );
    }

    #[test]
    fn test_resolve_fails_without_entity() {
        let mut plan = Plan {
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Plan::new()
        };

        let err = DependencyResolver::default()
            .resolve(&mut plan)
            .unwrap_err();

        assert_eq!(
            err,
            ResolveError::MissingEntity {
                dependency: "OrderRepository".to_string(),
                use_case: "CreateOrder".to_string(),
                entity: "Order".to_string(),
            }
        );
        assert!(err.to_string().contains("entity 'Order' not found"));
        assert!(plan.repositories.is_empty());
    }

    #[test]
    fn test_resolve_keeps_earlier_mutations_on_failure() {
        let mut plan = Plan {
            entities: vec![order_entity()],
            use_cases: vec![
                UseCaseConfig::new("CreateOrder"),
                UseCaseConfig::new("CreateInvoice"),
            ],
            ..Plan::new()
        };

        let result = DependencyResolver::default().resolve(&mut plan);

        assert!(matches!(
            result,
            Err(ResolveError::MissingEntity { ref entity, .. }) if entity == "Invoice"
        ));
        assert!(plan.has_repository("Order"));
    }

    #[test]
    fn test_resolve_ignores_non_repository_dependencies() {
        let mut plan = Plan {
            use_cases: vec![UseCaseConfig::new("ProcessPayment").with_dependency(
                Dependency::new("PaymentGateway", ComponentKind::Handler, false),
            )],
            ..Plan::new()
        };

        DependencyResolver::default().resolve(&mut plan).unwrap();

        assert!(plan.repositories.is_empty());
        assert!(!plan.use_cases[0].dependencies[0].found);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut plan = Plan {
            entities: vec![order_entity()],
            use_cases: vec![UseCaseConfig::new("UpdateOrder")],
            ..Plan::new()
        };
        let resolver = DependencyResolver::default();

        resolver.resolve(&mut plan).unwrap();
        let once = plan.clone();
        let resolution = resolver.resolve(&mut plan).unwrap();

        assert!(resolution.created_repositories.is_empty());
        assert_eq!(plan, once);
    }

    #[test]
    fn test_validate_plan_aggregates_missing() {
        let plan = Plan {
            use_cases: vec![
                UseCaseConfig::new("CreateOrder"),
                UseCaseConfig::new("ProcessPayment").with_dependency(Dependency::new(
                    "LedgerRepository",
                    ComponentKind::Repository,
                    false,
                )),
            ],
            ..Plan::new()
        };

        let err = DependencyResolver::default()
            .validate_plan(&plan)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "unresolved dependencies:\n  use case 'CreateOrder': missing OrderRepository\n  use case 'ProcessPayment': missing LedgerRepository"
        );
    }

    #[test]
    fn test_validate_plan_after_resolve() {
        let mut plan = Plan {
            entities: vec![order_entity()],
            use_cases: vec![UseCaseConfig::new("ListOrder")],
            ..Plan::new()
        };
        let resolver = DependencyResolver::default();

        resolver.resolve(&mut plan).unwrap();

        assert!(resolver.validate_plan(&plan).is_ok());
    }
}
