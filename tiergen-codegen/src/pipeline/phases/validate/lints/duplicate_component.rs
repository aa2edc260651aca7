//! Lint for duplicate component detection.

use std::collections::HashMap;

use tiergen_core::to_snake_case;
use tiergen_ir::Plan;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors on components of the same kind that share a name.
///
/// Names are compared by their snake_case form, since that is what file
/// names are derived from: `OrderItem` and `Orderitem` would not collide,
/// but `URL` and `Url` would.
pub struct DuplicateComponentLint;

impl Lint for DuplicateComponentLint {
    fn name(&self) -> &'static str {
        "duplicate-component"
    }

    fn check(&self, plan: &Plan, diagnostics: &mut Vec<Diagnostic>) {
        let entities = plan.entities.iter().map(|e| e.name.as_str());
        let repositories = plan.repositories.iter().map(|r| r.name.as_str());
        let use_cases = plan.use_cases.iter().map(|u| u.name.as_str());

        check_section("entity", "entities", entities, diagnostics);
        check_section("repository", "repositories", repositories, diagnostics);
        check_section("use case", "usecases", use_cases, diagnostics);
    }
}

fn check_section<'a>(
    kind: &str,
    section: &str,
    names: impl Iterator<Item = &'a str>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for name in names {
        let normalized = to_snake_case(name);
        if let Some(first) = seen.get(&normalized) {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!("duplicate {kind} '{name}' (conflicts with '{first}')"),
                )
                .at(format!("{section}.{name}")),
            );
        } else {
            seen.insert(normalized, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use tiergen_ir::{EntityConfig, RepositoryConfig, UseCaseConfig};

    use super::*;

    #[test]
    fn test_no_duplicates() {
        let plan = Plan {
            entities: vec![EntityConfig::new("Order", "orders")],
            repositories: vec![RepositoryConfig::new("Order", "orders")],
            use_cases: vec![UseCaseConfig::new("CreateOrder")],
            ..Plan::new()
        };

        let mut diagnostics = Vec::new();
        DuplicateComponentLint.check(&plan, &mut diagnostics);

        // Same name across kinds is fine.
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_entity() {
        let plan = Plan {
            entities: vec![
                EntityConfig::new("Order", "orders"),
                EntityConfig::new("Order", "orders"),
            ],
            ..Plan::new()
        };

        let mut diagnostics = Vec::new();
        DuplicateComponentLint.check(&plan, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "duplicate entity 'Order' (conflicts with 'Order')"
        );
    }

    #[test]
    fn test_names_mapping_to_same_file() {
        let plan = Plan {
            use_cases: vec![UseCaseConfig::new("GetURL"), UseCaseConfig::new("GetUrl")],
            ..Plan::new()
        };

        let mut diagnostics = Vec::new();
        DuplicateComponentLint.check(&plan, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("usecases.GetUrl"));
    }
}
