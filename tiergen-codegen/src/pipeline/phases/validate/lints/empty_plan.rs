//! Lint for plans that request nothing.

use tiergen_ir::Plan;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that errors when no entity, repository or use-case is requested.
pub struct EmptyPlanLint;

impl Lint for EmptyPlanLint {
    fn name(&self) -> &'static str {
        "empty-plan"
    }

    fn check(&self, plan: &Plan, diagnostics: &mut Vec<Diagnostic>) {
        if plan.is_empty() {
            diagnostics.push(Diagnostic::error(
                "validate",
                "nothing to generate: request at least one entity, repository or use case",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use tiergen_ir::EntityConfig;

    use super::*;

    #[test]
    fn test_empty_plan() {
        let mut diagnostics = Vec::new();
        EmptyPlanLint.check(&Plan::new(), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_flags_alone_are_empty() {
        let plan = Plan {
            with_tests: true,
            with_mocks: true,
            ..Plan::new()
        };
        let mut diagnostics = Vec::new();
        EmptyPlanLint.check(&plan, &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_non_empty_plan() {
        let plan = Plan {
            entities: vec![EntityConfig::new("Order", "orders")],
            ..Plan::new()
        };
        let mut diagnostics = Vec::new();
        EmptyPlanLint.check(&plan, &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
