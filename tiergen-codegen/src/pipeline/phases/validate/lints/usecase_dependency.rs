//! Lint for use-cases with nothing to depend on.

use tiergen_ir::Plan;

use super::super::Lint;
use crate::{dependency::DependencyDetector, pipeline::Diagnostic};

/// Lint that warns when a use-case has neither an inferable nor a declared
/// dependency.
///
/// Such a use-case is generated with an empty constructor, which is
/// usually a naming slip such as `MakeOrder` instead of `CreateOrder`.
pub struct UseCaseDependencyLint;

impl Lint for UseCaseDependencyLint {
    fn name(&self) -> &'static str {
        "usecase-dependency"
    }

    fn check(&self, plan: &Plan, diagnostics: &mut Vec<Diagnostic>) {
        let detector = DependencyDetector::new();

        for use_case in &plan.use_cases {
            if detector.entity_name(&use_case.name).is_none() && use_case.dependencies.is_empty()
            {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "use case '{}' has no dependencies; start its name with a verb such as Create or Get to infer one",
                            use_case.name
                        ),
                    )
                    .at(format!("usecases.{}", use_case.name)),
                );
            }
        }
    }
}
