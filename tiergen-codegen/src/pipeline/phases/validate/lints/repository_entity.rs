//! Lint for repositories whose entity is not generated in the same run.

use tiergen_ir::Plan;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when a repository's entity is not part of the plan.
///
/// The generated repository still compiles if the entity already exists in
/// the domain package from an earlier run.
pub struct RepositoryEntityLint;

impl Lint for RepositoryEntityLint {
    fn name(&self) -> &'static str {
        "repository-entity"
    }

    fn check(&self, plan: &Plan, diagnostics: &mut Vec<Diagnostic>) {
        for repo in &plan.repositories {
            if !plan.has_entity(&repo.entity) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "repository '{}' stores entity '{}', which is not generated in this run",
                            repo.name, repo.entity
                        ),
                    )
                    .at(format!("repositories.{}", repo.name)),
                );
            }
        }
    }
}
