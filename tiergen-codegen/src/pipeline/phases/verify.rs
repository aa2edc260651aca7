//! Verify phase - final gate on unresolved dependencies.

use eyre::Result;

use crate::{
    dependency::{DependencyResolver, ResolveError},
    pipeline::{Diagnostic, Phase, PlanContext},
};

/// Phase that fails if any use-case still has a missing dependency.
pub struct VerifyPhase {
    resolver: DependencyResolver,
}

impl VerifyPhase {
    pub fn new(resolver: DependencyResolver) -> Self {
        Self { resolver }
    }
}

impl Phase for VerifyPhase {
    fn name(&self) -> &'static str {
        "verify"
    }

    fn run(&self, ctx: &mut PlanContext) -> Result<()> {
        let Err(err) = self.resolver.validate_plan(&ctx.plan) else {
            return Ok(());
        };

        if let ResolveError::Unresolved { missing } = &err {
            for (use_case, deps) in missing {
                ctx.add_diagnostic(
                    Diagnostic::error(
                        self.name(),
                        format!("missing dependencies: {}", deps.join(", ")),
                    )
                    .at(format!("usecases.{use_case}")),
                );
            }
        }

        Err(err.into())
    }
}

#[cfg(test)]
mod tests {
    use tiergen_ir::{ComponentKind, Dependency, Plan, UseCaseConfig};

    use super::*;

    #[test]
    fn test_passes_resolved_plan() {
        let mut ctx = PlanContext::new(Plan::new());
        assert!(VerifyPhase::new(DependencyResolver::default()).run(&mut ctx).is_ok());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_one_error_per_use_case() {
        let plan = Plan {
            use_cases: vec![
                UseCaseConfig::new("CreateOrder"),
                UseCaseConfig::new("Checkout").with_dependency(Dependency::new(
                    "CartRepository",
                    ComponentKind::Repository,
                    false,
                )),
            ],
            ..Plan::new()
        };
        let mut ctx = PlanContext::new(plan);

        let err = VerifyPhase::new(DependencyResolver::default())
            .run(&mut ctx)
            .unwrap_err();

        assert!(err.to_string().starts_with("unresolved dependencies:"));
        assert_eq!(ctx.error_count(), 2);
        assert_eq!(
            ctx.diagnostics[1].location.as_deref(),
            Some("usecases.Checkout")
        );
    }
}
