//! Resolve phase - makes use-case dependencies explicit.

use eyre::Result;

use crate::{
    dependency::DependencyResolver,
    pipeline::{Diagnostic, Phase, PlanContext},
};

/// Phase that runs [`DependencyResolver::resolve`] on the plan.
pub struct ResolvePhase {
    resolver: DependencyResolver,
}

impl ResolvePhase {
    pub fn new(resolver: DependencyResolver) -> Self {
        Self { resolver }
    }
}

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn run(&self, ctx: &mut PlanContext) -> Result<()> {
        match self.resolver.resolve(&mut ctx.plan) {
            Ok(resolution) => {
                for name in &resolution.created_repositories {
                    ctx.add_diagnostic(
                        Diagnostic::info(
                            self.name(),
                            format!("created repository '{name}' for entity '{name}'"),
                        )
                        .at(format!("repositories.{name}")),
                    );
                }
                ctx.created_repositories = resolution.created_repositories;
                Ok(())
            }
            Err(err) => {
                ctx.add_error(self.name(), err.to_string());
                Err(eyre::Report::new(err).wrap_err("dependency resolution failed"))
            }
        }
    }
}
