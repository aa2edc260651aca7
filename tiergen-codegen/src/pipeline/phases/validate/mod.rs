//! Validate phase - runs lints on the requested plan.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::Lint;
pub use lints::{
    ComponentNamingLint, DuplicateComponentLint, EmptyPlanLint, RepositoryEntityLint,
    UseCaseDependencyLint,
};

use crate::pipeline::{Phase, PlanContext};

/// Phase that validates the plan using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(EmptyPlanLint),
                Box::new(ComponentNamingLint),
                Box::new(DuplicateComponentLint),
                Box::new(RepositoryEntityLint),
                Box::new(UseCaseDependencyLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&self, ctx: &mut PlanContext) -> Result<()> {
        for lint in &self.lints {
            let before = ctx.diagnostics.len();
            lint.check(&ctx.plan, &mut ctx.diagnostics);
            let found = ctx.diagnostics.len() - before;
            if found > 0 {
                tracing::trace!(lint = lint.name(), found, "lint reported");
            }
        }

        // Warnings are allowed
        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
