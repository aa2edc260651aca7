//! Lint trait for plan validation.

use tiergen_ir::Plan;

use crate::pipeline::Diagnostic;

/// A check over the plan as the user requested it, before resolution.
pub trait Lint: Send + Sync {
    /// Kebab-case name, used when tracing which lint reported what.
    fn name(&self) -> &'static str;

    fn check(&self, plan: &Plan, diagnostics: &mut Vec<Diagnostic>);
}
