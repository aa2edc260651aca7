//! State shared by the pipeline phases.

use tiergen_ir::Plan;

use super::diagnostic::Diagnostic;

/// The plan under preparation plus everything learned about it so far.
#[derive(Debug)]
pub struct PlanContext {
    /// The resolve phase may add repositories to it.
    pub plan: Plan,
    /// Names of the repositories the resolve phase created, in creation order.
    pub created_repositories: Vec<String>,
    /// Component names in generation order; empty until the graph phase succeeds.
    pub order: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanContext {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            created_repositories: Vec::new(),
            order: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn add_error(&mut self, phase: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
