//! Check command report data structures.

use tiergen_ir::Plan;

use super::output::{Output, Report};

/// Report data from plan resolution.
#[derive(Debug)]
pub struct CheckReport {
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
    /// Components in dependency order; empty unless every phase passed.
    pub order: Vec<String>,
    /// Repositories the resolver added.
    pub created_repositories: Vec<String>,
    /// The plan as far as it was resolved.
    pub plan: Plan,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Print only diagnostics, for commands that go on to do more.
    pub fn render_diagnostics(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.render_diagnostics(out);

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted("✓ plan is valid");
        out.newline();
        out.preformatted(&format!(
            "  {} entit{}, {} repositor{}, {} use case{}",
            self.plan.entities.len(),
            if self.plan.entities.len() == 1 { "y" } else { "ies" },
            self.plan.repositories.len(),
            if self.plan.repositories.len() == 1 { "y" } else { "ies" },
            self.plan.use_cases.len(),
            if self.plan.use_cases.len() == 1 { "" } else { "s" },
        ));
        out.newline();

        out.section("Generation order");
        for (i, name) in self.order.iter().enumerate() {
            out.numbered_item(i + 1, name);
        }
    }
}
