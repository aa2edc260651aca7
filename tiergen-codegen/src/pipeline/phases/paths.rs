//! Paths phase - rejects plans whose components share an output file.

use eyre::{Result, bail};

use crate::{
    paths::PathMap,
    pipeline::{Diagnostic, Phase, PlanContext},
};

/// Phase that maps the resolved plan to output files and fails on any path
/// two components would both write.
pub struct PathsPhase {
    paths: PathMap,
}

impl PathsPhase {
    pub fn new(paths: PathMap) -> Self {
        Self { paths }
    }
}

impl Phase for PathsPhase {
    fn name(&self) -> &'static str {
        "paths"
    }

    fn run(&self, ctx: &mut PlanContext) -> Result<()> {
        let collisions: Vec<Diagnostic> = self
            .paths
            .collisions(&ctx.plan)
            .iter()
            .map(|collision| {
                Diagnostic::error(self.name(), collision.to_string())
                    .at(collision.path.display().to_string())
            })
            .collect();

        if collisions.is_empty() {
            return Ok(());
        }

        let count = collisions.len();
        ctx.diagnostics.extend(collisions);
        bail!("{count} output path collision(s)")
    }
}
