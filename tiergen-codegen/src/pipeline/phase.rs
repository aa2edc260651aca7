//! Pipeline phase trait.

use eyre::Result;

use super::PlanContext;

/// One step of plan preparation.
///
/// A phase reads and may extend the plan in [`PlanContext`], recording what
/// it finds as diagnostics. Returning an error stops the pipeline; the
/// phase is expected to have recorded an error diagnostic explaining why.
pub trait Phase: Send + Sync {
    /// Short name, used as the `phase` of its diagnostics.
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &mut PlanContext) -> Result<()>;
}
