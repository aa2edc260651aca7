//! Observers of pipeline progress.

use super::PlanContext;

/// Watches phases run without being able to change the plan.
///
/// Every hook defaults to doing nothing.
#[allow(unused_variables)]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_before_phase(&self, phase: &str, ctx: &PlanContext) {}

    /// Only called when the phase succeeded.
    fn on_after_phase(&self, phase: &str, ctx: &PlanContext) {}

    /// Called instead of [`on_after_phase`](Self::on_after_phase) when the
    /// phase stopped the pipeline.
    fn on_phase_failed(&self, phase: &str, ctx: &PlanContext, error: &eyre::Report) {}
}
