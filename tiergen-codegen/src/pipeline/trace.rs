//! Plugin that reports phase boundaries through `tracing`.

use super::{PlanContext, Plugin};

/// Emits a `debug` event around every phase and a `warn` when one fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPlugin;

impl Plugin for TracingPlugin {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn on_before_phase(&self, phase: &str, ctx: &PlanContext) {
        tracing::debug!(
            phase,
            components = ctx.plan.component_count(),
            "entering phase"
        );
    }

    fn on_after_phase(&self, phase: &str, ctx: &PlanContext) {
        tracing::debug!(phase, diagnostics = ctx.diagnostics.len(), "phase complete");
    }

    fn on_phase_failed(&self, phase: &str, ctx: &PlanContext, error: &eyre::Report) {
        tracing::warn!(phase, errors = ctx.error_count(), "phase failed: {error}");
    }
}
