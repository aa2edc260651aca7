//! Check operation - plan resolution without writing.

use tiergen_codegen::pipeline::{Diagnostic, Pipeline, PlanContext, Severity, TracingPlugin};
use tiergen_ir::Plan;
use tiergen_manifest::Config;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline on the requested plan and collects its diagnostics.
/// A failed pipeline is not an error here; it shows up as an invalid report.
pub fn check(plan: Plan, config: &Config) -> CheckReport {
    let pipeline = Pipeline::from_config(config).plugin(TracingPlugin);
    let mut ctx = PlanContext::new(plan);

    let failure = pipeline.run_on(&mut ctx).err();
    if let Some(err) = &failure {
        tracing::debug!(error = %err, "pipeline stopped");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &ctx.diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    // A phase may stop without recording why.
    if errors.is_empty() {
        if let Some(err) = failure {
            errors.push(format!("{err:#}"));
        }
    }

    CheckReport {
        errors,
        warnings,
        infos,
        order: ctx.order,
        created_repositories: ctx.created_repositories,
        plan: ctx.plan,
    }
}

fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
