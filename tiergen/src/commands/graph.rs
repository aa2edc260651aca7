use clap::Args;
use eyre::Result;
use tiergen_codegen::dependency::DependencyGraph;

use super::UnwrapOrExit;
use crate::{
    ops,
    plan::PlanArgs,
    reports::{GraphReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GraphCommand {
    #[command(flatten)]
    pub plan: PlanArgs,
}

impl GraphCommand {
    pub fn run(&self) -> Result<()> {
        let config = self.plan.load_config().unwrap_or_exit();
        let plan = self.plan.build_plan(&config)?;

        let check = ops::check(plan, &config);
        let mut out = TerminalOutput::new();
        if !check.is_valid() {
            check.render_diagnostics(&mut out);
            std::process::exit(1);
        }

        let report = GraphReport {
            graph: DependencyGraph::from_plan(&check.plan).to_string(),
            order: check.order,
        };
        report.render(&mut out);

        Ok(())
    }
}
