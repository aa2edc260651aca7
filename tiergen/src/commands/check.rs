use clap::Args;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    plan::PlanArgs,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Print the resolved plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = self.plan.load_config().unwrap_or_exit();
        let plan = self.plan.build_plan(&config)?;

        let report = ops::check(plan, &config);

        if self.json {
            report.render_diagnostics(&mut TerminalOutput::new());
            let json = serde_json::to_string_pretty(&report.plan)
                .wrap_err("Failed to serialize plan")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
