use clap::Args;
use eyre::Result;
use tiergen_codegen::conflict::ConflictPolicy;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    plan::PlanArgs,
    prompt::TerminalConfirm,
    reports::{GenerateReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub force: bool,

    /// Ask before overwriting each existing file
    #[arg(short, long)]
    pub interactive: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = self.plan.load_config().unwrap_or_exit();
        let plan = self.plan.build_plan(&config)?;

        let check = ops::check(plan, &config);
        let mut out = TerminalOutput::new();
        if !check.is_valid() {
            check.render_diagnostics(&mut out);
            std::process::exit(1);
        }

        let opts = GenerateOptions {
            output_dir: &self.plan.output,
            dry_run: self.dry_run,
            policy: ConflictPolicy::from_flags(self.force, self.interactive),
        };
        let result = ops::generate(&check.plan, &config, opts, &mut TerminalConfirm::new())?;

        let report = GenerateReport {
            warnings: check.warnings,
            created_repositories: check.created_repositories,
            result,
        };
        report.render(&mut out);

        Ok(())
    }
}
