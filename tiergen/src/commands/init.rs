use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tiergen_manifest::{CONFIG_FILE_NAME, ConfigFile};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct InitCommand {
    /// Directory to write tiergen.toml into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.output.join(CONFIG_FILE_NAME);
        ConfigFile::write_default(&path).unwrap_or_exit();

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        println!("  tiergen generate -e Order:ID:string -u CreateOrder");

        Ok(())
    }
}
