//! Interactive overwrite confirmation.

use std::path::Path;

use dialoguer::{Confirm as Prompt, theme::ColorfulTheme};
use eyre::{Context, Result};
use tiergen_codegen::conflict::Confirm;

/// Asks on the terminal before each existing file is replaced.
pub struct TerminalConfirm {
    theme: ColorfulTheme,
}

impl TerminalConfirm {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for TerminalConfirm {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        Prompt::with_theme(&self.theme)
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .wrap_err("Failed to read confirmation")
    }
}
