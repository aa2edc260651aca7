//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Repositories the resolver added.
    pub created_repositories: Vec<String>,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output directory.
    pub output_dir: PathBuf,
    /// Written files, relative to the output directory.
    pub files: Vec<String>,
    /// Number of pre-existing files that were replaced.
    pub overwritten: usize,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_created(&self, out: &mut dyn Output) {
        if self.created_repositories.is_empty() {
            return;
        }
        out.section("Auto-created repositories");
        for name in &self.created_repositories {
            out.added_item(&format!("{}Repository", name));
        }
        out.newline();
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        self.render_created(out);

        out.section(&format!("Generated ({})", written.files.len()));
        for file in &written.files {
            out.added_item(file);
        }
        out.newline();

        if written.overwritten > 0 {
            out.key_value("Overwritten", &written.overwritten.to_string());
        }
        out.key_value("Output", &written.output_dir.display().to_string());
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        self.render_created(out);
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
