//! Generate operation - conflict check, then transactional generation.

use std::path::{Path, PathBuf};

use color_eyre::Section;
use eyre::{Context, Result};
use tiergen_codegen::{
    Generator,
    conflict::{Confirm, ConflictChecker, ConflictPolicy, resolve_conflicts},
    render::GoRenderer,
};
use tiergen_ir::Plan;
use tiergen_manifest::Config;

use crate::reports::{GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Project root generated files are written under.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// What to do about files that already exist.
    pub policy: ConflictPolicy,
}

/// Execute the generate operation on a resolved plan.
///
/// Existing files are checked before anything is written. A failed run is
/// rolled back; files the rollback could not remove are attached to the
/// returned error.
pub fn generate(
    plan: &Plan,
    config: &Config,
    opts: GenerateOptions,
    confirm: &mut dyn Confirm,
) -> Result<GenerationResult> {
    let generator = Generator::new(config, GoRenderer::new(config), opts.output_dir);

    if opts.dry_run {
        let files = generator
            .preview(plan)?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path.display().to_string(),
                content: f.content,
            })
            .collect();
        return Ok(GenerationResult::Preview(PreviewResult { files }));
    }

    let conflicts = ConflictChecker::new()
        .check_conflicts(&generator.conflict_paths(plan))
        .wrap_err("Failed to check for existing files")?;
    let overwrite = resolve_conflicts(&conflicts, opts.policy, confirm)
        .map_err(eyre::Report::new)
        .with_section(|| list("Existing files", &conflicts))
        .suggestion("use --force to overwrite or --interactive to decide per file")?;

    let generator = generator.overwrite(overwrite);
    match generator.generate(plan) {
        Ok(summary) => Ok(GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files: relative_to(opts.output_dir, &summary.files),
            overwritten: conflicts.len(),
        })),
        Err(failure) => {
            let rolled_back = failure.rolled_back.len();
            let survivors: Vec<PathBuf> = failure
                .surviving_paths()
                .into_iter()
                .map(Path::to_path_buf)
                .collect();

            let mut report = eyre::Report::new(failure)
                .note(format!("{rolled_back} written file(s) were rolled back"));
            if !survivors.is_empty() {
                report = report.section(list("Left on disk after rollback", &survivors));
            }
            Err(report)
        }
    }
}

fn list(header: &str, paths: &[PathBuf]) -> String {
    let mut out = format!("{header}:");
    for path in paths {
        out.push_str(&format!("\n  {}", path.display()));
    }
    out
}

fn relative_to(root: &Path, files: &[PathBuf]) -> Vec<String> {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    files
        .iter()
        .map(|f| f.strip_prefix(&root).unwrap_or(f).display().to_string())
        .collect()
}
