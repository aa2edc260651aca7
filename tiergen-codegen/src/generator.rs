//! Transactional, phase-ordered generation of a resolved plan.
//!
//! The [`Generator`] walks [`GenerationPhase::ALL`] in order, rendering and
//! writing every file of a phase before moving to the next. Any failure, be
//! it rendering, writing or a use-case whose dependencies vanished from the
//! plan, rolls back every file written so far, exactly once.

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr, bail};
use tiergen_core::{RollbackError, TransactionalWriter};
use tiergen_ir::{Plan, UseCaseConfig};
use tiergen_manifest::Config;

pub use crate::paths::GenerationPhase;
use crate::{
    dependency::DependencyDetector,
    paths::{OutputFile, PathMap, Target},
    render::{Renderer, render_target},
};

/// A rendered file that was not written, for `--dry-run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    pub content: String,
}

/// Outcome of a committed run.
#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    /// Absolute paths of every written file, in write order.
    pub files: Vec<PathBuf>,
}

impl GenerationSummary {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A failed run, after its rollback.
///
/// `cause` is the failure that stopped generation. A rollback that could not
/// undo everything is reported next to it in `rollback`, never in its place.
#[derive(Debug, thiserror::Error)]
#[error("generation failed")]
pub struct GenerationFailure {
    #[source]
    pub cause: Box<dyn Error + Send + Sync + 'static>,
    /// Files that were written before the failure and then rolled back.
    pub rolled_back: Vec<PathBuf>,
    pub rollback: Option<RollbackError>,
}

impl GenerationFailure {
    /// Files still on disk because rollback could not undo them.
    pub fn surviving_paths(&self) -> Vec<&Path> {
        self.rollback
            .iter()
            .flat_map(RollbackError::surviving_paths)
            .collect()
    }

    pub fn rollback_succeeded(&self) -> bool {
        self.rollback.is_none()
    }
}

/// Writes a resolved plan to disk through a [`TransactionalWriter`].
pub struct Generator<R> {
    paths: PathMap,
    renderer: R,
    writer: TransactionalWriter,
    detector: DependencyDetector,
    overwrite: bool,
}

impl<R: Renderer> Generator<R> {
    /// Create a generator writing under `root`.
    pub fn new(config: &Config, renderer: R, root: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathMap::new(config),
            renderer,
            writer: TransactionalWriter::new(root),
            detector: DependencyDetector::new(),
            overwrite: false,
        }
    }

    /// Allow replacing files that already exist.
    ///
    /// Only set this once the conflict policy approved it.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn root(&self) -> &Path {
        self.writer.root()
    }

    /// Every file the plan produces, in write order, relative to the root.
    pub fn expected_files<'a>(&self, plan: &'a Plan) -> Vec<OutputFile<'a>> {
        self.paths.expected_files(plan)
    }

    /// The expected files joined to the root, ready for a conflict check.
    pub fn conflict_paths(&self, plan: &Plan) -> Vec<PathBuf> {
        self.expected_files(plan)
            .into_iter()
            .map(|file| self.root().join(file.path))
            .collect()
    }

    /// Fail if two files of the plan map to the same path.
    pub fn check_paths(&self, plan: &Plan) -> Result<()> {
        let collisions = self.paths.collisions(plan);
        if let Some(first) = collisions.first() {
            bail!(
                "{} output path collision(s), first: {}",
                collisions.len(),
                first
            );
        }
        Ok(())
    }

    /// Render every file without touching the filesystem.
    pub fn preview(&self, plan: &Plan) -> Result<Vec<PreviewFile>> {
        self.check_paths(plan)?;
        self.expected_files(plan)
            .into_iter()
            .map(|file| {
                let content = render_target(&self.renderer, &file.target, plan)
                    .wrap_err_with(|| describe(&file.target))?;
                Ok(PreviewFile {
                    path: file.path,
                    content,
                })
            })
            .collect()
    }

    /// Generate every phase of `plan`, or nothing at all.
    pub fn generate(&self, plan: &Plan) -> std::result::Result<GenerationSummary, GenerationFailure> {
        match self.write_phases(plan) {
            Ok(files) => {
                self.writer.clear();
                tracing::info!(files = files.len(), "generation committed");
                Ok(GenerationSummary { files })
            }
            Err(cause) => {
                let rolled_back = self.writer.written_files();
                let rollback = self.writer.rollback().err();
                Err(GenerationFailure {
                    cause: cause.into(),
                    rolled_back,
                    rollback,
                })
            }
        }
    }

    fn write_phases(&self, plan: &Plan) -> Result<Vec<PathBuf>> {
        self.check_paths(plan)?;
        let mut written = Vec::new();

        for phase in GenerationPhase::ALL {
            let files = self.paths.phase_files(phase, plan);
            if files.is_empty() {
                continue;
            }
            tracing::debug!(phase = %phase, files = files.len(), "generating phase");

            for file in files {
                let path = self
                    .write_file(&file, plan)
                    .wrap_err_with(|| describe(&file.target))?;
                written.push(path);
            }
        }

        Ok(written)
    }

    fn write_file(&self, file: &OutputFile<'_>, plan: &Plan) -> Result<PathBuf> {
        if let Target::UseCase(use_case) = file.target {
            self.check_dependencies(use_case, plan)?;
        }

        let content = render_target(&self.renderer, &file.target, plan)?;
        let path = self.writer.write(&file.path, &content, self.overwrite)?;
        Ok(path)
    }

    /// Recompute the use-case's dependencies against the plan as it is now.
    fn check_dependencies(&self, use_case: &UseCaseConfig, plan: &Plan) -> Result<()> {
        let missing: Vec<String> = self
            .detector
            .detect(use_case, plan)
            .into_iter()
            .filter(|dep| !dep.found)
            .map(|dep| dep.name)
            .collect();

        if !missing.is_empty() {
            bail!("missing dependencies: {}", missing.join(", "));
        }
        Ok(())
    }
}

fn describe(target: &Target<'_>) -> String {
    format!("failed to generate {target}")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use tiergen_ir::EntityConfig;

    use super::*;
    use crate::{
        render::GoRenderer,
        testing::{FailingRenderer, order_plan},
    };

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        let root = std::path::absolute(root).unwrap();
        files
            .iter()
            .map(|f| {
                f.strip_prefix(&root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_generate_writes_phases_in_order() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());

        let summary = generator.generate(&order_plan()).unwrap();

        assert_eq!(
            relative(temp.path(), &summary.files),
            vec![
                "internal/domain/order.go",
                "internal/domain/order_repository.go",
                "internal/repository/order_repository.go",
                "internal/usecase/create_order_usecase.go",
            ]
        );
        assert!(summary.files.iter().all(|f| f.exists()));
    }

    #[test]
    fn test_generate_refuses_existing_file_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let existing = temp.path().join("internal/usecase/create_order_usecase.go");
        fs::create_dir_all(existing.parent().unwrap()).unwrap();
        fs::write(&existing, "hand written").unwrap();

        let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());
        let failure = generator.generate(&order_plan()).unwrap_err();

        assert!(failure.rollback_succeeded());
        assert_eq!(failure.rolled_back.len(), 3);
        assert_eq!(fs::read_to_string(&existing).unwrap(), "hand written");
        assert!(!temp.path().join("internal/domain").exists());
    }

    #[test]
    fn test_generate_rolls_back_on_render_failure() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let renderer = FailingRenderer::new(&config, "CreateOrder");
        let generator = Generator::new(&config, renderer, temp.path());

        let failure = generator.generate(&order_plan()).unwrap_err();

        assert_eq!(
            failure.cause.to_string(),
            "failed to generate use case 'CreateOrder'"
        );
        assert_eq!(failure.rolled_back.len(), 3);
        assert!(!temp.path().join("internal").exists());
    }

    #[test]
    fn test_generate_rejects_unresolved_use_case() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let plan = Plan {
            use_cases: vec![UseCaseConfig::new("CreateInvoice")],
            ..Plan::new()
        };

        let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());
        let failure = generator.generate(&plan).unwrap_err();

        assert!(
            failure
                .cause
                .to_string()
                .contains("failed to generate use case 'CreateInvoice'")
        );
        assert!(failure.rolled_back.is_empty());
    }

    #[test]
    fn test_colliding_paths_fail_before_any_write() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let mut plan = order_plan();
        plan.entities
            .push(EntityConfig::new("OrderRepository", "order_repositories"));

        let generator =
            Generator::new(&config, GoRenderer::new(&config), temp.path()).overwrite(true);
        let failure = generator.generate(&plan).unwrap_err();

        assert!(
            failure
                .cause
                .to_string()
                .contains("entity 'OrderRepository' and repository interface 'Order'")
        );
        assert!(failure.rolled_back.is_empty());
        assert!(!temp.path().join("internal").exists());
        assert!(generator.preview(&plan).is_err());
    }

    #[test]
    fn test_conflict_paths_are_rooted() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());

        let paths = generator.conflict_paths(&order_plan());

        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.starts_with(temp.path())));
    }

    #[test]
    fn test_preview_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());

        let files = generator.preview(&order_plan()).unwrap();

        assert_eq!(files.len(), 4);
        assert_eq!(files[0].path, PathBuf::from("internal/domain/order.go"));
        assert!(files[0].content.starts_with("package domain\n"));
        assert!(!temp.path().join("internal").exists());
    }

    #[test]
    fn test_committed_run_cannot_be_rolled_back() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let generator = Generator::new(&config, GoRenderer::new(&config), temp.path());

        let summary = generator.generate(&order_plan()).unwrap();
        generator.writer.rollback().unwrap();

        assert!(summary.files.iter().all(|f| f.exists()));
    }
}
