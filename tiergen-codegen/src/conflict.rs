//! Detection and policy for output files that already exist.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Reports which expected output paths already exist on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictChecker;

impl ConflictChecker {
    pub fn new() -> Self {
        Self
    }

    /// The subset of `paths` that currently exist, in input order.
    ///
    /// Only reads the filesystem. An error means existence could not be
    /// determined, e.g. a permission problem on a parent directory.
    pub fn check_conflicts<P: AsRef<Path>>(&self, paths: &[P]) -> io::Result<Vec<PathBuf>> {
        let mut conflicts = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.try_exists()? {
                conflicts.push(path.to_path_buf());
            }
        }
        Ok(conflicts)
    }
}

/// What to do when generation would replace existing files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Refuse to run.
    #[default]
    Abort,
    /// Overwrite without asking.
    Force,
    /// Ask once per file; any refusal cancels the run.
    Confirm,
}

impl ConflictPolicy {
    /// Policy implied by the `--force` and `--interactive` switches.
    ///
    /// Forcing takes precedence over asking.
    pub fn from_flags(force: bool, interactive: bool) -> Self {
        match (force, interactive) {
            (true, _) => ConflictPolicy::Force,
            (false, true) => ConflictPolicy::Confirm,
            (false, false) => ConflictPolicy::Abort,
        }
    }
}

/// Source of per-file overwrite approval.
pub trait Confirm {
    fn confirm_overwrite(&mut self, path: &Path) -> eyre::Result<bool>;
}

/// Approves or rejects everything; handy for non-interactive callers.
#[derive(Debug, Clone, Copy)]
pub struct AnswerAll(pub bool);

impl Confirm for AnswerAll {
    fn confirm_overwrite(&mut self, _path: &Path) -> eyre::Result<bool> {
        Ok(self.0)
    }
}

#[derive(Debug, Error)]
pub enum ConflictError {
    #[error("{} file(s) already exist", .paths.len())]
    Exists { paths: Vec<PathBuf> },

    #[error("overwrite of '{}' declined, generation cancelled", .path.display())]
    Declined { path: PathBuf },

    #[error("failed to ask about '{}'", .path.display())]
    Prompt {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Apply `policy` to the detected `conflicts`.
///
/// Returns whether the writer may overwrite. With no conflicts this is
/// `false` regardless of policy, so nothing is ever replaced by accident.
pub fn resolve_conflicts(
    conflicts: &[PathBuf],
    policy: ConflictPolicy,
    confirm: &mut dyn Confirm,
) -> Result<bool, ConflictError> {
    if conflicts.is_empty() {
        return Ok(false);
    }

    match policy {
        ConflictPolicy::Abort => Err(ConflictError::Exists {
            paths: conflicts.to_vec(),
        }),
        ConflictPolicy::Force => {
            tracing::info!(files = conflicts.len(), "overwriting existing files");
            Ok(true)
        }
        ConflictPolicy::Confirm => {
            for path in conflicts {
                let approved =
                    confirm
                        .confirm_overwrite(path)
                        .map_err(|e| ConflictError::Prompt {
                            path: path.clone(),
                            source: e.into(),
                        })?;
                if !approved {
                    return Err(ConflictError::Declined { path: path.clone() });
                }
            }
            Ok(true)
        }
    }
}
