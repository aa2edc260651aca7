use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Failure of a single [`TransactionalWriter::write`](crate::TransactionalWriter::write).
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to resolve absolute path for {}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read existing file {}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            WriteError::AlreadyExists { path }
            | WriteError::Resolve { path, .. }
            | WriteError::Backup { path, .. }
            | WriteError::CreateDir { path, .. }
            | WriteError::Write { path, .. } => path,
        }
    }
}

/// A path rollback could not restore.
#[derive(Debug, Error)]
#[error("failed to undo {}: {source}", path.display())]
pub struct RollbackFailure {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Every failure collected during a rollback.
#[derive(Debug, Error)]
#[error("rollback completed with {} error(s):\n{}", failures.len(), describe(failures))]
pub struct RollbackError {
    pub failures: Vec<RollbackFailure>,
}

impl RollbackError {
    /// Paths that are still on disk because they could not be undone.
    pub fn surviving_paths(&self) -> impl Iterator<Item = &Path> {
        self.failures.iter().map(|f| f.path.as_path())
    }
}

fn describe(failures: &[RollbackFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}
