use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use tempfile::NamedTempFile;

use crate::{RollbackError, RollbackFailure, WriteError};

/// One entry of the write history.
#[derive(Debug)]
struct WriteRecord {
    /// Absolute path of the written file.
    path: PathBuf,
    /// Contents the file had before this run overwrote it.
    previous: Option<Vec<u8>>,
    /// Directories this write created, outermost first.
    created_dirs: Vec<PathBuf>,
}

/// Writes generated files and remembers them so the whole run can be undone.
///
/// Every successful [`write`](Self::write) appends to an ordered history.
/// [`rollback`](Self::rollback) walks that history backwards, deleting files
/// this run created, restoring files it overwrote and removing directories it
/// created, so a failed run leaves the tree as it found it.
///
/// A single lock guards both the existence check and the history append.
/// Two callers writing the same path is still a conflict for the caller to
/// prevent; it is not deduplicated here.
#[derive(Debug)]
pub struct TransactionalWriter {
    root: PathBuf,
    history: Mutex<Vec<WriteRecord>>,
}

impl TransactionalWriter {
    /// Create a writer that resolves relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            history: Mutex::new(Vec::new()),
        }
    }

    /// The directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `path`, creating parent directories as needed.
    ///
    /// Fails with [`WriteError::AlreadyExists`] if the file exists and
    /// `overwrite` is false. On success the absolute path is appended to the
    /// history and returned.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        content: &str,
        overwrite: bool,
    ) -> Result<PathBuf, WriteError> {
        let mut history = self.lock();
        let full_path = self.absolute(path.as_ref())?;

        let exists = full_path
            .try_exists()
            .map_err(|source| WriteError::Backup {
                path: full_path.clone(),
                source,
            })?;
        if exists && !overwrite {
            return Err(WriteError::AlreadyExists { path: full_path });
        }

        let previous = if exists {
            Some(fs::read(&full_path).map_err(|source| WriteError::Backup {
                path: full_path.clone(),
                source,
            })?)
        } else {
            None
        };

        let mut created_dirs = Vec::new();
        if let Some(parent) = full_path.parent() {
            created_dirs = missing_ancestors(parent);
            create_dirs(&created_dirs).map_err(|(path, source)| WriteError::CreateDir {
                path,
                source,
            })?;
        }

        // The target is only replaced by a rename once the new contents are
        // complete, so a failed write leaves an existing file untouched.
        if let Err(source) = replace_file(&full_path, |file| file.write_all(content.as_bytes())) {
            remove_empty_dirs(&created_dirs);
            return Err(WriteError::Write {
                path: full_path,
                source,
            });
        }

        tracing::debug!(path = %full_path.display(), overwrote = exists, "wrote file");
        history.push(WriteRecord {
            path: full_path.clone(),
            previous,
            created_dirs,
        });

        Ok(full_path)
    }

    /// Write `content` only if nothing exists at `path` yet.
    pub fn write_new(&self, path: impl AsRef<Path>, content: &str) -> Result<PathBuf, WriteError> {
        self.write(path, content, false)
    }

    /// Undo every write in the history, last written first.
    ///
    /// Files that are already gone are skipped. Every failure is collected
    /// rather than stopping at the first, and the history is cleared
    /// afterwards even when some entries could not be undone.
    pub fn rollback(&self) -> Result<(), RollbackError> {
        let mut history = self.lock();
        let records = std::mem::take(&mut *history);

        if !records.is_empty() {
            tracing::warn!(files = records.len(), "rolling back generated files");
        }

        let mut failures = Vec::new();
        for record in records.into_iter().rev() {
            let result = match &record.previous {
                Some(contents) => replace_file(&record.path, |file| file.write_all(contents)),
                None => remove_if_present(&record.path),
            };

            match result {
                Ok(()) => {
                    tracing::debug!(path = %record.path.display(), "undid write");
                    remove_empty_dirs(&record.created_dirs);
                }
                Err(source) => failures.push(RollbackFailure {
                    path: record.path,
                    source,
                }),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RollbackError { failures })
        }
    }

    /// Snapshot of the absolute paths written so far, in write order.
    pub fn written_files(&self) -> Vec<PathBuf> {
        self.lock().iter().map(|r| r.path.clone()).collect()
    }

    /// Forget the history without touching the filesystem.
    ///
    /// Call this once a run has committed so a later rollback cannot
    /// remove its files.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<WriteRecord>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf, WriteError> {
        let joined = self.root.join(path);
        std::path::absolute(&joined).map_err(|source| WriteError::Resolve {
            path: joined,
            source,
        })
    }
}

/// Fill a sibling temp file and rename it over `path`.
///
/// The file keeps the permissions of whatever it replaces.
fn replace_file(
    path: &Path,
    fill: impl FnOnce(&mut fs::File) -> io::Result<()>,
) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    fill(temp.as_file_mut())?;
    temp.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(temp.path(), meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_default_permissions(temp.path())?,
        Err(e) => return Err(e),
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Directories between `dir` and its closest existing ancestor, outermost first.
fn missing_ancestors(dir: &Path) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|d| !d.as_os_str().is_empty() && !d.exists())
        .map(Path::to_path_buf)
        .collect();
    missing.reverse();
    missing
}

/// Create `dirs` outermost first, removing the ones already made if one fails.
fn create_dirs(dirs: &[PathBuf]) -> Result<(), (PathBuf, io::Error)> {
    for (i, dir) in dirs.iter().enumerate() {
        if let Err(source) = fs::create_dir(dir) {
            if source.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() {
                continue;
            }
            remove_empty_dirs(&dirs[..i]);
            return Err((dir.clone(), source));
        }
    }
    Ok(())
}

/// Best-effort removal of directories a write created, innermost first.
///
/// A directory that has since gained other entries is left in place.
fn remove_empty_dirs(dirs: &[PathBuf]) {
    for dir in dirs.iter().rev() {
        if fs::remove_dir(dir).is_err() {
            break;
        }
    }
}
