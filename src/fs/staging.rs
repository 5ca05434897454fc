//! Staged package tree with a single-rename commit.
//!
//! The template is copied and rewritten inside a temporary directory that
//! sits next to the destination. The destination itself is only touched by
//! [`Staging::commit`], which moves the finished tree into place with one
//! `rename`.
//!
//! ## Phases
//!
//! 1. **Build**: `Staging::new()` checks the destination and creates the
//!    staging directory; the pipeline populates `root()`
//! 2. **Commit**: rename the staged root onto the destination
//! 3. **Discard** (dry run or fatal error): remove the staging directory
//!
//! ## Example
//!
//! ```no_run
//! # use swift_template::fs::Staging;
//! # use std::path::Path;
//! # fn example() -> swift_template::error::Result<()> {
//! let mut staging = Staging::new(Path::new("Widget"))?;
//! std::fs::create_dir(staging.root())?;
//! staging.commit()?; // Widget/ now exists
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, TemplateError};

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StagingState {
    /// Pipeline is populating the staged root.
    Building,
    /// Staged root now lives at the destination.
    Committed,
    /// Staging directory removed; destination untouched.
    Discarded,
}

/// Temporary working copy of the package being instantiated.
///
/// Dropping a staging area without committing removes it.
#[must_use = "Staging must be committed or discarded"]
pub struct Staging {
    dir: Option<TempDir>,
    root: PathBuf,
    destination: PathBuf,
    /// Parent directories `new()` had to create, deepest first.
    created_parents: Vec<PathBuf>,
    state: StagingState,
}

impl Staging {
    /// Creates a staging directory in the destination's parent.
    ///
    /// Fails with `DestinationExists` when the destination is a file or a
    /// non-empty directory. Missing parent directories are created;
    /// [`discard`](Staging::discard) removes them again.
    pub fn new(destination: &Path) -> Result<Self> {
        check_destination(destination)?;

        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let created_parents = missing_ancestors(&parent);
        fs::create_dir_all(&parent).map_err(|e| TemplateError::io("create", &parent, e))?;

        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string());

        let dir = tempfile::Builder::new()
            .prefix(&format!(".{}-staging-", name))
            .tempdir_in(&parent)
            .map_err(|e| TemplateError::io("create staging directory in", &parent, e))?;
        let root = dir.path().join(&name);

        log::debug!("Staging {} at {}", destination.display(), root.display());

        Ok(Self {
            dir: Some(dir),
            root,
            destination: destination.to_path_buf(),
            created_parents,
            state: StagingState::Building,
        })
    }

    /// Path the pipeline writes the package tree to. Does not exist until
    /// something creates it.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Returns true if successfully committed.
    pub fn is_committed(&self) -> bool {
        self.state == StagingState::Committed
    }

    /// Moves the staged root onto the destination.
    ///
    /// An empty destination directory is replaced. The destination is
    /// re-checked first so a directory populated since `new()` is never
    /// overwritten.
    pub fn commit(&mut self) -> Result<()> {
        if self.state != StagingState::Building {
            return Err(TemplateError::Other(anyhow::anyhow!(
                "Staging already committed/discarded"
            )));
        }

        if !self.root.exists() {
            return Err(TemplateError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Nothing staged at {}", self.root.display()),
            )));
        }

        check_destination(&self.destination)?;
        if self.destination.is_dir() {
            fs::remove_dir(&self.destination)
                .map_err(|e| TemplateError::io("replace", &self.destination, e))?;
        }

        fs::rename(&self.root, &self.destination)
            .map_err(|e| TemplateError::io("commit", &self.destination, e))?;

        self.state = StagingState::Committed;
        log::info!("Committed: {}", self.destination.display());

        // Only the now-empty staging directory remains.
        self.remove_staging_dir();
        Ok(())
    }

    /// Removes the staged tree without touching the destination.
    pub fn discard(&mut self) -> Result<()> {
        match self.state {
            StagingState::Building => {
                self.state = StagingState::Discarded;
                if let Some(dir) = self.dir.take() {
                    let path = dir.path().to_path_buf();
                    dir.close()
                        .map_err(|e| TemplateError::io("remove", &path, e))?;
                }
                self.remove_created_parents();
                log::debug!("Discarded staging for {}", self.destination.display());
                Ok(())
            }
            StagingState::Discarded => Ok(()),
            StagingState::Committed => Err(TemplateError::Other(anyhow::anyhow!(
                "Cannot discard a committed staging area"
            ))),
        }
    }

    /// Removes the parents created by `new()` as long as they are empty.
    fn remove_created_parents(&mut self) {
        for dir in self.created_parents.drain(..) {
            if let Err(e) = fs::remove_dir(&dir) {
                log::debug!("Keeping {}: {}", dir.display(), e);
                break;
            }
        }
    }

    fn remove_staging_dir(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                log::warn!("Could not remove staging directory: {}", e);
            }
        }
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if self.state == StagingState::Building && self.root.exists() {
            log::warn!(
                "Staged package for {} dropped without commit",
                self.destination.display()
            );
        }
    }
}

/// Ancestors of `dir` (itself included) that do not exist yet, deepest first.
fn missing_ancestors(dir: &Path) -> Vec<PathBuf> {
    dir.ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
        .collect()
}

/// Ok when `path` is missing or an empty directory.
pub fn check_destination(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if !path.is_dir() {
        return Err(TemplateError::DestinationExists(path.to_path_buf()));
    }

    let mut entries = fs::read_dir(path).map_err(|e| TemplateError::io("read", path, e))?;
    if entries.next().is_some() {
        return Err(TemplateError::DestinationExists(path.to_path_buf()));
    }

    Ok(())
}
