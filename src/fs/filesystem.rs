//! Filesystem capability used by every instantiation step.
//!
//! The pipeline never touches `std::fs` directly; it goes through
//! [`FileSystem`] so a step can be exercised against a filesystem that
//! injects failures.

use crate::error::{Result, TemplateError};

use std::fs;
use std::io;
use std::path::Path;

/// What, if anything, lives at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Missing,
    File,
    Directory,
}

impl PathKind {
    pub fn exists(self) -> bool {
        self != PathKind::Missing
    }

    pub fn is_dir(self) -> bool {
        self == PathKind::Directory
    }
}

/// Operations the template pipeline needs from its environment.
///
/// `copy_path` and `move_path` never overwrite: an existing destination
/// is an `AlreadyExists` error.
pub trait FileSystem {
    /// Names of the direct children of `path`, in listing order.
    fn list_directory(&self, path: &Path) -> Result<Vec<String>>;

    /// Copies a file or a whole directory tree.
    fn copy_path(&self, from: &Path, to: &Path) -> Result<()>;

    /// Moves a file or directory.
    fn move_path(&self, from: &Path, to: &Path) -> Result<()>;

    fn path_kind(&self, path: &Path) -> PathKind;

    fn read_text_file(&self, path: &Path) -> Result<String>;

    fn write_text_file(&self, path: &Path, contents: &str) -> Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFs;

impl StdFs {
    fn refuse_existing(to: &Path) -> Result<()> {
        if to.exists() {
            return Err(TemplateError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Destination already exists: {}", to.display()),
            )));
        }
        Ok(())
    }

    /// Recursively copies directory tree.
    fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
        fs::create_dir_all(to).map_err(|e| TemplateError::io("create", to, e))?;

        for entry in fs::read_dir(from).map_err(|e| TemplateError::io("read", from, e))? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let from_path = entry.path();
            let to_path = to.join(entry.file_name());

            if file_type.is_dir() {
                Self::copy_dir_recursive(&from_path, &to_path)?;
            } else {
                fs::copy(&from_path, &to_path)
                    .map_err(|e| TemplateError::io("copy", &from_path, e))?;
            }
        }

        Ok(())
    }
}

impl FileSystem for StdFs {
    fn list_directory(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| TemplateError::io("list", path, e))? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn copy_path(&self, from: &Path, to: &Path) -> Result<()> {
        Self::refuse_existing(to)?;

        if from.is_dir() {
            Self::copy_dir_recursive(from, to)?;
        } else {
            fs::copy(from, to).map_err(|e| TemplateError::io("copy", from, e))?;
        }

        log::debug!("Copied: {} → {}", from.display(), to.display());
        Ok(())
    }

    fn move_path(&self, from: &Path, to: &Path) -> Result<()> {
        Self::refuse_existing(to)?;

        match fs::rename(from, to) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                if from.is_dir() {
                    Self::copy_dir_recursive(from, to)?;
                    fs::remove_dir_all(from).map_err(|e| TemplateError::io("remove", from, e))?;
                } else {
                    fs::copy(from, to).map_err(|e| TemplateError::io("copy", from, e))?;
                    fs::remove_file(from).map_err(|e| TemplateError::io("remove", from, e))?;
                }
            }
            Err(e) => return Err(TemplateError::io("move", from, e)),
        }

        log::debug!("Moved: {} → {}", from.display(), to.display());
        Ok(())
    }

    fn path_kind(&self, path: &Path) -> PathKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => PathKind::Directory,
            Ok(_) => PathKind::File,
            Err(_) => PathKind::Missing,
        }
    }

    fn read_text_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| TemplateError::io("read", path, e))
    }

    fn write_text_file(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| TemplateError::io("write", path, e))?;
        log::debug!("Updated: {}", path.display());
        Ok(())
    }
}
