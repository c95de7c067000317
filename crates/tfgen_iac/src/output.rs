//! Output sinks for generated files.
//!
//! The generator only talks to [`DirectoryCreator`] and [`FileWriter`].
//! [`LocalFs`] writes to disk; [`MemoryOutput`] records writes in memory for
//! dry runs and tests.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

/// Idempotent recursive directory creation.
pub trait DirectoryCreator {
    fn create_dirs(&self, paths: &[PathBuf]) -> io::Result<()>;
}

/// Create-or-overwrite file writes. Parent directories are created as needed.
pub trait FileWriter {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DirectoryCreator for LocalFs {
    fn create_dirs(&self, paths: &[PathBuf]) -> io::Result<()> {
        for path in paths {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

impl FileWriter for LocalFs {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

/// In-memory sink.
///
/// Clones share state, so a test can keep a handle while the generator
/// writes through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    dirs: Arc<RwLock<BTreeSet<PathBuf>>>,
    files: Arc<RwLock<BTreeMap<PathBuf, String>>>,
    /// Paths in the order they were written.
    writes: Arc<RwLock<Vec<PathBuf>>>,
    /// Fail any write or directory whose path contains this text.
    fail_on: Arc<RwLock<Option<String>>>,
    /// Fail only file writes whose path contains this text.
    fail_writes_on: Arc<RwLock<Option<String>>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation on a path containing `needle` fail.
    pub fn fail_on(self, needle: impl Into<String>) -> Self {
        *self.fail_on.write() = Some(needle.into());
        self
    }

    /// Make file writes to a path containing `needle` fail; directories still succeed.
    pub fn fail_writes_on(self, needle: impl Into<String>) -> Self {
        *self.fail_writes_on.write() = Some(needle.into());
        self
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.read().iter().cloned().collect()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().get(path.as_ref()).cloned()
    }

    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        self.files.read().clone()
    }

    pub fn write_order(&self) -> Vec<PathBuf> {
        self.writes.read().clone()
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        injected_failure(&self.fail_on, path)
    }
}

fn injected_failure(needle: &RwLock<Option<String>>, path: &Path) -> io::Result<()> {
    if let Some(needle) = needle.read().as_deref() {
        if path.to_string_lossy().contains(needle) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected failure for {:?}", path),
            ));
        }
    }
    Ok(())
}

impl DirectoryCreator for MemoryOutput {
    fn create_dirs(&self, paths: &[PathBuf]) -> io::Result<()> {
        for path in paths {
            self.check(path)?;
            let mut dirs = self.dirs.write();
            for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }
}

impl FileWriter for MemoryOutput {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check(path)?;
        injected_failure(&self.fail_writes_on, path)?;
        if let Some(parent) = path.parent() {
            self.create_dirs(&[parent.to_path_buf()])?;
        }
        self.files.write().insert(path.to_path_buf(), contents.to_string());
        self.writes.write().push(path.to_path_buf());
        Ok(())
    }
}
