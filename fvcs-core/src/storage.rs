//! File I/O collaborator
//!
//! The repository only ever reads a tracked file whole and writes it back
//! whole. Anything that can do those two things can back a repository.

use bytes::Bytes;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Whole-file byte I/O
///
/// Implementations must treat `write_all` as a full overwrite that creates the
/// file when it does not exist.
pub trait FileIo: Send + Sync {
    /// Read the entire content of `path`
    fn read_all(&self, path: &str) -> io::Result<Bytes>;

    /// Replace the entire content of `path` with `data`
    fn write_all(&self, path: &str, data: &[u8]) -> io::Result<()>;
}

impl<T: FileIo + ?Sized> FileIo for Arc<T> {
    fn read_all(&self, path: &str) -> io::Result<Bytes> {
        (**self).read_all(path)
    }

    fn write_all(&self, path: &str, data: &[u8]) -> io::Result<()> {
        (**self).write_all(path, data)
    }
}

/// Local filesystem backend
///
/// Relative paths resolve against `root` when one is set, otherwise against
/// the process working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalFs {
    root: Option<PathBuf>,
}

impl LocalFs {
    /// Backend resolving relative paths against the working directory
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Backend resolving relative paths against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Resolve a logical path to the on-disk location
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        match &self.root {
            Some(root) if p.is_relative() => root.join(p),
            _ => p.to_path_buf(),
        }
    }
}

impl FileIo for LocalFs {
    fn read_all(&self, path: &str) -> io::Result<Bytes> {
        std::fs::read(self.resolve(path)).map(Bytes::from)
    }

    fn write_all(&self, path: &str, data: &[u8]) -> io::Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(target, data)
    }
}

/// In-memory backend
///
/// Clones share the same file map, so a caller can keep a handle to inspect
/// what a repository wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` has been written
    pub fn contains(&self, path: &str) -> bool {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    /// Remove `path`, returning its last content
    pub fn remove(&self, path: &str) -> Option<Bytes> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }
}

impl FileIo for MemoryFs {
    fn read_all(&self, path: &str) -> io::Result<Bytes> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{}: no such file", path),
                )
            })
    }

    fn write_all(&self, path: &str, data: &[u8]) -> io::Result<()> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), Bytes::copy_from_slice(data));
        Ok(())
    }
}
