//! Byte store — the only place the runtime touches storage.
//!
//! Two capabilities: read the bytes at a path, write bytes to a path.
//! `FsStore` backs the CLI; `MemoryStore` backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait ByteStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

impl<S: ByteStore + ?Sized> ByteStore for &S {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).write(path, bytes)
    }
}

/// Local filesystem. Parent directories are created on write.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ByteStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, bytes)
    }
}

/// In-memory store keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), bytes.into());
        }
        self
    }

    fn poisoned() -> io::Error {
        io::Error::new(io::ErrorKind::Other, "memory store lock poisoned")
    }
}

impl ByteStore for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let files = self.files.lock().map_err(|_| Self::poisoned())?;
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut files = self.files.lock().map_err(|_| Self::poisoned())?;
        files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
