mod error;
mod local;

#[cfg(test)]
mod tests;

pub use error::FsError;
pub use local::LocalDir;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::io::{Cursor, Read};
use std::sync::Arc;

/// Read-only permission bits reported for generated files
pub const READ_ONLY_MODE: u32 = 0o444;

/// Core trait that every content source implements
///
/// Paths are slash-separated and relative to the source root
/// (e.g. "doc/go_spec.html"); "" and "." name the root itself.
pub trait Backend: Send + Sync {
    /// Open a file for reading
    fn open(&self, path: &str) -> Result<File, FsError>;

    /// List the entries of a directory
    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError>;

    /// Read an entire file into memory
    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let mut file = self.open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| FsError::from_io("read", path, e))?;
        Ok(data)
    }
}

impl<B: Backend + ?Sized> Backend for &B {
    fn open(&self, path: &str) -> Result<File, FsError> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        (**self).read_dir(path)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn open(&self, path: &str) -> Result<File, FsError> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        (**self).read_dir(path)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn open(&self, path: &str) -> Result<File, FsError> {
        (**self).open(path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        (**self).read_dir(path)
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Metadata reported for an open file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Base name of the file
    pub name: String,
    /// Length in bytes
    pub size: u64,
    /// Unix permission bits
    pub mode: u32,
    pub modified: DateTime<Utc>,
    pub is_dir: bool,
}

/// An open, readable file handle
pub struct File {
    metadata: Metadata,
    reader: Box<dyn Read + Send>,
}

impl File {
    pub fn new(metadata: Metadata, reader: impl Read + Send + 'static) -> Self {
        Self {
            metadata,
            reader: Box::new(reader),
        }
    }

    /// A file backed by an owned in-memory buffer
    pub fn from_bytes(metadata: Metadata, data: Vec<u8>) -> Self {
        Self::new(metadata, Cursor::new(data))
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Final path element, the way a directory listing names it
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, name)) => name,
        None if trimmed.is_empty() => ".",
        None => trimmed,
    }
}
