use super::{base_name, Backend, DirEntry, File, FsError, Metadata};
use crate::security::PathSanitizer;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Backend serving files from a directory on the local disk
#[derive(Debug, Clone)]
pub struct LocalDir {
    root: PathBuf,
}

impl LocalDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a logical path onto the disk, refusing anything outside the root
    fn resolve(&self, path: &str) -> Result<PathBuf, FsError> {
        let cleaned = PathSanitizer::clean(path)?;
        if cleaned.is_empty() {
            return Ok(self.root.clone());
        }
        Ok(self.root.join(cleaned))
    }
}

impl Backend for LocalDir {
    fn open(&self, path: &str) -> Result<File, FsError> {
        let full = self.resolve(path)?;
        let meta = fs::metadata(&full).map_err(|e| FsError::from_io("open", path, e))?;
        let metadata = Metadata {
            name: base_name(path).to_string(),
            size: meta.len(),
            mode: permission_bits(&meta),
            modified: meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            is_dir: meta.is_dir(),
        };

        if metadata.is_dir {
            return Ok(File::new(metadata, io::empty()));
        }

        let file = fs::File::open(&full).map_err(|e| FsError::from_io("open", path, e))?;
        Ok(File::new(metadata, file))
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let full = self.resolve(path)?;
        let iter = fs::read_dir(&full).map_err(|e| match e.kind() {
            io::ErrorKind::NotADirectory => FsError::NotADirectory {
                path: path.to_string(),
            },
            _ => FsError::from_io("readdir", path, e),
        })?;

        let mut entries = Vec::new();
        for entry in iter {
            let entry = entry.map_err(|e| FsError::from_io("readdir", path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| FsError::from_io("readdir", path, e))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
