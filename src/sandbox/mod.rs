mod entry;


use entry::FileEntry;

use crate::backend::{base_name, Backend, DirEntry, File, FsError, Metadata, READ_ONLY_MODE};
use crate::security::PathSanitizer;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io::{Read, Seek};
use std::path::Path;
use walkdir::WalkDir;

/// Immutable in-memory file tree with arena-backed storage
pub struct Sandbox {
    /// Single contiguous blob containing all file data
    arena: Vec<u8>,
    /// Index mapping virtual paths to arena slices, ordered by path
    index: BTreeMap<String, FileEntry>,
}

/// Mutable builder for constructing a sandbox
pub struct SandboxBuilder {
    arena: Vec<u8>,
    index: BTreeMap<String, FileEntry>,
    max_file_size: u64,
    max_total_size: u64,
}

impl SandboxBuilder {
    /// Create a new builder with default limits
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            index: BTreeMap::new(),
            max_file_size: 50 * 1024 * 1024,   // 50 MB per file
            max_total_size: 500 * 1024 * 1024, // 500 MB total
        }
    }

    /// Set maximum individual file size
    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set maximum total arena size
    pub fn max_total_size(mut self, size: u64) -> Self {
        self.max_total_size = size;
        self
    }

    /// Add a file to the sandbox arena
    pub fn add_file(&mut self, raw_path: &str, data: &[u8]) -> Result<(), FsError> {
        let virtual_path = PathSanitizer::sanitize(raw_path)?;

        if data.len() as u64 > self.max_file_size {
            return Err(FsError::FileTooLarge {
                size: data.len() as u64,
                max: self.max_file_size,
            });
        }

        let new_total = self.arena.len() as u64 + data.len() as u64;
        if new_total > self.max_total_size {
            return Err(FsError::FileTooLarge {
                size: new_total,
                max: self.max_total_size,
            });
        }

        let offset = self.arena.len();
        self.arena.extend_from_slice(data);

        self.index.insert(
            virtual_path,
            FileEntry {
                offset,
                length: data.len(),
            },
        );

        Ok(())
    }

    /// Load every file of a ZIP archive, keeping the archive's own paths
    pub fn ingest_zip<R: Read + Seek>(mut self, reader: R) -> Result<Self, FsError> {
        let mut archive =
            zip::ZipArchive::new(reader).map_err(|e| FsError::Archive(e.to_string()))?;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| FsError::Archive(e.to_string()))?;

            if file.is_dir() {
                continue;
            }

            let raw_path = file.name().to_string();
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)
                .map_err(|e| FsError::Archive(format!("{}: {}", raw_path, e)))?;

            self.add_file(&raw_path, &contents)?;
        }

        tracing::debug!(files = self.index.len(), "ingested zip archive");
        Ok(self)
    }

    /// Load every regular file below `root`, keyed by its path relative to `root`
    pub fn ingest_dir(mut self, root: &Path) -> Result<Self, FsError> {
        let root_name = root.display().to_string();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| FsError::Io {
                op: "walk",
                path: root_name.clone(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let raw_path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let data = std::fs::read(entry.path())
                .map_err(|e| FsError::from_io("read", &raw_path, e))?;
            self.add_file(&raw_path, &data)?;
        }

        tracing::debug!(root = %root_name, files = self.index.len(), "ingested directory");
        Ok(self)
    }

    /// Build the immutable sandbox
    pub fn build(self) -> Sandbox {
        Sandbox {
            arena: self.arena,
            index: self.index,
        }
    }
}

impl Default for SandboxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    /// Get a file's contents as a byte slice (zero-copy)
    pub fn get(&self, virtual_path: &str) -> Option<&[u8]> {
        self.index
            .get(virtual_path)
            .map(|entry| &self.arena[entry.offset..entry.offset + entry.length])
    }

    /// Get the total number of files
    pub fn file_count(&self) -> usize {
        self.index.len()
    }

    /// Paths stored below `dir` (the empty string is the root)
    fn below<'a>(&'a self, dir: &str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };

        self.index
            .range(prefix.clone()..)
            .take_while(move |(path, _)| path.starts_with(&prefix))
            .map(|(path, _)| path.as_str())
    }

    fn is_dir(&self, dir: &str) -> bool {
        dir.is_empty() || self.below(dir).next().is_some()
    }
}

fn metadata(path: &str, size: u64, is_dir: bool) -> Metadata {
    Metadata {
        name: base_name(path).to_string(),
        size,
        mode: if is_dir { READ_ONLY_MODE | 0o111 } else { READ_ONLY_MODE },
        modified: DateTime::<Utc>::UNIX_EPOCH,
        is_dir,
    }
}

impl Backend for Sandbox {
    fn open(&self, path: &str) -> Result<File, FsError> {
        let cleaned = PathSanitizer::clean(path)?;

        if let Some(data) = self.get(&cleaned) {
            return Ok(File::from_bytes(
                metadata(&cleaned, data.len() as u64, false),
                data.to_vec(),
            ));
        }

        if self.is_dir(&cleaned) {
            return Ok(File::from_bytes(metadata(&cleaned, 0, true), Vec::new()));
        }

        Err(FsError::NotFound {
            path: path.to_string(),
        })
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let cleaned = PathSanitizer::clean(path)?;

        if self.index.contains_key(&cleaned) {
            return Err(FsError::NotADirectory {
                path: path.to_string(),
            });
        }

        let skip = if cleaned.is_empty() {
            0
        } else {
            cleaned.len() + 1
        };

        // name -> is_dir; BTreeMap keeps the listing sorted and unique
        let mut children: BTreeMap<&str, bool> = BTreeMap::new();
        for full in self.below(&cleaned) {
            let rest = &full[skip..];
            match rest.split_once('/') {
                Some((child, _)) => {
                    children.insert(child, true);
                }
                None => {
                    children.entry(rest).or_insert(false);
                }
            }
        }

        if children.is_empty() && !cleaned.is_empty() {
            return Err(FsError::NotFound {
                path: path.to_string(),
            });
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| DirEntry {
                name: name.to_string(),
                is_dir,
            })
            .collect())
    }
}
