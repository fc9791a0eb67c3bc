//! Union of several read-only backends.
//!
//! If more than one backend provides a file, [`Overlay::open`] serves the one
//! listed first. If more than one provides a directory, [`Overlay::read_dir`]
//! presents the concatenation of all listings with duplicate names removed,
//! keeping the earliest backend's entry.

use crate::backend::{Backend, DirEntry, File, FsError};
use std::collections::HashSet;

/// An ordered, fixed stack of backends, highest priority first
pub struct Overlay {
    layers: Vec<Box<dyn Backend>>,
}

impl Overlay {
    pub fn new(layers: Vec<Box<dyn Backend>>) -> Self {
        Self { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Backend for Overlay {
    /// The first backend that opens `path` wins. When none can, the error of
    /// the first backend is returned, since the earliest layer is the most
    /// authoritative one.
    fn open(&self, path: &str) -> Result<File, FsError> {
        let mut first_err = None;

        for (layer, backend) in self.layers.iter().enumerate() {
            match backend.open(path) {
                Ok(file) => {
                    tracing::debug!(path, layer, "overlay open");
                    return Ok(file);
                }
                Err(err) => {
                    tracing::trace!(path, layer, error = %err, "overlay layer miss");
                    first_err.get_or_insert(err);
                }
            }
        }

        Err(first_err.unwrap_or_else(|| FsError::NotFound {
            path: path.to_string(),
        }))
    }

    /// Merges every listing that succeeds. The reported error, used only when
    /// nothing was listed, is the one from the last backend that failed.
    /// This differs from `open`, which reports the first failure.
    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let mut all: Vec<DirEntry> = Vec::new();
        // Built only once a second listing has to be merged
        let mut seen: Option<HashSet<String>> = None;
        let mut last_err = None;

        for (layer, backend) in self.layers.iter().enumerate() {
            let list = match backend.read_dir(path) {
                Ok(list) => list,
                Err(err) => {
                    tracing::trace!(path, layer, error = %err, "overlay readdir miss");
                    last_err = Some(err);
                    continue;
                }
            };

            if all.is_empty() {
                all = list;
                continue;
            }

            let seen =
                seen.get_or_insert_with(|| all.iter().map(|entry| entry.name.clone()).collect());
            for entry in list {
                if seen.insert(entry.name.clone()) {
                    all.push(entry);
                }
            }
        }

        if !all.is_empty() {
            return Ok(all);
        }

        Err(last_err.unwrap_or_else(|| FsError::NotFound {
            path: path.to_string(),
        }))
    }
}
