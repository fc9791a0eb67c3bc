use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("open {path}: file does not exist")]
    NotFound { path: String },

    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("readdir {path}: not a directory")]
    NotADirectory { path: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to parse ZIP archive: {0}")]
    Archive(String),

    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },
}

impl FsError {
    /// Classify an I/O failure, keeping absence distinct from other errors
    pub fn from_io(op: &'static str, path: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FsError::NotFound {
                path: path.to_string(),
            }
        } else {
            FsError::Io {
                op,
                path: path.to_string(),
                source,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}
