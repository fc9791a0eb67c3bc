use crate::backend::FsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("{file}: no match for `{pattern}`")]
    NotFound { file: String, pattern: String },

    #[error("{0}")]
    Argument(String),

    #[error("{file:?}:{line} is out of range (1-{max})")]
    Range { file: String, line: i64, max: usize },

    #[error("{file:?}: empty file")]
    EmptyFile { file: String },

    #[error("lines out of order for {file:?}: {start} {end}")]
    Order {
        file: String,
        start: usize,
        end: usize,
    },

    #[error("{file}: {source}")]
    Read {
        file: String,
        #[source]
        source: FsError,
    },
}
