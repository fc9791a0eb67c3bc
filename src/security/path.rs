use crate::backend::FsError;

pub struct PathSanitizer;

impl PathSanitizer {
    /// Sanitize a slash-separated logical path naming a file.
    ///
    /// Rejects:
    /// - Directory traversal (../)
    /// - Absolute paths (/etc/passwd)
    /// - Paths that name only the root
    ///
    /// Returns the normalized path with `.` and empty components removed.
    pub fn sanitize(raw_path: &str) -> Result<String, FsError> {
        if raw_path.is_empty() {
            return Err(FsError::InvalidPath("Empty path".to_string()));
        }

        let cleaned = Self::clean(raw_path)?;
        if cleaned.is_empty() {
            return Err(FsError::InvalidPath(format!(
                "No valid components: {}",
                raw_path
            )));
        }
        Ok(cleaned)
    }

    /// Like [`PathSanitizer::sanitize`], but "" and "." are accepted and
    /// normalize to "", the root of a backend.
    pub fn clean(raw_path: &str) -> Result<String, FsError> {
        if raw_path.starts_with('/') {
            return Err(FsError::InvalidPath(format!(
                "Absolute path not allowed: {}",
                raw_path
            )));
        }

        let mut components = Vec::new();
        for part in raw_path.split('/') {
            match part {
                "" | "." => continue,
                ".." => {
                    return Err(FsError::InvalidPath(format!(
                        "Parent directory traversal not allowed: {}",
                        raw_path
                    )));
                }
                part => components.push(part),
            }
        }

        Ok(components.join("/"))
    }
}
