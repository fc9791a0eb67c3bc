use crate::backend::{Backend, FsError, LocalDir};
use crate::overlay::Overlay;
use crate::sandbox::SandboxBuilder;
use crate::site::site_fs_layered;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory holding the site's own pages
pub const CONTENT_DIR: &str = "_content";

/// Where the site's files come from, highest priority first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub content_dir: PathBuf,
    /// ZIP archives layered between the content and GOROOT
    pub archives: Vec<PathBuf>,
    /// Directories copied into memory at startup, layered after the archives
    pub snapshots: Vec<PathBuf>,
    pub goroot: Option<PathBuf>,
}

impl SiteConfig {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            archives: Vec::new(),
            snapshots: Vec::new(),
            goroot: None,
        }
    }

    /// `./_content` when run from the repository root, else `../../_content`
    pub fn default_content_dir(cwd: &Path) -> PathBuf {
        let local = cwd.join(CONTENT_DIR);
        if local.exists() {
            local
        } else {
            cwd.join("../..").join(CONTENT_DIR)
        }
    }

    pub fn with_archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archives.push(archive.into());
        self
    }

    pub fn with_snapshot(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshots.push(dir.into());
        self
    }

    pub fn with_goroot(mut self, goroot: impl Into<PathBuf>) -> Self {
        self.goroot = Some(goroot.into());
        self
    }

    /// Assemble the overlay described by this config
    pub fn open(&self) -> Result<Overlay, FsError> {
        let mut middle: Vec<Box<dyn Backend>> = Vec::new();

        for archive in &self.archives {
            let archive_name = archive.display().to_string();
            let file = std::fs::File::open(archive)
                .map_err(|e| FsError::from_io("open", &archive_name, e))?;
            let sandbox = SandboxBuilder::new().ingest_zip(file)?.build();
            tracing::info!(
                archive = %archive_name,
                files = sandbox.file_count(),
                "loaded archive layer"
            );
            middle.push(Box::new(sandbox));
        }

        for dir in &self.snapshots {
            let sandbox = SandboxBuilder::new().ingest_dir(dir)?.build();
            tracing::info!(
                dir = %dir.display(),
                files = sandbox.file_count(),
                "loaded snapshot layer"
            );
            middle.push(Box::new(sandbox));
        }

        let content = LocalDir::new(&self.content_dir);
        Ok(match &self.goroot {
            Some(goroot) => site_fs_layered(content, middle, LocalDir::new(goroot)),
            None => {
                tracing::warn!("no GOROOT configured; spec and memory model pages unavailable");
                site_fs_layered(content, middle, SandboxBuilder::new().build())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_default_content_dir() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(
            SiteConfig::default_content_dir(temp.path()),
            temp.path().join("../../_content")
        );

        std::fs::create_dir(temp.path().join(CONTENT_DIR)).unwrap();
        assert_eq!(
            SiteConfig::default_content_dir(temp.path()),
            temp.path().join("_content")
        );
    }

    #[test]
    fn test_open_layers_in_order() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let goroot = temp.path().join("goroot");
        std::fs::create_dir_all(content.join("doc")).unwrap();
        std::fs::create_dir_all(goroot.join("doc")).unwrap();
        std::fs::write(content.join("doc/a.html"), "content a").unwrap();
        std::fs::write(goroot.join("doc/go_spec.html"), "spec").unwrap();

        let archive = temp.path().join("extra.zip");
        let mut zip = ZipWriter::new(std::fs::File::create(&archive).unwrap());
        zip.start_file("doc/a.html", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"archive a").unwrap();
        zip.start_file("doc/b.html", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"archive b").unwrap();
        zip.finish().unwrap();

        let fs = SiteConfig::new(&content)
            .with_archive(&archive)
            .with_goroot(&goroot)
            .open()
            .unwrap();

        assert_eq!(fs.len(), 3);
        assert_eq!(fs.read("doc/a.html").unwrap(), b"content a");
        assert_eq!(fs.read("doc/b.html").unwrap(), b"archive b");
        assert_eq!(fs.read("ref/spec.html").unwrap(), b"spec");
    }

    #[test]
    fn test_open_snapshot_layer() {
        let temp = tempfile::tempdir().unwrap();
        let content = temp.path().join("content");
        let snapshot = temp.path().join("snapshot");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::create_dir_all(snapshot.join("doc")).unwrap();
        std::fs::write(snapshot.join("doc/c.html"), "snapshot c").unwrap();

        let fs = SiteConfig::new(&content).with_snapshot(&snapshot).open().unwrap();
        std::fs::write(snapshot.join("doc/c.html"), "changed on disk").unwrap();

        assert_eq!(fs.len(), 3);
        assert_eq!(fs.read("doc/c.html").unwrap(), b"snapshot c");
    }

    #[test]
    fn test_open_without_goroot() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("index.html"), "home").unwrap();

        let fs = SiteConfig::new(temp.path()).open().unwrap();
        assert_eq!(fs.read("index.html").unwrap(), b"home");
        assert!(fs.open("ref/spec.html").unwrap_err().is_not_found());
    }

    #[test]
    fn test_open_missing_archive() {
        let temp = tempfile::tempdir().unwrap();
        let result = SiteConfig::new(temp.path())
            .with_archive(temp.path().join("nope.zip"))
            .open();
        assert!(matches!(result, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn test_serializes_as_json() {
        let config = SiteConfig::new("_content").with_goroot("/usr/local/go");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["content_dir"], "_content");
        assert_eq!(json["goroot"], "/usr/local/go");
        assert_eq!(json["archives"], serde_json::json!([]));
        assert_eq!(json["snapshots"], serde_json::json!([]));
    }
}
