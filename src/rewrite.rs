//! Maps `ref/mem.html` and `ref/spec.html` onto the older
//! `doc/go_mem.html` and `doc/go_spec.html` layout, and answers the old
//! names with redirect markers pointing back at `/ref/...`.

use crate::backend::{base_name, Backend, DirEntry, File, FsError, Metadata, READ_ONLY_MODE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const CANONICAL_PREFIX: &str = "ref/";
const LEGACY_PREFIX: &str = "doc/go_";
const HTML_SUFFIX: &str = ".html";

/// Canonical paths that fall back to their legacy location
const CANONICAL_PATHS: [&str; 2] = ["ref/mem.html", "ref/spec.html"];

/// Legacy paths that are always answered with a redirect marker
const LEGACY_PATHS: [&str; 2] = ["doc/go_mem.html", "doc/go_spec.html"];

/// Wraps one backend and rewrites the memory model and spec paths
#[derive(Debug, Clone)]
pub struct SpecRedirects<B> {
    inner: B,
}

impl<B: Backend> SpecRedirects<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

/// `ref/spec.html` -> `doc/go_spec.html`
pub fn legacy_path(canonical: &str) -> String {
    format!(
        "{}{}",
        LEGACY_PREFIX,
        canonical.strip_prefix(CANONICAL_PREFIX).unwrap_or(canonical)
    )
}

/// `doc/go_spec.html` -> `/ref/spec`
pub fn redirect_target(legacy: &str) -> String {
    let name = legacy.strip_suffix(HTML_SUFFIX).unwrap_or(legacy);
    let name = name.strip_prefix(LEGACY_PREFIX).unwrap_or(name);
    format!("/{}{}", CANONICAL_PREFIX, name)
}

impl<B: Backend> Backend for SpecRedirects<B> {
    fn open(&self, path: &str) -> Result<File, FsError> {
        if CANONICAL_PATHS.contains(&path) {
            match self.inner.open(path) {
                Ok(file) => return Ok(file),
                Err(err) => {
                    let legacy = legacy_path(path);
                    tracing::debug!(path, %legacy, error = %err, "falling back to legacy path");
                    return self.inner.open(&legacy);
                }
            }
        }

        if LEGACY_PATHS.contains(&path) {
            let data = RedirectMarker::new(redirect_target(path))
                .render()
                .map_err(|e| FsError::Io {
                    op: "open",
                    path: path.to_string(),
                    source: e.into(),
                })?;
            return Ok(SyntheticFile::new(base_name(path), data).into_file());
        }

        self.inner.open(path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        self.inner.read_dir(path)
    }
}

/// Front-matter comment telling the page server to redirect elsewhere.
///
/// Rendered as:
///
/// ```text
/// <!--{
/// 	"Redirect": "/ref/mem"
/// }-->
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectMarker {
    #[serde(rename = "Redirect")]
    pub redirect: String,
}

const MARKER_OPEN: &str = "<!--";
const MARKER_CLOSE: &str = "-->";

impl RedirectMarker {
    pub fn new(redirect: impl Into<String>) -> Self {
        Self {
            redirect: redirect.into(),
        }
    }

    pub fn render(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = MARKER_OPEN.as_bytes().to_vec();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        out.extend_from_slice(MARKER_CLOSE.as_bytes());
        out.push(b'\n');
        Ok(out)
    }

    /// Read a marker from the start of a page, if it carries one
    pub fn parse(page: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(page).ok()?;
        let rest = text.strip_prefix(MARKER_OPEN)?;
        let end = rest.find(MARKER_CLOSE)?;
        serde_json::from_str(&rest[..end]).ok()
    }
}

/// Generated in-memory file content with fixed read-only metadata
#[derive(Debug, Clone)]
pub struct SyntheticFile {
    name: String,
    data: Vec<u8>,
}

impl SyntheticFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            name: self.name.clone(),
            size: self.data.len() as u64,
            mode: READ_ONLY_MODE,
            modified: DateTime::<Utc>::UNIX_EPOCH,
            is_dir: false,
        }
    }

    pub fn into_file(self) -> File {
        let metadata = self.metadata();
        File::from_bytes(metadata, self.data)
    }
}
