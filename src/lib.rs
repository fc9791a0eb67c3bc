// Public API exports
pub mod backend;
pub mod config;
pub mod overlay;
pub mod render;
pub mod rewrite;
pub mod sandbox;
pub mod security;
pub mod site;
pub mod snippet;

// Re-export main types for convenience
pub use backend::{Backend, DirEntry, File, FsError, LocalDir, Metadata};
pub use sandbox::{Sandbox, SandboxBuilder};
pub use security::PathSanitizer;

pub use overlay::Overlay;
pub use rewrite::{RedirectMarker, SpecRedirects, SyntheticFile};
pub use site::{site_fs, site_fs_layered};

pub use snippet::{extract, extract_from, locate, Arg, Excerpt, Invocation, Snippet, SnippetError};

pub use config::SiteConfig;
pub use render::{FormatConfig, Formatter, PlainFormatter, Renderer};
