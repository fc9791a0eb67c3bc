//! Turning excerpts into page markup.
//!
//! Syntax coloring is left to a [`Formatter`]; this module only wraps its
//! output and makes sure a broken snippet shows up as an inline error rather
//! than failing the whole page.

use crate::backend::Backend;
use crate::snippet::{extract_from, Arg, Excerpt, SnippetError};
use std::fmt::Write;

/// Default highlight marker for `code` blocks
pub const DEFAULT_HIGHLIGHT: &str = "HL";

/// Settings passed to the formatter along with the excerpt text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatConfig {
    /// Marker naming the lines to highlight, if any
    pub highlight: Option<String>,
    /// Line number of the first line
    pub line: usize,
    /// Text is going into an editable playground
    pub playground: bool,
    /// Color comments
    pub comments: bool,
}

impl FormatConfig {
    fn for_excerpt(excerpt: &Excerpt) -> Self {
        Self {
            highlight: excerpt.highlight.clone(),
            line: excerpt.line,
            ..Self::default()
        }
    }
}

/// External text formatter: escapes and colors source text
pub trait Formatter: Send + Sync {
    fn format(&self, text: &[u8], cfg: &FormatConfig) -> String;
}

/// Formatter that only escapes, for tools and tests
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, text: &[u8], _cfg: &FormatConfig) -> String {
        escape_html(&String::from_utf8_lossy(text))
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders `code` and `play` blocks from files in a backend
pub struct Renderer<B, F> {
    fs: B,
    formatter: F,
}

impl<B: Backend, F: Formatter> Renderer<B, F> {
    pub fn new(fs: B, formatter: F) -> Self {
        Self { fs, formatter }
    }

    pub fn fs(&self) -> &B {
        &self.fs
    }

    /// A read-only code block; failures become an inline error block
    pub fn code(&self, file: &str, args: &[Arg]) -> String {
        self.try_code(file, args)
            .unwrap_or_else(|err| error_block("code", file, &err))
    }

    /// An editable playground block; failures become an inline error block
    pub fn play(&self, file: &str, args: &[Arg]) -> String {
        self.try_play(file, args)
            .unwrap_or_else(|err| error_block("play", file, &err))
    }

    pub fn try_code(&self, file: &str, args: &[Arg]) -> Result<String, SnippetError> {
        let excerpt = extract_from(&self.fs, file, args)?;
        let mut cfg = FormatConfig::for_excerpt(&excerpt);
        cfg.comments = true;
        cfg.highlight.get_or_insert_with(|| DEFAULT_HIGHLIGHT.to_string());

        let mut out = String::from("<div class=\"code\">\n\n<pre>");
        out.push_str(&self.formatter.format(&excerpt.text, &cfg));
        out.push_str("</pre>\n</div>\n\n");
        Ok(out)
    }

    /// The parts of the file around the excerpt are kept in hidden blocks so
    /// the playground can still run the whole program.
    pub fn try_play(&self, file: &str, args: &[Arg]) -> Result<String, SnippetError> {
        let excerpt = extract_from(&self.fs, file, args)?;
        let mut cfg = FormatConfig::for_excerpt(&excerpt);
        cfg.playground = true;

        let mut out = String::from("<div class=\"playground\">\n\n");
        hidden_block(&mut out, &excerpt.before);
        out.push_str("<pre contenteditable=\"true\" spellcheck=\"false\">");
        out.push_str(&self.formatter.format(&excerpt.text, &cfg));
        out.push_str("</pre>\n");
        hidden_block(&mut out, &excerpt.after);
        out.push_str("</div>\n\n");
        Ok(out)
    }
}

fn hidden_block(out: &mut String, text: &[u8]) {
    if text.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "<pre style=\"display: none\"><span>{}</span>\n</pre>",
        escape_html(&String::from_utf8_lossy(text))
    );
}

/// Snippet errors already name the file
fn error_block(verb: &str, file: &str, err: &SnippetError) -> String {
    tracing::warn!(verb, file, error = %err, "snippet failed");
    format!(
        "<div class=\"code error\">\n<pre>{}: {}</pre>\n</div>\n\n",
        verb,
        escape_html(&err.to_string())
    )
}
