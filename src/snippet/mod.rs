//! Cutting displayable excerpts out of source files.
//!
//! An excerpt is chosen by up to two positional locators: an integer is a
//! 1-indexed line number, `$` is the last line, and `/re/` is the first line
//! matching the regular expression. A single locator picks one line, two pick
//! an inclusive range in which lines ending in `OMIT` are blanked.

mod args;
mod error;
mod locate;


pub use args::{Arg, Invocation, Locator, Locators, Pattern, StartLine};
pub use error::SnippetError;
pub use locate::{extract, extract_from, locate, normalize, Excerpt, Snippet, OMIT_MARKER};
