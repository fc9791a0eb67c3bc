use super::args::{Arg, Invocation, Locator, Locators, Pattern, StartLine};
use super::SnippetError;
use crate::backend::Backend;
use serde::{Serialize, Serializer};

/// Lines ending in this marker are blanked inside a displayed range
pub const OMIT_MARKER: &str = "OMIT";

const TAB_WIDTH: &[u8] = b"    ";

/// A file split around the located text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub before: Vec<u8>,
    pub matched: Vec<u8>,
    pub after: Vec<u8>,
    /// 1-indexed line number of the first line of `matched`
    pub start_line: usize,
}

/// A located snippet ready to hand to a formatter
///
/// Text fields hold the file's bytes unchanged apart from OMIT blanking and
/// normalization; only the JSON form decodes them, lossily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    #[serde(serialize_with = "as_text")]
    pub before: Vec<u8>,
    /// Normalized text to display
    #[serde(serialize_with = "as_text")]
    pub text: Vec<u8>,
    #[serde(serialize_with = "as_text")]
    pub after: Vec<u8>,
    /// Line number shown for the first line of `text`
    pub line: usize,
    pub highlight: Option<String>,
}

fn as_text<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

/// Split `text` around the lines selected by `locators`
pub fn locate(file: &str, text: &[u8], locators: &Locators) -> Result<Snippet, SnippetError> {
    // A trailing newline does not start another line
    let lines: Vec<&[u8]> = text.split_inclusive(|&b| b == b'\n').collect();

    match locators {
        Locators::Whole => Ok(Snippet {
            before: Vec::new(),
            matched: text.to_vec(),
            after: Vec::new(),
            start_line: 1,
        }),
        Locators::Line(locator) => {
            let line = resolve(file, &lines, locator, 0)?;
            Ok(Snippet {
                before: lines[..line - 1].concat(),
                matched: lines[line - 1].to_vec(),
                after: lines[line..].concat(),
                start_line: line,
            })
        }
        Locators::Range(first, last) => {
            let start = resolve(file, &lines, first, 0)?;
            let end = match last {
                Locator::Line(_) => {
                    let end = resolve(file, &lines, last, 0)?;
                    if end < start {
                        return Err(SnippetError::Order {
                            file: file.to_string(),
                            start,
                            end,
                        });
                    }
                    end
                }
                // the scan starts on the line after `start`
                Locator::Pattern(pattern) => find(file, &lines, pattern, start)?,
            };

            let matched: Vec<u8> = lines[start - 1..end]
                .iter()
                .flat_map(|&line| omit(line).iter().copied())
                .collect();
            Ok(Snippet {
                before: lines[..start - 1].concat(),
                matched,
                after: lines[end..].concat(),
                start_line: start,
            })
        }
    }
}

/// Interpret `args` and cut the matching excerpt out of `text`
pub fn extract(file: &str, text: &[u8], args: &[Arg]) -> Result<Excerpt, SnippetError> {
    let invocation = Invocation::parse(file, args)?;
    let snippet = locate(file, text, &invocation.locators)?;

    let line = match invocation.start_line {
        StartLine::Explicit(line) => line,
        StartLine::Computed => snippet.start_line,
    };

    Ok(Excerpt {
        before: snippet.before,
        text: normalize(&snippet.matched),
        after: snippet.after,
        line,
        highlight: invocation.highlight,
    })
}

/// Read `file` from `fs` and extract from it
pub fn extract_from(fs: &impl Backend, file: &str, args: &[Arg]) -> Result<Excerpt, SnippetError> {
    let data = fs.read(file).map_err(|source| SnippetError::Read {
        file: file.to_string(),
        source,
    })?;
    extract(file, &data, args)
}

/// Trim leading and trailing empty lines, end with exactly one newline,
/// and expand tabs to four spaces.
pub fn normalize(text: &[u8]) -> Vec<u8> {
    let Some(first) = text.iter().position(|&b| b != b'\n') else {
        return Vec::new();
    };
    let last = text.iter().rposition(|&b| b != b'\n').unwrap_or(first);

    let mut out = Vec::with_capacity(last - first + 2);
    for &b in &text[first..=last] {
        if b == b'\t' {
            out.extend_from_slice(TAB_WIDTH);
        } else {
            out.push(b);
        }
    }
    out.push(b'\n');
    out
}

/// 1-indexed line named by `locator`; patterns scan from index `from`
fn resolve(
    file: &str,
    lines: &[&[u8]],
    locator: &Locator,
    from: usize,
) -> Result<usize, SnippetError> {
    match locator {
        Locator::Line(n) => match usize::try_from(*n) {
            Ok(line) if (1..=lines.len()).contains(&line) => Ok(line),
            _ => Err(SnippetError::Range {
                file: file.to_string(),
                line: *n,
                max: lines.len(),
            }),
        },
        Locator::Pattern(pattern) => find(file, lines, pattern, from),
    }
}

fn find(
    file: &str,
    lines: &[&[u8]],
    pattern: &Pattern,
    from: usize,
) -> Result<usize, SnippetError> {
    match pattern {
        Pattern::LastLine => {
            if lines.is_empty() {
                return Err(SnippetError::EmptyFile {
                    file: file.to_string(),
                });
            }
            Ok(lines.len())
        }
        Pattern::Regex { source, regex } => lines
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, line)| regex.is_match(line))
            .map(|(i, _)| i + 1)
            .ok_or_else(|| SnippetError::NotFound {
                file: file.to_string(),
                pattern: source.clone(),
            }),
    }
}

/// Blank a line marked with OMIT, keeping its terminator
fn omit(line: &[u8]) -> &[u8] {
    let content_len = line
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |i| i + 1);
    if line[..content_len].ends_with(OMIT_MARKER.as_bytes()) {
        &line[content_len..]
    } else {
        line
    }
}
