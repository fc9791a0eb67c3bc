use super::SnippetError;
use regex::bytes::{Regex, RegexBuilder};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One raw positional argument of a snippet invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Int(i64),
    Str(String),
}

impl Arg {
    /// Convert a template value; anything but an integer or a string is refused
    pub fn from_json(value: &Value, position: usize) -> Result<Self, SnippetError> {
        match value {
            Value::String(s) => Ok(Arg::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Arg::Int).ok_or_else(|| {
                SnippetError::Argument(format!(
                    "unrecognized argument {} at position {}",
                    n, position
                ))
            }),
            other => Err(SnippetError::Argument(format!(
                "unrecognized argument {} at position {}",
                other, position
            ))),
        }
    }

    /// Convert a whole template argument list
    pub fn from_json_list(values: &[Value]) -> Result<Vec<Self>, SnippetError> {
        values
            .iter()
            .enumerate()
            .map(|(position, value)| Self::from_json(value, position))
            .collect()
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

/// Command-line words: integers when they parse as one, strings otherwise
impl FromStr for Arg {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Arg::Int(n),
            Err(_) => Arg::Str(s.to_string()),
        })
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Str(s) if is_regex_form(s) && !s.contains('`') => write!(f, "`{}`", s),
            Arg::Str(s) => write!(f, "{:?}", s),
        }
    }
}

fn is_regex_form(s: &str) -> bool {
    s.len() > 2 && s.starts_with('/') && s.ends_with('/')
}

/// How a string locator finds its line
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `$`, the last line of the file
    LastLine,
    /// `/re/`, the first line matching `re`
    Regex { source: String, regex: Regex },
}

impl Pattern {
    pub fn parse(file: &str, s: &str) -> Result<Self, SnippetError> {
        if s == "$" {
            return Ok(Pattern::LastLine);
        }

        if is_regex_form(s) {
            let regex = RegexBuilder::new(&s[1..s.len() - 1])
                .multi_line(true)
                .build()
                .map_err(|e| {
                    SnippetError::Argument(format!("{}: bad pattern `{}`: {}", file, s, e))
                })?;
            return Ok(Pattern::Regex {
                source: s.to_string(),
                regex,
            });
        }

        Err(SnippetError::Argument(format!(
            "{}: unrecognized pattern: {:?}",
            file, s
        )))
    }
}

/// A single positional locator: a 1-indexed line number or a pattern
#[derive(Debug, Clone)]
pub enum Locator {
    Line(i64),
    Pattern(Pattern),
}

impl Locator {
    pub fn parse(file: &str, arg: &Arg) -> Result<Self, SnippetError> {
        match arg {
            Arg::Int(n) => Ok(Locator::Line(*n)),
            Arg::Str(s) => Pattern::parse(file, s).map(Locator::Pattern),
        }
    }
}

/// What part of the file to show
#[derive(Debug, Clone)]
pub enum Locators {
    Whole,
    Line(Locator),
    Range(Locator, Locator),
}

/// First line number shown by the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartLine {
    /// Use the line number of the located text
    Computed,
    Explicit(usize),
}

/// A classified snippet invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub highlight: Option<String>,
    pub start_line: StartLine,
    pub locators: Locators,
}

impl Invocation {
    /// Classify `args`, consuming from the end: a trailing `HL...` string is
    /// the highlight marker, then a trailing integer is the starting line
    /// (0 keeps the computed one), and what is left are 0-2 locators.
    pub fn parse(file: &str, args: &[Arg]) -> Result<Self, SnippetError> {
        let mut rest = args;

        let mut highlight = None;
        if let [head @ .., Arg::Str(s)] = rest {
            if s.starts_with("HL") {
                highlight = Some(s.clone());
                rest = head;
            }
        }

        let mut start_line = StartLine::Computed;
        if let [head @ .., Arg::Int(n)] = rest {
            start_line = match usize::try_from(*n) {
                Ok(0) => StartLine::Computed,
                Ok(n) => StartLine::Explicit(n),
                Err(_) => {
                    return Err(SnippetError::Argument(format!(
                        "{}: negative starting line {}",
                        file, n
                    )))
                }
            };
            rest = head;
        }

        let locators = match rest {
            [] => Locators::Whole,
            [only] => Locators::Line(Locator::parse(file, only)?),
            [start, end] => {
                Locators::Range(Locator::parse(file, start)?, Locator::parse(file, end)?)
            }
            [first, ..] => {
                return Err(SnippetError::Argument(format!(
                    "incorrect invocation: {:?} [{}, ...] ({} arguments)",
                    file,
                    first,
                    rest.len()
                )))
            }
        };

        Ok(Self {
            highlight,
            start_line,
            locators,
        })
    }
}
