//! Path expressions: `.`-separated segments, `+` as the sequence wildcard.
//!
//! A path may also be a bare non-negative integer, which addresses one
//! element (or one numerically named field) of the root directly.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::value::Value;

pub const DELIMITER: char = '.';
pub const WILDCARD: &str = "+";

lazy_static! {
    static ref INDEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// The sequence index named by `key`, if `key` is made of digits only.
pub fn parse_index(key: &str) -> Option<usize> {
    if INDEX.is_match(key) {
        key.parse().ok()
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Wildcard,
}

impl Segment {
    fn from_token(token: &str) -> Self {
        if token == WILDCARD {
            Segment::Wildcard
        } else {
            Segment::Key(token.to_owned())
        }
    }
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
    /// True for a key that addresses a sequence element.
    pub fn is_index(&self) -> bool {
        match self {
            Segment::Key(key) => parse_index(key).is_some(),
            Segment::Wildcard => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Wildcard => write!(f, "{WILDCARD}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: text.split(DELIMITER).map(Segment::from_token).collect(),
        }
    }
    pub fn index(index: usize) -> Self {
        Self {
            segments: vec![Segment::Key(index.to_string())],
        }
    }
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    pub fn len(&self) -> usize {
        self.segments.len()
    }
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
    /// The textual path made of the first `end` segments.
    pub fn prefix(&self, end: usize) -> String {
        self.segments[..end.min(self.segments.len())]
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.prefix(self.segments.len()))
    }
}

/// Whatever a caller hands in as a path, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathExpr {
    Absent,
    Index(usize),
    Text(String),
    /// Anything that cannot be a path (booleans, containers, negative or
    /// fractional numbers).
    Unsupported,
}

impl PathExpr {
    /// `None` when the expression cannot name a location at all; an empty
    /// path when it names the root itself.
    pub fn to_path(&self) -> Option<Path> {
        match self {
            PathExpr::Absent => Some(Path::default()),
            PathExpr::Index(index) => Some(Path::index(*index)),
            PathExpr::Text(text) => Some(Path::parse(text)),
            PathExpr::Unsupported => None,
        }
    }
}

impl From<&str> for PathExpr {
    fn from(text: &str) -> Self { PathExpr::Text(text.to_owned()) }
}
impl From<String> for PathExpr {
    fn from(text: String) -> Self { PathExpr::Text(text) }
}
impl From<&String> for PathExpr {
    fn from(text: &String) -> Self { PathExpr::Text(text.clone()) }
}
impl From<usize> for PathExpr {
    fn from(index: usize) -> Self { PathExpr::Index(index) }
}
impl<T: Into<PathExpr>> From<Option<T>> for PathExpr {
    fn from(path: Option<T>) -> Self {
        path.map_or(PathExpr::Absent, Into::into)
    }
}
impl From<&Value> for PathExpr {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => PathExpr::Absent,
            Value::String(text) => PathExpr::Text(text.clone()),
            Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= usize::MAX as f64 => {
                PathExpr::Index(*n as usize)
            }
            _ => PathExpr::Unsupported,
        }
    }
}
