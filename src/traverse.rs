//! Recursive descent over a [`Path`], shared by every accessor.
//!
//! The walk hands each key segment to a visitor together with the
//! container it applies to; whatever the visitor returns becomes the
//! container for the next segment. A wildcard fans the rest of the path out
//! over every element of a sequence and collects the results in order.

use crate::error::{NestError, Result};
use crate::path::{Path, Segment};
use crate::value::Value;

/// Where the walk currently is. Lives for one visitor call.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'p> {
    path: &'p Path,
    index: usize,
}

impl<'p> Cursor<'p> {
    pub fn path(&self) -> &'p Path {
        self.path
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.path.len()
    }
    /// The segment after the current one, if any.
    pub fn next(&self) -> Option<&'p Segment> {
        self.path.segments().get(self.index + 1)
    }
}

/// Outcome of a walk. Fan-outs nest, one level per wildcard.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Absent,
    Value(Value),
    Fanout(Vec<Resolved>),
}

impl Resolved {
    /// Collapses a fan-out into a fresh sequence; absent entries become Null.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Resolved::Absent => None,
            Resolved::Value(value) => Some(value),
            Resolved::Fanout(items) => Some(
                items
                    .into_iter()
                    .map(|item| item.into_value().unwrap_or(Value::Null))
                    .collect::<Vec<_>>()
                    .into(),
            ),
        }
    }

    /// True when every branch ended in a value satisfying `pred`.
    /// An empty fan-out or an absent branch never qualifies.
    pub fn all<P>(&self, pred: &P) -> bool
    where
        P: Fn(&Value) -> bool,
    {
        match self {
            Resolved::Absent => false,
            Resolved::Value(value) => pred(value),
            Resolved::Fanout(items) => !items.is_empty() && items.iter().all(|item| item.all(pred)),
        }
    }
}

impl From<Option<Value>> for Resolved {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Resolved::Absent, Resolved::Value)
    }
}

/// Walks `path` from `root`. The visitor receives the current container,
/// the key to apply and the cursor; for a trailing wildcard it is called
/// once per element with the element's index as key.
pub fn traverse<F>(root: &Value, path: &Path, visit: &mut F) -> Result<Resolved>
where
    F: FnMut(&Value, &str, &Cursor) -> Result<Option<Value>>,
{
    traverse_with(root, path, visit, &mut |_: &Value| ())
}

/// [`traverse`], also handing every sequence a wildcard fans out over to
/// `fanout` before its elements are visited.
pub fn traverse_with<F, G>(
    root: &Value,
    path: &Path,
    visit: &mut F,
    fanout: &mut G,
) -> Result<Resolved>
where
    F: FnMut(&Value, &str, &Cursor) -> Result<Option<Value>>,
    G: FnMut(&Value),
{
    walk(Some(root.clone()), path, 0, visit, fanout)
}

fn walk<F, G>(
    start: Option<Value>,
    path: &Path,
    from: usize,
    visit: &mut F,
    fanout: &mut G,
) -> Result<Resolved>
where
    F: FnMut(&Value, &str, &Cursor) -> Result<Option<Value>>,
    G: FnMut(&Value),
{
    let mut current = start;
    for index in from..path.len() {
        let value = match current {
            Some(value) if !value.is_null() => value,
            _ => return Ok(Resolved::Absent),
        };
        let cursor = Cursor { path, index };
        match &path.segments()[index] {
            Segment::Key(key) => current = visit(&value, key, &cursor)?,
            Segment::Wildcard => {
                let Value::Sequence(items) = &value else {
                    return Err(NestError::NotASequence {
                        prefix: path.prefix(index),
                    });
                };
                fanout(&value);
                let mut results = Vec::with_capacity(items.len());
                for (position, item) in items.to_vec().into_iter().enumerate() {
                    let result: Resolved = if cursor.is_last() {
                        visit(&value, &position.to_string(), &cursor)?.into()
                    } else {
                        walk(Some(item), path, index + 1, visit, fanout)?
                    };
                    results.push(result);
                }
                return Ok(Resolved::Fanout(results));
            }
        }
    }
    Ok(current.into())
}
