//! The four accessors: [`get`], [`has`] / [`has_own`], [`is_in`] and [`set`].
//!
//! Each one is a visitor plugged into [`traverse`]. None of them reports a
//! dead end as an error: reads degrade to a fallback result and a failed
//! write leaves the root as it was. The one exception is a write into the
//! shared base mapping, which [`set`] surfaces as
//! [`NestError::PrototypeMutation`].

use std::cell::Cell;

use tracing::{debug, trace};

use crate::error::{NestError, Result};
use crate::guard;
use crate::path::{Path, PathExpr, parse_index};
use crate::traverse::{Cursor, traverse, traverse_with};
use crate::value::{Mapping, PROTO_KEY, Sequence, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HasOptions {
    /// Only count keys held by the container itself, not inherited ones.
    pub own: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsInOptions {
    /// Additionally require the whole path to resolve.
    pub valid_path: bool,
}

// What an accessor should do with its (root, path) pair before walking.
enum Plan {
    Fallback,
    Index(usize),
    Walk(Path),
}

fn plan(root: &Value, path: PathExpr) -> Plan {
    if !root.is_container() {
        return Plan::Fallback;
    }
    match path {
        PathExpr::Index(index) => Plan::Index(index),
        expr => match expr.to_path() {
            Some(path) if !path.is_empty() => Plan::Walk(path),
            _ => Plan::Fallback,
        },
    }
}

fn is_true(value: &Value) -> bool {
    *value == Value::Bool(true)
}

/// Reads the value at `path`.
///
/// A primitive root, or a missing/empty/unsupported path, gives back the
/// root itself. A dead end gives `None`, except that a wildcard applied to
/// something other than a sequence gives back the root. Wildcards collect
/// their results into a new sequence, with Null where an element had
/// nothing at the rest of the path.
pub fn get(root: &Value, path: impl Into<PathExpr>) -> Option<Value> {
    let path = match plan(root, path.into()) {
        Plan::Fallback => return Some(root.clone()),
        Plan::Index(index) => return root.lookup(&index.to_string()),
        Plan::Walk(path) => path,
    };
    match traverse(root, &path, &mut |current: &Value, key: &str, _: &Cursor| {
        Ok(current.lookup(key))
    }) {
        Ok(resolved) => resolved.into_value(),
        Err(e) => {
            debug!(%path, error = %e, "get fell back to the root");
            Some(root.clone())
        }
    }
}

/// Tells whether the last segment of `path` names a key of the container
/// reached by the rest of it. A key holding Null still counts.
///
/// By default inherited keys count too; set [`HasOptions::own`] to only
/// look at the container itself. Across a wildcard every element has to
/// have the key.
pub fn has(root: &Value, path: impl Into<PathExpr>, options: HasOptions) -> bool {
    let member = |container: &Value, key: &str| {
        if options.own {
            container.contains_own(key)
        } else {
            container.contains(key)
        }
    };
    let path = match plan(root, path.into()) {
        Plan::Fallback => return false,
        Plan::Index(index) => return member(root, &index.to_string()),
        Plan::Walk(path) => path,
    };
    match traverse(root, &path, &mut |current: &Value, key: &str, cursor: &Cursor| {
        if cursor.is_last() {
            Ok(Some(member(current, key).into()))
        } else {
            Ok(current.lookup(key))
        }
    }) {
        Ok(resolved) => resolved.all(&is_true),
        Err(e) => {
            debug!(%path, error = %e, "has treated the path as missing");
            false
        }
    }
}

/// [`has`] restricted to own keys.
pub fn has_own(root: &Value, path: impl Into<PathExpr>) -> bool {
    has(root, path, HasOptions { own: true })
}

/// Tells whether `needle` shows up anywhere along `path`: the root, any
/// container passed through (sequences under a wildcard included), or the
/// value the walk ends on. `None` stands
/// for "absent" and matches a lookup that found nothing.
///
/// Containers match by identity, primitives by value. With
/// [`IsInOptions::valid_path`] the whole path must also resolve.
pub fn is_in(
    root: &Value,
    path: impl Into<PathExpr>,
    needle: Option<&Value>,
    options: IsInOptions,
) -> bool {
    let path = match plan(root, path.into()) {
        Plan::Fallback => return false,
        Plan::Index(index) => Path::index(index),
        Plan::Walk(path) => path,
    };
    let found = Cell::new(needle == Some(root));
    let is_needle = |value: &Value| needle == Some(value);
    let walked = traverse_with(
        root,
        &path,
        &mut |current: &Value, key: &str, cursor: &Cursor| {
            let next = current.lookup(key);
            if is_needle(current) || next.as_ref() == needle {
                found.set(true);
            }
            if cursor.is_last() {
                Ok(Some(current.contains(key).into()))
            } else {
                Ok(next)
            }
        },
        &mut |sequence: &Value| {
            if is_needle(sequence) {
                found.set(true);
            }
        },
    );
    match walked {
        Ok(resolved) => found.get() && (!options.valid_path || resolved.all(&is_true)),
        Err(e) => {
            debug!(%path, error = %e, "is_in treated the path as missing");
            false
        }
    }
}

fn assign(container: &Value, key: &str, value: Value) -> Result<()> {
    let refused = || NestError::NotTraversable {
        key: key.to_owned(),
        kind: container.kind(),
    };
    match container {
        Value::Mapping(mapping) if key == PROTO_KEY => {
            if mapping.assign_base(&value) {
                Ok(())
            } else if value.as_mapping().is_some() {
                Err(NestError::InvalidBase { kind: "cyclic mapping" })
            } else {
                Err(NestError::InvalidBase { kind: value.kind() })
            }
        }
        Value::Mapping(mapping) => {
            mapping.insert(key, value);
            Ok(())
        }
        Value::Sequence(sequence) => match parse_index(key) {
            Some(index) if sequence.set(index, value) => Ok(()),
            _ => Err(refused()),
        },
        _ => Err(refused()),
    }
}

/// Writes `value` at `path`, creating missing (or falsy) intermediate
/// containers on the way: a sequence when the following segment is an
/// index or a wildcard, a mapping otherwise.
///
/// Returns the value now stored at `path` (a new sequence of them across a
/// wildcard), or the root when nothing could be assigned. The only error
/// is [`NestError::PrototypeMutation`]; it aborts the call without undoing
/// writes already made to earlier elements of a wildcard.
pub fn set(root: &Value, path: impl Into<PathExpr>, value: Value) -> Result<Value> {
    let path = match plan(root, path.into()) {
        Plan::Fallback => return Ok(root.clone()),
        Plan::Index(index) => Path::index(index),
        Plan::Walk(path) => path,
    };
    let written = traverse(root, &path, &mut |current: &Value, key: &str, cursor: &Cursor| {
        guard::check(current)?;
        if cursor.is_last() {
            assign(current, key, value.clone())?;
            return Ok(Some(value.clone()));
        }
        if !current.lookup(key).is_some_and(|existing| existing.is_truthy()) {
            let fresh: Value = match cursor.next() {
                Some(next) if next.is_wildcard() || next.is_index() => Sequence::new().into(),
                _ => Mapping::new().into(),
            };
            trace!(key = %key, kind = fresh.kind(), "created missing container");
            assign(current, key, fresh)?;
        }
        Ok(current.lookup(key))
    });
    match written {
        Ok(resolved) => Ok(resolved.into_value().unwrap_or_else(|| root.clone())),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            debug!(%path, error = %e, "set left the root untouched");
            Ok(root.clone())
        }
    }
}
