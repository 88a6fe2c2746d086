//! Nestpath – read, test, write and locate values inside nested data by path.
//!
//! A path is a string of `.`-separated segments such as `"users.0.name"`,
//! or a bare integer addressing one element of the root. The segment `+`
//! is a wildcard: the rest of the path is applied to every element of the
//! sequence found there, and the results come back in the same order.
//!
//! ## Modules
//! * [`value`] – The [`value::Value`] sum type. Mappings and sequences are
//!   shared handles, so the engine works on the caller's structure in place
//!   and containers compare by identity. Every plain mapping delegates
//!   unresolved keys to one shared base mapping.
//! * [`path`] – Parsing of path expressions into segments.
//! * [`traverse`] – The recursive descent shared by all accessors.
//! * [`access`] – The accessors: [`get`], [`has`], [`has_own`], [`is_in`]
//!   and [`set`].
//! * [`guard`] – The check that keeps [`set`] out of the shared base mapping.
//! * [`settings`] and [`cli`] – Configuration and the `nestpath` binary.
//!
//! ## Failure
//! Dead ends are not errors. [`get`] falls back to the root or `None`,
//! [`has`] and [`is_in`] to `false`, and [`set`] to the untouched root.
//! The one hard failure is [`error::NestError::PrototypeMutation`], raised
//! by [`set`] when a path leads into the shared base mapping
//! (`"__proto__.x"` on a plain mapping, for instance).
//!
//! ## Quick Start
//! ```
//! use nestpath::{HasOptions, Value, get, has, has_own, set};
//! use serde_json::json;
//!
//! let root = Value::from(json!({}));
//! let written = set(&root, "a.b.0.d", 20.into()).unwrap();
//! assert_eq!(written, Value::Number(20.0));
//! assert_eq!(root.to_json(), json!({"a": {"b": [{"d": 20}]}}));
//!
//! let people = Value::from(json!([{"name": "a"}, {"name": "b"}]));
//! set(&people, "+.name", "x".into()).unwrap();
//! assert_eq!(get(&people, "+.name").map(|v| v.to_json()), Some(json!(["x", "x"])));
//!
//! assert!(has(&root, "a.toString", HasOptions::default()));
//! assert!(!has_own(&root, "a.toString"));
//! assert!(set(&root, "__proto__.polluted", true.into()).is_err());
//! ```

pub mod access;
pub mod cli;
pub mod error;
pub mod guard;
pub mod path;
pub mod settings;
pub mod traverse;
pub mod value;

pub use access::{HasOptions, IsInOptions, get, has, has_own, is_in, set};
pub use error::{NestError, Result};
pub use path::{Path, PathExpr, Segment};
pub use value::{Mapping, Opaque, Sequence, Value, shared_base};
