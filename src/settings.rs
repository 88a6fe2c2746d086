//! Layered configuration for the command line front end.
//!
//! Built-in defaults, then an optional `nestpath.toml` (or the file given
//! on the command line), then `NESTPATH_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::access::{HasOptions, IsInOptions};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// tracing filter directive, overridden by `RUST_LOG`
    pub log_level: String,
    pub pretty: bool,
    /// default for `has`
    pub own: bool,
    /// default for `is-in`
    pub valid_path: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            pretty: true,
            own: false,
            valid_path: false,
        }
    }
}

impl Settings {
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("pretty", defaults.pretty)?
            .set_default("own", defaults.own)?
            .set_default("valid_path", defaults.valid_path)?;
        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("nestpath").required(false)),
        };
        let settings = builder
            .add_source(Environment::with_prefix("NESTPATH").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn has_options(&self) -> HasOptions {
        HasOptions { own: self.own }
    }

    pub fn is_in_options(&self) -> IsInOptions {
        IsInOptions { valid_path: self.valid_path }
    }
}
