//! Command line front end: load a JSON document, run one accessor on it.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use crate::access::{HasOptions, IsInOptions, get, has, has_own, is_in, set};
use crate::error::Result;
use crate::settings::Settings;
use crate::value::Value;

#[derive(Parser, Debug)]
#[command(name = "nestpath")]
#[command(about = "Read, test and write nested JSON values by dot-delimited path")]
pub struct Cli {
    /// Configuration file (defaults to ./nestpath.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value at PATH
    Get {
        /// JSON file, or - for stdin
        document: String,
        path: Option<String>,
    },

    /// Tell whether PATH names a key
    Has {
        document: String,
        path: Option<String>,
        /// Ignore inherited keys
        #[arg(long)]
        own: bool,
    },

    /// Tell whether PATH names an own key
    HasOwn { document: String, path: Option<String> },

    /// Tell whether NEEDLE (JSON) appears along PATH
    IsIn {
        document: String,
        path: Option<String>,
        /// Omit to look for an absent value
        needle: Option<String>,
        /// Also require PATH to resolve
        #[arg(long)]
        valid_path: bool,
    },

    /// Write VALUE (JSON, or a plain string) at PATH and print the document
    Set {
        document: String,
        path: String,
        value: String,
    },
}

fn load(document: &str) -> Result<Value> {
    let text = if document == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(document)?
    };
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(json.into())
}

// Anything that is not valid JSON is taken as a plain string.
fn literal(text: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(text))
}

fn render(value: &Value, pretty: bool) -> Result<String> {
    let json = value.to_json();
    Ok(if pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    })
}

/// Runs one command and returns what should be printed. An absent result
/// prints nothing.
pub fn run(command: Command, settings: &Settings) -> Result<String> {
    match command {
        Command::Get { document, path } => {
            let root = load(&document)?;
            match get(&root, path) {
                Some(value) => render(&value, settings.pretty),
                None => Ok(String::new()),
            }
        }
        Command::Has { document, path, own } => {
            let root = load(&document)?;
            let options = HasOptions { own: own || settings.has_options().own };
            Ok(has(&root, path, options).to_string())
        }
        Command::HasOwn { document, path } => {
            let root = load(&document)?;
            Ok(has_own(&root, path).to_string())
        }
        Command::IsIn { document, path, needle, valid_path } => {
            let root = load(&document)?;
            let needle = needle.as_deref().map(literal);
            let options = IsInOptions {
                valid_path: valid_path || settings.is_in_options().valid_path,
            };
            Ok(is_in(&root, path, needle.as_ref(), options).to_string())
        }
        Command::Set { document, path, value } => {
            let root = load(&document)?;
            let written = set(&root, path.as_str(), literal(&value))?;
            info!(%path, assigned = %written, "set");
            render(&root, settings.pretty)
        }
    }
}
