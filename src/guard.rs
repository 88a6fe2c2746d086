//! Refuses writes into the shared base mapping.
//!
//! Every plain mapping delegates to that one object, so a single write
//! there would show up in every mapping of the process.

use tracing::warn;

use crate::error::{NestError, Result};
use crate::value::Value;

pub fn check(container: &Value) -> Result<()> {
    match container {
        Value::Mapping(mapping) if mapping.is_shared_base() => {
            warn!("refused write into the shared base mapping");
            Err(NestError::PrototypeMutation)
        }
        _ => Ok(()),
    }
}
