//! Embedded JSON Schemas (Draft 2020-12) and validation helpers.

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::IoError;

const PRICING_TABLE_SCHEMA: &str = include_str!("../pricing/pricing_table.schema.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    PricingTable,
}

impl SchemaKind {
    fn source(self) -> &'static str {
        match self {
            SchemaKind::PricingTable => PRICING_TABLE_SCHEMA,
        }
    }
}

/// Validate `instance` against the embedded schema for `kind`.
/// Reports the first violation with its JSON Pointer.
pub fn validate_value(kind: SchemaKind, instance: &Value) -> Result<(), IoError> {
    let schema: Value = serde_json::from_str(kind.source())?;
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft202012)
        .compile(&schema)
        .map_err(|e| IoError::Schema {
            pointer: "#".into(),
            msg: format!("schema compile error: {e}"),
        })?;

    let first = match compiled.validate(instance) {
        Ok(()) => None,
        Err(mut errors) => errors.next().map(|err| (err.instance_path.to_string(), err.to_string())),
    };
    match first {
        None => Ok(()),
        Some((pointer, msg)) => Err(IoError::Schema {
            pointer: if pointer.is_empty() { "/".into() } else { pointer },
            msg,
        }),
    }
}
