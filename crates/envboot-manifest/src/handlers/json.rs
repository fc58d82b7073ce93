//! JSON format handler

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};
use crate::manifest::{Node, Table};

/// Handler for JSON manifests
///
/// Relies on serde_json's `preserve_order` feature so object keys come back
/// in the order they were written.
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, source: &str) -> Result<Table> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))?;
        match value {
            Value::Object(map) => Ok(object_to_table(&map)),
            _ => Err(Error::parse("JSON", "top-level value must be an object")),
        }
    }
}

fn object_to_table(map: &Map<String, Value>) -> Table {
    let mut out = Table::new_inline();
    for (key, value) in map {
        out.insert(key.as_str(), value_to_node(value));
    }
    out
}

fn value_to_node(value: &Value) -> Node {
    match value {
        Value::Object(map) => Node::Table(object_to_table(map)),
        Value::String(s) => Node::String(s.clone()),
        Value::Number(_) => Node::Other("number"),
        Value::Bool(_) => Node::Other("boolean"),
        Value::Array(_) => Node::Other("array"),
        Value::Null => Node::Other("null"),
    }
}
