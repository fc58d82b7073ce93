//! TOML format handler using toml_edit

use toml_edit::{DocumentMut, InlineTable, Item, Value};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};
use crate::manifest::{Node, Table};

/// Handler for TOML manifests using toml_edit for declaration order
#[derive(Debug, Default)]
pub struct TomlHandler;

impl TomlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for TomlHandler {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn parse(&self, source: &str) -> Result<Table> {
        let doc: DocumentMut = source
            .parse()
            .map_err(|e: toml_edit::TomlError| Error::parse("TOML", e.to_string()))?;
        Ok(table_to_node(doc.as_table()))
    }
}

fn table_to_node(table: &toml_edit::Table) -> Table {
    let mut out = Table::new();
    for (key, item) in table.iter() {
        if let Some(node) = item_to_node(item) {
            out.insert(key, node);
        }
    }
    out
}

fn inline_to_node(table: &InlineTable) -> Table {
    let mut out = Table::new_inline();
    for (key, value) in table.iter() {
        out.insert(key, value_to_node(value));
    }
    out
}

fn item_to_node(item: &Item) -> Option<Node> {
    match item {
        Item::Value(v) => Some(value_to_node(v)),
        Item::Table(t) => Some(Node::Table(table_to_node(t))),
        Item::ArrayOfTables(_) => Some(Node::Other("array of tables")),
        Item::None => None,
    }
}

fn value_to_node(value: &Value) -> Node {
    match value {
        Value::String(s) => Node::String(s.value().to_string()),
        Value::InlineTable(t) => Node::Table(inline_to_node(t)),
        Value::Integer(_) => Node::Other("integer"),
        Value::Float(_) => Node::Other("float"),
        Value::Boolean(_) => Node::Other("boolean"),
        Value::Datetime(_) => Node::Other("datetime"),
        Value::Array(_) => Node::Other("array"),
    }
}
