//! Tables: collection rows coerced through their schema.

pub mod coerce;

pub use coerce::{FieldValue, Fields, PropertyError, coerce_row};

use serde::Serialize;

use crate::model::{Node, NodeMap, Schema};
use crate::render::Renderer;

/// One row of a table, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub fields: Fields,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<i64>,
}

impl TableRow {
    /// Coerce a row node against `schema`.
    pub fn from_node(row: &Node, schema: &Schema, renderer: &Renderer) -> Self {
        Self {
            fields: coerce_row(row, schema, renderer),
            id: row.id.clone(),
            emoji: row.format().and_then(|f| f.page_icon.clone()),
            created: row.created_time,
            last_edited: row.last_edited_time,
        }
    }
}

/// Coerce the rows named by `row_ids`, in order. Ids missing from `nodes`
/// are skipped.
pub fn table_rows(
    row_ids: &[String],
    nodes: &NodeMap,
    schema: &Schema,
    renderer: &Renderer,
) -> Vec<TableRow> {
    nodes
        .resolve(row_ids)
        .map(|row| TableRow::from_node(row, schema, renderer))
        .collect()
}
