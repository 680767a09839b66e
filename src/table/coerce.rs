//! Schema-directed coercion of raw row properties into typed fields.
//!
//! Row properties arrive as loosely typed tuples:
//!
//! ```text
//! checkbox      [["Yes"]]
//! date          [["‣", [["d", {"type": "date", "start_date": "2020-01-01"}]]]]
//! file          [["a.png", [["a", "https://s3/.../a.png"]]], [","], ...]
//! multi_select  [["red,green"]]
//! ```
//!
//! The column type decides how the first tuple's first element (the raw
//! scalar) or the whole value is read. Falsy results collapse to an absent
//! field, except for a checkbox `false`, which is kept.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{ColumnType, Node, RichText, Schema};
use crate::render::{Renderer, RichTextOptions};

/// A property that does not have the tuple shape its column type expects.
///
/// Never surfaced to callers: the coercer logs it and degrades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("column {0} has no raw scalar")]
    MissingScalar(String),

    #[error("column {0} has no nested date value")]
    MissingDate(String),

    #[error("column {0} has a file entry without a storage path")]
    MissingPath(String),
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    /// Rendered rich text (HTML).
    Text(String),
    /// Attachment URLs or tags.
    List(Vec<String>),
    /// Raw scalar or date object, passed through.
    Raw(Value),
}

impl FieldValue {
    /// JavaScript truthiness of the value. Lists are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(_) => true,
            FieldValue::Raw(value) => is_truthy_json(value),
        }
    }
}

fn is_truthy_json(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Field name → value. Absent fields are not present in the map.
pub type Fields = IndexMap<String, FieldValue>;

/// Coerce one row against a schema.
pub fn coerce_row(row: &Node, schema: &Schema, renderer: &Renderer) -> Fields {
    let mut fields = Fields::new();

    for (column_id, column) in schema.iter() {
        let Some(value) = row.property(column_id) else {
            continue;
        };

        let coerced = match coerce_value(&column.kind, value, row, renderer) {
            Ok(coerced) => coerced,
            Err(e) => {
                log::debug!("row {}: {e}", row.id);
                fallback_value(&column.kind, value)
            }
        };

        let keep = match &coerced {
            Some(FieldValue::Bool(_)) if column.kind == ColumnType::Checkbox => true,
            Some(v) => v.is_truthy(),
            None => false,
        };
        if let Some(v) = coerced.filter(|_| keep) {
            fields.insert(column.name.clone(), v);
        }
    }

    fields
}

/// The first tuple's first element.
fn raw_scalar(value: &Value) -> Option<&Value> {
    value.get(0)?.get(0)
}

fn coerce_value(
    kind: &ColumnType,
    value: &Value,
    row: &Node,
    renderer: &Renderer,
) -> Result<Option<FieldValue>, PropertyError> {
    let missing = || PropertyError::MissingScalar(kind.as_tag().to_string());

    let coerced = match kind {
        ColumnType::Checkbox => {
            let raw = raw_scalar(value).ok_or_else(missing)?;
            FieldValue::Bool(raw.as_str() == Some("Yes"))
        }
        ColumnType::Date => {
            let raw = raw_scalar(value).ok_or_else(missing)?;
            if !is_truthy_json(raw) {
                return Ok(None);
            }
            let date = value
                .get(0)
                .and_then(|t| t.get(1))
                .and_then(|m| m.get(0))
                .and_then(|m| m.get(1))
                .ok_or_else(|| PropertyError::MissingDate(kind.as_tag().to_string()))?;
            FieldValue::Raw(date.clone())
        }
        ColumnType::Text => FieldValue::Text(
            renderer.rich_text(&RichText::from_value(value), RichTextOptions::default()),
        ),
        ColumnType::File => FieldValue::List(file_urls(value, row, renderer)),
        ColumnType::MultiSelect => {
            let raw = raw_scalar(value).and_then(Value::as_str).ok_or_else(missing)?;
            FieldValue::List(raw.split(',').map(str::to_string).collect())
        }
        ColumnType::Other(_) => FieldValue::Raw(raw_scalar(value).ok_or_else(missing)?.clone()),
    };

    Ok(Some(coerced))
}

/// Best-effort value after a shape error: the raw scalar if there is one.
fn fallback_value(kind: &ColumnType, value: &Value) -> Option<FieldValue> {
    match kind {
        ColumnType::Checkbox => Some(FieldValue::Bool(false)),
        _ => raw_scalar(value).cloned().map(FieldValue::Raw),
    }
}

/// Attachment URLs of a file property.
///
/// Only entries with more than one element carry a file; single-element
/// entries are separators and are dropped.
fn file_urls(value: &Value, row: &Node, renderer: &Renderer) -> Vec<String> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter(|entry| entry.as_array().is_some_and(|e| e.len() > 1))
        .filter_map(|entry| {
            let path = entry
                .get(1)
                .and_then(|m| m.get(0))
                .and_then(|m| m.get(1))
                .and_then(Value::as_str);
            if path.is_none() {
                log::debug!("row {}: {}", row.id, PropertyError::MissingPath("file".to_string()));
            }
            path
        })
        .map(|path| renderer.assets().asset_url(path, &row.id))
        .collect()
}
