//! Table schemas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column type tag. Only the types with special coercion rules are named.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Checkbox,
    Date,
    Text,
    File,
    MultiSelect,
    /// `title`, `select`, `number`, `url`, ... passed through as raw scalars.
    Other(String),
}

impl ColumnType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "checkbox" => Self::Checkbox,
            "date" => Self::Date,
            "text" => Self::Text,
            "file" => Self::File,
            "multi_select" => Self::MultiSelect,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Text => "text",
            Self::File => "file",
            Self::MultiSelect => "multi_select",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<ColumnType> for String {
    fn from(kind: ColumnType) -> Self {
        kind.as_tag().to_string()
    }
}

/// A single column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Column id → definition, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    columns: IndexMap<String, ColumnDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, id: impl Into<String>, column: ColumnDef) -> Self {
        self.columns.insert(id.into(), column);
        self
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.get(id)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns as `(column id, definition)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnDef)> {
        self.columns.iter().map(|(id, def)| (id.as_str(), def))
    }
}

impl FromIterator<(String, ColumnDef)> for Schema {
    fn from_iter<T: IntoIterator<Item = (String, ColumnDef)>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_schema_keeps_order() {
        let schema: Schema = serde_json::from_value(json!({
            "title": { "name": "Name", "type": "title" },
            "a1b2": { "name": "Done", "type": "checkbox" },
            "c3d4": { "name": "Tags", "type": "multi_select", "options": [] }
        }))
        .unwrap();

        let names: Vec<_> = schema.iter().map(|(_, c)| c.name.as_str()).collect();
        assert_eq!(names, vec!["Name", "Done", "Tags"]);
        assert_eq!(schema.get("a1b2").unwrap().kind, ColumnType::Checkbox);
        assert_eq!(
            schema.get("title").unwrap().kind,
            ColumnType::Other("title".to_string())
        );
    }
}
