//! Content nodes and the flat node map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::rich_text::RichText;

/// Block type of a node.
///
/// Closed set of the types the renderer knows about. Anything else lands in
/// [`BlockType::Other`] with its original tag so diagnostics can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Header,
    SubHeader,
    SubSubHeader,
    Text,
    NumberedList,
    BulletedList,
    ToDo,
    Code,
    Callout,
    Quote,
    Divider,
    Image,
    Equation,
    Embed,
    Video,
    Page,
    CollectionView,
    CollectionViewPage,
    Other(String),
}

impl BlockType {
    /// Parse a wire tag such as `"sub_header"`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "header" => Self::Header,
            "sub_header" => Self::SubHeader,
            "sub_sub_header" => Self::SubSubHeader,
            "text" => Self::Text,
            "numbered_list" => Self::NumberedList,
            "bulleted_list" => Self::BulletedList,
            "to_do" => Self::ToDo,
            "code" => Self::Code,
            "callout" => Self::Callout,
            "quote" => Self::Quote,
            "divider" => Self::Divider,
            "image" => Self::Image,
            "equation" => Self::Equation,
            "embed" => Self::Embed,
            "video" => Self::Video,
            "page" => Self::Page,
            "collection_view" => Self::CollectionView,
            "collection_view_page" => Self::CollectionViewPage,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire tag for this type.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Header => "header",
            Self::SubHeader => "sub_header",
            Self::SubSubHeader => "sub_sub_header",
            Self::Text => "text",
            Self::NumberedList => "numbered_list",
            Self::BulletedList => "bulleted_list",
            Self::ToDo => "to_do",
            Self::Code => "code",
            Self::Callout => "callout",
            Self::Quote => "quote",
            Self::Divider => "divider",
            Self::Image => "image",
            Self::Equation => "equation",
            Self::Embed => "embed",
            Self::Video => "video",
            Self::Page => "page",
            Self::CollectionView => "collection_view",
            Self::CollectionViewPage => "collection_view_page",
            Self::Other(tag) => tag,
        }
    }

    /// Any of the `collection_view*` family (inline table, full-page table, ...).
    pub fn is_collection_view(&self) -> bool {
        self.as_tag().starts_with("collection_view")
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<BlockType> for String {
    fn from(kind: BlockType) -> Self {
        kind.as_tag().to_string()
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Raw property values keyed by property name (or column id for table rows).
///
/// Values are kept as raw JSON because their shape depends on who reads them:
/// block renderers read rich text, the schema coercer reads typed tuples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(IndexMap<String, Value>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a property as rich text. Missing or malformed values give empty text.
    pub fn rich_text(&self, name: &str) -> RichText {
        self.get(name).map(RichText::from_value).unwrap_or_default()
    }

    /// The first tuple's first element, if it is a string (`[["Yes"]]` -> `"Yes"`).
    pub fn first_text(&self, name: &str) -> Option<&str> {
        self.get(name)?.get(0)?.get(0)?.as_str()
    }
}

/// Display attributes of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    #[serde(alias = "icon", skip_serializing_if = "Option::is_none")]
    pub page_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_color: Option<String>,
}

/// One entry of the remote content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Ordered child ids. Ids may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub view_ids: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: BlockType) -> Self {
        Self {
            id: id.into(),
            kind,
            properties: None,
            format: None,
            content: None,
            created_time: None,
            last_edited_time: None,
            parent_id: None,
            collection_id: None,
            view_ids: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(name, value);
        self
    }

    /// Shorthand for a plain-text `title` property.
    pub fn with_title(self, text: &str) -> Self {
        self.with_property("title", Value::from(vec![vec![text]]))
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_content<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(name)
    }

    /// The `title` property as rich text (empty if absent).
    pub fn title(&self) -> RichText {
        self.properties
            .as_ref()
            .map(|p| p.rich_text("title"))
            .unwrap_or_default()
    }

    pub fn format(&self) -> Option<&Format> {
        self.format.as_ref()
    }
}

/// Flat mapping from node id to node.
///
/// May be the union of several paginated fetches. Lookups of unknown ids
/// return `None`; callers decide whether that is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMap {
    nodes: IndexMap<String, Node>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under its own id, replacing any previous entry.
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Fold another page of nodes into this map. Later pages win on conflict.
    pub fn merge(&mut self, other: NodeMap) {
        self.nodes.extend(other.nodes);
    }

    /// Resolve child ids in order, silently dropping the ones not in the map.
    pub fn resolve<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = &'a Node> + 'a {
        ids.iter().filter_map(move |id| {
            let node = self.get(id);
            if node.is_none() {
                log::debug!("skipping dangling node id {id}");
            }
            node
        })
    }
}

impl FromIterator<Node> for NodeMap {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut map = NodeMap::new();
        map.extend(iter);
        map
    }
}

impl Extend<Node> for NodeMap {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl IntoIterator for NodeMap {
    type Item = Node;
    type IntoIter = indexmap::map::IntoValues<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_type_roundtrips_tags() {
        for tag in ["header", "to_do", "collection_view_page", "column_list"] {
            assert_eq!(BlockType::from_tag(tag).as_tag(), tag);
        }
        assert_eq!(
            BlockType::from_tag("column_list"),
            BlockType::Other("column_list".to_string())
        );
    }

    #[test]
    fn test_collection_view_family() {
        assert!(BlockType::CollectionView.is_collection_view());
        assert!(BlockType::CollectionViewPage.is_collection_view());
        assert!(BlockType::from_tag("collection_view_gallery").is_collection_view());
        assert!(!BlockType::Page.is_collection_view());
    }

    #[test]
    fn test_deserialize_node() {
        let node: Node = serde_json::from_value(json!({
            "id": "a",
            "type": "callout",
            "properties": { "title": [["Note"]] },
            "format": { "page_icon": "💡", "block_color": "gray_background" },
            "created_time": 1570000000000i64,
            "alive": true
        }))
        .unwrap();

        assert_eq!(node.kind, BlockType::Callout);
        assert_eq!(node.title().plain_text(), "Note");
        let format = node.format().unwrap();
        assert_eq!(format.page_icon.as_deref(), Some("💡"));
        assert_eq!(format.block_color.as_deref(), Some("gray_background"));
        assert_eq!(node.created_time, Some(1570000000000));
        assert!(node.content.is_none());
    }

    #[test]
    fn test_format_accepts_icon_alias() {
        let format: Format = serde_json::from_value(json!({ "icon": "🔥" })).unwrap();
        assert_eq!(format.page_icon.as_deref(), Some("🔥"));
    }

    #[test]
    fn test_first_text() {
        let node = Node::new("a", BlockType::Code).with_property("language", json!([["Rust"]]));
        let props = node.properties.as_ref().unwrap();
        assert_eq!(props.first_text("language"), Some("Rust"));
        assert_eq!(props.first_text("missing"), None);
    }

    #[test]
    fn test_resolve_skips_dangling_ids() {
        let map: NodeMap = [
            Node::new("a", BlockType::Divider),
            Node::new("c", BlockType::Divider),
        ]
        .into_iter()
        .collect();

        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let resolved: Vec<_> = map.resolve(&ids).map(|n| n.id.as_str()).collect();
        assert_eq!(resolved, vec!["a", "c"]);
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut first: NodeMap = [Node::new("a", BlockType::Text).with_title("old")]
            .into_iter()
            .collect();
        let second: NodeMap = [
            Node::new("a", BlockType::Text).with_title("new"),
            Node::new("b", BlockType::Divider),
        ]
        .into_iter()
        .collect();

        first.merge(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.get("a").unwrap().title().plain_text(), "new");
    }
}
