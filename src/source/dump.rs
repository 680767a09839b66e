//! A [`NodeSource`] backed by a saved JSON record map.
//!
//! The dump uses the same envelope as the remote API's record maps:
//!
//! ```json
//! {
//!   "block": { "<id>": { "value": { "id": "<id>", "type": "text", ... } } },
//!   "collection": { "<id>": { "value": { "schema": { ... }, "description": [...] } } }
//! }
//! ```
//!
//! Records without a `value` are treated as inaccessible. Collection rows are
//! the blocks whose `parent_id` is the collection id, in dump order.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use serde::Deserialize;

use super::{CollectionData, Cursor, NodeSource, PageChunk};
use crate::error::{Error, Result};
use crate::model::{Node, NodeMap, RichText, Schema};

#[derive(Debug, Deserialize)]
struct Record<T> {
    value: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct Collection {
    #[serde(default)]
    schema: Schema,
    #[serde(default)]
    description: RichText,
}

#[derive(Debug, Default, Deserialize)]
struct RecordMap {
    #[serde(default)]
    block: IndexMap<String, Record<Node>>,
    #[serde(default)]
    collection: IndexMap<String, Record<Collection>>,
}

/// Page walk of the most recently paged root.
type PageWalk = Option<(String, Arc<[String]>)>;

/// In-memory record map loaded from JSON.
#[derive(Debug, Default)]
pub struct RecordDump {
    blocks: NodeMap,
    collections: IndexMap<String, Collection>,
    last_walk: Mutex<PageWalk>,
}

impl RecordDump {
    /// Load a dump from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    pub fn blocks(&self) -> &NodeMap {
        &self.blocks
    }

    /// Ids of the page rooted at `root_id`: the root, then its descendants
    /// in depth-first content order. Each id appears once.
    fn page_ids(&self, root_id: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        let mut stack = vec![root_id.to_string()];

        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            let Some(node) = self.blocks.get(&id) else {
                continue;
            };
            if let Some(content) = &node.content {
                stack.extend(content.iter().rev().cloned());
            }
            ordered.push(id);
        }

        ordered
    }

    /// [`Self::page_ids`], walked once per root and reused by later chunks.
    fn cached_page_ids(&self, root_id: &str) -> Arc<[String]> {
        let mut last = self.last_walk.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((root, ids)) = last.as_ref()
            && root == root_id
        {
            return Arc::clone(ids);
        }

        let ids: Arc<[String]> = self.page_ids(root_id).into();
        *last = Some((root_id.to_string(), Arc::clone(&ids)));
        ids
    }
}

impl FromStr for RecordDump {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let map: RecordMap = serde_json::from_str(s)?;

        let blocks: NodeMap = map.block.into_values().filter_map(|r| r.value).collect();
        let collections = map
            .collection
            .into_iter()
            .filter_map(|(id, r)| r.value.map(|c| (id, c)))
            .collect::<IndexMap<_, _>>();

        log::debug!(
            "loaded record dump with {} blocks and {} collections",
            blocks.len(),
            collections.len()
        );
        Ok(Self {
            blocks,
            collections,
            last_walk: Mutex::default(),
        })
    }
}

impl NodeSource for RecordDump {
    fn fetch_node_values(&self, ids: &[String]) -> Result<Vec<Option<Node>>> {
        Ok(ids.iter().map(|id| self.blocks.get(id).cloned()).collect())
    }

    fn fetch_page_chunk(
        &self,
        root_id: &str,
        cursor: Option<Cursor>,
        limit: usize,
    ) -> Result<PageChunk> {
        if limit == 0 {
            return Err(Error::Source("page chunk limit must be positive".to_string()));
        }

        let ids = self.cached_page_ids(root_id);
        let start = cursor.map_or(0, Cursor::position).min(ids.len());
        let end = start.saturating_add(limit).min(ids.len());

        let nodes = self.blocks.resolve(&ids[start..end]).cloned().collect();
        Ok(PageChunk {
            nodes,
            cursor: (end < ids.len()).then(|| Cursor::new(end)),
        })
    }

    fn fetch_collection(&self, collection_id: &str, view_id: &str) -> Result<CollectionData> {
        let collection = self
            .collections
            .get(collection_id)
            .ok_or_else(|| Error::NotFound(collection_id.to_string()))?;
        log::debug!("reading collection {collection_id} through view {view_id}");

        let nodes: NodeMap = self
            .blocks
            .iter()
            .filter(|node| node.parent_id.as_deref() == Some(collection_id))
            .cloned()
            .collect();
        let row_ids = nodes.iter().map(|node| node.id.clone()).collect();

        Ok(CollectionData {
            schema: collection.schema.clone(),
            description: collection.description.clone(),
            row_ids,
            nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockType;
    use crate::source::load_page_chunked;
    use serde_json::json;

    fn dump() -> RecordDump {
        json!({
            "block": {
                "root": { "value": { "id": "root", "type": "page", "content": ["a", "b"] } },
                "a": { "value": { "id": "a", "type": "toggle", "content": ["a1"] } },
                "a1": { "value": { "id": "a1", "type": "text" } },
                "b": { "value": { "id": "b", "type": "divider" } },
                "hidden": { "role": "none" },
                "row": { "value": { "id": "row", "type": "page", "parent_id": "coll" } }
            },
            "collection": {
                "coll": { "value": {
                    "schema": { "title": { "name": "Name", "type": "title" } },
                    "description": [["About"]]
                } }
            }
        })
        .to_string()
        .parse()
        .unwrap()
    }

    #[test]
    fn test_records_without_value_are_dropped() {
        let dump = dump();
        assert!(dump.blocks().contains("root"));
        assert!(!dump.blocks().contains("hidden"));
        assert_eq!(
            dump.fetch_node_values(&["b".to_string(), "hidden".to_string()])
                .unwrap()
                .iter()
                .map(|n| n.as_ref().map(|n| n.kind.clone()))
                .collect::<Vec<_>>(),
            vec![Some(BlockType::Divider), None]
        );
    }

    #[test]
    fn test_page_ids_are_depth_first() {
        assert_eq!(dump().page_ids("root"), ["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_chunked_paging_covers_page() {
        let dump = dump();
        let first = dump.fetch_page_chunk("root", None, 3).unwrap();
        assert_eq!(first.nodes.len(), 3);
        assert_eq!(first.cursor, Some(Cursor::new(3)));

        let all = load_page_chunked(&dump, "root", 1).unwrap();
        assert_eq!(all.len(), 4);
        assert!(!all.contains("row"));
    }

    #[test]
    fn test_page_walk_is_reused_across_chunks() {
        let dump = dump();
        let first = dump.cached_page_ids("root");
        dump.fetch_page_chunk("root", Some(Cursor::new(1)), 1).unwrap();
        assert!(Arc::ptr_eq(&first, &dump.cached_page_ids("root")));

        let other = dump.cached_page_ids("a");
        assert_eq!(&*other, ["a", "a1"]);
        assert!(!Arc::ptr_eq(&first, &dump.cached_page_ids("root")));
    }

    #[test]
    fn test_zero_limit_is_an_error() {
        assert!(matches!(
            dump().fetch_page_chunk("root", None, 0),
            Err(Error::Source(_))
        ));
    }

    #[test]
    fn test_collection_rows() {
        let data = dump().fetch_collection("coll", "view").unwrap();
        assert_eq!(data.row_ids, ["row"]);
        assert_eq!(data.schema.len(), 1);
        assert_eq!(data.description.plain_text(), "About");
    }

    #[test]
    fn test_unknown_collection() {
        assert!(matches!(
            dump().fetch_collection("nope", "view"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        std::fs::write(&path, r#"{"block": {}}"#).unwrap();

        let dump = RecordDump::from_path(&path).unwrap();
        assert!(dump.blocks().is_empty());
        assert!(matches!(
            RecordDump::from_path(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
