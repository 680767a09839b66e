//! Content sources.
//!
//! [`NodeSource`] is the only I/O boundary of the crate. Everything above it
//! works on an in-memory [`NodeMap`] snapshot.

mod dump;

pub use dump::RecordDump;

use crate::error::{Error, Result};
use crate::model::{Node, NodeMap, RichText, Schema};

/// Page size requested by [`load_page`].
pub const DEFAULT_CHUNK_LIMIT: usize = 100;

/// Opaque position inside a paginated page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn position(self) -> usize {
        self.0
    }
}

/// One page of nodes. `cursor` is `None` on the last page.
#[derive(Debug, Clone, Default)]
pub struct PageChunk {
    pub nodes: NodeMap,
    pub cursor: Option<Cursor>,
}

/// Everything needed to render a collection.
#[derive(Debug, Clone, Default)]
pub struct CollectionData {
    pub schema: Schema,
    pub description: RichText,
    /// Row ids in view order. Ids may dangle.
    pub row_ids: Vec<String>,
    pub nodes: NodeMap,
}

/// A thread-safe source of content nodes.
pub trait NodeSource: Send + Sync {
    /// Look up nodes by id. The result has one entry per requested id;
    /// unknown or inaccessible ids yield `None`.
    fn fetch_node_values(&self, ids: &[String]) -> Result<Vec<Option<Node>>>;

    /// Fetch up to `limit` nodes of the page rooted at `root_id`, starting at
    /// `cursor` (`None` for the first page).
    fn fetch_page_chunk(
        &self,
        root_id: &str,
        cursor: Option<Cursor>,
        limit: usize,
    ) -> Result<PageChunk>;

    /// Fetch a collection's schema, description and rows as seen through
    /// one of its views.
    fn fetch_collection(&self, collection_id: &str, view_id: &str) -> Result<CollectionData>;

    /// Look up a single node.
    fn fetch_node(&self, id: &str) -> Result<Option<Node>> {
        Ok(self
            .fetch_node_values(&[id.to_string()])?
            .into_iter()
            .next()
            .flatten())
    }
}

/// Load every node of a page, following the cursor until it runs out.
pub fn load_page(source: &dyn NodeSource, root_id: &str) -> Result<NodeMap> {
    load_page_chunked(source, root_id, DEFAULT_CHUNK_LIMIT)
}

/// [`load_page`] with an explicit page size.
pub fn load_page_chunked(source: &dyn NodeSource, root_id: &str, limit: usize) -> Result<NodeMap> {
    let mut nodes = NodeMap::new();
    let mut cursor = None;
    let mut chunks = 0usize;

    loop {
        let chunk = source.fetch_page_chunk(root_id, cursor, limit)?;
        chunks += 1;
        nodes.merge(chunk.nodes);

        match chunk.cursor {
            Some(next) if Some(next) == cursor => {
                return Err(Error::Source(format!(
                    "page cursor for {root_id} did not advance past {}",
                    next.position()
                )));
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    log::debug!("loaded {} nodes of {root_id} in {chunks} chunks", nodes.len());
    Ok(nodes)
}

/// Bring a node id into dashed 8-4-4-4-12 form.
///
/// Dashed 36-character ids pass through unchanged; 32-digit hex ids get
/// their dashes inserted.
///
/// ```
/// use potion::source::normalize_id;
///
/// assert_eq!(
///     normalize_id("0123456789abcdef0123456789abcdef").unwrap(),
///     "01234567-89ab-cdef-0123-456789abcdef"
/// );
/// ```
pub fn normalize_id(id: &str) -> Result<String> {
    let id = id.trim();
    match id.len() {
        36 => Ok(id.to_string()),
        32 if id.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(format!(
            "{}-{}-{}-{}-{}",
            &id[..8],
            &id[8..12],
            &id[12..16],
            &id[16..20],
            &id[20..]
        )),
        _ => Err(Error::InvalidId(id.to_string())),
    }
}
