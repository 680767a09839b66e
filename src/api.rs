//! End-to-end operations over a [`NodeSource`]: id in, HTML or rows out.

use crate::document::assemble;
use crate::error::{Error, Result};
use crate::model::{BlockType, Node};
use crate::render::{Renderer, RichTextOptions};
use crate::source::{CollectionData, NodeSource, load_page, normalize_id};
use crate::table::{self, TableRow};

/// Render a whole page as HTML.
///
/// # Errors
///
/// - [`Error::InvalidId`] if `id` is not a node id
/// - [`Error::NotFound`] if the source has no such node
/// - [`Error::EmptyDocument`] if the node has no content list
pub fn page_html(source: &dyn NodeSource, id: &str, renderer: &Renderer) -> Result<String> {
    let id = normalize_id(id)?;
    let root = fetch_root(source, &id)?;
    if root.content.is_none() {
        return Err(Error::EmptyDocument(id));
    }

    let mut nodes = load_page(source, &id)?;
    if !nodes.contains(&id) {
        nodes.insert(root);
    }
    assemble(&id, &nodes, renderer)
}

/// Coerce the rows of a full-page table.
///
/// # Errors
///
/// As [`page_html`] for the id, plus [`Error::WrongKind`] if the node is not
/// a `collection_view_page`.
pub fn table_rows(source: &dyn NodeSource, id: &str, renderer: &Renderer) -> Result<Vec<TableRow>> {
    let id = normalize_id(id)?;
    let root = fetch_root(source, &id)?;
    if root.kind != BlockType::CollectionViewPage {
        return Err(wrong_kind(&root, "collection_view_page"));
    }

    let data = fetch_collection(source, &root)?;
    log::debug!("coercing {} rows of {id}", data.row_ids.len());
    Ok(table::table_rows(
        &data.row_ids,
        &data.nodes,
        &data.schema,
        renderer,
    ))
}

/// Render the description of a collection (inline or full-page) as HTML.
pub fn table_description(source: &dyn NodeSource, id: &str, renderer: &Renderer) -> Result<String> {
    let id = normalize_id(id)?;
    let root = fetch_root(source, &id)?;
    if !root.kind.is_collection_view() {
        return Err(wrong_kind(&root, "collection_view"));
    }

    let data = fetch_collection(source, &root)?;
    Ok(renderer.rich_text(&data.description, RichTextOptions::default()))
}

fn fetch_root(source: &dyn NodeSource, id: &str) -> Result<Node> {
    source
        .fetch_node(id)?
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

fn wrong_kind(node: &Node, expected: &'static str) -> Error {
    Error::WrongKind {
        id: node.id.clone(),
        expected,
        found: node.kind.to_string(),
    }
}

/// Fetch the collection behind a collection view through its first view.
fn fetch_collection(source: &dyn NodeSource, root: &Node) -> Result<CollectionData> {
    let collection_id = root
        .collection_id
        .as_deref()
        .ok_or_else(|| Error::Source(format!("{} has no collection id", root.id)))?;
    let view_id = root
        .view_ids
        .first()
        .ok_or_else(|| Error::Source(format!("{} has no views", root.id)))?;

    source.fetch_collection(collection_id, view_id)
}
