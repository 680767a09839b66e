//! Document assembly: root node + node map → HTML.

use crate::error::{Error, Result};
use crate::model::NodeMap;
use crate::render::{Fragment, Renderer, fragments_to_html};

/// Render the children of `root_id` as one HTML string.
///
/// Child ids missing from `nodes` are skipped, so a partially loaded map
/// still renders. `nodes` may be the union of any number of page chunks.
///
/// # Errors
///
/// - [`Error::NotFound`] if `root_id` is not in the map
/// - [`Error::EmptyDocument`] if the root has no content list
///
/// # Example
///
/// ```
/// use potion::model::{BlockType, Node, NodeMap};
/// use potion::render::Renderer;
///
/// let nodes: NodeMap = [
///     Node::new("root", BlockType::Page).with_content(["a", "b"]),
///     Node::new("a", BlockType::Text).with_title("Hello"),
///     Node::new("b", BlockType::Divider),
/// ]
/// .into_iter()
/// .collect();
///
/// let html = potion::assemble("root", &nodes, &Renderer::default()).unwrap();
/// assert_eq!(html, "<p>Hello</p><hr>");
/// ```
pub fn assemble(root_id: &str, nodes: &NodeMap, renderer: &Renderer) -> Result<String> {
    let root = nodes
        .get(root_id)
        .ok_or_else(|| Error::NotFound(root_id.to_string()))?;
    let content = root
        .content
        .as_deref()
        .ok_or_else(|| Error::EmptyDocument(root_id.to_string()))?;

    let fragments: Vec<Fragment> = nodes
        .resolve(content)
        .filter_map(|node| renderer.block(node))
        .collect();

    log::debug!(
        "assembled {} fragments from {} child ids of {root_id}",
        fragments.len(),
        content.len()
    );

    Ok(fragments_to_html(fragments))
}
