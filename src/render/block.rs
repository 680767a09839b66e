//! Block → fragment dispatch.
//!
//! Each node renders independently into at most one [`Fragment`]. List and
//! checklist items come out wrapped in their own container; the merge pass in
//! [`super::merge`] joins neighbours afterwards.

use serde_json::Value;

use crate::model::{BlockType, Node, Properties};

use super::Renderer;
use super::escape::escape_html;
use super::math::render_math;
use super::merge::{Fragment, ListKind};
use super::rich_text::{RichTextOptions, color_class};

/// Language tag that switches a code block into raw HTML passthrough.
///
/// A code block marked with this language emits its text verbatim, with no
/// escaping and no wrapper. This is the only place the renderer injects
/// author-supplied markup.
pub const RAW_HTML_LANGUAGE: &str = "livescript";

/// Render one node. `None` means the node produces no output.
pub fn render_block(node: &Node, renderer: &Renderer) -> Option<Fragment> {
    match &node.kind {
        BlockType::Header => text_block(node, renderer, "h1"),
        BlockType::SubHeader => text_block(node, renderer, "h2"),
        BlockType::SubSubHeader => text_block(node, renderer, "h3"),
        BlockType::Text => text_block(node, renderer, "p"),
        BlockType::NumberedList => Some(list_item(node, renderer, ListKind::Ordered)),
        BlockType::BulletedList => Some(list_item(node, renderer, ListKind::Unordered)),
        BlockType::ToDo => Some(checklist_item(node, renderer)),
        BlockType::Code => Some(code_block(node, renderer)),
        BlockType::Callout => Some(callout(node, renderer)),
        BlockType::Quote => Some(Fragment::single(format!(
            "<blockquote>{}</blockquote>",
            title_html(node, renderer)
        ))),
        BlockType::Divider => Some(Fragment::single("<hr>")),
        BlockType::Image => image(node, renderer),
        BlockType::Equation => equation(node, renderer),
        BlockType::Embed => embed(node),
        BlockType::Video => video(node),
        BlockType::Page
        | BlockType::CollectionView
        | BlockType::CollectionViewPage
        | BlockType::Other(_) => {
            log::warn!("unhandled block type {:?} ({})", node.kind.as_tag(), node.id);
            None
        }
    }
}

fn title_html(node: &Node, renderer: &Renderer) -> String {
    renderer.rich_text(&node.title(), RichTextOptions::default())
}

/// Non-empty properties, or `None` for an empty block.
fn properties(node: &Node) -> Option<&Properties> {
    node.properties.as_ref().filter(|p| !p.is_empty())
}

fn text_block(node: &Node, renderer: &Renderer, tag: &str) -> Option<Fragment> {
    // Blank lines in the editor are text blocks without properties.
    properties(node)?;
    Some(Fragment::single(format!(
        "<{tag}>{}</{tag}>",
        title_html(node, renderer)
    )))
}

fn list_item(node: &Node, renderer: &Renderer, kind: ListKind) -> Fragment {
    Fragment::list_item(kind, format!("<li>{}</li>", title_html(node, renderer)))
}

fn checklist_item(node: &Node, renderer: &Renderer) -> Fragment {
    let checked = node
        .properties
        .as_ref()
        .and_then(|p| p.first_text("checked"))
        .is_some_and(|v| !v.is_empty() && v != "No");
    Fragment::checklist_item(format!(
        "<input type=\"checkbox\" disabled{}>{}</input>",
        if checked { " checked" } else { "" },
        title_html(node, renderer)
    ))
}

/// Language tag of a code block: all string parts of the property joined,
/// lower-cased, whitespace removed (`"Plain Text"` → `"plaintext"`).
fn code_language(value: Option<&Value>) -> String {
    let mut language = String::new();
    for clip in value.and_then(Value::as_array).into_iter().flatten() {
        for part in clip.as_array().into_iter().flatten() {
            if let Some(s) = part.as_str() {
                language.push_str(s);
            }
        }
    }
    language
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn code_block(node: &Node, renderer: &Renderer) -> Fragment {
    let language = code_language(node.property("language"));
    let title = node.title();

    if language == RAW_HTML_LANGUAGE {
        return Fragment::single(title.plain_text());
    }

    // Highlighters tokenize source text, so they never see run markup.
    let body = renderer
        .highlighter()
        .highlight(&language, &title.plain_text())
        .unwrap_or_else(|| renderer.rich_text(&title, RichTextOptions::preformatted()));

    Fragment::single(format!(
        "<pre><code class=\"language-{}\">{body}</code></pre>",
        escape_html(&language)
    ))
}

fn is_hosted(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn callout(node: &Node, renderer: &Renderer) -> Fragment {
    let format = node.format();
    let mut html = String::from("<div class=\"callout");
    if let Some(color) = format.and_then(|f| f.block_color.as_deref()) {
        html.push(' ');
        html.push_str(&color_class(color));
    }
    html.push_str("\">");

    if let Some(icon) = format.and_then(|f| f.page_icon.as_deref()) {
        let src = if is_hosted(icon) {
            renderer.assets().asset_url(icon, &node.id)
        } else {
            renderer.assets().emoji_url(icon)
        };
        html.push_str(&format!("<img src=\"{}\">", escape_html(&src)));
    }

    html.push_str(&format!("<p>{}</p></div>", title_html(node, renderer)));
    Fragment::single(html)
}

/// Source of a media block: `format.display_source`, else `properties.source`.
fn media_source(node: &Node) -> Option<&str> {
    node.format()
        .and_then(|f| f.display_source.as_deref())
        .or_else(|| node.properties.as_ref()?.first_text("source"))
}

fn image(node: &Node, renderer: &Renderer) -> Option<Fragment> {
    let Some(source) = media_source(node) else {
        log::debug!("image block {} has no source", node.id);
        return None;
    };
    let src = renderer.assets().asset_url(source, &node.id);
    Some(Fragment::single(format!(
        "<img src=\"{}\">",
        escape_html(&src)
    )))
}

fn equation(node: &Node, renderer: &Renderer) -> Option<Fragment> {
    properties(node)?;
    let title = node.title();
    let source = title.runs.first().map(|r| r.text.as_str()).unwrap_or_default();
    Some(Fragment::single(format!(
        "<div class=\"equation\">{}</div>",
        render_math(renderer.math(), source, true)
    )))
}

fn iframe(src: &str) -> Fragment {
    Fragment::single(format!("<iframe src=\"{}\"></iframe>", escape_html(src)))
}

fn embed(node: &Node) -> Option<Fragment> {
    let source = node.properties.as_ref().and_then(|p| p.first_text("source"));
    if source.is_none() {
        log::debug!("embed block {} has no source", node.id);
    }
    source.map(iframe)
}

fn video(node: &Node) -> Option<Fragment> {
    let source = media_source(node);
    if source.is_none() {
        log::debug!("video block {} has no source", node.id);
    }
    source.map(iframe)
}
