//! Pure HTML generation from content nodes.
//!
//! - [`escape`]: HTML escaping
//! - [`rich_text`]: rich text runs → inline HTML
//! - [`block`]: one node → one [`Fragment`]
//! - [`merge`]: sibling merge pass for lists and checklists
//! - [`assets`], [`math`], [`highlight`]: collaborator seams with default
//!   offline implementations
//!
//! A [`Renderer`] bundles the collaborators; everything else is a free
//! function over borrowed data.

pub mod assets;
pub mod block;
mod escape;
pub mod highlight;
pub mod math;
pub mod merge;
pub mod rich_text;

pub use assets::{AssetProxy, AssetUrls, DEFAULT_ASSET_BASE, DEFAULT_EMOJI_BASE};
pub use block::render_block;
pub use escape::{escape_html, newlines_to_br};
pub use highlight::{Highlighter, KeywordHighlighter, NoHighlight};
#[cfg(feature = "katex")]
pub use math::KatexMath;
pub use math::{DelimitedTex, MathError, MathRenderer, default_math, render_math};
pub use merge::{Fragment, Group, ListKind, fragments_to_html, merge_fragments};
pub use rich_text::{RichTextOptions, render_rich_text};

use crate::model::{Node, RichText};

/// Rendering configuration: the external collaborators used for assets,
/// math and code highlighting.
///
/// Defaults: [`AssetProxy::default`], [`default_math`] (KaTeX with the
/// `katex` feature, else [`DelimitedTex`]), [`KeywordHighlighter`].
///
/// ```
/// use potion::render::{AssetProxy, NoHighlight, Renderer};
///
/// let renderer = Renderer::new()
///     .with_assets(AssetProxy::new("http://localhost:3000"))
///     .with_highlighter(NoHighlight);
/// ```
pub struct Renderer {
    assets: Box<dyn AssetUrls>,
    math: Box<dyn MathRenderer>,
    highlighter: Box<dyn Highlighter>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            assets: Box::new(AssetProxy::default()),
            math: default_math(),
            highlighter: Box::new(KeywordHighlighter),
        }
    }

    pub fn with_assets(mut self, assets: impl AssetUrls + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    pub fn with_math(mut self, math: impl MathRenderer + 'static) -> Self {
        self.math = Box::new(math);
        self
    }

    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn assets(&self) -> &dyn AssetUrls {
        self.assets.as_ref()
    }

    pub fn math(&self) -> &dyn MathRenderer {
        self.math.as_ref()
    }

    pub fn highlighter(&self) -> &dyn Highlighter {
        self.highlighter.as_ref()
    }

    /// Render rich text with this renderer's math collaborator.
    pub fn rich_text(&self, text: &RichText, options: RichTextOptions) -> String {
        render_rich_text(text, options, self.math())
    }

    /// Render one node. See [`render_block`].
    pub fn block(&self, node: &Node) -> Option<Fragment> {
        render_block(node, self)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}
