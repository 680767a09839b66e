//! Asset URL seam.
//!
//! Hosted files (images, callout icons, table attachments) are stored behind
//! signed URLs. The renderer never signs anything itself: it asks an
//! [`AssetUrls`] implementation for a fetchable URL.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Default base of the asset redirect endpoint.
pub const DEFAULT_ASSET_BASE: &str = "https://potion-api.now.sh";

/// Default emoji image proxy.
pub const DEFAULT_EMOJI_BASE: &str = "https://emojicdn.elk.sh";

/// The characters JavaScript's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turns internal storage paths into URLs a browser can fetch.
pub trait AssetUrls: Send + Sync {
    /// URL for a stored file, scoped to the block that owns it.
    fn asset_url(&self, raw_path: &str, owner_block_id: &str) -> String;

    /// Image URL for an emoji icon.
    fn emoji_url(&self, emoji: &str) -> String;
}

/// Routes assets through a redirect endpoint that signs them on request:
/// `{base}/api/asset?url={path}&blockId={id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetProxy {
    base: String,
    emoji_base: String,
}

impl AssetProxy {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            emoji_base: DEFAULT_EMOJI_BASE.to_string(),
        }
    }

    pub fn with_emoji_base(mut self, emoji_base: impl Into<String>) -> Self {
        self.emoji_base = emoji_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for AssetProxy {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_BASE)
    }
}

impl AssetUrls for AssetProxy {
    fn asset_url(&self, raw_path: &str, owner_block_id: &str) -> String {
        format!(
            "{}/api/asset?url={}&blockId={}",
            self.base,
            utf8_percent_encode(raw_path, URI_COMPONENT),
            utf8_percent_encode(owner_block_id, URI_COMPONENT)
        )
    }

    fn emoji_url(&self, emoji: &str) -> String {
        format!(
            "{}/{}",
            self.emoji_base,
            utf8_percent_encode(emoji, URI_COMPONENT)
        )
    }
}
