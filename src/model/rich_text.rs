//! Rich text runs as emitted by the content API.
//!
//! On the wire a rich text value is an array of clips:
//!
//! ```text
//! [["plain"], ["bold link", [["b"], ["a", "https://example.com"]]]]
//! ```
//!
//! Each clip is `[text]` or `[text, modifiers]`, and each modifier is
//! `[code]` or `[code, argument]`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// An inline formatting instruction attached to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    Bold,
    Italic,
    Strikethrough,
    Link { href: String },
    /// `color` or `color_background`.
    Highlight { color: String },
    Code,
    Equation { source: String },
    /// A modifier code this renderer does not know. Logged and skipped.
    Unrecognized(String),
}

impl Modifier {
    /// Build a modifier from its wire code and optional argument.
    pub fn from_code(code: &str, arg: Option<&Value>) -> Self {
        let arg = || arg.and_then(Value::as_str).unwrap_or_default().to_string();
        match code {
            "b" => Self::Bold,
            "i" => Self::Italic,
            "s" => Self::Strikethrough,
            "a" => Self::Link { href: arg() },
            "h" => Self::Highlight { color: arg() },
            "c" => Self::Code,
            "e" => Self::Equation { source: arg() },
            other => Self::Unrecognized(other.to_string()),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value.get(0).and_then(Value::as_str) {
            Some(code) => Self::from_code(code, value.get(1)),
            None => Self::Unrecognized(value.to_string()),
        }
    }
}

/// A chunk of text plus the modifiers applied to it, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub text: String,
    pub modifiers: Vec<Modifier>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// An ordered sequence of runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    pub runs: Vec<Run>,
}

impl RichText {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// A single unformatted run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Run::new(text)])
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Concatenated run texts, ignoring all formatting.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Lenient parse of a wire value.
    ///
    /// Non-array values give empty text; clips whose text is not a string
    /// are dropped with a debug diagnostic.
    pub fn from_value(value: &Value) -> Self {
        let Some(clips) = value.as_array() else {
            if !value.is_null() {
                log::debug!("rich text is not an array: {value}");
            }
            return Self::default();
        };

        let runs = clips
            .iter()
            .filter_map(|clip| {
                let Some(text) = clip.get(0).and_then(Value::as_str) else {
                    log::debug!("dropping malformed rich text clip: {clip}");
                    return None;
                };
                let modifiers = clip
                    .get(1)
                    .and_then(Value::as_array)
                    .map(|mods| mods.iter().map(Modifier::from_value).collect())
                    .unwrap_or_default();
                Some(Run {
                    text: text.to_string(),
                    modifiers,
                })
            })
            .collect();

        Self { runs }
    }
}

impl From<Vec<Run>> for RichText {
    fn from(runs: Vec<Run>) -> Self {
        Self::new(runs)
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
