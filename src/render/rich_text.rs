//! Rich text → inline HTML.
//!
//! Modifiers are applied in the order they appear on the run, each wrapping
//! the text produced so far: the first modifier ends up innermost. This is
//! not a canonical nesting order, and it is kept on purpose because changing
//! it changes the output for every multi-modifier run.

use crate::model::{Modifier, RichText, Run};

use super::escape::{escape_html, newlines_to_br};
use super::math::{MathRenderer, render_math};

/// Options for [`render_rich_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RichTextOptions {
    /// Replace `\n` with `<br>` after rendering.
    pub line_breaks: bool,
    /// HTML-escape run text before applying modifiers.
    pub escape: bool,
}

impl Default for RichTextOptions {
    fn default() -> Self {
        Self {
            line_breaks: true,
            escape: true,
        }
    }
}

impl RichTextOptions {
    /// Options for text inside `<pre>`: escaped, no `<br>`.
    pub fn preformatted() -> Self {
        Self {
            line_breaks: false,
            escape: true,
        }
    }

    /// No escaping, no `<br>`.
    pub fn raw() -> Self {
        Self {
            line_breaks: false,
            escape: false,
        }
    }
}

/// Render rich text to inline HTML.
///
/// Empty text renders to the empty string.
pub fn render_rich_text(
    text: &RichText,
    options: RichTextOptions,
    math: &dyn MathRenderer,
) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    for run in &text.runs {
        output.push_str(&render_run(run, options, math));
    }

    if options.line_breaks {
        newlines_to_br(output)
    } else {
        output
    }
}

fn render_run(run: &Run, options: RichTextOptions, math: &dyn MathRenderer) -> String {
    let mut text = if options.escape {
        escape_html(&run.text).into_owned()
    } else {
        run.text.clone()
    };

    for modifier in &run.modifiers {
        text = match modifier {
            Modifier::Bold => format!("<strong>{text}</strong>"),
            Modifier::Italic => format!("<em>{text}</em>"),
            Modifier::Strikethrough => format!("<strike>{text}</strike>"),
            Modifier::Link { href } => format!("<a href=\"{href}\">{text}</a>"),
            Modifier::Highlight { color } => {
                format!("<span class=\"{}\">{text}</span>", color_class(color))
            }
            Modifier::Code => format!("<code>{text}</code>"),
            Modifier::Equation { source } => format!(
                "<span class=\"equation\">{}</span>",
                render_math(math, source, false)
            ),
            Modifier::Unrecognized(code) => {
                log::warn!("unhandled rich text modifier {code:?}");
                text
            }
        };
    }

    text
}

/// CSS class for a color spec: `red` → `color-red`,
/// `red_background` → `background-red`.
pub fn color_class(spec: &str) -> String {
    let mut parts = spec.split('_');
    let color = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        format!("background-{color}")
    } else {
        format!("color-{color}")
    }
}
