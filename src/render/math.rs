//! Math rendering seam.
//!
//! Equations are typeset by a [`MathRenderer`]. Rendering must never fail a
//! document: [`render_math`] falls back to the escaped TeX source.
//!
//! With the `katex` feature, [`KatexMath`] typesets on the server and is the
//! default. Without it (and on wasm), [`DelimitedTex`] leaves typesetting to
//! KaTeX's auto-render on the client.

use thiserror::Error;

use super::escape::escape_html;

/// Errors a math renderer may report for malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("unbalanced braces in {0:?}")]
    UnbalancedBraces(String),

    #[error("dangling backslash at end of {0:?}")]
    DanglingEscape(String),

    #[error("KaTeX error: {0}")]
    Katex(String),

    #[error("math renderer failed: {0}")]
    Other(String),
}

/// Converts TeX source to inline markup.
pub trait MathRenderer: Send + Sync {
    /// Render `source`; `display` selects block (true) or inline (false) style.
    fn render(&self, source: &str, display: bool) -> Result<String, MathError>;
}

/// Offline renderer that emits the escaped source wrapped in KaTeX
/// auto-render delimiters (`\(…\)` inline, `\[…\]` display), leaving the
/// typesetting to the client.
///
/// Rejects sources with unbalanced braces or a trailing backslash, which a
/// typesetter would also choke on.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelimitedTex;

impl MathRenderer for DelimitedTex {
    fn render(&self, source: &str, display: bool) -> Result<String, MathError> {
        check_tex(source)?;
        let (open, close) = if display {
            ("\\[", "\\]")
        } else {
            ("\\(", "\\)")
        };
        Ok(format!("{open}{}{close}", escape_html(source)))
    }
}

/// Server-side typesetting with KaTeX.
#[cfg(feature = "katex")]
#[derive(Debug, Default, Clone, Copy)]
pub struct KatexMath;

#[cfg(feature = "katex")]
impl MathRenderer for KatexMath {
    fn render(&self, source: &str, display: bool) -> Result<String, MathError> {
        let opts = katex::Opts::builder()
            .display_mode(display)
            .build()
            .map_err(|e| MathError::Other(e.to_string()))?;
        katex::render_with_opts(source, &opts).map_err(|e| MathError::Katex(e.to_string()))
    }
}

/// The math renderer used by [`Renderer::new`](super::Renderer::new).
pub fn default_math() -> Box<dyn MathRenderer> {
    #[cfg(feature = "katex")]
    {
        Box::new(KatexMath)
    }
    #[cfg(not(feature = "katex"))]
    {
        Box::new(DelimitedTex)
    }
}

fn check_tex(source: &str) -> Result<(), MathError> {
    let mut depth = 0usize;
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Err(MathError::DanglingEscape(source.to_string()));
                }
            }
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| MathError::UnbalancedBraces(source.to_string()))?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(MathError::UnbalancedBraces(source.to_string()));
    }
    Ok(())
}

/// Render math, degrading to the escaped raw source on failure.
pub fn render_math(renderer: &dyn MathRenderer, source: &str, display: bool) -> String {
    match renderer.render(source, display) {
        Ok(html) => html,
        Err(e) => {
            log::debug!("math fallback to raw source: {e}");
            escape_html(source).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_and_display_delimiters() {
        assert_eq!(DelimitedTex.render("x^2", false).unwrap(), "\\(x^2\\)");
        assert_eq!(DelimitedTex.render("x^2", true).unwrap(), "\\[x^2\\]");
    }

    #[test]
    fn test_source_is_escaped() {
        assert_eq!(DelimitedTex.render("a<b", false).unwrap(), "\\(a&lt;b\\)");
    }

    #[test]
    fn test_escaped_braces_are_balanced() {
        assert!(DelimitedTex.render("\\{ x \\}", false).is_ok());
        assert!(DelimitedTex.render("\\frac{1}{2}", false).is_ok());
    }

    #[test]
    fn test_rejects_malformed_source() {
        assert_eq!(
            DelimitedTex.render("\\frac{1", false),
            Err(MathError::UnbalancedBraces("\\frac{1".to_string()))
        );
        assert!(matches!(
            DelimitedTex.render("}{", false),
            Err(MathError::UnbalancedBraces(_))
        ));
        assert!(matches!(
            DelimitedTex.render("x\\", false),
            Err(MathError::DanglingEscape(_))
        ));
    }

    #[cfg(not(feature = "katex"))]
    #[test]
    fn test_default_is_delimited() {
        assert_eq!(default_math().render("x", true).unwrap(), "\\[x\\]");
    }

    #[cfg(feature = "katex")]
    #[test]
    fn test_katex_typesets() {
        let inline = KatexMath.render("x^2", false).unwrap();
        assert!(inline.contains("class=\"katex\""));
        assert!(!inline.contains("katex-display"));

        let display = KatexMath.render("x^2", true).unwrap();
        assert!(display.contains("katex-display"));

        assert!(default_math().render("x^2", true).unwrap().contains("katex-display"));
    }

    #[cfg(feature = "katex")]
    #[test]
    fn test_katex_errors_fall_back() {
        assert!(matches!(
            KatexMath.render("\\frac{1", false),
            Err(MathError::Katex(_))
        ));
        assert_eq!(render_math(&KatexMath, "\\frac{1", false), "\\frac{1");
    }

    #[test]
    fn test_render_math_falls_back_to_source() {
        assert_eq!(render_math(&DelimitedTex, "{<x", false), "{&lt;x");
        assert_eq!(render_math(&DelimitedTex, "y", false), "\\(y\\)");
    }
}
