//! Pure HTML escaping utilities.

use std::borrow::Cow;

/// Escape text for use in HTML content or a double-quoted attribute.
///
/// Escapes `&`, `<`, `>`, `"` and `'`. Returns the input unchanged (borrowed)
/// when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use potion::render::escape_html;
///
/// assert_eq!(escape_html("<b>"), "&lt;b&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr::memchr3(b'&', b'<', b'>', bytes).is_none()
        && memchr::memchr2(b'"', b'\'', bytes).is_none()
    {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Replace every `\n` with a `<br>` element.
pub fn newlines_to_br(text: String) -> String {
    if memchr::memchr(b'\n', text.as_bytes()).is_none() {
        return text;
    }
    text.replace('\n', "<br>")
}
