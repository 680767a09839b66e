//! Best-effort syntax highlighting for code blocks.
//!
//! Output uses Prism's token class names so existing Prism themes apply:
//! `<span class="token keyword">`, `token string`, `token comment`,
//! `token number`. Unknown languages return `None` and the caller falls back
//! to the escaped, unhighlighted body.

use super::escape::escape_html;

/// Highlights source code for a language tag (already lower-cased).
pub trait Highlighter: Send + Sync {
    fn highlight(&self, language: &str, source: &str) -> Option<String>;
}

/// Highlighter that never highlights (client-side highlighting).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHighlight;

impl Highlighter for NoHighlight {
    fn highlight(&self, _language: &str, _source: &str) -> Option<String> {
        None
    }
}

/// Small keyword/string/comment/number highlighter for common languages.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordHighlighter;

struct Grammar {
    keywords: &'static [&'static str],
    line_comment: Option<&'static str>,
    quotes: &'static [char],
}

const JAVASCRIPT: Grammar = Grammar {
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
        "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
        "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
        "void", "while", "yield", "interface", "type", "enum", "implements",
    ],
    line_comment: Some("//"),
    quotes: &['"', '\'', '`'],
};

const RUST: Grammar = Grammar {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while",
    ],
    line_comment: Some("//"),
    quotes: &['"'],
};

const PYTHON: Grammar = Grammar {
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "False", "finally", "for", "from", "global", "if", "import",
        "in", "is", "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return", "True",
        "try", "while", "with", "yield",
    ],
    line_comment: Some("#"),
    quotes: &['"', '\''],
};

const SHELL: Grammar = Grammar {
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "return", "then", "until", "while",
    ],
    line_comment: Some("#"),
    quotes: &['"', '\''],
};

const JSON: Grammar = Grammar {
    keywords: &["true", "false", "null"],
    line_comment: None,
    quotes: &['"'],
};

fn grammar(language: &str) -> Option<&'static Grammar> {
    match language {
        "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => Some(&JAVASCRIPT),
        "rust" | "rs" => Some(&RUST),
        "python" | "py" => Some(&PYTHON),
        "shell" | "bash" | "sh" | "zsh" => Some(&SHELL),
        "json" => Some(&JSON),
        _ => None,
    }
}

impl Highlighter for KeywordHighlighter {
    fn highlight(&self, language: &str, source: &str) -> Option<String> {
        let grammar = grammar(language)?;
        Some(tokenize(grammar, source))
    }
}

fn push_token(out: &mut String, class: &str, text: &str) {
    out.push_str("<span class=\"token ");
    out.push_str(class);
    out.push_str("\">");
    out.push_str(&escape_html(text));
    out.push_str("</span>");
}

fn tokenize(grammar: &Grammar, source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if let Some(marker) = grammar.line_comment
            && rest.starts_with(marker)
        {
            let end = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
            push_token(&mut out, "comment", &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if grammar.quotes.contains(&c) {
            let end = string_end(rest, c);
            push_token(&mut out, "string", &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if c.is_ascii_digit() {
            let end = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'))
                .unwrap_or(rest.len());
            push_token(&mut out, "number", &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if c.is_alphabetic() || c == '_' || c == '$' {
            let end = rest
                .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
                .unwrap_or(rest.len());
            let word = &rest[..end];
            if grammar.keywords.contains(&word) {
                push_token(&mut out, "keyword", word);
            } else {
                out.push_str(&escape_html(word));
            }
            rest = &rest[end..];
            continue;
        }

        let len = c.len_utf8();
        out.push_str(&escape_html(&rest[..len]));
        rest = &rest[len..];
    }

    out
}

/// Byte length of a string literal starting at `s[0] == quote`, including
/// the closing quote. Unterminated literals run to the end of the line.
fn string_end(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, ch) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return i + ch.len_utf8();
        } else if ch == '\n' && quote != '`' {
            return i;
        }
    }
    s.len()
}
