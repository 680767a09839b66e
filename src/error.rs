//! Error types for potion operations.

use thiserror::Error;

/// Terminal failures of a render or table query.
///
/// Unknown block types, unknown modifiers and malformed properties are not
/// represented here: they are logged and the offending piece is dropped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid node ID {0:?}")]
    InvalidId(String),

    #[error("could not read node {0}; make sure public access is enabled")]
    NotFound(String),

    #[error("node {id} is a {found}, expected {expected}")]
    WrongKind {
        id: String,
        expected: &'static str,
        found: String,
    },

    #[error("node {0} has no content")]
    EmptyDocument(String),

    #[error("content source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, Error>;
