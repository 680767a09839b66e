//! # potion
//!
//! Render a Notion-style block tree to HTML, and tables to typed rows.
//!
//! ## Features
//!
//! - Block tree → HTML, with adjacent list and checklist items merged into
//!   one container
//! - Rich text runs (bold, italic, links, highlights, inline code, inline
//!   math) → inline HTML
//! - Table rows coerced through their collection schema
//! - Pluggable collaborators for asset URLs, math and code highlighting
//!
//! ## Quick Start
//!
//! ```
//! use potion::model::{BlockType, Node, NodeMap};
//! use potion::render::Renderer;
//!
//! let nodes: NodeMap = [
//!     Node::new("root", BlockType::Page).with_content(["a", "b"]),
//!     Node::new("a", BlockType::BulletedList).with_title("One"),
//!     Node::new("b", BlockType::BulletedList).with_title("Two"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let html = potion::assemble("root", &nodes, &Renderer::default()).unwrap();
//! assert_eq!(html, "<ul><li>One</li><li>Two</li></ul>");
//! ```
//!
//! ## Working with Sources
//!
//! A [`NodeSource`] supplies nodes by id. [`RecordDump`] reads them from a
//! saved JSON record map; the [`api`] functions drive a source end to end:
//!
//! ```no_run
//! use potion::{RecordDump, Renderer};
//!
//! let dump = RecordDump::from_path("export.json").unwrap();
//! let html = potion::api::page_html(&dump, "0123456789abcdef0123456789abcdef", &Renderer::default())
//!     .unwrap();
//! ```

pub mod api;
pub mod document;
pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod table;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::assemble;
pub use error::{Error, Result};
pub use render::Renderer;
pub use source::{NodeSource, RecordDump};
pub use table::TableRow;
