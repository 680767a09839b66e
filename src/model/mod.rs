//! Core data model for Notion content.
//!
//! This module contains:
//! - Content nodes (blocks) and their block-type tags
//! - The flat node map that all rendering reads from
//! - Rich text runs and their inline modifiers
//! - Table schemas used for row coercion

mod node;
mod rich_text;
mod schema;

pub use node::{BlockType, Format, Node, NodeMap, Properties};
pub use rich_text::{Modifier, RichText, Run};
pub use schema::{ColumnDef, ColumnType, Schema};
