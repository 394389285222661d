//! Configuration-dump parsing and tree access.
//!
//! `parser` turns the raw text of a volume-manager config dump into a
//! `SyntaxTree`; `tree` is the read-only view layer (`ConfigGroup`) used by
//! the domain model above it.

pub mod parser;
pub mod tree;

pub use parser::parse;
pub use tree::{ConfigGroup, GroupNode, SyntaxNode, SyntaxTree, Value};
