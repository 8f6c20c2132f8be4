//! # RAGE Doc
//!
//! Tagged-tree resource documents and their XML codec.
//!
//! ## Architecture
//!
//! ```text
//! DocNode tree → writer (XML text) → external toolchain
//! external toolchain → reader (XML text) → DocNode tree
//! ```
//!
//! The conversion crates build and consume [`DocNode`] trees; this crate is
//! the only place that knows the documents are XML at all.
//!
//! ## Example
//!
//! ```rust
//! use rage_doc::{read_tree, write_tree, DocNode};
//!
//! let root = DocNode::new("CMapTypes").with_child(DocNode::scalar("flags", 32));
//! let text = write_tree(&root);
//! let back = read_tree(&text).unwrap();
//! assert_eq!(back, root);
//! ```

pub mod error;
pub mod node;
pub mod reader;
pub mod writer;

// Re-export public API
pub use error::DocError;
pub use node::{DocNode, ITEM};
pub use reader::read_tree;
pub use writer::{write_tree, write_tree_to};
