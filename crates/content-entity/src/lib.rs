//! # content-entity
//!
//! The torrent content tree. A [`FileTree`] is an arena of [`Node`]s rooted
//! at a synthetic folder that is never shown as a row. Folders aggregate
//! their children's size, progress, priority and checkbox state; the
//! aggregates are recomputed eagerly by whoever mutates the tree.

pub mod node;
pub mod tree;
pub mod view;

pub use node::{FolderAggregate, NewFile, Node, NodeIndex, NodeKind};
pub use tree::FileTree;
pub use view::{FileTreeView, FolderState};
