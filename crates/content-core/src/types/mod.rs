//! Core type definitions used across the workspace.

pub mod id;
pub mod priority;
pub mod record;
pub mod row;

pub use id::{FileId, RowId};
pub use priority::{FilePriority, TriState};
pub use record::FileRecord;
pub use row::{Column, RowPatch, RowView};
