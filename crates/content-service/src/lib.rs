//! # content-service
//!
//! Algorithms over the content tree. The builder turns a flat file list
//! into a [`FileTree`](content_entity::FileTree), the reconciler decides
//! whether a fresh tree can be patched into the displayed one, the priority
//! controller applies user edits and walks ancestors, and the session ties
//! them to the snapshot source, change sink and render surface.
//!
//! Collaborators are provided at construction time via `Arc` references.

pub mod builder;
pub mod priority;
pub mod reconcile;
pub mod session;
pub mod snapshot;

pub use builder::{TreeBuilder, normalize_progress};
pub use priority::{PriorityChange, PriorityController, global_state, normalize_priority};
pub use reconcile::{DiffError, DiffMap, Reconciliation, apply_diff, diff_trees, reconcile};
pub use session::{ContentSession, UpdateOutcome};
pub use snapshot::{JsonFileSource, load_records, parse_records};
