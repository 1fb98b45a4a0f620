//! Change sink trait.

use crate::result::AppResult;
use crate::types::{FileId, FilePriority};

/// Receives priority edits so they can be persisted by the backing service.
///
/// Called exactly once per user edit with every affected file. The priority
/// is always assignable (never `Mixed`). Local state is not rolled back when
/// the sink fails.
pub trait ChangeSink: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new priority for the given files.
    fn priority_changed(&self, file_ids: &[FileId], priority: FilePriority) -> AppResult<()>;
}
