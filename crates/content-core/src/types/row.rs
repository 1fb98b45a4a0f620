//! Flat per-row projection of a tree node, handed to render surfaces and
//! compared column by column when reconciling two trees.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::{FileId, RowId};
use super::priority::{FilePriority, TriState};

/// A comparable column of a [`RowView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    FileId,
    Checked,
    Name,
    Path,
    Size,
    Progress,
    Priority,
    Remaining,
    Availability,
}

impl Column {
    /// Every comparable column, in display order.
    pub const ALL: [Column; 9] = [
        Self::FileId,
        Self::Checked,
        Self::Name,
        Self::Path,
        Self::Size,
        Self::Progress,
        Self::Priority,
        Self::Remaining,
        Self::Availability,
    ];

    /// Return the snake_case column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileId => "file_id",
            Self::Checked => "checked",
            Self::Name => "name",
            Self::Path => "path",
            Self::Size => "size",
            Self::Progress => "progress",
            Self::Priority => "priority",
            Self::Remaining => "remaining",
            Self::Availability => "availability",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialized view of one visible row.
///
/// `row_id`, `depth` and `is_folder` describe the row's position and are
/// matched structurally; the remaining fields are the comparable columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    /// Stable row identifier.
    pub row_id: RowId,
    /// Distance from the root.
    pub depth: u32,
    /// Whether this row is a folder.
    pub is_folder: bool,
    /// Backing file index, `None` for folders. Serialized as the wire
    /// value, folders as `-1`.
    #[serde(serialize_with = "serialize_file_id", deserialize_with = "deserialize_file_id")]
    pub file_id: Option<FileId>,
    /// Checkbox state.
    pub checked: TriState,
    /// Display name.
    pub name: String,
    /// Full relative path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Completed percentage, one decimal place.
    pub progress: f64,
    /// Download priority (may be `Mixed` on folders).
    pub priority: FilePriority,
    /// Bytes left to download, ignored files excluded.
    pub remaining: u64,
    /// Swarm availability.
    pub availability: f64,
}

impl RowView {
    /// File id as sent over the wire, with folders mapped to the sentinel.
    pub fn wire_file_id(&self) -> i64 {
        wire_value(self.file_id)
    }

    /// Whether `column` holds a different value in `other`.
    pub fn differs(&self, other: &RowView, column: Column) -> bool {
        match column {
            Column::FileId => self.file_id != other.file_id,
            Column::Checked => self.checked != other.checked,
            Column::Name => self.name != other.name,
            Column::Path => self.path != other.path,
            Column::Size => self.size != other.size,
            Column::Progress => self.progress != other.progress,
            Column::Priority => self.priority != other.priority,
            Column::Remaining => self.remaining != other.remaining,
            Column::Availability => self.availability != other.availability,
        }
    }

    /// Columns whose values differ between `self` and `other`.
    pub fn changed_columns(&self, other: &RowView) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|column| self.differs(other, *column))
            .collect()
    }
}

fn wire_value(file_id: Option<FileId>) -> i64 {
    file_id
        .map(|id| i64::from(id.get()))
        .unwrap_or(FileId::FOLDER_SENTINEL)
}

fn serialize_file_id<S>(file_id: &Option<FileId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(wire_value(*file_id))
}

fn deserialize_file_id<'de, D>(deserializer: D) -> Result<Option<FileId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| u32::try_from(v).ok())
        .map(FileId))
}

/// A row together with the columns a render surface must repaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPatch {
    /// The row's new values.
    pub row: RowView,
    /// Columns that changed.
    pub columns: Vec<Column>,
}
