//! Tree nodes and the folder aggregate fold.

use serde::{Deserialize, Serialize};

use content_core::types::{FileId, FilePriority, RowId, RowView, TriState};

/// Position of a node in its tree's arena.
///
/// Only meaningful for the [`FileTree`](crate::FileTree) that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// Return the raw arena slot.
    pub fn get(self) -> usize {
        self.0
    }
}

/// What a node is, with the data only that kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A leaf addressable by the backing service.
    File {
        /// Index into the backing file list.
        file_id: FileId,
    },
    /// An interior node.
    Folder {
        /// Owned children, in insertion order.
        children: Vec<NodeIndex>,
        /// When false the folder ignores its children's checkbox states and
        /// always reports `Checked`.
        auto_check: bool,
    },
}

/// A file or folder in a [`FileTree`](crate::FileTree).
///
/// Display fields are public for reading; mutation goes through the tree so
/// aggregates and the row index stay consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) row_id: Option<RowId>,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) kind: NodeKind,
    /// Display name (last path segment).
    pub name: String,
    /// Full relative path.
    pub path: String,
    /// Folder nesting level assigned by the builder.
    pub depth: u32,
    /// Size in bytes.
    pub size: u64,
    /// Checkbox state.
    pub checked: TriState,
    /// Download priority. Only folders may hold `Mixed`.
    pub priority: FilePriority,
    /// Completed percentage with one decimal place.
    pub progress: f64,
    /// Bytes left to download.
    pub remaining: u64,
    /// Swarm availability.
    pub availability: f64,
}

/// Values needed to create a file leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFile {
    pub row_id: RowId,
    pub file_id: FileId,
    pub name: String,
    pub path: String,
    pub depth: u32,
    pub size: u64,
    pub priority: FilePriority,
    pub progress: f64,
    pub remaining: u64,
    pub availability: f64,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            row_id: None,
            parent: None,
            kind: NodeKind::Folder {
                children: Vec::new(),
                auto_check: true,
            },
            name: String::new(),
            path: String::new(),
            depth: 0,
            size: 0,
            checked: TriState::Unchecked,
            priority: FilePriority::Normal,
            progress: 0.0,
            remaining: 0,
            availability: 0.0,
        }
    }

    pub(crate) fn folder(
        row_id: RowId,
        parent: NodeIndex,
        name: String,
        path: String,
        depth: u32,
    ) -> Self {
        Self {
            row_id: Some(row_id),
            parent: Some(parent),
            name,
            path,
            depth,
            ..Self::root()
        }
    }

    pub(crate) fn file(parent: NodeIndex, new: NewFile) -> Self {
        // Mixed is a folder-only display value.
        let priority = match new.priority {
            FilePriority::Mixed => FilePriority::Normal,
            other => other,
        };
        let remaining = if priority.is_ignored() { 0 } else { new.remaining };
        Self {
            row_id: Some(new.row_id),
            parent: Some(parent),
            kind: NodeKind::File {
                file_id: new.file_id,
            },
            name: new.name,
            path: new.path,
            depth: new.depth,
            size: new.size,
            checked: priority.tri_state(),
            priority,
            progress: new.progress,
            remaining,
            availability: new.availability,
        }
    }

    /// Row identifier, `None` only for the synthetic root.
    pub fn row_id(&self) -> Option<RowId> {
        self.row_id
    }

    /// Owning folder, `None` only for the synthetic root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// The node's kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this is the synthetic root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Backing file index, `None` for folders.
    pub fn file_id(&self) -> Option<FileId> {
        match self.kind {
            NodeKind::File { file_id } => Some(file_id),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Direct children (empty for files).
    pub fn children(&self) -> &[NodeIndex] {
        match &self.kind {
            NodeKind::Folder { children, .. } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Whether folder checkbox aggregation is enabled.
    pub fn auto_check(&self) -> bool {
        match self.kind {
            NodeKind::Folder { auto_check, .. } => auto_check,
            NodeKind::File { .. } => false,
        }
    }

    /// Flat projection of this node, `None` for the synthetic root.
    pub fn view(&self) -> Option<RowView> {
        let row_id = self.row_id?;
        Some(RowView {
            row_id,
            depth: self.depth,
            is_folder: self.is_folder(),
            file_id: self.file_id(),
            checked: self.checked,
            name: self.name.clone(),
            path: self.path.clone(),
            size: self.size,
            progress: self.progress,
            priority: self.priority,
            remaining: self.remaining,
            availability: self.availability,
        })
    }

    pub(crate) fn apply(&mut self, aggregate: &FolderAggregate) {
        self.size = aggregate.size;
        self.remaining = aggregate.remaining;
        self.progress = aggregate.progress;
        self.availability = aggregate.availability;
        self.priority = aggregate.priority;
        self.checked = if self.auto_check() {
            aggregate.checked
        } else {
            TriState::Checked
        };
    }
}

/// The values a folder derives from its direct children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FolderAggregate {
    pub size: u64,
    pub remaining: u64,
    pub progress: f64,
    pub availability: f64,
    pub checked: TriState,
    pub priority: FilePriority,
}

impl FolderAggregate {
    /// Fold a folder's direct children.
    ///
    /// The first child seeds `priority` and `checked`; any disagreement turns
    /// them into `Mixed` and `Partial`. Ignored children count towards
    /// `size` only. Progress and availability are size-weighted and are 0
    /// for a zero-size folder.
    pub fn fold<'a>(children: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut size = 0u64;
        let mut remaining = 0u64;
        let mut weighted_progress = 0.0;
        let mut weighted_availability = 0.0;
        let mut is_first = true;
        let mut priority = FilePriority::Normal;
        let mut checked = TriState::Unchecked;

        for child in children {
            size += child.size;

            if is_first {
                priority = child.priority;
                checked = child.checked;
                is_first = false;
            } else {
                if priority != child.priority {
                    priority = FilePriority::Mixed;
                }
                if checked != child.checked {
                    checked = TriState::Partial;
                }
            }

            if !child.priority.is_ignored() {
                remaining += child.remaining;
                weighted_progress += child.progress * child.size as f64;
                weighted_availability += child.availability * child.size as f64;
            }
        }

        let (progress, availability) = if size == 0 {
            (0.0, 0.0)
        } else {
            (
                weighted_progress / size as f64,
                weighted_availability / size as f64,
            )
        };

        Self {
            size,
            remaining,
            progress,
            availability,
            checked,
            priority,
        }
    }
}
