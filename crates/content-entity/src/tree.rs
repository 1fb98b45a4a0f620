//! The file tree arena and its row index.

use std::collections::HashMap;

use content_core::error::AppError;
use content_core::result::AppResult;
use content_core::types::{Column, FilePriority, RowId, RowView, TriState};

use crate::node::{FolderAggregate, NewFile, Node, NodeIndex, NodeKind};

/// A torrent's content hierarchy.
///
/// Nodes live in an arena; slot 0 is the synthetic root, which is never a
/// visible row and never appears in the row index. A child is always stored
/// after its parent, so a reverse scan of the arena visits every folder after
/// all of its descendants.
#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: Vec<Node>,
    index: HashMap<RowId, NodeIndex>,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    /// Create a tree holding only the root folder.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            index: HashMap::new(),
        }
    }

    /// The synthetic root.
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Borrow a node by arena index.
    ///
    /// Panics if `idx` was not produced by this tree.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Number of visible rows (every node except the root).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether the tree has no visible rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of file leaves.
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_folder()).count()
    }

    /// Look up a row's arena index.
    pub fn find(&self, row_id: RowId) -> Option<NodeIndex> {
        self.index.get(&row_id).copied()
    }

    /// Look up a row's node.
    pub fn get(&self, row_id: RowId) -> Option<&Node> {
        self.find(row_id).map(|idx| self.node(idx))
    }

    /// Find a direct child of `parent` by name.
    pub fn find_child(&self, parent: NodeIndex, name: &str) -> Option<NodeIndex> {
        self.node(parent)
            .children()
            .iter()
            .copied()
            .find(|child| self.node(*child).name == name)
    }

    /// Append a folder under `parent`.
    pub fn add_folder(
        &mut self,
        parent: NodeIndex,
        row_id: RowId,
        name: impl Into<String>,
        path: impl Into<String>,
        depth: u32,
    ) -> AppResult<NodeIndex> {
        let name = name.into();
        self.check_insert(parent, row_id, &name)?;
        let node = Node::folder(row_id, parent, name, path.into(), depth);
        Ok(self.push(parent, row_id, node))
    }

    /// Append a file leaf under `parent`.
    pub fn add_file(&mut self, parent: NodeIndex, file: NewFile) -> AppResult<NodeIndex> {
        self.check_insert(parent, file.row_id, &file.name)?;
        let row_id = file.row_id;
        let node = Node::file(parent, file);
        Ok(self.push(parent, row_id, node))
    }

    fn check_insert(&self, parent: NodeIndex, row_id: RowId, name: &str) -> AppResult<()> {
        if parent.0 >= self.nodes.len() || !self.node(parent).is_folder() {
            return Err(AppError::validation(format!(
                "Parent of row {row_id} is not a folder"
            )));
        }
        if self.index.contains_key(&row_id) {
            return Err(AppError::conflict(format!("Row {row_id} already exists")));
        }
        if self.find_child(parent, name).is_some() {
            return Err(AppError::conflict(format!(
                "'{name}' already exists in '{}'",
                self.node(parent).path
            )));
        }
        Ok(())
    }

    fn push(&mut self, parent: NodeIndex, row_id: RowId, node: Node) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(node);
        if let NodeKind::Folder { children, .. } = &mut self.nodes[parent.0].kind {
            children.push(idx);
        }
        self.index.insert(row_id, idx);
        idx
    }

    /// Enable or disable checkbox aggregation on a folder. Has no effect on
    /// files. Call [`FileTree::recalculate`] afterwards.
    pub fn set_auto_check(&mut self, idx: NodeIndex, enabled: bool) {
        if let NodeKind::Folder { auto_check, .. } = &mut self.nodes[idx.0].kind {
            *auto_check = enabled;
        }
    }

    /// Recompute every folder's aggregate from its children, bottom-up.
    pub fn recalculate(&mut self) {
        for i in (0..self.nodes.len()).rev() {
            if !self.nodes[i].is_folder() {
                continue;
            }
            let aggregate = self.aggregate_of(NodeIndex(i));
            self.nodes[i].apply(&aggregate);
        }
    }

    /// Fold a node's direct children without mutating anything.
    pub fn aggregate_of(&self, idx: NodeIndex) -> FolderAggregate {
        FolderAggregate::fold(self.node(idx).children().iter().map(|c| self.node(*c)))
    }

    /// Set a node's priority and checkbox state.
    ///
    /// Files reject `Mixed` and have `remaining` recomputed from size and
    /// progress; folder aggregates are left for the caller to reconcile.
    pub fn set_state(
        &mut self,
        idx: NodeIndex,
        priority: FilePriority,
        checked: TriState,
    ) -> AppResult<()> {
        let node = &mut self.nodes[idx.0];
        if !node.is_folder() && priority == FilePriority::Mixed {
            return Err(AppError::validation(format!(
                "File '{}' cannot have mixed priority",
                node.path
            )));
        }
        if !node.is_folder() {
            node.remaining = if priority.is_ignored() {
                0
            } else {
                (node.size as f64 * (1.0 - node.progress / 100.0)).round() as u64
            };
        }
        node.priority = priority;
        node.checked = checked;
        Ok(())
    }

    /// Copy the listed columns from `source` into the node at `idx`.
    ///
    /// `FileId` is structural and never copied.
    pub fn apply_columns(&mut self, idx: NodeIndex, source: &RowView, columns: &[Column]) {
        let node = &mut self.nodes[idx.0];
        for column in columns {
            match column {
                Column::FileId => {}
                Column::Checked => node.checked = source.checked,
                Column::Name => node.name = source.name.clone(),
                Column::Path => node.path = source.path.clone(),
                Column::Size => node.size = source.size,
                Column::Progress => node.progress = source.progress,
                Column::Priority => node.priority = source.priority,
                Column::Remaining => node.remaining = source.remaining,
                Column::Availability => node.availability = source.availability,
            }
        }
    }

    /// Every non-root node, depth-first with parents before children.
    pub fn to_array(&self) -> Vec<NodeIndex> {
        let mut out = self.descendants(self.root());
        out.remove(0);
        out
    }

    /// `idx` and everything below it, depth-first with parents first.
    pub fn descendants(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children().iter().rev().copied());
        }
        out
    }

    /// Direct children of `idx` ordered by path.
    pub fn children_by_path(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self.node(idx).children().to_vec();
        children.sort_by(|a, b| self.node(*a).path.cmp(&self.node(*b).path));
        children
    }

    /// Flat projection of one row.
    pub fn serialize(&self, row_id: RowId) -> Option<RowView> {
        self.get(row_id).and_then(Node::view)
    }

    /// Flat projection of every row in [`FileTree::to_array`] order.
    pub fn rows(&self) -> Vec<RowView> {
        self.to_array()
            .into_iter()
            .filter_map(|idx| self.node(idx).view())
            .collect()
    }

    /// Rebuild the row index from the live node set.
    pub fn rebuild_index(&mut self) {
        self.index = self
            .to_array()
            .into_iter()
            .filter_map(|idx| self.node(idx).row_id().map(|row| (row, idx)))
            .collect();
    }

    /// Drop every row, leaving an empty root.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
