//! Builds a content tree from a flat file list.

use tracing::{debug, warn};

use content_core::config::content::ContentConfig;
use content_core::types::{FileId, FileRecord, RowId};
use content_entity::{FileTree, NewFile, NodeIndex};

/// Convert a raw completed fraction into a display percentage with one
/// decimal place. Unfinished files never round up to 100.
pub fn normalize_progress(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let fraction = raw.clamp(0.0, 1.0);
    let percent = (fraction * 1000.0).round() / 10.0;
    if percent > 99.9 && fraction < 1.0 {
        99.9
    } else {
        percent
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Turns polled file records into a [`FileTree`].
///
/// Row ids are handed out densely in creation order, folders and files
/// sharing one counter, so two builds over the same records produce
/// identical ids.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    separator: String,
    unwanted_folder: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(&ContentConfig::default())
    }
}

impl TreeBuilder {
    /// Creates a builder from the content configuration.
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            separator: config.path_separator.clone(),
            unwanted_folder: config.unwanted_folder.clone(),
        }
    }

    /// Builds a tree with aggregates computed and the row index populated.
    ///
    /// Records that collide with an existing path are skipped with a warning.
    pub fn build(&self, records: &[FileRecord]) -> FileTree {
        let mut tree = FileTree::new();
        let mut next_row = 0u32;
        let mut skipped = 0usize;

        for (file_index, record) in records.iter().enumerate() {
            if self.place(&mut tree, &mut next_row, file_index, record).is_none() {
                skipped += 1;
            }
        }

        tree.recalculate();

        debug!(
            records = records.len(),
            rows = tree.len(),
            skipped,
            "Built content tree"
        );

        tree
    }

    fn place(
        &self,
        tree: &mut FileTree,
        next_row: &mut u32,
        file_index: usize,
        record: &FileRecord,
    ) -> Option<NodeIndex> {
        let segments: Vec<&str> = record.name.split(self.separator.as_str()).collect();
        let (file_name, folders) = segments.split_last()?;

        let mut parent = tree.root();
        for (depth, segment) in folders.iter().enumerate() {
            if segment.is_empty() || *segment == self.unwanted_folder {
                continue;
            }

            parent = match tree.find_child(parent, segment) {
                Some(existing) if tree.node(existing).is_folder() => existing,
                Some(_) => {
                    warn!(path = %record.name, segment = %segment, "Folder segment collides with a file, skipping record");
                    return None;
                }
                None => {
                    let parent_path = &tree.node(parent).path;
                    let path = if parent_path.is_empty() {
                        segment.to_string()
                    } else {
                        format!("{parent_path}{}{segment}", self.separator)
                    };
                    let idx = tree
                        .add_folder(parent, RowId(*next_row), *segment, path, depth as u32)
                        .map_err(|e| warn!(path = %record.name, error = %e, "Skipping record"))
                        .ok()?;
                    *next_row += 1;
                    idx
                }
            };
        }

        let fraction = finite_or_zero(record.progress).clamp(0.0, 1.0);
        let remaining = (record.size as f64 * (1.0 - fraction)).round() as u64;

        let file = NewFile {
            row_id: RowId(*next_row),
            file_id: FileId(file_index as u32),
            name: file_name.to_string(),
            path: record.name.clone(),
            depth: folders.len() as u32,
            size: record.size,
            priority: record.priority,
            progress: normalize_progress(record.progress),
            remaining,
            availability: finite_or_zero(record.availability),
        };

        let idx = tree
            .add_file(parent, file)
            .map_err(|e| warn!(path = %record.name, error = %e, "Skipping record"))
            .ok()?;
        *next_row += 1;
        Some(idx)
    }
}
