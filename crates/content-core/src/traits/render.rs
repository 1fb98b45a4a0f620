//! Render surface trait.

use crate::types::{RowPatch, RowView};

/// The table widget that displays rows.
///
/// No assumption is made about rendering order or virtualization.
pub trait RenderSurface: Send + Sync + std::fmt::Debug + 'static {
    /// Replace every row with `rows` (depth-first, parents first).
    fn replace(&self, rows: &[RowView]);

    /// Repaint only the listed columns of the listed rows.
    fn patch(&self, patches: &[RowPatch]);
}
