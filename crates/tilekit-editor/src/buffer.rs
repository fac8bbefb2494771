//! Accumulates the cell edits of one gesture into a single minimal record.

use crate::grid::TileEdit;
use std::collections::HashMap;
use tilekit_core::TileCoord;

/// Collects edits made during a stroke.
///
/// Repeated edits of one cell collapse into one entry that keeps the first
/// `before` and the latest `after`, so a stroke that crosses a cell twice still
/// undoes to the cell's original contents.
#[derive(Debug, Clone, Default)]
pub struct TileEditBuffer {
    edits: Vec<TileEdit>,
    index: HashMap<TileCoord, usize>,
}

impl TileEditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: TileEdit) {
        match self.index.get(&edit.coord) {
            Some(&i) => self.edits[i].after = edit.after,
            None => {
                self.index.insert(edit.coord, self.edits.len());
                self.edits.push(edit);
            }
        }
    }

    pub fn extend<I: IntoIterator<Item = TileEdit>>(&mut self, edits: I) {
        for edit in edits {
            self.push(edit);
        }
    }

    /// Number of distinct cells touched so far.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The merged edits, dropping cells that ended up unchanged.
    pub fn into_edits(self) -> Vec<TileEdit> {
        self.edits.into_iter().filter(|e| !e.is_noop()).collect()
    }
}
