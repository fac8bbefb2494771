//! Tile brushes.
//!
//! A brush expands one application point into any number of cell writes and
//! returns the edits it made, so the calling tool can fold them into its
//! stroke command.

use crate::grid::{TileEdit, TileGrid, TileId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tilekit_core::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrushId(pub u32);

pub trait TileBrush: fmt::Debug {
    fn name(&self) -> &str;

    /// Stamps the brush with its anchor at `at`, returning the edits made.
    fn apply(&self, grid: &mut TileGrid, at: TileCoord) -> Vec<TileEdit>;

    /// Farthest distance, in cells along either axis, a stamp writes from its anchor.
    fn reach(&self) -> i32 {
        0
    }
}

/// A fixed multi-cell pattern.
#[derive(Debug, Clone)]
pub struct StaticBrush {
    name: String,
    cells: Vec<(TileCoord, TileId)>,
}

impl StaticBrush {
    /// Creates a brush from cell offsets relative to its anchor.
    pub fn new(name: impl Into<String>, cells: Vec<(TileCoord, TileId)>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

impl TileBrush for StaticBrush {
    fn name(&self) -> &str {
        &self.name
    }

    fn reach(&self) -> i32 {
        self.cells
            .iter()
            .map(|(offset, _)| offset.x.abs().max(offset.y.abs()))
            .max()
            .unwrap_or(0)
    }

    fn apply(&self, grid: &mut TileGrid, at: TileCoord) -> Vec<TileEdit> {
        self.cells
            .iter()
            .filter_map(|(offset, id)| grid.add_tile(at + *offset, *id))
            .collect()
    }
}

/// Fills a square around the anchor with two tiles alternating by cell parity.
///
/// Parity is taken from absolute cell coordinates, so overlapping stamps
/// continue the same pattern.
#[derive(Debug, Clone)]
pub struct CheckerBrush {
    name: String,
    even: TileId,
    odd: TileId,
    size: u32,
}

impl CheckerBrush {
    pub fn new(name: impl Into<String>, even: TileId, odd: TileId, size: u32) -> Self {
        Self {
            name: name.into(),
            even,
            odd,
            size: size.max(1),
        }
    }
}

impl TileBrush for CheckerBrush {
    fn name(&self) -> &str {
        &self.name
    }

    fn reach(&self) -> i32 {
        self.size as i32
    }

    fn apply(&self, grid: &mut TileGrid, at: TileCoord) -> Vec<TileEdit> {
        let size = self.size as i32;
        let start = TileCoord::new(at.x - size / 2, at.y - size / 2);
        let mut edits = Vec::new();
        for dy in 0..size {
            for dx in 0..size {
                let coord = TileCoord::new(start.x + dx, start.y + dy);
                let id = if (coord.x + coord.y).rem_euclid(2) == 0 {
                    self.even
                } else {
                    self.odd
                };
                if let Some(edit) = grid.add_tile(coord, id) {
                    edits.push(edit);
                }
            }
        }
        edits
    }
}

/// Brushes available to the brush tool.
#[derive(Debug, Default)]
pub struct BrushRegistry {
    brushes: Vec<(BrushId, Box<dyn TileBrush>)>,
}

impl BrushRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, brush: Box<dyn TileBrush>) -> BrushId {
        let id = BrushId(self.brushes.len() as u32);
        tracing::debug!("Registered brush '{}'", brush.name());
        self.brushes.push((id, brush));
        id
    }

    pub fn get(&self, id: BrushId) -> Option<&dyn TileBrush> {
        self.brushes
            .iter()
            .find(|(brush_id, _)| *brush_id == id)
            .map(|(_, brush)| brush.as_ref())
    }

    pub fn find(&self, name: &str) -> Option<BrushId> {
        self.brushes
            .iter()
            .find(|(_, brush)| brush.name() == name)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }
}
