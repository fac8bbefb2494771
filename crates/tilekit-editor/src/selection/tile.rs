//! Tile selection model.
//!
//! A [`TileSelection`] marks a set of cells and holds a copy of each cell's
//! stack. Keys are stored relative to the selection origin, so moving the
//! selection only changes the origin. While the selection is *floating* its
//! stacks have been lifted out of the grid and live only here.
//!
//! All public coordinates are absolute grid cells.

use crate::grid::{TileId, TileStack};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tilekit_core::{TileCoord, TileRegion};

/// Lifecycle state of a tile selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Not owned by the active tool; drawn with muted styling.
    #[default]
    Inactive,
    /// Marks grid cells in place.
    Selected,
    /// Tiles detached from the grid and held by the selection.
    Floating,
}

/// Saved state of a selection, used by commands to restore it on undo.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TileSelectionSnapshot {
    tiles: HashMap<TileCoord, TileStack>,
    base_origin: TileCoord,
    mode: SelectionMode,
}

#[derive(Debug, Clone, Default)]
pub struct TileSelection {
    tiles: HashMap<TileCoord, TileStack>,
    base_origin: TileCoord,
    drag_origin: Option<TileCoord>,
    drag_diff: TileCoord,
    mode: SelectionMode,
    /// Bounds of the keys, relative to the origin.
    bounds: Option<TileRegion>,
}

impl TileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A floating selection holding `tiles`, given in absolute cells.
    pub fn floating<I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = (TileCoord, TileStack)>,
    {
        let mut selection = Self::new();
        selection.add_tiles(tiles);
        selection.mode = SelectionMode::Floating;
        selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode != SelectionMode::Inactive
    }

    pub fn is_floating(&self) -> bool {
        self.mode == SelectionMode::Floating
    }

    /// Marks the selection as owned by the active tool.
    pub fn activate(&mut self) {
        if self.mode == SelectionMode::Inactive {
            self.mode = SelectionMode::Selected;
        }
    }

    /// Returns the selection to the inactive state. A floating selection must be defloated first.
    pub fn deactivate(&mut self) {
        if self.is_floating() {
            tracing::warn!("Deactivating a floating tile selection");
        }
        self.mode = SelectionMode::Inactive;
    }

    pub(crate) fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Offset applied to every stored key: the committed origin plus any in-progress drag.
    pub fn origin(&self) -> TileCoord {
        self.base_origin + self.drag_diff
    }

    pub fn base_origin(&self) -> TileCoord {
        self.base_origin
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True if `coord` is part of the selection at its current origin.
    pub fn covers(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&(coord - self.origin()))
    }

    /// The captured stack for a covered cell.
    pub fn stack_at(&self, coord: TileCoord) -> Option<&TileStack> {
        self.tiles.get(&(coord - self.origin()))
    }

    /// Adds cells with their stacks. Cells already covered keep their stack.
    ///
    /// Returns the cells that were newly added.
    pub fn add_tiles<I>(&mut self, tiles: I) -> Vec<TileCoord>
    where
        I: IntoIterator<Item = (TileCoord, TileStack)>,
    {
        let origin = self.origin();
        let mut added = Vec::new();
        for (coord, stack) in tiles {
            let key = coord - origin;
            if self.tiles.contains_key(&key) {
                continue;
            }
            self.tiles.insert(key, stack);
            let cell = TileRegion::new(key.x, key.y, 1, 1);
            self.bounds = Some(match self.bounds {
                Some(bounds) => bounds.union(&cell),
                None => cell,
            });
            added.push(coord);
        }
        added
    }

    /// Removes cells, returning the ones that were covered together with their stacks.
    pub fn remove_tiles<I>(&mut self, coords: I) -> Vec<(TileCoord, TileStack)>
    where
        I: IntoIterator<Item = TileCoord>,
    {
        let origin = self.origin();
        let removed: Vec<(TileCoord, TileStack)> = coords
            .into_iter()
            .filter_map(|coord| self.tiles.remove(&(coord - origin)).map(|s| (coord, s)))
            .collect();
        if !removed.is_empty() {
            self.recompute_bounds();
        }
        removed
    }

    /// Replaces the stack of a covered cell. Returns the previous stack.
    pub(crate) fn replace_stack(
        &mut self,
        coord: TileCoord,
        stack: TileStack,
    ) -> Option<TileStack> {
        let key = coord - self.origin();
        self.tiles.get_mut(&key).map(|s| std::mem::replace(s, stack))
    }

    /// Empties the selection and resets its origin. The mode is left unchanged.
    pub fn clear(&mut self) -> TileSelectionSnapshot {
        let snapshot = self.snapshot();
        self.tiles.clear();
        self.bounds = None;
        self.base_origin = TileCoord::zero();
        self.drag_origin = None;
        self.drag_diff = TileCoord::zero();
        snapshot
    }

    /// Covered cells with their stacks, row-major.
    pub fn tiles(&self) -> Vec<(TileCoord, TileStack)> {
        let origin = self.origin();
        let mut tiles: Vec<(TileCoord, TileStack)> = self
            .tiles
            .iter()
            .map(|(key, stack)| (*key + origin, stack.clone()))
            .collect();
        tiles.sort_by_key(|(coord, _)| (coord.y, coord.x));
        tiles
    }

    /// Covered cells, row-major.
    pub fn coords(&self) -> Vec<TileCoord> {
        let origin = self.origin();
        let mut coords: Vec<TileCoord> = self.tiles.keys().map(|key| *key + origin).collect();
        coords.sort_by_key(|coord| (coord.y, coord.x));
        coords
    }

    /// Smallest block containing every covered cell.
    pub fn bounds(&self) -> Option<TileRegion> {
        self.bounds.map(|b| b.translate(self.origin()))
    }

    fn recompute_bounds(&mut self) {
        self.bounds = self
            .tiles
            .keys()
            .map(|key| TileRegion::new(key.x, key.y, 1, 1))
            .reduce(|acc, cell| acc.union(&cell));
    }

    /// True while a move gesture is in progress.
    pub fn is_moving(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Begins a move gesture grabbed at `at`.
    pub fn start_move(&mut self, at: TileCoord) {
        self.drag_origin = Some(at);
        self.drag_diff = TileCoord::zero();
    }

    /// Updates the preview offset of the move gesture.
    pub fn move_to(&mut self, at: TileCoord) {
        if let Some(start) = self.drag_origin {
            self.drag_diff = at - start;
        }
    }

    /// Commits the move gesture into the origin and returns the net offset.
    pub fn end_move(&mut self, at: TileCoord) -> TileCoord {
        let Some(start) = self.drag_origin.take() else {
            return TileCoord::zero();
        };
        let delta = at - start;
        self.base_origin = self.base_origin + delta;
        self.drag_diff = TileCoord::zero();
        delta
    }

    /// Places the committed origin directly, abandoning any move gesture.
    pub fn set_origin(&mut self, origin: TileCoord) {
        self.base_origin = origin;
        self.drag_origin = None;
        self.drag_diff = TileCoord::zero();
    }

    pub fn snapshot(&self) -> TileSelectionSnapshot {
        TileSelectionSnapshot {
            tiles: self.tiles.clone(),
            base_origin: self.base_origin,
            mode: self.mode,
        }
    }

    pub fn restore(&mut self, snapshot: TileSelectionSnapshot) {
        self.tiles = snapshot.tiles;
        self.base_origin = snapshot.base_origin;
        self.mode = snapshot.mode;
        self.drag_origin = None;
        self.drag_diff = TileCoord::zero();
        self.recompute_bounds();
    }

    /// Clipboard form of the selection's own stacks.
    pub fn to_payload(&self) -> TileSelectionPayload {
        TileSelectionPayload::from_cells(self.tiles())
    }
}

/// One cell of a tile clipboard payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadCell {
    pub x: i32,
    pub y: i32,
    pub tiles: Vec<TileId>,
}

/// Clipboard form of a tile selection: cells relative to the top-left of their bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileSelectionPayload {
    pub cells: Vec<PayloadCell>,
}

impl TileSelectionPayload {
    /// Builds a payload from absolute cells, shifting them so the bounds start at (0, 0).
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (TileCoord, TileStack)>,
    {
        let cells: Vec<(TileCoord, TileStack)> = cells.into_iter().collect();
        let min_x = cells.iter().map(|(c, _)| c.x).min().unwrap_or(0);
        let min_y = cells.iter().map(|(c, _)| c.y).min().unwrap_or(0);
        Self {
            cells: cells
                .into_iter()
                .map(|(coord, stack)| PayloadCell {
                    x: coord.x - min_x,
                    y: coord.y - min_y,
                    tiles: stack.ids().to_vec(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width and height of the payload in cells.
    pub fn size(&self) -> (i32, i32) {
        let width = self.cells.iter().map(|c| c.x + 1).max().unwrap_or(0);
        let height = self.cells.iter().map(|c| c.y + 1).max().unwrap_or(0);
        (width, height)
    }

    /// The payload's cells placed with their top-left at `at`.
    pub fn cells_at(&self, at: TileCoord) -> Vec<(TileCoord, TileStack)> {
        self.cells
            .iter()
            .map(|cell| {
                (
                    TileCoord::new(at.x + cell.x, at.y + cell.y),
                    cell.tiles.iter().copied().collect(),
                )
            })
            .collect()
    }
}
