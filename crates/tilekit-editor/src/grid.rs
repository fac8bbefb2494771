//! Sparse tile grid.
//!
//! Each occupied cell holds a [`TileStack`], an ordered list of tile ids with
//! the last entry drawn on top. Cells without tiles are simply absent from the
//! map. Every mutating operation reports the change it made as a [`TileEdit`]
//! so callers can collect the edits into an undoable command instead of
//! listening for change notifications.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use tilekit_core::{Point, Rect, TileCoord, TileRegion};
use tilekit_settings::GridSettings;

/// Largest cell index magnitude [`TileGrid::cell_at`] reports.
pub const CELL_INDEX_LIMIT: f64 = (1 << 24) as f64;

/// Reference to a tile in the host's tile set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered tiles occupying one cell, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileStack(SmallVec<[TileId; 4]>);

impl TileStack {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// A stack holding a single tile.
    pub fn single(id: TileId) -> Self {
        let mut stack = Self::new();
        stack.push(id);
        stack
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The tile drawn on top, if any.
    pub fn top(&self) -> Option<TileId> {
        self.0.last().copied()
    }

    pub fn push(&mut self, id: TileId) {
        self.0.push(id);
    }

    /// Removes the topmost occurrence of `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: TileId) -> bool {
        match self.0.iter().rposition(|t| *t == id) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.0.contains(&id)
    }

    pub fn ids(&self) -> &[TileId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<TileId> for TileStack {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The before/after contents of one cell touched by an edit.
///
/// `None` means the cell holds no tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEdit {
    pub coord: TileCoord,
    pub before: Option<TileStack>,
    pub after: Option<TileStack>,
}

impl TileEdit {
    pub fn new(coord: TileCoord, before: Option<TileStack>, after: Option<TileStack>) -> Self {
        Self {
            coord,
            before: normalize(before),
            after: normalize(after),
        }
    }

    /// True when the edit leaves the cell as it found it.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// A copy of a cell's contents together with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedTile {
    pub coord: TileCoord,
    pub stack: TileStack,
}

/// Sparse map of tile stacks over a bounded block of cells.
#[derive(Debug, Clone)]
pub struct TileGrid {
    cells: HashMap<TileCoord, TileStack>,
    origin: TileCoord,
    tiles_wide: i32,
    tiles_high: i32,
    tile_width: f64,
    tile_height: f64,
}

impl TileGrid {
    /// Creates an empty grid of `tiles_wide` × `tiles_high` cells starting at cell (0, 0).
    pub fn new(tiles_wide: u32, tiles_high: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            cells: HashMap::new(),
            origin: TileCoord::zero(),
            tiles_wide: tiles_wide as i32,
            tiles_high: tiles_high as i32,
            tile_width: tile_width.max(1) as f64,
            tile_height: tile_height.max(1) as f64,
        }
    }

    /// Moves the first cell of the grid to `origin`.
    pub fn with_origin(mut self, origin: TileCoord) -> Self {
        self.origin = origin;
        self
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self::new(
            settings.tiles_wide,
            settings.tiles_high,
            settings.tile_width,
            settings.tile_height,
        )
        .with_origin(TileCoord::new(settings.origin_x, settings.origin_y))
    }

    pub fn origin(&self) -> TileCoord {
        self.origin
    }

    pub fn tiles_wide(&self) -> i32 {
        self.tiles_wide
    }

    pub fn tiles_high(&self) -> i32 {
        self.tiles_high
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f64 {
        self.tile_height
    }

    /// The block of addressable cells.
    pub fn extent(&self) -> TileRegion {
        TileRegion::new(self.origin.x, self.origin.y, self.tiles_wide, self.tiles_high)
    }

    /// The level-space rectangle covered by the grid.
    pub fn bounds(&self) -> Rect {
        self.region_bounds(self.extent())
    }

    pub fn in_range(&self, coord: TileCoord) -> bool {
        self.extent().contains(coord)
    }

    /// Nearest addressable cell to `coord`.
    pub fn clamp(&self, coord: TileCoord) -> TileCoord {
        self.extent().clamp(coord)
    }

    /// The part of `region` inside the grid.
    pub fn clamp_region(&self, region: TileRegion) -> TileRegion {
        region.intersect(&self.extent())
    }

    /// Cell containing a level-space point. Points left of or above cell 0 map to negative cells.
    ///
    /// Indices are limited to [`CELL_INDEX_LIMIT`] so that offsets between
    /// two cells never overflow.
    pub fn cell_at(&self, point: Point) -> TileCoord {
        let index = |v: f64| v.floor().clamp(-CELL_INDEX_LIMIT, CELL_INDEX_LIMIT) as i32;
        TileCoord::new(
            index(point.x / self.tile_width),
            index(point.y / self.tile_height),
        )
    }

    /// Level-space rectangle of one cell.
    pub fn cell_bounds(&self, coord: TileCoord) -> Rect {
        Rect::new(
            coord.x as f64 * self.tile_width,
            coord.y as f64 * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Level-space rectangle of a block of cells.
    pub fn region_bounds(&self, region: TileRegion) -> Rect {
        Rect::new(
            region.x as f64 * self.tile_width,
            region.y as f64 * self.tile_height,
            region.width as f64 * self.tile_width,
            region.height as f64 * self.tile_height,
        )
    }

    pub fn tile_at(&self, coord: TileCoord) -> Option<&TileStack> {
        self.cells.get(&coord)
    }

    /// Copies of every occupied cell inside `region`, row-major.
    pub fn tiles_in(&self, region: TileRegion) -> Vec<LocatedTile> {
        let mut located: Vec<LocatedTile> = if region.area() <= self.cells.len() {
            region
                .coords()
                .filter_map(|coord| {
                    self.cells.get(&coord).map(|stack| LocatedTile {
                        coord,
                        stack: stack.clone(),
                    })
                })
                .collect()
        } else {
            self.cells
                .iter()
                .filter(|(coord, _)| region.contains(**coord))
                .map(|(coord, stack)| LocatedTile {
                    coord: *coord,
                    stack: stack.clone(),
                })
                .collect()
        };
        located.sort_by_key(|tile| (tile.coord.y, tile.coord.x));
        located
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (TileCoord, &TileStack)> {
        self.cells.iter().map(|(coord, stack)| (*coord, stack))
    }

    /// Puts `id` on top of the cell's stack unless it is already the top tile.
    pub fn add_tile(&mut self, coord: TileCoord, id: TileId) -> Option<TileEdit> {
        if !self.in_range(coord) {
            return None;
        }
        let before = self.cells.get(&coord).cloned();
        if before.as_ref().and_then(TileStack::top) == Some(id) {
            return None;
        }
        let stack = self.cells.entry(coord).or_default();
        stack.push(id);
        let after = Some(stack.clone());
        Some(TileEdit::new(coord, before, after))
    }

    /// Removes the topmost occurrence of `id` from the cell.
    pub fn remove_tile(&mut self, coord: TileCoord, id: TileId) -> Option<TileEdit> {
        let before = self.cells.get(&coord)?.clone();
        let mut after = before.clone();
        if !after.remove(id) {
            return None;
        }
        let edit = TileEdit::new(coord, Some(before), Some(after));
        self.write(coord, edit.after.clone());
        Some(edit)
    }

    /// Replaces the whole stack of an in-range cell. An empty stack clears it.
    pub fn set_stack(&mut self, coord: TileCoord, stack: Option<TileStack>) -> Option<TileEdit> {
        if !self.in_range(coord) {
            return None;
        }
        let edit = TileEdit::new(coord, self.cells.get(&coord).cloned(), stack);
        if edit.is_noop() {
            return None;
        }
        self.write(coord, edit.after.clone());
        Some(edit)
    }

    /// Removes every tile from the cell.
    pub fn clear(&mut self, coord: TileCoord) -> Option<TileEdit> {
        self.set_stack(coord, None)
    }

    /// Writes a stack without range checks or change detection.
    ///
    /// Used when replaying recorded edits.
    pub(crate) fn write(&mut self, coord: TileCoord, stack: Option<TileStack>) {
        match normalize(stack) {
            Some(stack) => {
                self.cells.insert(coord, stack);
            }
            None => {
                self.cells.remove(&coord);
            }
        }
    }

    /// Re-applies the `after` side of a batch of edits.
    pub(crate) fn redo_edits(&mut self, edits: &[TileEdit]) {
        for edit in edits {
            self.write(edit.coord, edit.after.clone());
        }
    }

    /// Restores the `before` side of a batch of edits, last edit first.
    pub(crate) fn revert_edits(&mut self, edits: &[TileEdit]) {
        for edit in edits.iter().rev() {
            self.write(edit.coord, edit.before.clone());
        }
    }
}

fn normalize(stack: Option<TileStack>) -> Option<TileStack> {
    stack.filter(|s| !s.is_empty())
}
