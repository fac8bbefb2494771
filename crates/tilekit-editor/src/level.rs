//! The editable level: tile grid, object layer and the tile selection.

use crate::grid::TileGrid;
use crate::objects::{ObjectLayer, ObjectPool};
use crate::selection::TileSelection;
use tilekit_settings::GridSettings;

/// Everything commands mutate.
///
/// The tile selection lives here rather than in its tool because floating,
/// moving and deleting it are undoable steps.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    pub objects: ObjectLayer,
    pub tile_selection: TileSelection,
}

impl Level {
    pub fn new(grid: TileGrid, pool: ObjectPool) -> Self {
        Self {
            grid,
            objects: ObjectLayer::new(pool),
            tile_selection: TileSelection::new(),
        }
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self::new(TileGrid::from_settings(settings), ObjectPool::new())
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::from_settings(&GridSettings::default())
    }
}
