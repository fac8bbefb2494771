//! Flood fill tool.

use super::{PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext, ToolKind};
use crate::commands::EditorCommand;
use crate::grid::{TileEdit, TileGrid, TileStack};
use std::collections::{HashSet, VecDeque};
use tilekit_core::{EditorError, TileCoord};

/// Replaces the 4-connected area of cells matching the clicked cell's stack
/// with the active tile.
pub struct TileFillTool {
    base: ToolBase,
}

impl TileFillTool {
    pub fn new() -> Self {
        Self {
            base: ToolBase::new(),
        }
    }
}

impl Default for TileFillTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Flood fills from `seed`, bounded by the grid extent.
pub fn flood_fill(grid: &mut TileGrid, seed: TileCoord, fill: TileStack) -> Vec<TileEdit> {
    if !grid.in_range(seed) {
        return Vec::new();
    }
    let target = grid.tile_at(seed).cloned();
    if target.as_ref() == Some(&fill) {
        return Vec::new();
    }

    let mut visited = HashSet::from([seed]);
    let mut queue = VecDeque::from([seed]);
    let mut edits = Vec::new();
    while let Some(coord) = queue.pop_front() {
        if let Some(edit) = grid.set_stack(coord, Some(fill.clone())) {
            edits.push(edit);
        }
        for next in coord.neighbors() {
            if grid.in_range(next) && grid.tile_at(next) == target.as_ref() && visited.insert(next)
            {
                queue.push_back(next);
            }
        }
    }
    edits
}

impl PointerTool for TileFillTool {
    fn kind(&self) -> ToolKind {
        ToolKind::TileFill
    }

    fn base(&self) -> &ToolBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ToolBase {
        &mut self.base
    }

    fn start_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        if info.button != PointerButton::Primary {
            return;
        }
        let Some(tile) = ctx.sources.tile else {
            tracing::warn!(
                "{}",
                EditorError::MissingSource {
                    source_kind: "tile".to_string()
                }
            );
            return;
        };
        let seed = ctx.level.grid.cell_at(info.position);
        if !ctx.level.grid.in_range(seed) {
            tracing::debug!(
                "Fill skipped: {}",
                EditorError::OutOfRange {
                    x: seed.x,
                    y: seed.y
                }
            );
            return;
        }
        let edits = flood_fill(&mut ctx.level.grid, seed, TileStack::single(tile));
        tracing::debug!("Fill from {} touched {} cells", seed, edits.len());
        if !edits.is_empty() {
            ctx.execute(EditorCommand::replace_tiles("Fill", edits));
        }
    }
}
