//! Tile drawing tool.

use super::{
    AutoScroll, PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext, ToolKind,
};
use crate::buffer::TileEditBuffer;
use crate::commands::EditorCommand;
use crate::grid::{TileEdit, TileGrid, TileId};
use tilekit_core::{EditorError, TileCoord, TileRegion};
use tilekit_settings::AutoScrollSettings;

/// Edits of one continuous stroke.
///
/// Cells between consecutive pointer positions are filled in, so a fast drag
/// never leaves gaps. Positions are clamped to `bounds`, which should be the
/// grid extent plus the reach of whatever is painted. The grid is edited
/// live; [`Stroke::finish`] hands the merged edits over for a single history
/// entry.
#[derive(Debug)]
pub(crate) struct Stroke {
    buffer: TileEditBuffer,
    bounds: TileRegion,
    last: Option<TileCoord>,
}

impl Stroke {
    pub(crate) fn new(bounds: TileRegion) -> Self {
        Self {
            buffer: TileEditBuffer::new(),
            bounds,
            last: None,
        }
    }

    /// A stroke painting single cells of `grid`.
    pub(crate) fn for_grid(grid: &TileGrid) -> Self {
        Self::new(grid.extent().grow(1))
    }

    /// Paints every cell from the previous position to `to`.
    pub(crate) fn extend_to<F>(&mut self, to: TileCoord, mut paint: F)
    where
        F: FnMut(TileCoord) -> Vec<TileEdit>,
    {
        let to = self.bounds.clamp(to);
        let cells = match self.last {
            Some(last) if last == to => return,
            Some(last) => last.line_to(to).into_iter().skip(1).collect(),
            None => vec![to],
        };
        for cell in cells {
            self.buffer.extend(paint(cell));
        }
        self.last = Some(to);
    }

    pub(crate) fn finish(self) -> Vec<TileEdit> {
        self.buffer.into_edits()
    }
}

/// Paints the active tile along a primary-button drag.
pub struct TileDrawTool {
    base: ToolBase,
    stroke: Option<(Stroke, TileId)>,
    auto_scroll: AutoScroll,
}

impl TileDrawTool {
    pub fn new(auto_scroll: &AutoScrollSettings) -> Self {
        Self {
            base: ToolBase::new(),
            stroke: None,
            auto_scroll: AutoScroll::new(auto_scroll),
        }
    }

    fn paint_to(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        let Some((stroke, tile)) = self.stroke.as_mut() else {
            return;
        };
        let grid = &mut ctx.level.grid;
        let cell = grid.cell_at(info.position);
        let tile = *tile;
        stroke.extend_to(cell, |c| grid.add_tile(c, tile).into_iter().collect());
    }

    fn commit(&mut self, ctx: &mut ToolContext<'_>) {
        self.auto_scroll.end();
        if let Some((stroke, _)) = self.stroke.take() {
            let edits = stroke.finish();
            if !edits.is_empty() {
                ctx.execute(EditorCommand::replace_tiles("Draw Tiles", edits));
            }
        }
    }
}

impl PointerTool for TileDrawTool {
    fn kind(&self) -> ToolKind {
        ToolKind::TileDraw
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
        self.stroke = Some((Stroke::for_grid(&ctx.level.grid), tile));
        self.auto_scroll.begin();
        self.auto_scroll.track(ctx.viewport, info);
        self.paint_to(ctx, info);
    }

    fn update_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.auto_scroll.track(ctx.viewport, info);
        self.paint_to(ctx, info);
    }

    fn end_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.paint_to(ctx, info);
        self.commit(ctx);
    }

    fn tick_core(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(adjusted) = self.auto_scroll.tick(ctx.viewport) {
            self.paint_to(ctx, &adjusted);
        }
    }

    fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) {
        self.commit(ctx);
    }
}
