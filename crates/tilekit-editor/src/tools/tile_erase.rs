//! Tile erasing tool.
//!
//! Primary drag erases along the stroke. Secondary drag rubber-bands a
//! rectangle and erases every cell under it on release.

use super::tile_draw::Stroke;
use super::{
    AutoScroll, PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext, ToolKind,
};
use crate::commands::EditorCommand;
use crate::overlay::{replace_marker, OverlayId, OverlayMarker, OverlaySink};
use tilekit_core::{Shared, TileCoord, TileRegion};
use tilekit_settings::AutoScrollSettings;

enum EraseState {
    Idle,
    Stroke(Stroke),
    Rect { anchor: TileCoord, current: TileCoord },
}

pub struct TileEraseTool {
    base: ToolBase,
    overlay: Shared<dyn OverlaySink>,
    state: EraseState,
    marker: Option<OverlayId>,
    auto_scroll: AutoScroll,
}

impl TileEraseTool {
    pub fn new(overlay: Shared<dyn OverlaySink>, auto_scroll: &AutoScrollSettings) -> Self {
        Self {
            base: ToolBase::new(),
            overlay,
            state: EraseState::Idle,
            marker: None,
            auto_scroll: AutoScroll::new(auto_scroll),
        }
    }

    fn drag_to(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        let grid = &mut ctx.level.grid;
        let cell = grid.cell_at(info.position);
        match &mut self.state {
            EraseState::Idle => {}
            EraseState::Stroke(stroke) => {
                stroke.extend_to(cell, |c| grid.clear(c).into_iter().collect());
            }
            EraseState::Rect { anchor, current } => {
                *current = grid.clamp(cell);
                let region = TileRegion::from_corners(*anchor, *current);
                let rect = grid.region_bounds(region);
                replace_marker(
                    &mut *self.overlay.borrow_mut(),
                    &mut self.marker,
                    Some(OverlayMarker::SelectionRect { rect }),
                );
            }
        }
    }

    fn commit(&mut self, ctx: &mut ToolContext<'_>) {
        self.auto_scroll.end();
        replace_marker(&mut *self.overlay.borrow_mut(), &mut self.marker, None);
        match std::mem::replace(&mut self.state, EraseState::Idle) {
            EraseState::Idle => {}
            EraseState::Stroke(stroke) => {
                let edits = stroke.finish();
                if !edits.is_empty() {
                    ctx.execute(EditorCommand::replace_tiles("Erase Tiles", edits));
                }
            }
            EraseState::Rect { anchor, current } => {
                let grid = &mut ctx.level.grid;
                let region = grid.clamp_region(TileRegion::from_corners(anchor, current));
                let edits: Vec<_> = region.coords().filter_map(|c| grid.clear(c)).collect();
                if !edits.is_empty() {
                    ctx.execute(EditorCommand::replace_tiles("Erase Region", edits));
                }
            }
        }
    }
}

impl PointerTool for TileEraseTool {
    fn kind(&self) -> ToolKind {
        ToolKind::TileErase
    }

    fn base(&self) -> &ToolBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ToolBase {
        &mut self.base
    }

    fn start_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        let cell = ctx.level.grid.cell_at(info.position);
        self.state = match info.button {
            PointerButton::Primary => EraseState::Stroke(Stroke::for_grid(&ctx.level.grid)),
            PointerButton::Secondary => {
                let anchor = ctx.level.grid.clamp(cell);
                EraseState::Rect {
                    anchor,
                    current: anchor,
                }
            }
            PointerButton::None => return,
        };
        self.auto_scroll.begin();
        self.auto_scroll.track(ctx.viewport, info);
        self.drag_to(ctx, info);
    }

    fn update_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.auto_scroll.track(ctx.viewport, info);
        self.drag_to(ctx, info);
    }

    fn end_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.drag_to(ctx, info);
        self.commit(ctx);
    }

    fn tick_core(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(adjusted) = self.auto_scroll.tick(ctx.viewport) {
            self.drag_to(ctx, &adjusted);
        }
    }

    fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) {
        if matches!(self.state, EraseState::Rect { .. }) {
            self.state = EraseState::Idle;
        }
        self.commit(ctx);
    }

    fn dispose_managed(&mut self, _ctx: &mut ToolContext<'_>) {
        replace_marker(&mut *self.overlay.borrow_mut(), &mut self.marker, None);
    }
}
