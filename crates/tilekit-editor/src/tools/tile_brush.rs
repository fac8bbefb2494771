//! Brush painting tool.

use super::tile_draw::Stroke;
use super::{
    AutoScroll, PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext, ToolKind,
};
use crate::brush::BrushId;
use crate::commands::EditorCommand;
use tilekit_core::EditorError;
use tilekit_settings::AutoScrollSettings;

/// Stamps the active brush at every cell a primary-button drag passes over.
///
/// The whole stroke is one history entry regardless of how many cells each
/// stamp writes.
pub struct TileBrushTool {
    base: ToolBase,
    stroke: Option<(Stroke, BrushId)>,
    auto_scroll: AutoScroll,
}

impl TileBrushTool {
    pub fn new(auto_scroll: &AutoScrollSettings) -> Self {
        Self {
            base: ToolBase::new(),
            stroke: None,
            auto_scroll: AutoScroll::new(auto_scroll),
        }
    }

    fn stamp_to(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        let Some((stroke, brush_id)) = self.stroke.as_mut() else {
            return;
        };
        let Some(brush) = ctx.brushes.get(*brush_id) else {
            return;
        };
        let grid = &mut ctx.level.grid;
        let cell = grid.cell_at(info.position);
        stroke.extend_to(cell, |c| brush.apply(grid, c));
    }

    fn commit(&mut self, ctx: &mut ToolContext<'_>) {
        self.auto_scroll.end();
        if let Some((stroke, _)) = self.stroke.take() {
            let edits = stroke.finish();
            if !edits.is_empty() {
                ctx.execute(EditorCommand::replace_tiles("Brush", edits));
            }
        }
    }
}

impl PointerTool for TileBrushTool {
    fn kind(&self) -> ToolKind {
        ToolKind::TileBrush
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
        let Some(brush) = ctx.sources.brush.filter(|id| ctx.brushes.get(*id).is_some()) else {
            tracing::warn!(
                "{}",
                EditorError::MissingSource {
                    source_kind: "brush".to_string()
                }
            );
            return;
        };
        let reach = ctx.brushes.get(brush).map_or(0, |b| b.reach());
        let bounds = ctx.level.grid.extent().grow(reach.saturating_add(1));
        self.stroke = Some((Stroke::new(bounds), brush));
        self.auto_scroll.begin();
        self.auto_scroll.track(ctx.viewport, info);
        self.stamp_to(ctx, info);
    }

    fn update_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.auto_scroll.track(ctx.viewport, info);
        self.stamp_to(ctx, info);
    }

    fn end_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.stamp_to(ctx, info);
        self.commit(ctx);
    }

    fn tick_core(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(adjusted) = self.auto_scroll.tick(ctx.viewport) {
            self.stamp_to(ctx, &adjusted);
        }
    }

    fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) {
        self.commit(ctx);
    }
}
