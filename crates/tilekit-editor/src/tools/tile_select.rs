//! Tile selection tool.
//!
//! Primary drag over the selection floats it and moves it; primary drag
//! elsewhere rubber-bands a box that replaces, extends (shift) or subtracts
//! from (ctrl) the selection. Secondary click commits a floating selection
//! and clears the selection.

use super::{
    AutoScroll, CommandKey, PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext,
    ToolKind,
};
use crate::clipboard::{ClipboardPayload, PayloadKind};
use crate::commands::EditorCommand;
use crate::level::Level;
use crate::overlay::{replace_marker, OverlayId, OverlayMarker, OverlaySink};
use crate::selection::TileSelectionPayload;
use tilekit_core::{Shared, TileCoord, TileRegion};
use tilekit_settings::AutoScrollSettings;

/// How a box gesture combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Replace,
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSelectState {
    Idle,
    Moving {
        /// Selection origin when the move started.
        from: TileCoord,
        last: TileCoord,
    },
    BoxSelecting {
        anchor: TileCoord,
        current: TileCoord,
        mode: MergeMode,
    },
}

pub struct TileSelectTool {
    base: ToolBase,
    overlay: Shared<dyn OverlaySink>,
    state: TileSelectState,
    auto_scroll: AutoScroll,
    box_marker: Option<OverlayId>,
    selection_marker: Option<OverlayId>,
}

impl TileSelectTool {
    pub fn new(overlay: Shared<dyn OverlaySink>, auto_scroll: &AutoScrollSettings) -> Self {
        Self {
            base: ToolBase::new(),
            overlay,
            state: TileSelectState::Idle,
            auto_scroll: AutoScroll::new(auto_scroll),
            box_marker: None,
            selection_marker: None,
        }
    }

    pub fn state(&self) -> TileSelectState {
        self.state
    }

    /// Redraws the outline of the selection at its current origin.
    fn refresh_selection_marker(&mut self, level: &Level) {
        let selection = &level.tile_selection;
        let marker = selection
            .bounds()
            .map(|region| OverlayMarker::TileSelectionBox {
                region,
                floating: selection.is_floating(),
            });
        replace_marker(
            &mut *self.overlay.borrow_mut(),
            &mut self.selection_marker,
            marker,
        );
    }

    fn refresh_box_marker(&mut self, level: &Level, region: Option<TileRegion>) {
        let marker = region.map(|region| OverlayMarker::SelectionRect {
            rect: level.grid.region_bounds(region),
        });
        replace_marker(&mut *self.overlay.borrow_mut(), &mut self.box_marker, marker);
    }

    /// Steps that commit a floating selection and then empty the selection.
    fn reset_steps(level: &Level) -> Vec<EditorCommand> {
        let selection = &level.tile_selection;
        let mut steps = Vec::new();
        if selection.is_floating() {
            steps.push(EditorCommand::defloat_selection());
        }
        if !selection.is_empty() {
            steps.push(EditorCommand::delete_selection());
        }
        steps
    }

    fn drag_to(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        let cell = ctx.level.grid.cell_at(info.position);
        match &mut self.state {
            TileSelectState::Idle => {}
            TileSelectState::Moving { last, .. } => {
                *last = cell;
                ctx.level.tile_selection.move_to(cell);
                self.refresh_selection_marker(ctx.level);
            }
            TileSelectState::BoxSelecting {
                anchor, current, ..
            } => {
                *current = ctx.level.grid.clamp(cell);
                let region = TileRegion::from_corners(*anchor, *current);
                self.refresh_box_marker(ctx.level, Some(region));
            }
        }
    }

    fn finish_move(&mut self, ctx: &mut ToolContext<'_>, from: TileCoord, at: TileCoord) {
        ctx.level.tile_selection.end_move(at);
        let to = ctx.level.tile_selection.base_origin();
        if to != from {
            ctx.execute(EditorCommand::move_selection(from, to));
        }
        self.refresh_selection_marker(ctx.level);
    }

    fn finish_box(
        &mut self,
        ctx: &mut ToolContext<'_>,
        anchor: TileCoord,
        current: TileCoord,
        mode: MergeMode,
    ) {
        self.refresh_box_marker(ctx.level, None);
        let region = ctx
            .level
            .grid
            .clamp_region(TileRegion::from_corners(anchor, current));

        let mut steps = Vec::new();
        if mode == MergeMode::Replace || ctx.level.tile_selection.is_floating() {
            steps.extend(Self::reset_steps(ctx.level));
        }
        let coords: Vec<TileCoord> = region.coords().collect();
        if !coords.is_empty() {
            steps.push(match mode {
                MergeMode::Subtract => EditorCommand::deselect_tiles(coords),
                MergeMode::Replace | MergeMode::Add => EditorCommand::select_tiles(coords),
            });
        }
        ctx.execute_steps("Select Tiles", steps);
        self.refresh_selection_marker(ctx.level);
    }

    /// Stacks for the clipboard: the floating copies, or the grid's current contents.
    fn copy_payload(level: &Level) -> TileSelectionPayload {
        let selection = &level.tile_selection;
        if selection.is_floating() {
            return selection.to_payload();
        }
        TileSelectionPayload::from_cells(selection.coords().into_iter().map(|coord| {
            (
                coord,
                level.grid.tile_at(coord).cloned().unwrap_or_default(),
            )
        }))
    }

    fn copy(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let payload = Self::copy_payload(ctx.level);
        if let Err(e) = ctx.clipboard.set(ClipboardPayload::Tiles(payload)) {
            tracing::warn!("Copy failed: {}", e);
            return false;
        }
        true
    }

    fn delete(&mut self, ctx: &mut ToolContext<'_>, name: &str) {
        let mut steps = Vec::new();
        if !ctx.level.tile_selection.is_floating() {
            steps.push(EditorCommand::float_selection());
        }
        steps.push(EditorCommand::delete_selection());
        ctx.execute_steps(name, steps);
    }

    fn paste(&mut self, ctx: &mut ToolContext<'_>) {
        let payload = match ctx.clipboard.get(PayloadKind::Tiles) {
            Ok(ClipboardPayload::Tiles(payload)) => payload,
            Ok(_) => return,
            Err(e) => {
                tracing::warn!("Paste aborted: {}", e);
                return;
            }
        };
        if payload.is_empty() {
            return;
        }
        let (width, height) = payload.size();
        let center = ctx.level.grid.cell_at(ctx.viewport.center());
        let at = TileCoord::new(center.x - width / 2, center.y - height / 2);

        let mut steps = Vec::new();
        if ctx.level.tile_selection.is_floating() {
            steps.push(EditorCommand::defloat_selection());
        }
        steps.push(EditorCommand::create_floating(payload.cells_at(at)));
        ctx.execute_steps("Paste Tiles", steps);
    }
}

impl PointerTool for TileSelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::TileSelect
    }

    fn base(&self) -> &ToolBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ToolBase {
        &mut self.base
    }

    fn start_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        let cell = ctx.level.grid.cell_at(info.position);
        match info.button {
            PointerButton::Primary => {
                let selection = &ctx.level.tile_selection;
                if selection.covers(cell) {
                    if !selection.is_floating() {
                        ctx.execute(EditorCommand::float_selection());
                    }
                    let from = ctx.level.tile_selection.base_origin();
                    ctx.level.tile_selection.start_move(cell);
                    self.state = TileSelectState::Moving { from, last: cell };
                } else {
                    let mode = if info.modifiers.shift {
                        MergeMode::Add
                    } else if info.modifiers.ctrl && !selection.is_empty() {
                        MergeMode::Subtract
                    } else {
                        MergeMode::Replace
                    };
                    let anchor = ctx.level.grid.clamp(cell);
                    self.state = TileSelectState::BoxSelecting {
                        anchor,
                        current: anchor,
                        mode,
                    };
                    let region = TileRegion::from_corners(anchor, anchor);
                    self.refresh_box_marker(ctx.level, Some(region));
                }
                self.auto_scroll.begin();
                self.auto_scroll.track(ctx.viewport, info);
            }
            PointerButton::Secondary => {
                let steps = Self::reset_steps(ctx.level);
                ctx.execute_steps("Deselect Tiles", steps);
                self.refresh_selection_marker(ctx.level);
            }
            PointerButton::None => {}
        }
    }

    fn update_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.auto_scroll.track(ctx.viewport, info);
        self.drag_to(ctx, info);
    }

    fn end_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.drag_to(ctx, info);
        self.auto_scroll.end();
        match std::mem::replace(&mut self.state, TileSelectState::Idle) {
            TileSelectState::Idle => {}
            TileSelectState::Moving { from, last } => self.finish_move(ctx, from, last),
            TileSelectState::BoxSelecting {
                anchor,
                current,
                mode,
            } => self.finish_box(ctx, anchor, current, mode),
        }
    }

    fn tick_core(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(adjusted) = self.auto_scroll.tick(ctx.viewport) {
            self.drag_to(ctx, &adjusted);
        }
    }

    fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) {
        self.auto_scroll.end();
        match std::mem::replace(&mut self.state, TileSelectState::Idle) {
            TileSelectState::Moving { from, last } => self.finish_move(ctx, from, last),
            TileSelectState::BoxSelecting { .. } => self.refresh_box_marker(ctx.level, None),
            TileSelectState::Idle => {}
        }
    }

    fn dispose_managed(&mut self, ctx: &mut ToolContext<'_>) {
        if ctx.level.tile_selection.is_floating() {
            ctx.execute(EditorCommand::defloat_selection());
        }
        ctx.level.tile_selection.deactivate();
        self.refresh_box_marker(ctx.level, None);
        replace_marker(
            &mut *self.overlay.borrow_mut(),
            &mut self.selection_marker,
            None,
        );
    }

    fn sync(&mut self, ctx: &mut ToolContext<'_>) {
        self.refresh_selection_marker(ctx.level);
    }

    fn command_enabled(&self, ctx: &mut ToolContext<'_>, key: CommandKey) -> bool {
        let has_selection = !ctx.level.tile_selection.is_empty();
        match key {
            CommandKey::Cut | CommandKey::Copy | CommandKey::Delete | CommandKey::SelectNone => {
                has_selection
            }
            CommandKey::Paste => ctx.clipboard.contains(PayloadKind::Tiles),
            CommandKey::SelectAll => true,
            _ => false,
        }
    }

    fn invoke_command(&mut self, ctx: &mut ToolContext<'_>, key: CommandKey) -> bool {
        if !self.command_enabled(ctx, key) {
            return false;
        }
        match key {
            CommandKey::Copy => {
                self.copy(ctx);
            }
            CommandKey::Cut => {
                if self.copy(ctx) {
                    self.delete(ctx, "Cut Tiles");
                }
            }
            CommandKey::Delete => self.delete(ctx, "Delete Tiles"),
            CommandKey::Paste => self.paste(ctx),
            CommandKey::SelectAll => {
                let mut steps = Self::reset_steps(ctx.level);
                let extent = ctx.level.grid.extent();
                steps.push(EditorCommand::select_tiles(extent.coords().collect()));
                ctx.execute_steps("Select All", steps);
            }
            CommandKey::SelectNone => {
                let steps = Self::reset_steps(ctx.level);
                ctx.execute_steps("Select None", steps);
            }
            _ => return false,
        }
        self.refresh_selection_marker(ctx.level);
        true
    }
}
