//! Tool host.
//!
//! [`LevelController`] owns an editing session and routes pointer events and
//! menu commands to the active tool.

use crate::brush::{BrushId, BrushRegistry, TileBrush};
use crate::clipboard::{ClipboardService, MemoryClipboard};
use crate::grid::{TileGrid, TileId};
use crate::history::CommandHistory;
use crate::level::Level;
use crate::objects::{ObjectClassId, ObjectPool};
use crate::overlay::{OverlayLayer, OverlaySink};
use crate::tools::{
    build_tool, ActiveSources, CommandKey, PointerEventInfo, PointerTool, ToolContext, ToolKind,
};
use crate::viewport::Viewport;
use tilekit_core::{shared, Point, Rect, Shared, Size};
use tilekit_settings::{AutoScrollSettings, EditorConfig, SnapTarget};

pub struct LevelController {
    level: Level,
    history: CommandHistory,
    viewport: Viewport,
    overlay: Shared<OverlayLayer>,
    clipboard: Box<dyn ClipboardService>,
    sources: ActiveSources,
    brushes: BrushRegistry,
    auto_scroll: AutoScrollSettings,
    tool: Box<dyn PointerTool>,
}

impl LevelController {
    /// Starts a session on `level` with the object selection tool active.
    pub fn new(
        level: Level,
        history: CommandHistory,
        viewport: Viewport,
        auto_scroll: AutoScrollSettings,
    ) -> Self {
        let overlay = shared(OverlayLayer::new());
        let sink: Shared<dyn OverlaySink> = overlay.clone();
        let tool = build_tool(ToolKind::ObjectSelect, sink, &auto_scroll);
        Self {
            level,
            history,
            viewport,
            overlay,
            clipboard: Box::new(MemoryClipboard::new()),
            sources: ActiveSources::default(),
            brushes: BrushRegistry::new(),
            auto_scroll,
            tool,
        }
    }

    /// Builds an empty level and a session around it from editor settings.
    pub fn from_config(config: &EditorConfig) -> Self {
        let grid = TileGrid::from_settings(&config.grid);
        let content = grid.bounds();
        let level = Level::new(grid, ObjectPool::new());
        let viewport = Viewport::from_settings(&config.view, content);
        let history = CommandHistory::new(config.history.max_depth);
        let mut controller = Self::new(level, history, viewport, config.auto_scroll.clone());
        controller.sources.snap_target = config.snapping.target;
        controller.sources.snap_grid =
            Size::new(config.snapping.grid_width, config.snapping.grid_height);
        controller
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardService>) -> Self {
        self.clipboard = clipboard;
        self
    }

    fn with_tool<R>(
        &mut self,
        f: impl FnOnce(&mut dyn PointerTool, &mut ToolContext<'_>) -> R,
    ) -> R {
        let mut ctx = ToolContext {
            level: &mut self.level,
            history: &mut self.history,
            viewport: &mut self.viewport,
            clipboard: self.clipboard.as_mut(),
            sources: &self.sources,
            brushes: &self.brushes,
        };
        f(self.tool.as_mut(), &mut ctx)
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn tool(&self) -> &dyn PointerTool {
        self.tool.as_ref()
    }

    /// Cancels the active tool and replaces it with a fresh one.
    pub fn set_tool(&mut self, kind: ToolKind) {
        tracing::debug!("Switching tool {:?} -> {:?}", self.tool.kind(), kind);
        self.with_tool(|tool, ctx| tool.cancel(ctx));
        let sink: Shared<dyn OverlaySink> = self.overlay.clone();
        self.tool = build_tool(kind, sink, &self.auto_scroll);
        self.with_tool(|tool, ctx| tool.sync(ctx));
    }

    fn follow_tool_request(&mut self) {
        if let Some(kind) = self.tool.take_tool_request() {
            self.set_tool(kind);
        }
    }

    pub fn start_pointer_sequence(&mut self, info: PointerEventInfo) {
        self.with_tool(|tool, ctx| tool.start_pointer_sequence(ctx, info));
        self.follow_tool_request();
    }

    pub fn update_pointer_sequence(&mut self, info: PointerEventInfo) {
        self.with_tool(|tool, ctx| tool.update_pointer_sequence(ctx, info));
    }

    pub fn end_pointer_sequence(&mut self, info: PointerEventInfo) {
        self.with_tool(|tool, ctx| tool.end_pointer_sequence(ctx, info));
        self.follow_tool_request();
    }

    pub fn pointer_position(&mut self, info: PointerEventInfo) {
        self.with_tool(|tool, ctx| tool.pointer_position(ctx, info));
    }

    pub fn pointer_enter(&mut self) {
        self.with_tool(|tool, ctx| tool.pointer_enter(ctx));
    }

    pub fn pointer_leave(&mut self) {
        self.with_tool(|tool, ctx| tool.pointer_leave(ctx));
    }

    /// Auto-scroll timer step. Does nothing unless a gesture is active.
    pub fn tick(&mut self) {
        self.with_tool(|tool, ctx| tool.tick(ctx));
    }

    pub fn can_execute(&mut self, key: CommandKey) -> bool {
        match key {
            CommandKey::Undo => !self.tool.is_active() && self.history.can_undo(),
            CommandKey::Redo => !self.tool.is_active() && self.history.can_redo(),
            _ => self.with_tool(|tool, ctx| tool.command_enabled(ctx, key)),
        }
    }

    /// Runs a menu command. Returns true if anything handled it.
    pub fn execute(&mut self, key: CommandKey) -> bool {
        match key {
            CommandKey::Undo | CommandKey::Redo => {
                if !self.can_execute(key) {
                    return false;
                }
                let done = match key {
                    CommandKey::Undo => self.history.undo(&mut self.level),
                    _ => self.history.redo(&mut self.level),
                };
                self.with_tool(|tool, ctx| tool.sync(ctx));
                done
            }
            _ => self.with_tool(|tool, ctx| tool.invoke_command(ctx, key)),
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Direct level access for loading content. Bypasses history.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn overlay(&self) -> Shared<OverlayLayer> {
        self.overlay.clone()
    }

    pub fn sources(&self) -> &ActiveSources {
        &self.sources
    }

    pub fn set_active_tile(&mut self, tile: Option<TileId>) {
        self.sources.tile = tile;
    }

    pub fn set_active_brush(&mut self, brush: Option<BrushId>) {
        self.sources.brush = brush;
    }

    pub fn set_active_object_class(&mut self, class: Option<ObjectClassId>) {
        self.sources.object_class = class;
        self.with_tool(|tool, ctx| tool.sync(ctx));
    }

    pub fn set_snap_target(&mut self, target: SnapTarget) {
        self.sources.snap_target = target;
        self.with_tool(|tool, ctx| tool.sync(ctx));
    }

    pub fn register_object_class(
        &mut self,
        name: impl Into<String>,
        image_bounds: Rect,
        mask_bounds: Rect,
        origin: Point,
    ) -> ObjectClassId {
        self.level
            .objects
            .pool_mut()
            .register(name, image_bounds, mask_bounds, origin)
    }

    pub fn register_brush(&mut self, brush: Box<dyn TileBrush>) -> BrushId {
        self.brushes.register(brush)
    }

    pub fn brushes(&self) -> &BrushRegistry {
        &self.brushes
    }
}

impl Default for LevelController {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}
