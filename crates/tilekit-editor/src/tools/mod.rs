//! Pointer tools.
//!
//! A tool turns pointer sequences (start, updates, end) into selection
//! changes and commands. The host owns the level, history, viewport and
//! clipboard and lends them to the tool for each event through a
//! [`ToolContext`]; the overlay sink is handed to the tool once, when it is
//! built.
//!
//! Every tool shares the lifecycle in [`PointerTool`]'s provided methods:
//! events are ignored once the tool is cancelled, a second start while a
//! sequence is active is rejected, and cancellation is terminal.

pub mod auto_scroll;
pub mod object_draw;
pub mod object_select;
pub mod tile_brush;
pub mod tile_draw;
pub mod tile_erase;
pub mod tile_fill;
pub mod tile_select;

pub use auto_scroll::AutoScroll;
pub use object_draw::ObjectDrawTool;
pub use object_select::ObjectSelectTool;
pub use tile_brush::TileBrushTool;
pub use tile_draw::TileDrawTool;
pub use tile_erase::TileEraseTool;
pub use tile_fill::TileFillTool;
pub use tile_select::TileSelectTool;

use crate::brush::{BrushId, BrushRegistry};
use crate::clipboard::ClipboardService;
use crate::commands::EditorCommand;
use crate::grid::TileId;
use crate::history::CommandHistory;
use crate::level::Level;
use crate::objects::ObjectClassId;
use crate::overlay::OverlaySink;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use tilekit_core::{EditorError, Point, Shared, Size};
use tilekit_settings::{AutoScrollSettings, SnapTarget};

/// Which button drives a pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    /// Hover without a pressed button.
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

/// A pointer event in level coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEventInfo {
    pub button: PointerButton,
    pub position: Point,
    pub modifiers: Modifiers,
}

impl PointerEventInfo {
    pub fn new(button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            button,
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    pub fn primary(x: f64, y: f64) -> Self {
        Self::new(PointerButton::Primary, x, y)
    }

    pub fn secondary(x: f64, y: f64) -> Self {
        Self::new(PointerButton::Secondary, x, y)
    }

    pub fn hover(x: f64, y: f64) -> Self {
        Self::new(PointerButton::None, x, y)
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

/// Closed set of tool types the host can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    TileSelect,
    TileDraw,
    TileErase,
    TileBrush,
    TileFill,
    ObjectSelect,
    ObjectDraw,
}

/// Host menu commands a tool may handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKey {
    Cut,
    Copy,
    Paste,
    Delete,
    SelectAll,
    SelectNone,
    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,
    Undo,
    Redo,
}

/// What draw tools paint and place with.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSources {
    pub tile: Option<TileId>,
    pub brush: Option<BrushId>,
    pub object_class: Option<ObjectClassId>,
    pub snap_target: SnapTarget,
    /// Cell size of the object snap grid, in level units.
    pub snap_grid: Size,
}

impl Default for ActiveSources {
    fn default() -> Self {
        Self {
            tile: None,
            brush: None,
            object_class: None,
            snap_target: SnapTarget::None,
            snap_grid: Size::new(
                tilekit_core::constants::DEFAULT_TILE_WIDTH as f64,
                tilekit_core::constants::DEFAULT_TILE_HEIGHT as f64,
            ),
        }
    }
}

/// Host state lent to a tool for the duration of one call.
pub struct ToolContext<'a> {
    pub level: &'a mut Level,
    pub history: &'a mut CommandHistory,
    pub viewport: &'a mut Viewport,
    pub clipboard: &'a mut dyn ClipboardService,
    pub sources: &'a ActiveSources,
    pub brushes: &'a BrushRegistry,
}

impl ToolContext<'_> {
    /// Runs a command through the history.
    pub fn execute(&mut self, command: EditorCommand) -> bool {
        self.history.execute(command, self.level)
    }

    /// Runs a sequence of steps as one history entry, unwrapping a single step.
    pub fn execute_steps(&mut self, name: &str, steps: Vec<EditorCommand>) -> bool {
        if steps.is_empty() {
            return false;
        }
        self.execute(EditorCommand::compound(name, steps))
    }
}

/// Gesture bookkeeping shared by every tool.
#[derive(Debug, Clone, Default)]
pub struct ToolBase {
    cancelled: bool,
    active: Option<PointerButton>,
}

impl ToolBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// True between the start and end of a pointer sequence.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Button of the sequence in progress.
    pub fn active_button(&self) -> Option<PointerButton> {
        self.active
    }

    fn begin(&mut self, button: PointerButton) {
        self.active = Some(button);
    }

    fn finish(&mut self) {
        self.active = None;
    }

    fn cancel(&mut self) {
        self.cancelled = true;
        self.active = None;
    }
}

pub trait PointerTool {
    fn kind(&self) -> ToolKind;
    fn base(&self) -> &ToolBase;
    fn base_mut(&mut self) -> &mut ToolBase;

    fn start_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo);

    fn update_core(&mut self, _ctx: &mut ToolContext<'_>, _info: &PointerEventInfo) {}

    fn end_core(&mut self, _ctx: &mut ToolContext<'_>, _info: &PointerEventInfo) {}

    /// Pointer moved with no sequence in progress.
    fn position_core(&mut self, _ctx: &mut ToolContext<'_>, _info: &PointerEventInfo) {}

    fn enter_core(&mut self, _ctx: &mut ToolContext<'_>) {}

    fn leave_core(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Timer step during an active sequence.
    fn tick_core(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Completes a sequence interrupted by cancellation.
    fn finish_gesture(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Releases markers and other tool-owned state. Runs once, on cancel.
    fn dispose_managed(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Re-reads level state after the host changed it (undo, redo, source switch).
    fn sync(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// A tool switch the tool wants the host to perform.
    fn take_tool_request(&mut self) -> Option<ToolKind> {
        None
    }

    fn command_enabled(&self, _ctx: &mut ToolContext<'_>, _key: CommandKey) -> bool {
        false
    }

    /// Runs a host command. Returns true if the tool handled it.
    fn invoke_command(&mut self, _ctx: &mut ToolContext<'_>, _key: CommandKey) -> bool {
        false
    }

    fn is_cancelled(&self) -> bool {
        self.base().is_cancelled()
    }

    fn is_active(&self) -> bool {
        self.base().is_active()
    }

    fn start_pointer_sequence(&mut self, ctx: &mut ToolContext<'_>, info: PointerEventInfo) {
        if self.is_cancelled() || info.button == PointerButton::None {
            return;
        }
        if self.is_active() {
            let err = EditorError::InvalidGestureState {
                tool: format!("{:?}", self.kind()),
                reason: "pointer sequence already active".to_string(),
            };
            tracing::error!("{}", err);
            return;
        }
        tracing::debug!("{:?}: start {:?} at {}", self.kind(), info.button, info.position);
        self.base_mut().begin(info.button);
        self.start_core(ctx, &info);
    }

    fn update_pointer_sequence(&mut self, ctx: &mut ToolContext<'_>, info: PointerEventInfo) {
        if self.is_cancelled() || !self.is_active() {
            return;
        }
        self.update_core(ctx, &info);
    }

    fn end_pointer_sequence(&mut self, ctx: &mut ToolContext<'_>, info: PointerEventInfo) {
        if self.is_cancelled() || !self.is_active() {
            return;
        }
        tracing::debug!("{:?}: end at {}", self.kind(), info.position);
        self.end_core(ctx, &info);
        self.base_mut().finish();
    }

    fn pointer_position(&mut self, ctx: &mut ToolContext<'_>, info: PointerEventInfo) {
        if self.is_cancelled() {
            return;
        }
        self.position_core(ctx, &info);
    }

    fn pointer_enter(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.is_cancelled() {
            self.enter_core(ctx);
        }
    }

    fn pointer_leave(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.is_cancelled() {
            self.leave_core(ctx);
        }
    }

    fn tick(&mut self, ctx: &mut ToolContext<'_>) {
        if self.is_cancelled() || !self.is_active() {
            return;
        }
        self.tick_core(ctx);
    }

    /// Ends the tool. Idempotent; a cancelled tool ignores every further event.
    fn cancel(&mut self, ctx: &mut ToolContext<'_>) {
        if self.is_cancelled() {
            return;
        }
        tracing::debug!("{:?}: cancel", self.kind());
        if self.is_active() {
            self.finish_gesture(ctx);
        }
        self.dispose_managed(ctx);
        self.base_mut().cancel();
    }
}

/// Builds a fresh tool instance.
pub fn build_tool(
    kind: ToolKind,
    overlay: Shared<dyn OverlaySink>,
    auto_scroll: &AutoScrollSettings,
) -> Box<dyn PointerTool> {
    match kind {
        ToolKind::TileSelect => Box::new(TileSelectTool::new(overlay, auto_scroll)),
        ToolKind::TileDraw => Box::new(TileDrawTool::new(auto_scroll)),
        ToolKind::TileErase => Box::new(TileEraseTool::new(overlay, auto_scroll)),
        ToolKind::TileBrush => Box::new(TileBrushTool::new(auto_scroll)),
        ToolKind::TileFill => Box::new(TileFillTool::new()),
        ToolKind::ObjectSelect => Box::new(ObjectSelectTool::new(overlay, auto_scroll)),
        ToolKind::ObjectDraw => Box::new(ObjectDrawTool::new(overlay)),
    }
}
