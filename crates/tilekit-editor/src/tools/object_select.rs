//! Object selection tool.
//!
//! Clicks pick the topmost object under the pointer by its image bounds.
//! With ctrl held a click toggles membership instead of replacing the
//! selection. Dragging a selected object moves the whole selection, snapped
//! through the grabbed object's class.

use super::{
    AutoScroll, CommandKey, PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext,
    ToolKind,
};
use crate::clipboard::{ClipboardPayload, PayloadKind};
use crate::commands::{EditorCommand, ObjectMove};
use crate::objects::{HitTest, ObjectLayer, ZOrder};
use crate::overlay::{replace_marker, OverlayId, OverlayMarker, OverlaySink};
use crate::selection::ObjectSelection;
use crate::snapping::SnappingManager;
use tilekit_core::{Point, Rect, Shared};
use tilekit_settings::AutoScrollSettings;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ObjectSelectState {
    Idle,
    Moving {
        grab: Point,
        grabbed: Uuid,
        snapper: Option<SnappingManager>,
    },
    BoxSelecting {
        anchor: Point,
        current: Point,
    },
}

pub struct ObjectSelectTool {
    base: ToolBase,
    overlay: Shared<dyn OverlaySink>,
    selection: ObjectSelection,
    state: ObjectSelectState,
    marker: Option<OverlayId>,
    auto_scroll: AutoScroll,
}

impl ObjectSelectTool {
    pub fn new(overlay: Shared<dyn OverlaySink>, auto_scroll: &AutoScrollSettings) -> Self {
        Self {
            base: ToolBase::new(),
            overlay,
            selection: ObjectSelection::new(),
            state: ObjectSelectState::Idle,
            marker: None,
            auto_scroll: AutoScroll::new(auto_scroll),
        }
    }

    pub fn selection(&self) -> &ObjectSelection {
        &self.selection
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, ObjectSelectState::Moving { .. })
    }

    pub fn is_box_selecting(&self) -> bool {
        matches!(self.state, ObjectSelectState::BoxSelecting { .. })
    }

    fn select(&mut self, layer: &ObjectLayer, id: Uuid) -> bool {
        self.selection.add(layer, &mut *self.overlay.borrow_mut(), id)
    }

    fn deselect(&mut self, id: Uuid) -> bool {
        self.selection.remove(&mut *self.overlay.borrow_mut(), id)
    }

    fn clear_selection(&mut self) {
        self.selection.clear(&mut *self.overlay.borrow_mut());
    }

    fn refresh_highlights(&mut self, layer: &ObjectLayer) {
        self.selection
            .refresh_highlights(layer, &mut *self.overlay.borrow_mut());
    }

    fn set_box_marker(&mut self, rect: Option<Rect>) {
        let marker = rect.map(|rect| OverlayMarker::SelectionRect { rect });
        replace_marker(&mut *self.overlay.borrow_mut(), &mut self.marker, marker);
    }

    fn begin_move(&mut self, ctx: &ToolContext<'_>, grabbed: Uuid, grab: Point) {
        let layer = &ctx.level.objects;
        let snapper = layer
            .get(grabbed)
            .and_then(|instance| layer.pool().get(instance.class))
            .map(|class| SnappingManager::for_class(class, ctx.sources.snap_grid));
        self.selection.capture_locations(layer);
        self.state = ObjectSelectState::Moving {
            grab,
            grabbed,
            snapper,
        };
    }

    fn drag_to(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        match &mut self.state {
            ObjectSelectState::Idle => {}
            ObjectSelectState::Moving {
                grab,
                grabbed,
                snapper,
            } => {
                let Some(origin) = self.selection.get(*grabbed).map(|e| e.initial_location) else {
                    return;
                };
                let proposed = origin + (info.position - *grab);
                let placed = match snapper {
                    Some(snapper) => snapper.translate(proposed, ctx.sources.snap_target),
                    None => proposed,
                };
                let delta = placed - origin;
                for entry in self.selection.entries() {
                    ctx.level
                        .objects
                        .set_position(entry.id, entry.initial_location + delta);
                }
                self.refresh_highlights(&ctx.level.objects);
            }
            ObjectSelectState::BoxSelecting { anchor, current } => {
                *current = info.position;
                let rect = Rect::from_points(*anchor, *current);
                self.set_box_marker(Some(rect));
            }
        }
    }

    fn finish_move(&mut self, ctx: &mut ToolContext<'_>) {
        let moves: Vec<ObjectMove> = self
            .selection
            .entries()
            .iter()
            .filter_map(|entry| {
                let to = ctx.level.objects.get(entry.id)?.position;
                (to != entry.initial_location).then_some(ObjectMove {
                    id: entry.id,
                    from: entry.initial_location,
                    to,
                })
            })
            .collect();
        if !moves.is_empty() {
            tracing::debug!("Moved {} objects", moves.len());
            ctx.execute(EditorCommand::move_objects(moves));
        }
        self.selection.capture_locations(&ctx.level.objects);
        self.refresh_highlights(&ctx.level.objects);
    }

    fn finish_box(&mut self, ctx: &mut ToolContext<'_>, anchor: Point, current: Point) {
        self.set_box_marker(None);
        let rect = Rect::from_points(anchor, current);
        let hits = ctx.level.objects.objects_in_region(rect, HitTest::Coarse);
        for id in hits {
            self.select(&ctx.level.objects, id);
        }
    }

    fn copy(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let payload = self.selection.to_payload(&ctx.level.objects);
        if let Err(e) = ctx.clipboard.set(ClipboardPayload::Objects(payload)) {
            tracing::warn!("Copy failed: {}", e);
            return false;
        }
        true
    }

    fn remove_selected(&mut self, ctx: &mut ToolContext<'_>) {
        let ids = self.selection.ids();
        self.clear_selection();
        ctx.execute(EditorCommand::remove_objects(ids));
    }

    fn paste(&mut self, ctx: &mut ToolContext<'_>) {
        let payload = match ctx.clipboard.get(PayloadKind::Objects) {
            Ok(ClipboardPayload::Objects(payload)) => payload,
            Ok(_) => return,
            Err(e) => {
                tracing::warn!("Paste aborted: {}", e);
                return;
            }
        };
        let layer = &ctx.level.objects;
        let mut instances = payload.into_instances(layer.pool());
        let Some(bounds) = Rect::union_all(
            instances
                .iter()
                .filter_map(|instance| layer.bounds_of(instance, HitTest::Coarse)),
        ) else {
            return;
        };
        let delta = ctx.viewport.center() - bounds.center();
        for instance in &mut instances {
            instance.position += delta;
        }
        let ids: Vec<Uuid> = instances.iter().map(|instance| instance.id).collect();
        ctx.execute(EditorCommand::add_objects(instances));

        self.clear_selection();
        for id in ids {
            self.select(&ctx.level.objects, id);
        }
    }

    /// One reorder op per selected object, ordered so the group keeps its
    /// relative stacking.
    fn reorder(&mut self, ctx: &mut ToolContext<'_>, op: ZOrder) {
        let layer = &ctx.level.objects;
        let mut ranked: Vec<(usize, Uuid)> = self
            .selection
            .ids()
            .into_iter()
            .filter_map(|id| layer.index_of(id).map(|index| (index, id)))
            .collect();
        ranked.sort_by_key(|(index, _)| *index);
        if matches!(op, ZOrder::Back | ZOrder::Forward) {
            ranked.reverse();
        }
        let ops = ranked.into_iter().map(|(_, id)| (id, op)).collect();
        ctx.execute(EditorCommand::reorder_objects(ops));
    }
}

impl PointerTool for ObjectSelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ObjectSelect
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
        let toggle = info.modifiers.ctrl;
        let hit = ctx
            .level
            .objects
            .objects_at_point(info.position, HitTest::Coarse)
            .first()
            .copied();

        match hit {
            None => {
                if !toggle {
                    self.clear_selection();
                }
                self.state = ObjectSelectState::BoxSelecting {
                    anchor: info.position,
                    current: info.position,
                };
                self.set_box_marker(Some(Rect::from_points(info.position, info.position)));
            }
            Some(id) if self.selection.contains(id) => {
                if toggle {
                    self.deselect(id);
                    return;
                }
                self.begin_move(ctx, id, info.position);
            }
            Some(id) => {
                if !toggle {
                    self.clear_selection();
                }
                self.select(&ctx.level.objects, id);
                self.begin_move(ctx, id, info.position);
            }
        }
        self.auto_scroll.begin();
        self.auto_scroll.track(ctx.viewport, info);
    }

    fn update_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.auto_scroll.track(ctx.viewport, info);
        self.drag_to(ctx, info);
    }

    fn end_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.drag_to(ctx, info);
        self.auto_scroll.end();
        match std::mem::replace(&mut self.state, ObjectSelectState::Idle) {
            ObjectSelectState::Idle => {}
            ObjectSelectState::Moving { .. } => self.finish_move(ctx),
            ObjectSelectState::BoxSelecting { anchor, current } => {
                self.finish_box(ctx, anchor, current)
            }
        }
    }

    fn tick_core(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(adjusted) = self.auto_scroll.tick(ctx.viewport) {
            self.drag_to(ctx, &adjusted);
        }
    }

    fn finish_gesture(&mut self, ctx: &mut ToolContext<'_>) {
        self.auto_scroll.end();
        match std::mem::replace(&mut self.state, ObjectSelectState::Idle) {
            ObjectSelectState::Moving { .. } => self.finish_move(ctx),
            ObjectSelectState::BoxSelecting { .. } => self.set_box_marker(None),
            ObjectSelectState::Idle => {}
        }
    }

    fn dispose_managed(&mut self, _ctx: &mut ToolContext<'_>) {
        self.set_box_marker(None);
        self.clear_selection();
    }

    fn sync(&mut self, ctx: &mut ToolContext<'_>) {
        self.refresh_highlights(&ctx.level.objects);
        self.selection.capture_locations(&ctx.level.objects);
    }

    fn command_enabled(&self, ctx: &mut ToolContext<'_>, key: CommandKey) -> bool {
        match key {
            CommandKey::Cut
            | CommandKey::Copy
            | CommandKey::Delete
            | CommandKey::SelectNone
            | CommandKey::BringToFront
            | CommandKey::SendToBack
            | CommandKey::BringForward
            | CommandKey::SendBackward => !self.selection.is_empty(),
            CommandKey::Paste => ctx.clipboard.contains(PayloadKind::Objects),
            CommandKey::SelectAll => !ctx.level.objects.is_empty(),
            CommandKey::Undo | CommandKey::Redo => false,
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
                    self.remove_selected(ctx);
                }
            }
            CommandKey::Delete => self.remove_selected(ctx),
            CommandKey::Paste => self.paste(ctx),
            CommandKey::SelectAll => {
                self.clear_selection();
                for id in ctx.level.objects.order() {
                    self.select(&ctx.level.objects, id);
                }
            }
            CommandKey::SelectNone => self.clear_selection(),
            CommandKey::BringToFront => self.reorder(ctx, ZOrder::Front),
            CommandKey::SendToBack => self.reorder(ctx, ZOrder::Back),
            CommandKey::BringForward => self.reorder(ctx, ZOrder::Forward),
            CommandKey::SendBackward => self.reorder(ctx, ZOrder::Backward),
            CommandKey::Undo | CommandKey::Redo => return false,
        }
        true
    }
}
