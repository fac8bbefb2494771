//! Object placement tool.

use super::{PointerButton, PointerEventInfo, PointerTool, ToolBase, ToolContext, ToolKind};
use crate::commands::EditorCommand;
use crate::objects::{ObjectClass, ObjectInstance};
use crate::overlay::{replace_marker, OverlayId, OverlayMarker, OverlaySink};
use crate::snapping::SnappingManager;
use tilekit_core::{EditorError, Point, Shared};

/// Places instances of the active object class.
///
/// A preview of the class follows the pointer whether or not a button is
/// held. Secondary click asks the host to switch back to object selection.
pub struct ObjectDrawTool {
    base: ToolBase,
    overlay: Shared<dyn OverlaySink>,
    preview: Option<OverlayId>,
    last_position: Option<Point>,
    request: Option<ToolKind>,
}

impl ObjectDrawTool {
    pub fn new(overlay: Shared<dyn OverlaySink>) -> Self {
        Self {
            base: ToolBase::new(),
            overlay,
            preview: None,
            last_position: None,
            request: None,
        }
    }

    fn active_class<'a>(ctx: &'a ToolContext<'_>) -> Option<&'a ObjectClass> {
        let class = ctx.sources.object_class?;
        ctx.level.objects.pool().get(class)
    }

    /// Position the class origin lands on for a pointer at `pointer`.
    fn placement(ctx: &ToolContext<'_>, class: &ObjectClass, pointer: Point) -> Point {
        SnappingManager::for_class(class, ctx.sources.snap_grid)
            .translate(pointer, ctx.sources.snap_target)
    }

    fn update_preview(&mut self, ctx: &ToolContext<'_>) {
        let marker = self.last_position.and_then(|pointer| {
            let class = Self::active_class(ctx)?;
            let position = Self::placement(ctx, class, pointer);
            Some(OverlayMarker::ObjectPreview {
                class: class.id,
                rect: class.image_bounds_at(position),
            })
        });
        replace_marker(&mut *self.overlay.borrow_mut(), &mut self.preview, marker);
    }

    fn clear_preview(&mut self) {
        replace_marker(&mut *self.overlay.borrow_mut(), &mut self.preview, None);
    }

    fn track(&mut self, ctx: &ToolContext<'_>, info: &PointerEventInfo) {
        self.last_position = Some(info.position);
        self.update_preview(ctx);
    }
}

impl PointerTool for ObjectDrawTool {
    fn kind(&self) -> ToolKind {
        ToolKind::ObjectDraw
    }

    fn base(&self) -> &ToolBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ToolBase {
        &mut self.base
    }

    fn start_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        match info.button {
            PointerButton::Primary => {
                let Some(class) = Self::active_class(ctx) else {
                    tracing::warn!(
                        "{}",
                        EditorError::MissingSource {
                            source_kind: "object class".to_string()
                        }
                    );
                    return;
                };
                let position = Self::placement(ctx, class, info.position);
                let instance = ObjectInstance::new(class.id, position);
                tracing::debug!("Placing {} at {}", class.name, position);
                ctx.execute(EditorCommand::add_objects(vec![instance]));
                self.track(ctx, info);
            }
            PointerButton::Secondary => {
                self.request = Some(ToolKind::ObjectSelect);
            }
            PointerButton::None => {}
        }
    }

    fn update_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.track(ctx, info);
    }

    fn position_core(&mut self, ctx: &mut ToolContext<'_>, info: &PointerEventInfo) {
        self.track(ctx, info);
    }

    fn enter_core(&mut self, ctx: &mut ToolContext<'_>) {
        self.update_preview(ctx);
    }

    fn leave_core(&mut self, _ctx: &mut ToolContext<'_>) {
        self.last_position = None;
        self.clear_preview();
    }

    fn dispose_managed(&mut self, _ctx: &mut ToolContext<'_>) {
        self.clear_preview();
    }

    fn sync(&mut self, ctx: &mut ToolContext<'_>) {
        self.update_preview(ctx);
    }

    fn take_tool_request(&mut self) -> Option<ToolKind> {
        self.request.take()
    }
}
