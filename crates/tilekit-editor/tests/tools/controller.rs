use crate::support::{cell, click, controller, drag, paint_block, top, TILE};
use std::cell::RefCell;
use std::rc::Rc;
use tilekit_core::{ClipboardError, Point, Rect, TileCoord};
use tilekit_editor::{
    CommandKey, LevelController, PointerEventInfo, PointerTool, SelectionMode, TextBackend,
    TextClipboard, TileId, ToolKind,
};
use tilekit_settings::{EditorConfig, SnapTarget};

#[derive(Clone, Default)]
struct SharedText(Rc<RefCell<String>>);

impl TextBackend for SharedText {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.0.borrow().clone())
    }

    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        *self.0.borrow_mut() = text;
        Ok(())
    }
}

#[test]
fn test_set_tool_replaces_active_tool() {
    let mut c = controller();
    assert_eq!(c.tool_kind(), ToolKind::ObjectSelect);
    for kind in [
        ToolKind::TileSelect,
        ToolKind::TileDraw,
        ToolKind::TileErase,
        ToolKind::TileBrush,
        ToolKind::TileFill,
        ToolKind::ObjectDraw,
        ToolKind::ObjectSelect,
    ] {
        c.set_tool(kind);
        assert_eq!(c.tool_kind(), kind);
        assert!(!c.tool().is_cancelled());
        assert!(!c.tool().is_active());
    }
}

#[test]
fn test_undo_redo_round_trip() {
    let mut c = controller();
    c.set_tool(ToolKind::TileDraw);
    c.set_active_tile(Some(TileId(1)));
    click(&mut c, cell(1, 1));
    click(&mut c, cell(2, 2));

    assert!(c.execute(CommandKey::Undo));
    assert_eq!(top(&c, 2, 2), None);
    assert_eq!(top(&c, 1, 1), Some(TileId(1)));
    assert!(c.can_execute(CommandKey::Redo));

    assert!(c.execute(CommandKey::Redo));
    assert_eq!(top(&c, 2, 2), Some(TileId(1)));
    assert!(!c.can_execute(CommandKey::Redo));
    assert!(!c.execute(CommandKey::Redo));
}

#[test]
fn test_new_edit_discards_redo() {
    let mut c = controller();
    c.set_tool(ToolKind::TileDraw);
    c.set_active_tile(Some(TileId(1)));
    click(&mut c, cell(1, 1));
    click(&mut c, cell(2, 2));
    c.execute(CommandKey::Undo);
    c.execute(CommandKey::Undo);
    c.execute(CommandKey::Redo);
    assert_eq!(c.history().redo_depth(), 1);

    click(&mut c, cell(5, 5));
    assert!(!c.can_execute(CommandKey::Redo));
    assert_eq!(c.history().undo_depth(), 2);
    assert_eq!(top(&c, 2, 2), None);
}

#[test]
fn test_undo_with_empty_history() {
    let mut c = controller();
    assert!(!c.can_execute(CommandKey::Undo));
    assert!(!c.execute(CommandKey::Undo));
    assert!(!c.execute(CommandKey::Redo));
}

#[test]
fn test_from_config_applies_settings() {
    let mut config = EditorConfig::default();
    config.grid.tiles_wide = 8;
    config.grid.tiles_high = 4;
    config.grid.tile_width = 32;
    config.grid.tile_height = 32;
    config.history.max_depth = 2;
    config.snapping.target = SnapTarget::Origin;

    let mut c = LevelController::from_config(&config);
    assert_eq!(c.level().grid.tiles_wide(), 8);
    assert_eq!(c.viewport().content(), Rect::new(0.0, 0.0, 256.0, 128.0));
    assert_eq!(c.sources().snap_target, SnapTarget::Origin);
    assert_eq!(c.history().max_depth(), 2);

    c.set_tool(ToolKind::TileDraw);
    c.set_active_tile(Some(TileId(1)));
    for x in 0..3 {
        click(&mut c, PointerEventInfo::primary(x as f64 * 32.0 + 4.0, 4.0));
    }
    assert_eq!(c.level().grid.len(), 3);
    assert_eq!(c.history().undo_depth(), 2);
}

#[test]
fn test_tick_scrolls_and_extends_box() {
    let mut c = controller();
    c.set_tool(ToolKind::TileSelect);
    c.start_pointer_sequence(PointerEventInfo::primary(24.0, 100.0));
    c.update_pointer_sequence(PointerEventInfo::primary(316.0, 100.0));
    c.tick();
    assert_eq!(c.viewport().scroll_offset(), Point::new(15.0, 0.0));

    let end = c.viewport().pixel_to_world(316.0, 100.0);
    c.end_pointer_sequence(PointerEventInfo::primary(end.x, end.y));

    let selection = &c.level().tile_selection;
    assert_eq!(selection.len(), 20);
    assert!(selection.covers(TileCoord::new(1, 6)));
    assert!(selection.covers(TileCoord::new(20, 6)));

    // No gesture, no scrolling.
    c.tick();
    assert_eq!(c.viewport().scroll_offset(), Point::new(15.0, 0.0));
}

#[test]
fn test_tick_without_edge_pressure_is_idle() {
    let mut c = controller();
    c.set_tool(ToolKind::TileSelect);
    c.start_pointer_sequence(PointerEventInfo::primary(100.0, 100.0));
    c.update_pointer_sequence(PointerEventInfo::primary(160.0, 160.0));
    c.tick();
    assert_eq!(c.viewport().scroll_offset(), Point::zero());
    c.end_pointer_sequence(PointerEventInfo::primary(160.0, 160.0));
}

#[test]
fn test_text_clipboard_shares_tiles_between_sessions() {
    let text = SharedText::default();
    let mut source = controller().with_clipboard(Box::new(TextClipboard::new(text.clone())));
    let mut target = controller().with_clipboard(Box::new(TextClipboard::new(text.clone())));
    source.set_tool(ToolKind::TileSelect);
    target.set_tool(ToolKind::TileSelect);

    paint_block(&mut source, 0, 0, 1, 0, 4);
    drag(&mut source, cell(0, 0), cell(1, 0));
    assert!(source.execute(CommandKey::Copy));
    assert!(text.0.borrow().contains("tilekit/1"));

    assert!(target.can_execute(CommandKey::Paste));
    assert!(target.execute(CommandKey::Paste));
    assert_eq!(target.level().tile_selection.mode(), SelectionMode::Floating);
    target.execute(CommandKey::SelectNone);
    assert_eq!(top(&target, 9, 10), Some(TileId(4)));
    assert_eq!(top(&target, 10, 10), Some(TileId(4)));

    // Foreign text is not a payload.
    *text.0.borrow_mut() = "hello".to_string();
    assert!(!target.can_execute(CommandKey::Paste));
}

#[test]
fn test_view_centre_matches_cell_layout() {
    let c = controller();
    let centre = c.viewport().center();
    assert_eq!(c.level().grid.cell_at(centre), TileCoord::new(10, 10));
    assert_eq!(centre.x, 10.0 * TILE);
}
