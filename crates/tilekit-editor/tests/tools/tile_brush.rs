use crate::support::{cell, click, controller, drag, top};
use tilekit_core::TileCoord;
use tilekit_editor::{BrushId, CheckerBrush, CommandKey, StaticBrush, TileId, ToolKind};

#[test]
fn test_brush_stamp_is_one_step() {
    let mut c = controller();
    let brush = c.register_brush(Box::new(CheckerBrush::new("checker", TileId(1), TileId(2), 2)));
    c.set_tool(ToolKind::TileBrush);
    c.set_active_brush(Some(brush));
    click(&mut c, cell(5, 5));

    assert_eq!(c.level().grid.len(), 4);
    assert_eq!(top(&c, 4, 4), Some(TileId(1)));
    assert_eq!(top(&c, 5, 4), Some(TileId(2)));
    assert_eq!(c.history().undo_depth(), 1);
    assert_eq!(c.history().undo_name(), Some("Brush"));

    c.execute(CommandKey::Undo);
    assert!(c.level().grid.is_empty());
}

#[test]
fn test_brush_stroke_merges_overlapping_stamps() {
    let mut c = controller();
    let brush = c.register_brush(Box::new(StaticBrush::new(
        "pair",
        vec![
            (TileCoord::new(0, 0), TileId(3)),
            (TileCoord::new(1, 0), TileId(3)),
        ],
    )));
    c.set_tool(ToolKind::TileBrush);
    c.set_active_brush(Some(brush));
    drag(&mut c, cell(0, 0), cell(3, 0));

    // Stamps at x = 0..=3 overlap and cover x = 0..=4.
    assert_eq!(c.level().grid.len(), 5);
    for x in 0..=4 {
        assert_eq!(
            c.level().grid.tile_at(TileCoord::new(x, 0)).map(|s| s.len()),
            Some(1)
        );
    }
    assert_eq!(c.history().undo_depth(), 1);
    c.execute(CommandKey::Undo);
    assert!(c.level().grid.is_empty());
}

#[test]
fn test_missing_brush_is_a_noop() {
    let mut c = controller();
    c.set_tool(ToolKind::TileBrush);
    click(&mut c, cell(1, 1));
    c.set_active_brush(Some(BrushId(42)));
    click(&mut c, cell(1, 1));
    assert!(c.level().grid.is_empty());
    assert!(!c.history().can_undo());
}

#[test]
fn test_brush_stroke_to_far_pointer_is_clamped() {
    let mut c = controller();
    let brush = c.register_brush(Box::new(StaticBrush::new(
        "pair",
        vec![
            (TileCoord::new(0, 0), TileId(3)),
            (TileCoord::new(1, 0), TileId(3)),
        ],
    )));
    c.set_tool(ToolKind::TileBrush);
    c.set_active_brush(Some(brush));
    drag(&mut c, cell(60, 0), tilekit_editor::PointerEventInfo::primary(1.0e11, 8.0));

    assert_eq!(c.level().grid.len(), 4);
    assert_eq!(top(&c, 63, 0), Some(TileId(3)));
    assert_eq!(c.history().undo_depth(), 1);
}
