use crate::support::{cell, controller, count_markers, drag, paint_block, secondary_cell, top};
use tilekit_editor::{CommandKey, OverlayMarker, TileId, ToolKind};

fn rect_markers(c: &tilekit_editor::LevelController) -> usize {
    count_markers(&c.overlay().borrow(), |m| {
        matches!(m, OverlayMarker::SelectionRect { .. })
    })
}

#[test]
fn test_primary_drag_erases_stroke() {
    let mut c = controller();
    paint_block(&mut c, 0, 0, 5, 1, 3);
    c.set_tool(ToolKind::TileErase);
    drag(&mut c, cell(1, 0), cell(4, 0));

    assert_eq!(top(&c, 0, 0), Some(TileId(3)));
    for x in 1..=4 {
        assert!(top(&c, x, 0).is_none());
    }
    assert_eq!(top(&c, 5, 0), Some(TileId(3)));
    assert_eq!(c.history().undo_name(), Some("Erase Tiles"));

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().grid.len(), 12);
}

#[test]
fn test_erasing_empty_cells_records_nothing() {
    let mut c = controller();
    c.set_tool(ToolKind::TileErase);
    drag(&mut c, cell(0, 0), cell(3, 3));
    assert!(!c.history().can_undo());
}

#[test]
fn test_secondary_drag_erases_rectangle() {
    let mut c = controller();
    paint_block(&mut c, 0, 0, 4, 4, 1);
    c.set_tool(ToolKind::TileErase);

    c.start_pointer_sequence(secondary_cell(3, 2));
    c.update_pointer_sequence(secondary_cell(1, 1));
    // Nothing is erased until release; the band is shown instead.
    assert_eq!(c.level().grid.len(), 25);
    assert_eq!(rect_markers(&c), 1);

    c.end_pointer_sequence(secondary_cell(1, 1));
    assert_eq!(c.level().grid.len(), 25 - 6);
    assert!(top(&c, 2, 2).is_none());
    assert_eq!(top(&c, 0, 0), Some(TileId(1)));
    assert_eq!(rect_markers(&c), 0);
    assert_eq!(c.history().undo_name(), Some("Erase Region"));

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().grid.len(), 25);
}

#[test]
fn test_rectangle_is_clamped_to_grid() {
    let mut c = controller();
    paint_block(&mut c, 0, 0, 2, 2, 1);
    c.set_tool(ToolKind::TileErase);
    drag(&mut c, secondary_cell(-4, -4), secondary_cell(1, 1));
    assert_eq!(c.level().grid.len(), 5);
    assert!(top(&c, 0, 0).is_none());
    assert!(top(&c, 1, 1).is_none());
}

#[test]
fn test_cancel_discards_rectangle() {
    let mut c = controller();
    paint_block(&mut c, 0, 0, 2, 2, 1);
    c.set_tool(ToolKind::TileErase);
    c.start_pointer_sequence(secondary_cell(0, 0));
    c.update_pointer_sequence(secondary_cell(2, 2));
    c.set_tool(ToolKind::TileDraw);

    assert_eq!(c.level().grid.len(), 9);
    assert!(!c.history().can_undo());
    assert_eq!(rect_markers(&c), 0);
}

#[test]
fn test_erase_stroke_to_far_pointer_clears_to_edge() {
    let mut c = controller();
    paint_block(&mut c, 60, 0, 63, 0, 3);
    c.set_tool(ToolKind::TileErase);
    let far = tilekit_editor::PointerEventInfo::primary(8.0e11, 8.0);
    drag(&mut c, cell(60, 0), far);

    assert!(c.level().grid.is_empty());
    assert_eq!(c.history().undo_depth(), 1);
    c.execute(CommandKey::Undo);
    assert_eq!(c.level().grid.len(), 4);
}
