use crate::support::{
    cell, click, controller, count_markers, drag, paint_block, secondary_cell, top,
};
use tilekit_core::TileCoord;
use tilekit_editor::{
    CommandKey, LevelController, OverlayMarker, PointerEventInfo, SelectionMode, TileId, ToolKind,
};

fn select_tool() -> LevelController {
    let mut c = controller();
    c.set_tool(ToolKind::TileSelect);
    c
}

fn selection_boxes(c: &LevelController) -> usize {
    count_markers(&c.overlay().borrow(), |m| {
        matches!(m, OverlayMarker::TileSelectionBox { .. })
    })
}

fn covers(c: &LevelController, x: i32, y: i32) -> bool {
    c.level().tile_selection.covers(TileCoord::new(x, y))
}

#[test]
fn test_box_select_replaces_selection() {
    let mut c = select_tool();
    paint_block(&mut c, 0, 0, 2, 2, 5);
    drag(&mut c, cell(0, 0), cell(2, 2));

    let selection = &c.level().tile_selection;
    assert_eq!(selection.len(), 9);
    assert_eq!(selection.mode(), SelectionMode::Selected);
    assert_eq!(c.history().undo_name(), Some("Select Tiles"));
    assert_eq!(selection_boxes(&c), 1);
    // Rubber band marker is gone once the gesture ends.
    assert_eq!(
        count_markers(&c.overlay().borrow(), |m| {
            matches!(m, OverlayMarker::SelectionRect { .. })
        }),
        0
    );

    drag(&mut c, cell(5, 5), cell(5, 6));
    assert_eq!(c.level().tile_selection.len(), 2);
    assert!(!covers(&c, 0, 0));
    assert_eq!(selection_boxes(&c), 1);
}

#[test]
fn test_shift_box_extends_selection() {
    let mut c = select_tool();
    drag(&mut c, cell(0, 0), cell(1, 1));
    drag(&mut c, cell(3, 3).with_shift(), cell(3, 3).with_shift());

    assert_eq!(c.level().tile_selection.len(), 5);
    assert!(covers(&c, 0, 0));
    assert!(covers(&c, 3, 3));
}

#[test]
fn test_ctrl_box_subtracts_from_selection() {
    let mut c = select_tool();
    drag(&mut c, cell(0, 0), cell(2, 2));
    drag(&mut c, cell(3, 1).with_ctrl(), cell(1, 1).with_ctrl());

    assert_eq!(c.level().tile_selection.len(), 7);
    assert!(!covers(&c, 1, 1));
    assert!(!covers(&c, 2, 1));
    assert!(covers(&c, 0, 1));

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().tile_selection.len(), 9);
}

#[test]
fn test_drag_floats_and_moves_selection() {
    let mut c = select_tool();
    paint_block(&mut c, 0, 0, 2, 2, 5);
    drag(&mut c, cell(0, 0), cell(2, 2));
    drag(&mut c, cell(1, 1), cell(4, 4));

    let selection = &c.level().tile_selection;
    assert!(selection.is_floating());
    assert!(covers(&c, 4, 4));
    assert!(!covers(&c, 1, 1));
    assert_eq!(selection.origin(), TileCoord::new(3, 3));
    // Floated content has left the grid and is not yet written back.
    assert!(c.level().grid.is_empty());
    assert_eq!(c.history().undo_depth(), 3);
    assert_eq!(c.history().undo_name(), Some("Move Selection"));

    click(&mut c, secondary_cell(30, 30));
    assert!(c.level().tile_selection.is_empty());
    assert_eq!(c.level().grid.len(), 9);
    assert_eq!(top(&c, 4, 4), Some(TileId(5)));
    assert_eq!(top(&c, 0, 0), None);
    assert_eq!(c.history().undo_name(), Some("Deselect Tiles"));

    // Deselect, move, float, select.
    c.execute(CommandKey::Undo);
    assert!(c.level().tile_selection.is_floating());
    assert!(c.level().grid.is_empty());
    c.execute(CommandKey::Undo);
    assert!(covers(&c, 1, 1));
    c.execute(CommandKey::Undo);
    assert_eq!(c.level().tile_selection.mode(), SelectionMode::Selected);
    assert_eq!(top(&c, 1, 1), Some(TileId(5)));
    c.execute(CommandKey::Undo);
    assert!(c.level().tile_selection.is_empty());
    assert_eq!(c.level().grid.len(), 9);
    assert!(!c.history().can_undo());
}

#[test]
fn test_new_box_commits_floating_selection() {
    let mut c = select_tool();
    paint_block(&mut c, 0, 0, 2, 2, 5);
    drag(&mut c, cell(0, 0), cell(2, 2));
    drag(&mut c, cell(0, 0), cell(3, 3));
    assert!(c.level().tile_selection.is_floating());

    drag(&mut c, cell(10, 10), cell(11, 11));
    let selection = &c.level().tile_selection;
    assert_eq!(selection.mode(), SelectionMode::Selected);
    assert_eq!(selection.len(), 4);
    assert_eq!(top(&c, 3, 3), Some(TileId(5)));
    assert_eq!(top(&c, 5, 5), Some(TileId(5)));
    assert_eq!(c.level().grid.len(), 9);
}

#[test]
fn test_copy_and_paste_centres_floating_selection() {
    let mut c = select_tool();
    assert!(!c.can_execute(CommandKey::Copy));
    assert!(!c.can_execute(CommandKey::Paste));
    assert!(c.can_execute(CommandKey::SelectAll));

    paint_block(&mut c, 0, 0, 2, 2, 5);
    drag(&mut c, cell(0, 0), cell(2, 2));
    assert!(c.can_execute(CommandKey::Copy));
    assert!(c.execute(CommandKey::Copy));
    assert!(c.can_execute(CommandKey::Paste));
    // Copying leaves the level untouched.
    assert_eq!(c.history().undo_depth(), 1);

    assert!(c.execute(CommandKey::Paste));
    let selection = &c.level().tile_selection;
    assert!(selection.is_floating());
    assert_eq!(selection.len(), 9);
    assert!(covers(&c, 9, 9));
    assert!(covers(&c, 11, 11));
    assert_eq!(c.history().undo_name(), Some("Paste Tiles"));
    assert_eq!(c.level().grid.len(), 9);

    assert!(c.execute(CommandKey::SelectNone));
    assert!(c.level().tile_selection.is_empty());
    assert_eq!(c.level().grid.len(), 18);
    assert_eq!(top(&c, 10, 10), Some(TileId(5)));
}

#[test]
fn test_delete_clears_cells_and_undoes() {
    let mut c = select_tool();
    paint_block(&mut c, 0, 0, 2, 2, 5);
    drag(&mut c, cell(0, 0), cell(2, 2));

    assert!(c.execute(CommandKey::Delete));
    assert!(c.level().grid.is_empty());
    assert!(c.level().tile_selection.is_empty());
    assert_eq!(c.history().undo_name(), Some("Delete Tiles"));
    assert!(!c.can_execute(CommandKey::Delete));

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().grid.len(), 9);
    assert_eq!(c.level().tile_selection.len(), 9);
    assert_eq!(c.level().tile_selection.mode(), SelectionMode::Selected);
}

#[test]
fn test_cut_then_paste_moves_content() {
    let mut c = select_tool();
    paint_block(&mut c, 0, 0, 1, 1, 3);
    drag(&mut c, cell(0, 0), cell(1, 1));

    assert!(c.execute(CommandKey::Cut));
    assert!(c.level().grid.is_empty());
    assert_eq!(c.history().undo_name(), Some("Cut Tiles"));

    assert!(c.execute(CommandKey::Paste));
    c.execute(CommandKey::SelectNone);
    assert_eq!(c.level().grid.len(), 4);
    assert_eq!(top(&c, 9, 9), Some(TileId(3)));
    assert_eq!(top(&c, 10, 10), Some(TileId(3)));
}

#[test]
fn test_select_all_covers_grid_extent() {
    let mut c = select_tool();
    assert!(c.execute(CommandKey::SelectAll));
    assert_eq!(c.level().tile_selection.len(), 64 * 64);

    // Replacing an existing selection is recorded under the command's name.
    drag(&mut c, cell(0, 0), cell(0, 0));
    assert!(c.execute(CommandKey::SelectAll));
    assert_eq!(c.level().tile_selection.len(), 64 * 64);
    assert_eq!(c.history().undo_name(), Some("Select All"));
    c.execute(CommandKey::Undo);
    assert_eq!(c.level().tile_selection.len(), 1);
}

#[test]
fn test_switching_tool_commits_floating_selection() {
    let mut c = select_tool();
    paint_block(&mut c, 0, 0, 1, 1, 3);
    drag(&mut c, cell(0, 0), cell(1, 1));
    drag(&mut c, cell(0, 0), cell(4, 0));
    assert!(c.level().tile_selection.is_floating());

    c.set_tool(ToolKind::TileDraw);
    assert_eq!(c.level().tile_selection.mode(), SelectionMode::Inactive);
    assert_eq!(top(&c, 4, 0), Some(TileId(3)));
    assert_eq!(top(&c, 0, 0), None);
    assert_eq!(selection_boxes(&c), 0);
}

#[test]
fn test_undo_blocked_during_gesture() {
    let mut c = select_tool();
    drag(&mut c, cell(0, 0), cell(1, 1));
    assert!(c.can_execute(CommandKey::Undo));

    c.start_pointer_sequence(cell(6, 6));
    assert!(!c.can_execute(CommandKey::Undo));
    assert!(!c.execute(CommandKey::Undo));
    c.end_pointer_sequence(cell(7, 7));

    assert!(c.can_execute(CommandKey::Undo));
    assert_eq!(c.level().tile_selection.len(), 4);
}

#[test]
fn test_box_to_far_pointer_is_clamped_to_grid() {
    let mut c = select_tool();
    let far = PointerEventInfo::primary(1.0e11, 1.0e11);
    drag(&mut c, cell(60, 60), far);

    assert_eq!(c.level().tile_selection.coords().len(), 16);
    assert!(covers(&c, 63, 63));
    assert_eq!(c.history().undo_depth(), 1);
}
