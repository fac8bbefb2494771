use crate::support::{cell, click, controller, paint_block, top};
use tilekit_core::TileCoord;
use tilekit_editor::tools::tile_fill::flood_fill;
use tilekit_editor::{CommandKey, TileGrid, TileId, TileStack, ToolKind};

fn walled_grid() -> TileGrid {
    // 5x5 with a full-height wall in column 2.
    let mut grid = TileGrid::new(5, 5, 16, 16);
    for y in 0..5 {
        grid.add_tile(TileCoord::new(2, y), TileId(9));
    }
    grid
}

#[test]
fn test_fill_stops_at_different_stacks() {
    let mut grid = walled_grid();
    let edits = flood_fill(&mut grid, TileCoord::new(0, 0), TileStack::single(TileId(1)));
    assert_eq!(edits.len(), 10);
    assert_eq!(
        grid.tile_at(TileCoord::new(1, 4)),
        Some(&TileStack::single(TileId(1)))
    );
    assert!(grid.tile_at(TileCoord::new(3, 0)).is_none());
}

#[test]
fn test_fill_replaces_matching_stacks() {
    let mut grid = walled_grid();
    let edits = flood_fill(&mut grid, TileCoord::new(2, 2), TileStack::single(TileId(4)));
    assert_eq!(edits.len(), 5);
    assert!(edits
        .iter()
        .all(|e| e.before == Some(TileStack::single(TileId(9)))));
}

#[test]
fn test_fill_with_same_stack_is_noop() {
    let mut grid = walled_grid();
    let edits = flood_fill(&mut grid, TileCoord::new(2, 0), TileStack::single(TileId(9)));
    assert!(edits.is_empty());
}

#[test]
fn test_fill_outside_grid_is_noop() {
    let mut grid = walled_grid();
    assert!(flood_fill(&mut grid, TileCoord::new(-1, 0), TileStack::single(TileId(1))).is_empty());
}

#[test]
fn test_fill_tool_is_one_history_entry() {
    let mut c = controller();
    // Enclose cells (1..=3, 1..=3) in a ring.
    paint_block(&mut c, 0, 0, 4, 0, 9);
    paint_block(&mut c, 0, 4, 4, 4, 9);
    paint_block(&mut c, 0, 1, 0, 3, 9);
    paint_block(&mut c, 4, 1, 4, 3, 9);
    c.set_tool(ToolKind::TileFill);
    c.set_active_tile(Some(TileId(2)));
    click(&mut c, cell(2, 2));

    assert_eq!(c.level().grid.len(), 16 + 9);
    assert_eq!(top(&c, 1, 1), Some(TileId(2)));
    assert_eq!(top(&c, 5, 5), None);
    assert_eq!(c.history().undo_name(), Some("Fill"));

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().grid.len(), 16);
}

#[test]
fn test_fill_without_tile_does_nothing() {
    let mut c = controller();
    c.set_tool(ToolKind::TileFill);
    click(&mut c, cell(2, 2));
    assert!(c.level().grid.is_empty());
    assert!(!c.history().can_undo());
}
