use crate::support::{click, controller, crate_class, drag, highlights, place, Harness};
use tilekit_core::{Point, Rect};
use tilekit_editor::tools::ObjectSelectTool;
use tilekit_editor::{
    CommandKey, LevelController, ObjectInstance, PointerEventInfo, PointerTool, SnapTarget,
    ToolKind,
};
use tilekit_settings::AutoScrollSettings;
use uuid::Uuid;

fn at(x: f64, y: f64) -> PointerEventInfo {
    PointerEventInfo::primary(x, y)
}

fn position(c: &LevelController, id: Uuid) -> Point {
    c.level().objects.get(id).map(|o| o.position).unwrap()
}

/// Three crates in a row at x = 0, 32, 64, bottom to top.
fn row() -> (LevelController, [Uuid; 3]) {
    let mut c = controller();
    let class = crate_class(&mut c);
    let ids = [
        place(&mut c, class, 0.0, 0.0),
        place(&mut c, class, 32.0, 0.0),
        place(&mut c, class, 64.0, 0.0),
    ];
    (c, ids)
}

#[test]
fn test_starts_as_default_tool() {
    let c = controller();
    assert_eq!(c.tool_kind(), ToolKind::ObjectSelect);
}

#[test]
fn test_click_selects_and_empty_click_clears() {
    let (mut c, _) = row();
    click(&mut c, at(8.0, 8.0));
    assert_eq!(highlights(&c), 1);

    click(&mut c, at(40.0, 8.0));
    assert_eq!(highlights(&c), 1);

    click(&mut c, at(200.0, 200.0));
    assert_eq!(highlights(&c), 0);
    // Clicks that move nothing leave no history.
    assert!(!c.history().can_undo());
}

#[test]
fn test_ctrl_click_toggles_membership() {
    let (mut c, _) = row();
    click(&mut c, at(8.0, 8.0));
    click(&mut c, at(40.0, 8.0).with_ctrl());
    assert_eq!(highlights(&c), 2);

    click(&mut c, at(8.0, 8.0).with_ctrl());
    assert_eq!(highlights(&c), 1);
}

#[test]
fn test_click_picks_topmost_object() {
    let mut c = controller();
    let class = crate_class(&mut c);
    let bottom = place(&mut c, class, 0.0, 0.0);
    let upper = place(&mut c, class, 8.0, 8.0);

    drag(&mut c, at(12.0, 12.0), at(22.0, 12.0));
    assert_eq!(position(&c, upper), Point::new(18.0, 8.0));
    assert_eq!(position(&c, bottom), Point::zero());
}

#[test]
fn test_drag_moves_selection_as_one_step() {
    let (mut c, [a, b, _]) = row();
    click(&mut c, at(8.0, 8.0));
    click(&mut c, at(40.0, 8.0).with_ctrl());
    drag(&mut c, at(4.0, 4.0), at(24.0, 14.0));

    assert_eq!(position(&c, a), Point::new(20.0, 10.0));
    assert_eq!(position(&c, b), Point::new(52.0, 10.0));
    assert_eq!(c.history().undo_depth(), 1);
    assert_eq!(c.history().undo_name(), Some("Move Objects"));
    assert_eq!(highlights(&c), 2);

    assert!(c.execute(CommandKey::Undo));
    assert_eq!(position(&c, a), Point::zero());
    assert_eq!(position(&c, b), Point::new(32.0, 0.0));

    // The drag baseline follows undo, so a new drag starts from the restored spot.
    drag(&mut c, at(4.0, 4.0), at(5.0, 4.0));
    assert_eq!(position(&c, a), Point::new(1.0, 0.0));
}

#[test]
fn test_drag_snaps_grabbed_object() {
    let (mut c, [a, _, _]) = row();
    c.set_snap_target(SnapTarget::Origin);
    drag(&mut c, at(4.0, 4.0), at(25.0, 10.0));
    assert_eq!(position(&c, a), Point::new(16.0, 0.0));
}

#[test]
fn test_box_selects_overlapping_objects() {
    let (mut c, _) = row();
    let class = crate_class(&mut c);
    place(&mut c, class, 100.0, 100.0);

    drag(&mut c, at(50.0, 20.0), at(-4.0, -4.0));
    assert_eq!(highlights(&c), 2);

    // A box without ctrl replaces the selection.
    drag(&mut c, at(90.0, 90.0), at(110.0, 110.0));
    assert_eq!(highlights(&c), 1);
}

#[test]
fn test_cut_and_paste_centres_on_view() {
    let mut c = controller();
    let class = crate_class(&mut c);
    let original = place(&mut c, class, 40.0, 40.0);

    click(&mut c, at(44.0, 44.0));
    assert!(c.can_execute(CommandKey::Cut));
    assert!(c.execute(CommandKey::Cut));
    assert!(c.level().objects.is_empty());
    assert_eq!(highlights(&c), 0);

    assert!(c.can_execute(CommandKey::Paste));
    assert!(c.execute(CommandKey::Paste));
    let pasted: Vec<&ObjectInstance> = c.level().objects.iter().collect();
    assert_eq!(pasted.len(), 1);
    assert_ne!(pasted[0].id, original);
    assert_eq!(pasted[0].position, Point::new(152.0, 152.0));
    assert_eq!(highlights(&c), 1);

    c.execute(CommandKey::Undo);
    assert!(c.level().objects.is_empty());
    assert_eq!(highlights(&c), 0);
    c.execute(CommandKey::Undo);
    assert_eq!(position(&c, original), Point::new(40.0, 40.0));
}

#[test]
fn test_copy_keeps_objects() {
    let (mut c, _) = row();
    click(&mut c, at(8.0, 8.0));
    assert!(c.execute(CommandKey::Copy));
    assert_eq!(c.level().objects.len(), 3);
    assert!(!c.history().can_undo());
}

#[test]
fn test_bring_to_front_and_undo() {
    let (mut c, [a, b, d]) = row();
    click(&mut c, at(8.0, 8.0));
    assert!(c.execute(CommandKey::BringToFront));
    assert_eq!(c.level().objects.order(), vec![b, d, a]);
    assert_eq!(c.history().undo_name(), Some("Reorder Objects"));

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().objects.order(), vec![a, b, d]);
}

#[test]
fn test_group_reorder_keeps_relative_order() {
    let (mut c, [a, b, d]) = row();
    click(&mut c, at(8.0, 8.0));
    click(&mut c, at(40.0, 8.0).with_ctrl());

    c.execute(CommandKey::BringForward);
    assert_eq!(c.level().objects.order(), vec![d, a, b]);

    c.execute(CommandKey::SendToBack);
    assert_eq!(c.level().objects.order(), vec![a, b, d]);

    c.execute(CommandKey::BringToFront);
    assert_eq!(c.level().objects.order(), vec![d, a, b]);

    c.execute(CommandKey::SendBackward);
    assert_eq!(c.level().objects.order(), vec![a, b, d]);
}

#[test]
fn test_delete_and_undo_restores_z_index() {
    let (mut c, [a, b, d]) = row();
    assert!(!c.can_execute(CommandKey::Delete));
    click(&mut c, at(40.0, 8.0));
    assert!(c.execute(CommandKey::Delete));
    assert_eq!(c.level().objects.order(), vec![a, d]);
    assert_eq!(highlights(&c), 0);

    c.execute(CommandKey::Undo);
    assert_eq!(c.level().objects.order(), vec![a, b, d]);
}

#[test]
fn test_select_all_and_none() {
    let mut empty = controller();
    assert!(!empty.can_execute(CommandKey::SelectAll));

    let (mut c, _) = row();
    assert!(c.execute(CommandKey::SelectAll));
    assert_eq!(highlights(&c), 3);
    assert!(c.execute(CommandKey::SelectNone));
    assert_eq!(highlights(&c), 0);
    assert!(!c.can_execute(CommandKey::SelectNone));
}

#[test]
fn test_switching_tool_clears_highlights() {
    let (mut c, _) = row();
    click(&mut c, at(8.0, 8.0));
    c.set_tool(ToolKind::TileDraw);
    assert_eq!(highlights(&c), 0);
    assert_eq!(c.level().objects.len(), 3);
}

#[test]
fn test_tool_state_through_gesture() {
    let mut h = Harness::new();
    let class = h.level.objects.pool_mut().register(
        "crate",
        Rect::new(0.0, 0.0, 16.0, 16.0),
        Rect::new(0.0, 0.0, 16.0, 16.0),
        Point::zero(),
    );
    let instance = ObjectInstance::new(class, Point::new(16.0, 16.0));
    let id = instance.id;
    h.level.objects.push(instance);

    let mut tool = ObjectSelectTool::new(h.sink(), &AutoScrollSettings::default());
    tool.start_pointer_sequence(&mut h.ctx(), at(20.0, 20.0));
    assert!(tool.is_moving());
    assert!(tool.selection().contains(id));

    tool.update_pointer_sequence(&mut h.ctx(), at(30.0, 20.0));
    tool.end_pointer_sequence(&mut h.ctx(), at(30.0, 20.0));
    assert!(!tool.is_moving());
    assert_eq!(
        h.level.objects.get(id).map(|o| o.position),
        Some(Point::new(26.0, 16.0))
    );
    assert_eq!(h.overlay.borrow().len(), 1);

    tool.start_pointer_sequence(&mut h.ctx(), at(200.0, 200.0));
    assert!(tool.is_box_selecting());
    assert!(tool.selection().is_empty());
    tool.cancel(&mut h.ctx());
    assert!(h.overlay.borrow().is_empty());
}
