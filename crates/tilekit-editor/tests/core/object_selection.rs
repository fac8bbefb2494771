use tilekit_core::{Point, Rect};
use tilekit_editor::{
    CommandHistory, EditorCommand, HitTest, Level, ObjectInstance, ObjectLayer, ObjectPool,
    ObjectSelection, ObjectSelectionPayload, OverlayLayer, OverlayMarker, TileGrid, ZOrder,
};
use uuid::Uuid;

fn pool() -> ObjectPool {
    let mut pool = ObjectPool::new();
    // 16x16 sprite with its origin at the bottom centre and a smaller mask.
    pool.register(
        "crate",
        Rect::new(0.0, 0.0, 16.0, 16.0),
        Rect::new(4.0, 8.0, 8.0, 8.0),
        Point::new(8.0, 16.0),
    );
    pool
}

fn layer_with(positions: &[(f64, f64)]) -> (ObjectLayer, Vec<Uuid>) {
    let pool = pool();
    let class = pool.by_name("crate").map(|c| c.id).expect("registered");
    let mut layer = ObjectLayer::new(pool);
    let ids = positions
        .iter()
        .map(|&(x, y)| {
            let instance = ObjectInstance::new(class, Point::new(x, y));
            let id = instance.id;
            layer.push(instance);
            id
        })
        .collect();
    (layer, ids)
}

#[test]
fn test_bounds_follow_origin() {
    let (layer, ids) = layer_with(&[(8.0, 16.0)]);
    let instance = layer.get(ids[0]).unwrap();
    assert_eq!(
        layer.bounds_of(instance, HitTest::Coarse),
        Some(Rect::new(0.0, 0.0, 16.0, 16.0))
    );
    assert_eq!(
        layer.bounds_of(instance, HitTest::Mask),
        Some(Rect::new(4.0, 8.0, 8.0, 8.0))
    );
}

#[test]
fn test_hit_test_prefers_topmost() {
    let (layer, ids) = layer_with(&[(8.0, 16.0), (12.0, 16.0)]);
    let hits = layer.objects_at_point(Point::new(10.0, 4.0), HitTest::Coarse);
    assert_eq!(hits, vec![ids[1], ids[0]]);
    // The mask of the first object does not reach y = 4.
    let hits = layer.objects_at_point(Point::new(6.0, 4.0), HitTest::Mask);
    assert!(hits.is_empty());
}

#[test]
fn test_region_query() {
    let (layer, ids) = layer_with(&[(8.0, 16.0), (108.0, 16.0)]);
    let hits = layer.objects_in_region(Rect::new(90.0, 0.0, 40.0, 40.0), HitTest::Coarse);
    assert_eq!(hits, vec![ids[1]]);
}

#[test]
fn test_selection_highlights_follow_entries() {
    let (layer, ids) = layer_with(&[(8.0, 16.0), (40.0, 16.0)]);
    let mut overlay = OverlayLayer::new();
    let mut selection = ObjectSelection::new();
    selection.add(&layer, &mut overlay, ids[0]);
    selection.add(&layer, &mut overlay, ids[1]);
    assert_eq!(overlay.len(), 2);
    assert!(overlay
        .markers()
        .iter()
        .all(|(_, m)| matches!(m, OverlayMarker::ObjectHighlight { .. })));

    assert!(selection.remove(&mut overlay, ids[0]));
    assert_eq!(overlay.len(), 1);
    assert_eq!(selection.ids(), vec![ids[1]]);
}

#[test]
fn test_capture_locations_resets_baseline() {
    let (mut layer, ids) = layer_with(&[(8.0, 16.0)]);
    let mut overlay = OverlayLayer::new();
    let mut selection = ObjectSelection::new();
    selection.add(&layer, &mut overlay, ids[0]);
    layer.set_position(ids[0], Point::new(20.0, 20.0));
    assert_eq!(
        selection.get(ids[0]).map(|e| e.initial_location),
        Some(Point::new(8.0, 16.0))
    );
    selection.capture_locations(&layer);
    assert_eq!(
        selection.get(ids[0]).map(|e| e.initial_location),
        Some(Point::new(20.0, 20.0))
    );
}

#[test]
fn test_payload_resolves_class_names() {
    let (layer, ids) = layer_with(&[(8.0, 16.0), (40.0, 16.0)]);
    let mut overlay = OverlayLayer::new();
    let mut selection = ObjectSelection::new();
    selection.add(&layer, &mut overlay, ids[1]);
    let payload = selection.to_payload(&layer);
    assert_eq!(payload.objects.len(), 1);
    assert_eq!(payload.objects[0].class, "crate");

    let restored = payload.clone().into_instances(layer.pool());
    assert_eq!(restored.len(), 1);
    assert_ne!(restored[0].id, ids[1]);
    assert_eq!(restored[0].position, Point::new(40.0, 16.0));

    // Unknown classes are dropped.
    assert!(payload.into_instances(&ObjectPool::new()).is_empty());
}

#[test]
fn test_payload_json_shape() {
    let json = r#"{"objects":[{"class":"crate","x":1.0,"y":2.0}]}"#;
    let payload: ObjectSelectionPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.objects[0].x, 1.0);
    assert!(!payload.is_empty());
}

#[test]
fn test_reorder_command_round_trip() {
    let (layer, ids) = layer_with(&[(8.0, 16.0), (40.0, 16.0), (72.0, 16.0)]);
    let mut level = Level::new(TileGrid::new(8, 8, 16, 16), ObjectPool::new());
    level.objects = layer;
    let mut history = CommandHistory::new(0);

    history.execute(
        EditorCommand::reorder_objects(vec![(ids[0], ZOrder::Front)]),
        &mut level,
    );
    assert_eq!(level.objects.order(), vec![ids[1], ids[2], ids[0]]);
    history.undo(&mut level);
    assert_eq!(level.objects.order(), ids);
}

#[test]
fn test_remove_command_restores_index() {
    let (layer, ids) = layer_with(&[(8.0, 16.0), (40.0, 16.0), (72.0, 16.0)]);
    let mut level = Level::new(TileGrid::new(8, 8, 16, 16), ObjectPool::new());
    level.objects = layer;
    let mut history = CommandHistory::new(0);

    history.execute(EditorCommand::remove_objects(vec![ids[0], ids[2]]), &mut level);
    assert_eq!(level.objects.order(), vec![ids[1]]);
    history.undo(&mut level);
    assert_eq!(level.objects.order(), ids);
}
