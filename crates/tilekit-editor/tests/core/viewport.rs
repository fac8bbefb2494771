use tilekit_core::{Point, Rect};
use tilekit_editor::Viewport;
use tilekit_settings::ViewSettings;

fn viewport() -> Viewport {
    Viewport::new(400.0, 300.0).with_content(Rect::new(0.0, 0.0, 1000.0, 1000.0))
}

#[test]
fn test_viewport_creation() {
    let vp = viewport();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.scroll_offset(), Point::zero());
    assert_eq!(vp.center(), Point::new(200.0, 150.0));
}

#[test]
fn test_zoom_is_clamped() {
    let mut vp = viewport();
    vp.set_zoom(100.0);
    assert_eq!(vp.zoom(), 50.0);
    vp.set_zoom(0.001);
    assert_eq!(vp.zoom(), 0.1);
    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), 0.1);
}

#[test]
fn test_pixel_world_round_trip() {
    let mut vp = viewport();
    vp.set_zoom(2.0);
    vp.scroll_to(Point::new(100.0, 50.0));
    let world = vp.pixel_to_world(40.0, 20.0);
    assert_eq!(world, Point::new(120.0, 60.0));
    assert_eq!(vp.world_to_pixel(world), (40.0, 20.0));
}

#[test]
fn test_scroll_is_limited_to_content() {
    let mut vp = viewport();
    vp.scroll_to(Point::new(5000.0, -20.0));
    assert_eq!(vp.scroll_offset(), Point::new(600.0, 0.0));

    let applied = vp.scroll_by(50.0, 30.0);
    assert_eq!(applied, Point::new(0.0, 30.0));
}

#[test]
fn test_zoom_to_point_keeps_anchor() {
    let mut vp = viewport();
    vp.scroll_to(Point::new(100.0, 100.0));
    let before = vp.pixel_to_world(200.0, 100.0);
    vp.zoom_to_point(2.0, 200.0, 100.0);
    let after = vp.pixel_to_world(200.0, 100.0);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_center_on() {
    let mut vp = viewport();
    vp.center_on(Point::new(500.0, 500.0));
    assert_eq!(vp.center(), Point::new(500.0, 500.0));
    assert_eq!(vp.visible_region(), Rect::new(300.0, 350.0, 400.0, 300.0));
}

#[test]
fn test_from_settings() {
    let settings = ViewSettings {
        width: 640.0,
        height: 480.0,
        zoom: 2.0,
    };
    let vp = Viewport::from_settings(&settings, Rect::new(0.0, 0.0, 2048.0, 2048.0));
    assert_eq!(vp.zoom(), 2.0);
    assert_eq!(vp.visible_region().width, 320.0);
    assert!(vp.to_string().contains("2.00x"));
}
