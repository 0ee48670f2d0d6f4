use inkfield_core::{BoundingRect, Point};
use inkfield_designer::viewport::is_rect_visible;
use inkfield_designer::Viewport;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(400.0, 300.0);
    assert_eq!(vp.zoom_level(), 1.0);
    assert_eq!(vp.position(), Point::new(0.0, 0.0));
    assert_eq!(vp.screen_origin(), Point::new(0.0, 0.0));
}

#[test]
fn test_zoom_two_about_center() {
    let mut vp = Viewport::new(400.0, 300.0);
    assert!(vp.set_zoom_level(2.0));
    let position = vp.position();
    assert!((position.x + 200.0).abs() < 1e-9);
    assert!((position.y + 150.0).abs() < 1e-9);

    // The screen center still shows world (200, 150).
    let center = vp.pixel_to_world(200.0, 150.0);
    assert!((center.x - 200.0).abs() < 1e-9);
    assert!((center.y - 150.0).abs() < 1e-9);
}

#[test]
fn test_zoom_bounds_are_exclusive() {
    let mut vp = Viewport::new(400.0, 300.0);
    assert!(!vp.set_zoom_level(0.1));
    assert!(!vp.set_zoom_level(50.0));
    assert!(!vp.set_zoom_level(f64::NAN));
    assert_eq!(vp.zoom_level(), 1.0);
    assert!(vp.set_zoom_level(49.9));
}

#[test]
fn test_zoom_in_out_round_trip() {
    let mut vp = Viewport::new(400.0, 300.0);
    vp.pan_by(13.0, -7.0);
    let before = vp.position();
    assert!(vp.zoom_in());
    assert!(vp.zoom_out());
    assert!((vp.zoom_level() - 1.0).abs() < 1e-12);
    assert!((vp.position().x - before.x).abs() < 1e-9);
    assert!((vp.position().y - before.y).abs() < 1e-9);
}

#[test]
fn test_world_pixel_round_trip() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom_level(3.0);
    vp.pan_by(-40.0, 25.0);
    let world = Point::new(12.5, -33.0);
    let (px, py) = vp.world_to_pixel(world);
    let back = vp.pixel_to_world(px, py);
    assert!((back.x - world.x).abs() < 1e-9);
    assert!((back.y - world.y).abs() < 1e-9);
}

#[test]
fn test_edge_touching_rect_is_visible() {
    let origin = Point::new(0.0, 0.0);
    let touching_right = BoundingRect::from_corners(Point::new(400.0, 10.0), Point::new(450.0, 20.0));
    let touching_left = BoundingRect::from_corners(Point::new(-50.0, 10.0), Point::new(0.0, 20.0));
    let beyond = BoundingRect::from_corners(Point::new(400.5, 10.0), Point::new(450.0, 20.0));
    assert!(is_rect_visible(&touching_right, origin, 400.0, 300.0, 1.0));
    assert!(is_rect_visible(&touching_left, origin, 400.0, 300.0, 1.0));
    assert!(!is_rect_visible(&beyond, origin, 400.0, 300.0, 1.0));
}

#[test]
fn test_visibility_scales_with_zoom() {
    let mut vp = Viewport::new(400.0, 300.0);
    let rect = BoundingRect::from_corners(Point::new(380.0, 0.0), Point::new(390.0, 10.0));
    assert!(vp.is_rect_visible(&rect));
    vp.set_zoom_level(4.0);
    // Window now spans world x in [150, 250].
    assert!(!vp.is_rect_visible(&rect));
    vp.center_on(Point::new(385.0, 5.0));
    assert!(vp.is_rect_visible(&rect));
}

#[test]
fn test_ignores_degenerate_dimensions() {
    let mut vp = Viewport::new(400.0, 300.0);
    vp.set_dimensions(0.0, 100.0);
    assert_eq!((vp.width(), vp.height()), (400.0, 300.0));
    vp.set_dimensions(640.0, 480.0);
    assert_eq!((vp.width(), vp.height()), (640.0, 480.0));
}
