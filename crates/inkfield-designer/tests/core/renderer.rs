use inkfield_core::{FillStyle, Point};
use inkfield_designer::{
    render_canvas, Canvas, OptionsPatch, Primitive, RecordingContext, RenderCall, ShapeGeometry,
};

fn fixed_seed() -> impl FnMut() -> u32 {
    || 7u32
}

fn blue_square(canvas: &mut Canvas) {
    let id = canvas
        .create_shape(
            &ShapeGeometry::Rectangle {
                point1: Point::new(100.0, 100.0),
                point2: Point::new(200.0, 200.0),
            },
            &mut fixed_seed(),
        )
        .unwrap();
    canvas.set_selection([id]);
    canvas
        .regenerate_selected(
            &OptionsPatch::new()
                .with_fill("#0000ff")
                .with_fill_style(FillStyle::Solid),
        )
        .unwrap();
}

#[test]
fn test_render_canvas_fills_interior() {
    let mut canvas = Canvas::new(400.0, 300.0);
    blue_square(&mut canvas);

    let image = render_canvas(&canvas);
    assert_eq!(image.dimensions(), (400, 300));
    assert_eq!(image.get_pixel(150, 150).0, [0, 0, 255, 255]);
    assert_eq!(image.get_pixel(20, 20).0, [255, 255, 255, 255]);
}

#[test]
fn test_render_canvas_applies_viewport() {
    let mut canvas = Canvas::new(400.0, 300.0);
    blue_square(&mut canvas);
    canvas.set_zoom_level(2.0);

    // World (150, 150) lands on pixel (100, 150) at zoom 2 about the center.
    let image = render_canvas(&canvas);
    assert_eq!(image.get_pixel(100, 150).0, [0, 0, 255, 255]);
}

#[test]
fn test_recording_sees_only_visible_objects() {
    let mut canvas = Canvas::new(400.0, 300.0);
    blue_square(&mut canvas);
    canvas
        .create_shape(
            &ShapeGeometry::Rectangle {
                point1: Point::new(5000.0, 5000.0),
                point2: Point::new(5010.0, 5010.0),
            },
            &mut fixed_seed(),
        )
        .unwrap();
    canvas.prepare_render();

    let mut ctx = RecordingContext::new();
    canvas.render(&mut ctx);
    assert_eq!(ctx.alphas(), vec![1.0]);
    assert!(matches!(ctx.calls.first(), Some(RenderCall::GlobalAlpha(_))));
}

#[test]
fn test_pending_image_renders_placeholder() {
    let mut canvas = Canvas::new(400.0, 300.0);
    canvas
        .create_shape(
            &ShapeGeometry::Image {
                point1: Point::new(10.0, 10.0),
                image: "later.png".to_string(),
            },
            &mut fixed_seed(),
        )
        .unwrap();

    let mut ctx = RecordingContext::new();
    canvas.render(&mut ctx);
    assert!(ctx
        .primitives()
        .all(|p| matches!(p, Primitive::Placeholder { .. })));
    assert_eq!(ctx.primitives().count(), 1);
}
