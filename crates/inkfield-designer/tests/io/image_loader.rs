use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use inkfield_core::Point;
use inkfield_designer::{load_pending, Canvas, DefaultImageLoader, ShapeGeometry};

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn add_image(canvas: &mut Canvas, source: String) {
    canvas
        .create_shape(
            &ShapeGeometry::Image {
                point1: Point::new(10.0, 20.0),
                image: source,
            },
            &mut || 1u32,
        )
        .unwrap();
}

#[test]
fn test_load_pending_sizes_image_by_zoom() {
    let mut canvas = Canvas::new(400.0, 300.0);
    canvas.set_zoom_level(2.0);
    add_image(
        &mut canvas,
        format!("data:image/png;base64,{}", STANDARD.encode(png(40, 30))),
    );

    assert_eq!(load_pending(&mut canvas, &DefaultImageLoader::new()), 1);
    assert!(canvas.pending_image_loads().is_empty());

    let object = &canvas.objects()[0];
    assert!(object.shape().as_image().unwrap().is_ready());
    let rect = object.bounding_rect();
    assert_eq!(rect.top_left(), Point::new(10.0, 20.0));
    assert_eq!(rect.bottom_right(), Point::new(30.0, 35.0));
}

#[test]
fn test_load_pending_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tile.png"), png(8, 8)).unwrap();

    let mut canvas = Canvas::new(400.0, 300.0);
    add_image(&mut canvas, "tile.png".to_string());
    add_image(&mut canvas, "absent.png".to_string());

    let loader = DefaultImageLoader::with_base_dir(dir.path());
    assert_eq!(load_pending(&mut canvas, &loader), 1);

    // The failed load is settled too; the object keeps its placeholder.
    assert!(canvas.pending_image_loads().is_empty());
    let ready: Vec<bool> = canvas
        .objects()
        .iter()
        .map(|o| o.shape().as_image().unwrap().is_ready())
        .collect();
    assert_eq!(ready, vec![true, false]);
}
