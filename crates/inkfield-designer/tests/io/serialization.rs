use inkfield_core::{Point, PortableError};
use inkfield_designer::{
    export_scene, import_str, load_from_file, Canvas, PortableScene, ShapeGeometry,
};

fn populated_canvas() -> Canvas {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut n = 100u32;
    let mut seeds = move || {
        n += 1;
        n
    };
    let geometries = [
        ShapeGeometry::Rectangle {
            point1: Point::new(40.0, 10.0),
            point2: Point::new(0.0, 30.0),
        },
        ShapeGeometry::Line {
            point1: Point::new(-5.5, 2.0),
            point2: Point::new(80.0, 90.25),
        },
        ShapeGeometry::Text {
            point1: Point::new(12.0, 200.0),
            text: "hello\nworld".to_string(),
        },
        ShapeGeometry::HandDrawn {
            paths: vec![
                Point::new(1.0, 1.0),
                Point::new(2.5, 3.0),
                Point::new(4.0, 2.0),
            ],
        },
        ShapeGeometry::Image {
            point1: Point::new(300.0, 10.0),
            image: "data:image/png;base64,AAAA".to_string(),
        },
    ];
    for geometry in &geometries {
        canvas.create_shape(geometry, &mut seeds).unwrap();
    }
    canvas
}

#[test]
fn test_export_import_export_is_byte_identical() {
    let canvas = populated_canvas();
    let first = canvas.export_portable().to_json_pretty().unwrap();

    let objects = import_str(&first).unwrap();
    let second = export_scene(&objects).to_json_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_load_portable_keeps_ids_and_order() {
    let source = populated_canvas();
    let exported = source.export_portable();

    let mut target = Canvas::new(400.0, 300.0);
    let report = target.load_portable(&exported.to_value().unwrap()).unwrap();
    assert_eq!(report.imported, 5);

    let ids: Vec<_> = target.objects().iter().map(|o| o.id().clone()).collect();
    let expected: Vec<_> = source.objects().iter().map(|o| o.id().clone()).collect();
    assert_eq!(ids, expected);
    assert_eq!(target.export_portable(), exported);
}

#[test]
fn test_wire_format_shape() {
    let scene = populated_canvas().export_portable();
    let value = scene.to_value().unwrap();
    assert_eq!(value["type"], "PortableContent");
    assert_eq!(value["version"], 1);

    let rect = &value["elements"][0];
    assert_eq!(rect["shape"], "rectangle");
    assert_eq!(rect["options"]["point1"], serde_json::json!([40.0, 10.0]));
    assert!(rect["options"]["strokeWidth"].is_u64());
    assert!(rect["options"]["fillStyle"].is_string());

    let image = &value["elements"][4];
    assert_eq!(image["shape"], "image");
    assert!(image["options"].get("point2").is_none());
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");

    let scene = populated_canvas().export_portable();
    scene.save_to_file(&path).unwrap();

    let reloaded = PortableScene::load_from_file(&path).unwrap();
    assert_eq!(reloaded, scene);

    let objects = load_from_file(&path).unwrap();
    assert_eq!(objects.len(), 5);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_from_file(dir.path().join("nope.json")).is_err());
}

#[test]
fn test_bad_json_file_reports_not_portable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"type\": ").unwrap();

    let err = PortableScene::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PortableError>(),
        Some(PortableError::NotPortable { .. })
    ));
}
