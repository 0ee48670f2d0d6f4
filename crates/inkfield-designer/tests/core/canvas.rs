use inkfield_core::{thread_safe_rw, Point, PortableError, SceneError};
use inkfield_designer::{Canvas, RandomSeeds, ShapeGeometry, ShapeId};
use inkfield_settings::Config;
use serde_json::json;

fn rect_at(canvas: &mut Canvas, seeds: &mut RandomSeeds, x: f64, y: f64) -> ShapeId {
    canvas
        .create_shape(
            &ShapeGeometry::Rectangle {
                point1: Point::new(x, y),
                point2: Point::new(x + 20.0, y + 20.0),
            },
            seeds,
        )
        .unwrap()
}

#[test]
fn test_create_assigns_unique_ids_and_seeds() {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut seeds = RandomSeeds::with_seed(11);
    let a = rect_at(&mut canvas, &mut seeds, 0.0, 0.0);
    let b = rect_at(&mut canvas, &mut seeds, 0.0, 0.0);
    assert_ne!(a, b);

    let seed_a = canvas.get(&a).unwrap().shape().seed().unwrap();
    let seed_b = canvas.get(&b).unwrap().shape().seed().unwrap();
    assert!(seed_a >= 1 && seed_a < 1 << 31);
    assert_ne!(seed_a, seed_b);
}

#[test]
fn test_select_at_picks_topmost() {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut seeds = RandomSeeds::with_seed(1);
    let _bottom = rect_at(&mut canvas, &mut seeds, 0.0, 0.0);
    let top = rect_at(&mut canvas, &mut seeds, 10.0, 10.0);

    assert_eq!(canvas.select_at(Point::new(15.0, 15.0)), Some(top.clone()));
    assert!(canvas.is_selected(&top));
    assert_eq!(canvas.select_at(Point::new(300.0, 300.0)), None);
    assert!(canvas.selection().is_empty());
}

#[test]
fn test_move_object_to_is_idempotent() {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut seeds = RandomSeeds::with_seed(2);
    let id = rect_at(&mut canvas, &mut seeds, 3.0, 4.0);

    canvas.move_object_to(&id, Point::new(50.0, 60.0)).unwrap();
    let once = canvas.get(&id).unwrap().clone();
    canvas.move_object_to(&id, Point::new(50.0, 60.0)).unwrap();
    assert_eq!(canvas.get(&id).unwrap(), &once);
    assert_eq!(once.bounding_rect().top_left(), Point::new(50.0, 60.0));

    let missing = ShapeId::from("missing");
    assert!(matches!(
        canvas.move_object_to(&missing, Point::default()),
        Err(SceneError::ShapeNotFound { .. })
    ));
}

#[test]
fn test_soft_delete_then_unmark() {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut seeds = RandomSeeds::with_seed(3);
    let id = rect_at(&mut canvas, &mut seeds, 0.0, 0.0);

    canvas.mark_for_deletion(&id).unwrap();
    assert!(canvas.export_portable().elements.is_empty());
    // Still drawn while staged.
    assert_eq!(canvas.visible_ids(), &[id.clone()]);

    canvas.unmark(&id).unwrap();
    assert_eq!(canvas.purge_deleted(), 0);
    assert_eq!(canvas.export_portable().elements.len(), 1);
}

#[test]
fn test_failed_import_leaves_scene_untouched() {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut seeds = RandomSeeds::with_seed(4);
    let id = rect_at(&mut canvas, &mut seeds, 0.0, 0.0);
    canvas.set_selection([id.clone()]);
    let before = canvas.export_portable().to_json_pretty().unwrap();

    let payload = json!({
        "type": "PortableContent",
        "version": 1,
        "elements": [
            { "id": "ok", "shape": "handdrawn", "options": {
                "paths": [[0.0, 0.0], [1.0, 1.0]],
                "opacity": 1.0, "stroke": "#000000", "strokeWidth": 1, "zoom": 1.0
            } },
            { "id": "bad", "shape": "hexagon", "options": {} }
        ]
    });
    let err = canvas.load_portable(&payload).unwrap_err();
    assert!(matches!(err, PortableError::UnknownVariant { ref tag } if tag == "hexagon"));

    assert_eq!(canvas.export_portable().to_json_pretty().unwrap(), before);
    assert_eq!(canvas.selection(), &[id]);
}

#[test]
fn test_load_portable_replaces_scene_and_issues_image_loads() {
    let mut canvas = Canvas::new(400.0, 300.0);
    let mut seeds = RandomSeeds::with_seed(5);
    rect_at(&mut canvas, &mut seeds, 0.0, 0.0);

    let report = canvas
        .load_portable(&json!({
            "type": "PortableContent",
            "version": 1,
            "elements": [
                { "id": "pic", "shape": "image", "options": {
                    "point1": [10.0, 10.0], "image": "pic.png",
                    "opacity": 1.0, "stroke": "#000000", "strokeWidth": 1, "zoom": 1.0
                } }
            ]
        }))
        .unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.image_loads.len(), 1);
    assert_eq!(report.image_loads[0].source, "pic.png");
    assert_eq!(canvas.len(), 1);
    assert_eq!(canvas.pending_image_loads(), report.image_loads);
}

#[test]
fn test_from_config_uses_canvas_settings() {
    let mut config = Config::default();
    config.canvas.width = 800.0;
    config.canvas.height = 600.0;
    config.canvas.zoom = 2.0;
    config.style.stroke = "#123456".to_string();

    let mut canvas = Canvas::from_config(&config);
    assert_eq!(canvas.viewport().width(), 800.0);
    assert_eq!(canvas.viewport().zoom_level(), 2.0);

    let mut seeds = RandomSeeds::with_seed(6);
    let id = rect_at(&mut canvas, &mut seeds, 0.0, 0.0);
    let options = canvas.get(&id).unwrap().options();
    assert_eq!(options.shared().stroke, "#123456");
    assert_eq!(options.shared().zoom, 2.0);
}

#[test]
fn test_shared_canvas_single_writer() {
    let canvas = thread_safe_rw(Canvas::new(400.0, 300.0));
    let worker = {
        let canvas = canvas.clone();
        std::thread::spawn(move || {
            let mut seeds = RandomSeeds::with_seed(7);
            let mut guard = canvas.write();
            rect_at(&mut guard, &mut seeds, 0.0, 0.0)
        })
    };
    let id = worker.join().unwrap();
    assert!(canvas.read().get(&id).is_some());
}
