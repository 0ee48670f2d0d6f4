use inkfield_core::{FontFamily, Point};
use inkfield_designer::{
    fonts, DesignerShape, DrawingObject, ElementStyle, ShapeGeometry, ShapeKind,
};
use proptest::prelude::*;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

fn coord() -> impl Strategy<Value = f64> + Clone {
    -10_000.0..10_000.0f64
}

fn geometry() -> impl Strategy<Value = ShapeGeometry> {
    let point = (coord(), coord()).prop_map(|(x, y)| Point::new(x, y));
    prop_oneof![
        (point.clone(), point.clone())
            .prop_map(|(point1, point2)| ShapeGeometry::Rectangle { point1, point2 }),
        (point.clone(), point.clone())
            .prop_map(|(point1, point2)| ShapeGeometry::Line { point1, point2 }),
        point.clone().prop_map(|point1| ShapeGeometry::Text {
            point1,
            text: "two\nlines".to_string(),
        }),
        prop::collection::vec(point.clone(), 1..12)
            .prop_map(|paths| ShapeGeometry::HandDrawn { paths }),
        point.prop_map(|point1| ShapeGeometry::Image {
            point1,
            image: "tile.png".to_string(),
        }),
    ]
}

proptest! {
    #[test]
    fn bounding_rect_is_normalized(geometry in geometry()) {
        let obj = DrawingObject::create(&geometry, &ElementStyle::default()).unwrap();
        let rect = obj.bounding_rect();
        prop_assert!(rect.top_left().x <= rect.bottom_right().x);
        prop_assert!(rect.top_left().y <= rect.bottom_right().y);
    }

    #[test]
    fn moves_compose(
        geometry in geometry(),
        a in (coord(), coord()),
        b in (coord(), coord()),
    ) {
        let mut stepwise = DrawingObject::create(&geometry, &ElementStyle::default()).unwrap();
        let mut direct = stepwise.clone();
        stepwise.move_by(a.0, a.1).move_by(b.0, b.1);
        direct.move_by(a.0 + b.0, a.1 + b.1);
        prop_assert!(close(stepwise.bounding_rect().top_left(), direct.bounding_rect().top_left()));
        prop_assert!(close(
            stepwise.bounding_rect().bottom_right(),
            direct.bounding_rect().bottom_right()
        ));
    }

    #[test]
    fn move_to_is_idempotent(geometry in geometry(), target in (coord(), coord())) {
        let target = Point::new(target.0, target.1);
        let mut obj = DrawingObject::create(&geometry, &ElementStyle::default()).unwrap();
        obj.move_to(target);
        let once = obj.bounding_rect();
        obj.move_to(target);
        prop_assert!(close(once.top_left(), obj.bounding_rect().top_left()));
        prop_assert!(close(once.bottom_right(), obj.bounding_rect().bottom_right()));
        prop_assert!(close(obj.shape().anchor(), target));
    }
}

#[test]
fn test_rectangle_hit_inside_and_outside() {
    let obj = DrawingObject::create(
        &ShapeGeometry::Rectangle {
            point1: Point::new(30.0, 40.0),
            point2: Point::new(-10.0, 0.0),
        },
        &ElementStyle::default(),
    )
    .unwrap();
    assert!(obj.is_hit(Point::new(0.0, 20.0)));
    assert!(obj.is_hit(Point::new(29.5, 39.5)));
    assert!(!obj.is_hit(Point::new(31.0, 20.0)));
    assert!(!obj.is_hit(Point::new(0.0, -0.5)));
}

#[test]
fn test_line_hit_uses_segment_distance() {
    let obj = DrawingObject::create(
        &ShapeGeometry::Line {
            point1: Point::new(0.0, 0.0),
            point2: Point::new(100.0, 100.0),
        },
        &ElementStyle::default(),
    )
    .unwrap();
    assert!(obj.is_hit(Point::new(50.0, 50.0)));
    // Inside the bounding box but far from the stroke.
    assert!(!obj.is_hit(Point::new(90.0, 10.0)));
}

#[test]
fn test_each_geometry_creates_its_kind() {
    let cases = [
        (
            ShapeGeometry::Rectangle {
                point1: Point::new(0.0, 0.0),
                point2: Point::new(1.0, 1.0),
            },
            ShapeKind::Rectangle,
        ),
        (
            ShapeGeometry::HandDrawn {
                paths: vec![Point::new(1.0, 1.0)],
            },
            ShapeKind::HandDrawn,
        ),
        (
            ShapeGeometry::Image {
                point1: Point::new(3.0, 4.0),
                image: "a.png".to_string(),
            },
            ShapeKind::Image,
        ),
    ];
    for (geometry, kind) in cases {
        let obj = DrawingObject::create(&geometry, &ElementStyle::default()).unwrap();
        assert_eq!(obj.kind(), kind);
        assert!(!obj.will_delete);
    }
}

#[test]
fn test_unloaded_image_has_degenerate_bounds() {
    let obj = DrawingObject::create(
        &ShapeGeometry::Image {
            point1: Point::new(3.0, 4.0),
            image: "a.png".to_string(),
        },
        &ElementStyle::default(),
    )
    .unwrap();
    assert_eq!(obj.bounding_rect().width(), 0.0);
    assert_eq!(obj.bounding_rect().top_left(), Point::new(3.0, 4.0));
}

#[test]
fn test_empty_freehand_is_rejected() {
    assert!(DrawingObject::create(
        &ShapeGeometry::HandDrawn { paths: Vec::new() },
        &ElementStyle::default()
    )
    .is_err());
}

#[test]
fn test_text_bounds_follow_glyph_advances() {
    let style = ElementStyle {
        font: FontFamily::Hand,
        font_size: 24,
        ..ElementStyle::default()
    };
    let width = |text: &str| {
        DrawingObject::create(
            &ShapeGeometry::Text {
                point1: Point::new(0.0, 0.0),
                text: text.to_string(),
            },
            &style,
        )
        .unwrap()
        .bounding_rect()
        .width()
    };

    let face = fonts::font_for(FontFamily::Hand);
    let narrow = width("iiiiiiii");
    let wide = width("WWWWWWWW");
    assert!((narrow - fonts::line_width(face, FontFamily::Hand, 24.0, "iiiiiiii")).abs() < 1e-9);
    if face.is_some() {
        assert!(narrow < wide, "narrow {narrow} vs wide {wide}");
    } else {
        assert_eq!(narrow, wide);
    }
}
