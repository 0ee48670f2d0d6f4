use inkfield_core::constants::MAX_FILL_DOTS;
use inkfield_core::{BoundingRect, FillStyle, Point};
use inkfield_designer::model::{RoughOptions, SharedOptions};
use inkfield_designer::rough::{self, RoughRng};
use inkfield_designer::Primitive;

fn shared() -> SharedOptions {
    SharedOptions {
        opacity: 1.0,
        stroke: "#B20000".to_string(),
        stroke_width: 3,
        zoom: 1.0,
    }
}

fn rough_options(fill_style: FillStyle, seed: u32) -> RoughOptions {
    RoughOptions {
        fill: "#A7A7A7".to_string(),
        fill_style,
        stroke_line_dash: Vec::new(),
        seed,
    }
}

fn square() -> BoundingRect {
    BoundingRect::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
}

#[test]
fn test_same_seed_same_primitives() {
    let a = rough::rectangle(&square(), &shared(), &rough_options(FillStyle::Hachure, 42), 1.0);
    let b = rough::rectangle(&square(), &shared(), &rough_options(FillStyle::Hachure, 42), 1.0);
    assert_eq!(a, b);

    let c = rough::rectangle(&square(), &shared(), &rough_options(FillStyle::Hachure, 43), 1.0);
    assert_ne!(a, c);
}

#[test]
fn test_rng_is_unit_interval() {
    let mut rng = RoughRng::new(0);
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn test_jitter_shrinks_with_zoom() {
    fn max_deviation(zoom: f64) -> f64 {
        rough::line(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            &shared(),
            &rough_options(FillStyle::Solid, 9),
            zoom,
        )
        .iter()
        .filter_map(|p| match p {
            Primitive::Polyline { points, .. } => {
                points.iter().map(|pt| pt.y.abs()).reduce(f64::max)
            }
            _ => None,
        })
        .fold(0.0, f64::max)
    }
    assert!(max_deviation(10.0) < max_deviation(1.0));
}

#[test]
fn test_solid_fill_is_single_polygon() {
    let prims = rough::rectangle(&square(), &shared(), &rough_options(FillStyle::Solid, 5), 1.0);
    let fills = prims
        .iter()
        .filter(|p| matches!(p, Primitive::FillPolygon { .. }))
        .count();
    assert_eq!(fills, 1);
    // Two outline passes.
    let outlines = prims
        .iter()
        .filter(|p| matches!(p, Primitive::Polyline { .. }))
        .count();
    assert_eq!(outlines, 2);
}

#[test]
fn test_hachure_density_follows_gap() {
    let count = |width: u32| {
        let mut options = shared();
        options.stroke_width = width;
        rough::rectangle(&square(), &options, &rough_options(FillStyle::Hachure, 5), 1.0).len()
    };
    assert!(count(1) > count(6));
    assert_eq!(rough::hachure_gap(1), 4.0);
    assert_eq!(rough::hachure_gap(6), 24.0);
}

#[test]
fn test_freehand_dot_and_polyline() {
    let dot = rough::freehand(&[Point::new(5.0, 5.0)], &shared());
    assert!(matches!(dot.as_slice(), [Primitive::Dot { radius, .. }] if *radius == 1.5));

    let stroke = rough::freehand(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)], &shared());
    assert!(matches!(stroke.as_slice(), [Primitive::Polyline { points, .. }] if points.len() == 2));

    assert!(rough::freehand(&[], &shared()).is_empty());
}

fn dots(rect: &BoundingRect, zoom: f64) -> (usize, f64) {
    let prims = rough::rectangle(rect, &shared(), &rough_options(FillStyle::Dots, 9), zoom);
    let fills: Vec<_> = prims
        .iter()
        .filter_map(|p| match p {
            Primitive::Dots { centers, radius, .. } => Some((centers.len(), *radius)),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 1, "one shared-color dot fill");
    assert!(!prims.iter().any(|p| matches!(p, Primitive::Dot { .. })));
    fills[0]
}

#[test]
fn test_dot_fill_is_capped_on_huge_rectangles() {
    let huge = BoundingRect::from_corners(Point::new(0.0, 0.0), Point::new(4000.0, 4000.0));
    let (count, _) = dots(&huge, 1.0);
    assert!(count <= MAX_FILL_DOTS, "{count} dots");
    assert!(count > MAX_FILL_DOTS / 2);

    let (zoomed_in, _) = dots(&huge, 40.0);
    assert!(zoomed_in <= MAX_FILL_DOTS);
}

#[test]
fn test_dot_spacing_is_in_screen_pixels() {
    let (near, near_radius) = dots(&square(), 2.0);
    let (far, far_radius) = dots(&square(), 1.0);
    assert_eq!(far, 64);
    assert_eq!(near, 289);
    assert!((near_radius * 2.0 - far_radius).abs() < 1e-9);
}
