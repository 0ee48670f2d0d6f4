//! Hand-drawn primitive generator.
//!
//! Turns shape geometry into sketchy strokes and pattern fills. Every
//! function here is pure: the only randomness comes from a [`RoughRng`]
//! seeded with the shape's stored seed, so the same geometry, options and
//! zoom always produce the same primitives.

use std::sync::Arc;

use ::image::RgbaImage;
use inkfield_core::constants::MAX_FILL_DOTS;
use inkfield_core::{BoundingRect, FillStyle, FontFamily, Point};

use crate::model::{RoughOptions, SharedOptions};

/// Stroke parameters of a polyline, widths in world units.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSpec {
    pub color: String,
    pub width: f64,
    pub dash: Vec<f64>,
}

/// A backend-neutral drawing instruction in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<Point>,
        stroke: StrokeSpec,
    },
    FillPolygon {
        points: Vec<Point>,
        color: String,
    },
    Dot {
        center: Point,
        radius: f64,
        color: String,
    },
    /// Many same-colored dots, drawn as one path.
    Dots {
        centers: Vec<Point>,
        radius: f64,
        color: String,
    },
    Text {
        origin: Point,
        lines: Vec<String>,
        font: FontFamily,
        size: f64,
        color: String,
    },
    Image {
        raster: Arc<RgbaImage>,
        rect: BoundingRect,
    },
    /// Stand-in for an image whose raster is not available yet.
    Placeholder { rect: BoundingRect },
}

/// Park-Miller style generator matching the sketch library the portable
/// seeds were produced for.
#[derive(Debug, Clone)]
pub struct RoughRng {
    state: u32,
}

impl RoughRng {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of the multiplication.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(48271);
        f64::from(self.state & 0x7fff_ffff) / 2_147_483_648.0
    }

    /// Symmetric offset in `[-amplitude, amplitude)`.
    fn offset(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// Jitter amplitude in world units, about one screen pixel.
fn roughness(zoom: f64) -> f64 {
    if zoom > 0.0 {
        1.0 / zoom
    } else {
        1.0
    }
}

fn outline_stroke(shared: &SharedOptions, rough: &RoughOptions) -> StrokeSpec {
    StrokeSpec {
        color: shared.stroke.clone(),
        width: f64::from(shared.stroke_width),
        dash: rough.stroke_line_dash.clone(),
    }
}

/// One wobbly pass along `a`–`b`.
fn sketch_segment(a: Point, b: Point, amplitude: f64, rng: &mut RoughRng) -> Vec<Point> {
    const STEPS: usize = 4;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    // Long strokes bow a little more than short ones.
    let bow = rng.offset(amplitude * (1.0 + (len / 200.0).min(2.0)));
    let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };

    (0..=STEPS)
        .map(|i| {
            let t = i as f64 / STEPS as f64;
            let arc = bow * (std::f64::consts::PI * t).sin();
            Point::new(
                a.x + dx * t + nx * arc + rng.offset(amplitude),
                a.y + dy * t + ny * arc + rng.offset(amplitude),
            )
        })
        .collect()
}

/// Two overlapping passes along a closed or open polyline.
fn sketch_polyline(
    vertices: &[Point],
    closed: bool,
    stroke: &StrokeSpec,
    amplitude: f64,
    rng: &mut RoughRng,
) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(2);
    for _ in 0..2 {
        let mut points = Vec::new();
        let count = if closed {
            vertices.len()
        } else {
            vertices.len().saturating_sub(1)
        };
        for i in 0..count {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            let mut seg = sketch_segment(a, b, amplitude, rng);
            if !points.is_empty() {
                seg.remove(0);
            }
            points.extend(seg);
        }
        if !points.is_empty() {
            out.push(Primitive::Polyline {
                points,
                stroke: stroke.clone(),
            });
        }
    }
    out
}

/// Gap between hachure lines for a stroke width.
pub fn hachure_gap(stroke_width: u32) -> f64 {
    (f64::from(stroke_width) * 4.0).max(4.0)
}

/// 45 degree lines `x + y = k` clipped to `rect`, in sweep order.
fn hachure_lines(rect: &BoundingRect, gap: f64) -> Vec<(Point, Point)> {
    let tl = rect.top_left();
    let br = rect.bottom_right();
    let mut lines = Vec::new();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return lines;
    }
    let mut k = tl.x + tl.y + gap / 2.0;
    let end = br.x + br.y;
    while k < end {
        let x_start = tl.x.max(k - br.y);
        let x_end = br.x.min(k - tl.y);
        if x_start <= x_end {
            lines.push((
                Point::new(x_start, k - x_start),
                Point::new(x_end, k - x_end),
            ));
        }
        k += gap;
    }
    lines
}

/// Dot centers on a grid spaced `gap` screen pixels apart.
///
/// The grid is widened until it holds at most [`MAX_FILL_DOTS`] cells.
fn dot_grid(
    rect: &BoundingRect,
    gap: f64,
    zoom: f64,
    amplitude: f64,
    rng: &mut RoughRng,
) -> Vec<Point> {
    let (w, h) = (rect.width(), rect.height());
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    let cells = |step: f64| (w / step).ceil() * (h / step).ceil();
    let limit = MAX_FILL_DOTS as f64;
    let mut step = gap / if zoom > 0.0 { zoom } else { 1.0 };
    if cells(step) > limit {
        step *= (cells(step) / limit).sqrt();
        while cells(step) > limit {
            step *= 1.05;
        }
    }

    let tl = rect.top_left();
    let br = rect.bottom_right();
    let mut centers = Vec::with_capacity(cells(step) as usize);
    let mut y = tl.y + step / 2.0;
    while y < br.y {
        let mut x = tl.x + step / 2.0;
        while x < br.x {
            centers.push(Point::new(x + rng.offset(amplitude), y + rng.offset(amplitude)));
            x += step;
        }
        y += step;
    }
    centers
}

fn fill_primitives(
    rect: &BoundingRect,
    shared: &SharedOptions,
    rough: &RoughOptions,
    zoom: f64,
    rng: &mut RoughRng,
) -> Vec<Primitive> {
    let amplitude = roughness(zoom);
    let gap = hachure_gap(shared.stroke_width);
    let fill_stroke = StrokeSpec {
        color: rough.fill.clone(),
        width: (f64::from(shared.stroke_width) / 2.0).max(1.0),
        dash: Vec::new(),
    };

    match rough.fill_style {
        FillStyle::Solid => vec![Primitive::FillPolygon {
            points: rect.corners().to_vec(),
            color: rough.fill.clone(),
        }],
        FillStyle::Hachure => hachure_lines(rect, gap)
            .into_iter()
            .map(|(a, b)| Primitive::Polyline {
                points: sketch_segment(a, b, amplitude, rng),
                stroke: fill_stroke.clone(),
            })
            .collect(),
        FillStyle::Zigzag => {
            let mut points = Vec::new();
            for (i, (a, b)) in hachure_lines(rect, gap).into_iter().enumerate() {
                // Alternate direction so consecutive lines join end to start.
                let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
                points.push(from.offset(rng.offset(amplitude), rng.offset(amplitude)));
                points.push(to.offset(rng.offset(amplitude), rng.offset(amplitude)));
            }
            if points.is_empty() {
                Vec::new()
            } else {
                vec![Primitive::Polyline {
                    points,
                    stroke: fill_stroke,
                }]
            }
        }
        FillStyle::Dots => {
            let centers = dot_grid(rect, gap, zoom, amplitude, rng);
            if centers.is_empty() {
                return Vec::new();
            }
            vec![Primitive::Dots {
                centers,
                // Dot size tracks the grid, which is laid out in screen pixels.
                radius: fill_stroke.width / 2.0 * amplitude,
                color: rough.fill.clone(),
            }]
        }
    }
}

/// Sketchy rectangle: pattern fill under a doubled outline.
pub fn rectangle(
    rect: &BoundingRect,
    shared: &SharedOptions,
    rough: &RoughOptions,
    zoom: f64,
) -> Vec<Primitive> {
    let amplitude = roughness(zoom);
    let mut rng = RoughRng::new(rough.seed);
    let mut out = fill_primitives(rect, shared, rough, zoom, &mut rng);
    out.extend(sketch_polyline(
        &rect.corners(),
        true,
        &outline_stroke(shared, rough),
        amplitude,
        &mut rng,
    ));
    out
}

/// Sketchy straight line; fill options do not apply.
pub fn line(
    a: Point,
    b: Point,
    shared: &SharedOptions,
    rough: &RoughOptions,
    zoom: f64,
) -> Vec<Primitive> {
    let mut rng = RoughRng::new(rough.seed);
    sketch_polyline(
        &[a, b],
        false,
        &outline_stroke(shared, rough),
        roughness(zoom),
        &mut rng,
    )
}

/// Freehand strokes are drawn exactly as recorded.
pub fn freehand(paths: &[Point], shared: &SharedOptions) -> Vec<Primitive> {
    let width = f64::from(shared.stroke_width);
    match paths {
        [] => Vec::new(),
        [single] => vec![Primitive::Dot {
            center: *single,
            radius: width / 2.0,
            color: shared.stroke.clone(),
        }],
        _ => vec![Primitive::Polyline {
            points: paths.to_vec(),
            stroke: StrokeSpec {
                color: shared.stroke.clone(),
                width,
                dash: Vec::new(),
            },
        }],
    }
}
