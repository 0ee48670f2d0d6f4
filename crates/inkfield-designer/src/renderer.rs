//! Render backends for designer shapes
//!
//! Shapes never talk to a drawing API directly. They emit [`Primitive`]s
//! through a [`RenderContext`], and a backend turns those into pixels (or
//! anything else):
//! - [`PixmapContext`]: anti-aliased raster output using tiny-skia
//! - [`RecordingContext`]: keeps every call, used to inspect what a shape draws

use image::{Rgba, RgbaImage};
use inkfield_core::{BoundingRect, FontFamily, Point};
use rusttype::{point as rt_point, OutlineBuilder, Scale};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pattern,
    Pixmap, Rect, SpreadMode, Stroke, StrokeDash, Transform,
};

use crate::canvas::Canvas;
use crate::fonts;
use crate::rough::{Primitive, StrokeSpec};
use crate::viewport::Viewport;

/// Drawing surface a shape renders onto.
pub trait RenderContext {
    /// Alpha multiplied into everything drawn until the next call.
    fn set_global_alpha(&mut self, alpha: f64);

    fn draw(&mut self, primitive: &Primitive);
}

/// One call received by a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    GlobalAlpha(f64),
    Draw(Primitive),
}

/// Backend that only records what it is asked to draw.
#[derive(Debug, Default, Clone)]
pub struct RecordingContext {
    pub calls: Vec<RenderCall>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.calls.iter().filter_map(|call| match call {
            RenderCall::Draw(p) => Some(p),
            RenderCall::GlobalAlpha(_) => None,
        })
    }

    pub fn alphas(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::GlobalAlpha(a) => Some(*a),
                RenderCall::Draw(_) => None,
            })
            .collect()
    }
}

impl RenderContext for RecordingContext {
    fn set_global_alpha(&mut self, alpha: f64) {
        self.calls.push(RenderCall::GlobalAlpha(alpha));
    }

    fn draw(&mut self, primitive: &Primitive) {
        self.calls.push(RenderCall::Draw(primitive.clone()));
    }
}

fn bg_color() -> Color {
    Color::WHITE
}

fn placeholder_color() -> Color {
    Color::from_rgba8(160, 160, 160, 255)
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
///
/// Anything else falls back to black; rendering never fails on bad input.
pub fn parse_color(value: &str) -> Color {
    fn channel(hex: &str) -> Option<u8> {
        u8::from_str_radix(hex, 16).ok()
    }

    let parsed = value.strip_prefix('#').and_then(|hex| {
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    rgb[i] = v * 17;
                }
                Some(Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255))
            }
            6 | 8 => {
                let r = channel(&hex[0..2])?;
                let g = channel(&hex[2..4])?;
                let b = channel(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    channel(&hex[6..8])?
                } else {
                    255
                };
                Some(Color::from_rgba8(r, g, b, a))
            }
            _ => None,
        }
    });

    parsed.unwrap_or_else(|| {
        tracing::warn!("Unparseable color '{}', drawing black", value);
        Color::BLACK
    })
}

/// Raster backend drawing in screen space through the viewport transform.
pub struct PixmapContext {
    pixmap: Pixmap,
    transform: Transform,
    alpha: f32,
}

impl PixmapContext {
    /// Returns `None` for a zero-sized surface.
    pub fn new(width: u32, height: u32, viewport: &Viewport) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(bg_color());

        // Transform: World -> Screen
        // pixel = world * zoom + position
        let zoom = viewport.zoom_level() as f32;
        let pos = viewport.position();
        let transform = Transform::from_row(zoom, 0.0, 0.0, zoom, pos.x as f32, pos.y as f32);

        Some(Self {
            pixmap,
            transform,
            alpha: 1.0,
        })
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut color = color;
        color.apply_opacity(self.alpha);
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        paint
    }

    fn stroke_points(&mut self, points: &[Point], spec: &StrokeSpec) {
        let mut pb = PathBuilder::new();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let mut stroke = Stroke {
            width: spec.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        if !spec.dash.is_empty() {
            let mut intervals: Vec<f32> = spec.dash.iter().map(|d| *d as f32).collect();
            // Odd dash lists repeat, as on an HTML canvas.
            if intervals.len() % 2 == 1 {
                intervals.extend_from_within(..);
            }
            stroke.dash = StrokeDash::new(intervals, 0.0);
        }

        let paint = self.paint(parse_color(&spec.color));
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }

    fn fill_points(&mut self, points: &[Point], color: &str) {
        let mut pb = PathBuilder::new();
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            let paint = self.paint(parse_color(color));
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }

    fn draw_raster(&mut self, raster: &RgbaImage, rect: &BoundingRect) {
        let (w, h) = raster.dimensions();
        let Some(mut source) = Pixmap::new(w, h) else {
            return;
        };
        for (dst, px) in source.pixels_mut().iter_mut().zip(raster.pixels()) {
            let [r, g, b, a] = px.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        let tl = rect.top_left();
        let Some(target) = Rect::from_xywh(
            tl.x as f32,
            tl.y as f32,
            rect.width() as f32,
            rect.height() as f32,
        ) else {
            return;
        };
        let to_rect = Transform::from_row(
            target.width() / w as f32,
            0.0,
            0.0,
            target.height() / h as f32,
            target.x(),
            target.y(),
        );
        let paint = Paint {
            shader: Pattern::new(
                source.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                self.alpha,
                to_rect,
            ),
            anti_alias: true,
            ..Default::default()
        };
        self.pixmap.fill_rect(target, &paint, self.transform, None);
    }

    /// Fills glyph outlines of each line; without a face each line is
    /// drawn as an underline spanning its estimated width.
    fn draw_text(
        &mut self,
        origin: Point,
        lines: &[String],
        family: FontFamily,
        size: f64,
        color: &str,
    ) {
        let font = fonts::font_for(family);
        let metrics = fonts::line_metrics(font, size);

        let Some(font) = font else {
            let spec = StrokeSpec {
                color: color.to_string(),
                width: (size / 12.0).max(1.0),
                dash: Vec::new(),
            };
            for (i, line) in lines.iter().enumerate() {
                let width = fonts::line_width(None, family, size, line);
                if width <= 0.0 {
                    continue;
                }
                let baseline = origin.y + metrics.line_height * i as f64 + metrics.ascent;
                self.stroke_points(
                    &[Point::new(origin.x, baseline), Point::new(origin.x + width, baseline)],
                    &spec,
                );
            }
            return;
        };

        let scale = Scale::uniform(size as f32);
        let mut outline = GlyphOutline(PathBuilder::new());
        for (i, line) in lines.iter().enumerate() {
            let baseline = origin.y + metrics.line_height * i as f64 + metrics.ascent;
            for glyph in font.layout(line, scale, rt_point(origin.x as f32, baseline as f32)) {
                glyph.build_outline(&mut outline);
            }
        }
        if let Some(path) = outline.0.finish() {
            let paint = self.paint(parse_color(color));
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }

    fn draw_placeholder(&mut self, rect: &BoundingRect) {
        let corners = rect.corners();
        let mut pb = PathBuilder::new();
        pb.move_to(corners[0].x as f32, corners[0].y as f32);
        for p in &corners[1..] {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: 1.0,
                dash: StrokeDash::new(vec![4.0, 4.0], 0.0),
                ..Default::default()
            };
            let paint = self.paint(placeholder_color());
            self.pixmap
                .stroke_path(&path, &paint, &stroke, self.transform, None);
        }
    }

    /// Demultiplied copy of the surface.
    pub fn into_image(self) -> RgbaImage {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let pixels = self.pixmap.pixels();
        RgbaImage::from_fn(width, height, |x, y| {
            let c = pixels[(y * width + x) as usize].demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }
}

impl RenderContext for PixmapContext {
    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0) as f32;
    }

    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Polyline { points, stroke } => self.stroke_points(points, stroke),
            Primitive::FillPolygon { points, color } => self.fill_points(points, color),
            Primitive::Dot {
                center,
                radius,
                color,
            } => {
                if let Some(path) =
                    PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32)
                {
                    let paint = self.paint(parse_color(color));
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
                }
            }
            Primitive::Dots {
                centers,
                radius,
                color,
            } => {
                let mut pb = PathBuilder::new();
                for c in centers {
                    pb.push_circle(c.x as f32, c.y as f32, *radius as f32);
                }
                if let Some(path) = pb.finish() {
                    let paint = self.paint(parse_color(color));
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
                }
            }
            Primitive::Text {
                origin,
                lines,
                font,
                size,
                color,
            } => self.draw_text(*origin, lines, *font, *size, color),
            Primitive::Image { raster, rect } => self.draw_raster(raster, rect),
            Primitive::Placeholder { rect } => self.draw_placeholder(rect),
        }
    }
}

/// Glyph outlines in world units, collected into one tiny-skia path.
struct GlyphOutline(PathBuilder);

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

/// Render the visible part of a canvas at its viewport size.
pub fn render_canvas(canvas: &Canvas) -> RgbaImage {
    let viewport = canvas.viewport();
    let width = viewport.width().round().max(0.0) as u32;
    let height = viewport.height().round().max(0.0) as u32;
    let Some(mut ctx) = PixmapContext::new(width, height, viewport) else {
        return RgbaImage::new(width, height);
    };
    canvas.render(&mut ctx);
    ctx.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_forms() {
        let red = parse_color("#ff0000");
        assert_eq!(red.to_color_u8().red(), 255);
        assert_eq!(red.to_color_u8().green(), 0);

        let short = parse_color("#0f0");
        assert_eq!(short.to_color_u8().green(), 255);

        let translucent = parse_color("#0000ff80");
        assert_eq!(translucent.to_color_u8().alpha(), 0x80);
    }

    #[test]
    fn test_parse_color_falls_back_to_black() {
        assert_eq!(parse_color("tomato"), Color::BLACK);
        assert_eq!(parse_color("#12"), Color::BLACK);
        assert_eq!(parse_color("#zzzzzz"), Color::BLACK);
    }

    #[test]
    fn test_pixmap_draws_in_screen_space() {
        let mut viewport = Viewport::new(40.0, 40.0);
        viewport.set_position(Point::new(10.0, 10.0));
        let mut ctx = PixmapContext::new(40, 40, &viewport).unwrap();
        ctx.draw(&Primitive::FillPolygon {
            points: BoundingRect::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0))
                .corners()
                .to_vec(),
            color: "#000000".to_string(),
        });
        let img = ctx.into_image();
        // World (5, 5) lands on pixel (15, 15).
        assert_eq!(img.get_pixel(15, 15).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_sized_surface() {
        assert!(PixmapContext::new(0, 10, &Viewport::default()).is_none());
    }

    #[test]
    fn test_recording_context_keeps_order() {
        let mut ctx = RecordingContext::new();
        ctx.set_global_alpha(0.5);
        ctx.draw(&Primitive::Placeholder {
            rect: BoundingRect::from_corners(Point::default(), Point::default()),
        });
        assert_eq!(ctx.alphas(), vec![0.5]);
        assert_eq!(ctx.primitives().count(), 1);
        assert!(matches!(ctx.calls[0], RenderCall::GlobalAlpha(_)));
    }

    #[test]
    fn test_text_leaves_ink_inside_its_bounds() {
        let viewport = Viewport::new(200.0, 60.0);
        let mut ctx = PixmapContext::new(200, 60, &viewport).unwrap();
        ctx.draw(&Primitive::Text {
            origin: Point::new(4.0, 4.0),
            lines: vec!["WWWW".to_string()],
            font: FontFamily::Code,
            size: 32.0,
            color: "#000000".to_string(),
        });
        let img = ctx.into_image();
        let face = fonts::font_for(FontFamily::Code);
        let width = fonts::line_width(face, FontFamily::Code, 32.0, "WWWW");
        let right = (4.0 + width).ceil().min(200.0) as u32;

        let ink = |x0: u32, x1: u32| {
            (x0..x1)
                .flat_map(|x| (0..60).map(move |y| (x, y)))
                .filter(|&(x, y)| img.get_pixel(x, y).0[0] < 128)
                .count()
        };
        assert!(ink(0, right) > 0);
        assert_eq!(ink(right + 4, 200), 0);
    }
}
