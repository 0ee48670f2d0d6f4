//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between pixel coordinates (screen space) and world
//! coordinates. The stored `position` is the pan offset in screen pixels:
//! a world point `w` lands on pixel `w * zoom + position`.

use std::fmt;

use inkfield_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use inkfield_core::{BoundingRect, Point};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    position: Point,
    zoom_level: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport at the origin with zoom 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            position: Point::default(),
            zoom_level: 1.0,
            width,
            height,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the pan offset.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Pans by a delta in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.position = self.position.offset(dx, dy);
    }

    /// Sets the screen dimensions (typically called when the host resizes).
    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        } else {
            tracing::warn!("Ignoring viewport size {}x{}", width, height);
        }
    }

    /// Pan offset divided by zoom.
    pub fn scaled_position(&self) -> Point {
        Point::new(
            self.position.x / self.zoom_level,
            self.position.y / self.zoom_level,
        )
    }

    /// World coordinates of the screen's top-left corner.
    pub fn screen_origin(&self) -> Point {
        let scaled = self.scaled_position();
        Point::new(-scaled.x, -scaled.y)
    }

    /// Sets the zoom level, keeping the screen center fixed in world space.
    ///
    /// Levels outside the open interval (0.1, 50) are ignored.
    /// Returns whether the zoom changed.
    pub fn set_zoom_level(&mut self, zoom_level: f64) -> bool {
        if !(zoom_level > MIN_ZOOM && zoom_level < MAX_ZOOM) {
            tracing::warn!("Ignoring zoom level {} outside ({}, {})", zoom_level, MIN_ZOOM, MAX_ZOOM);
            return false;
        }
        let scale = zoom_level / self.zoom_level;
        self.position = Point::new(
            self.position.x * scale + (self.width / 2.0) * (1.0 - scale),
            self.position.y * scale + (self.height / 2.0) * (1.0 - scale),
        );
        self.zoom_level = zoom_level;
        true
    }

    /// Zooms in by multiplying current zoom by 1.2.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom_level(self.zoom_level * ZOOM_STEP)
    }

    /// Zooms out by dividing current zoom by 1.2.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom_level(self.zoom_level / ZOOM_STEP)
    }

    /// Converts pixel coordinates to world coordinates.
    ///
    /// Formula:
    /// ```text
    /// world = (pixel - position) / zoom
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.position.x) / self.zoom_level,
            (pixel_y - self.position.y) / self.zoom_level,
        )
    }

    /// Converts world coordinates to pixel coordinates.
    pub fn world_to_pixel(&self, world: Point) -> (f64, f64) {
        (
            world.x * self.zoom_level + self.position.x,
            world.y * self.zoom_level + self.position.y,
        )
    }

    /// Pans so `world` sits at the screen center.
    pub fn center_on(&mut self, world: Point) {
        self.position = Point::new(
            self.width / 2.0 - world.x * self.zoom_level,
            self.height / 2.0 - world.y * self.zoom_level,
        );
    }

    /// Visibility of a bounding rect against this viewport.
    pub fn is_rect_visible(&self, rect: &BoundingRect) -> bool {
        is_rect_visible(
            rect,
            self.screen_origin(),
            self.width,
            self.height,
            self.zoom_level,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(zoom: {:.2}x, position: ({:.1}, {:.1}), size: {}x{})",
            self.zoom_level, self.position.x, self.position.y, self.width, self.height
        )
    }
}

/// Closed-interval overlap of `rect` with the screen window whose top-left
/// world corner is `origin`.
///
/// Edge contact counts as visible.
pub fn is_rect_visible(
    rect: &BoundingRect,
    origin: Point,
    width: f64,
    height: f64,
    zoom: f64,
) -> bool {
    let tl = rect.top_left();
    let br = rect.bottom_right();
    let rect_end_x = origin.x + width / zoom;
    let rect_end_y = origin.y + height / zoom;
    tl.x <= rect_end_x && br.x >= origin.x && tl.y <= rect_end_y && br.y >= origin.y
}
